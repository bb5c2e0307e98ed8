//! Точка входа `fix-parser`.
//!
//! Жизненный цикл `parse`:
//! - парсинг CLI и сборка неизменяемой конфигурации прогона
//! - чтение записей из файла (по маркеру `8=FIX.`)
//! - разбор записей выбранной моделью исполнения
//! - ожидание всех задач и итоговая статистика
//!
//! `generate` пишет файл с тестовыми записями.

mod cli;
mod config;
mod dispatch;
mod generator;
mod pool;
mod stats;

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fix_core::FieldDictionary;
use fix_core::source::read_records_from_path;
use log::{debug, info, warn};

use crate::cli::{Command, GenerateArgs, ParseArgs};
use crate::config::DriverConfig;
use crate::dispatch::DispatchDriver;
use crate::generator::{GeneratorConfig, SnapshotGenerator};
use crate::stats::RunReport;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG, по умолчанию info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();

    match args.command {
        Command::Parse(p) => run_parse(&p),
        Command::Generate(g) => run_generate(&g),
    }
}

fn run_parse(args: &ParseArgs) -> anyhow::Result<()> {
    let path = config::input_path(args);
    if args.file.is_none() {
        warn!(
            "no input file given; parsing default data file {}",
            path.display()
        );
    }

    let cfg = DriverConfig::from_args(args);
    info!("starting to parse {} ({:?})", path.display(), cfg.mode);

    let records = read_records_from_path(&path)
        .with_context(|| format!("open input file {}", path.display()))?;

    // словарь строится один раз и дальше только читается
    let dict = Arc::new(FieldDictionary::new());
    let mut driver = DispatchDriver::new(cfg, dict);
    let report = driver.run(records)?;
    debug!("driver state: {}", driver.state());

    if !report.is_balanced() {
        warn!("counters do not add up: {report}");
    }
    log_report(&report);
    println!("{report}");
    Ok(())
}

fn log_report(report: &RunReport) {
    info!("------------------------------------------------------------------");
    info!("Total execution time was = {} (ms)", report.elapsed.as_millis());
    info!("Total messages read = {}", report.read);
    info!("Total messages parsed = {}", report.parsed);
    info!("Failed to parse = {}", report.failed);
    info!("Messages parsed/second = {:.2}", report.throughput());
    info!("------------------------------------------------------------------");
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let symbols = config::parse_symbols_csv(&args.symbols);
    if symbols.is_empty() {
        anyhow::bail!("symbols list is empty (--symbols value: {:?})", args.symbols);
    }

    let mut generator = SnapshotGenerator::new(symbols, GeneratorConfig::default());
    let records = generator.batch(args.count, args.corrupt);

    fs::write(&args.out, records.concat())
        .with_context(|| format!("write {}", args.out.display()))?;

    info!(
        "wrote {} records ({} corrupted) to {}",
        records.len(),
        args.corrupt.min(records.len()),
        args.out.display()
    );
    Ok(())
}
