use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::config;

/// FIX Parser - разбирает поток FIX-снимков котировок и считает статистику.
#[derive(Parser, Debug, Clone)]
#[command(name = "fix-parser", version, about)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Разобрать файл с записями и вывести итоговую статистику
    Parse(ParseArgs),
    /// Сгенерировать файл с тестовыми записями
    Generate(GenerateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// синхронно на основном потоке
    Sync,
    /// work-stealing пул
    WorkStealing,
    /// фиксированный пул потоков
    Fixed,
}

#[derive(ClapArgs, Debug, Clone)]
pub(crate) struct ParseArgs {
    /// Файл с записями (по умолчанию example-fix-data.bin)
    pub(crate) file: Option<PathBuf>,

    /// Не логировать каждое разобранное сообщение
    #[arg(long, short)]
    pub(crate) quiet: bool,

    /// Модель исполнения
    #[arg(long, value_enum, default_value_t = Mode::Sync)]
    pub(crate) mode: Mode,

    /// Размер пула (по умолчанию: ядра - 1)
    #[arg(long)]
    pub(crate) threads: Option<NonZeroUsize>,

    /// Ограничить очередь пула; submit блокируется, пока есть место
    #[arg(long)]
    pub(crate) queue_capacity: Option<NonZeroUsize>,

    /// Не проверять контрольную сумму
    #[arg(long)]
    pub(crate) no_checksum: bool,

    /// Проверять, что теги - целые числа
    #[arg(long)]
    pub(crate) strict_syntax: bool,

    /// Однопроходная проекция без полного разбора
    #[arg(long, conflicts_with_all = ["no_checksum", "strict_syntax"])]
    pub(crate) fast: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub(crate) struct GenerateArgs {
    /// Куда писать записи
    #[arg(long)]
    pub(crate) out: PathBuf,

    /// Сколько записей сгенерировать
    #[arg(long, default_value_t = 10)]
    pub(crate) count: usize,

    /// Сколько записей испортить (один байт, сумма перестаёт сходиться)
    #[arg(long, default_value_t = 0)]
    pub(crate) corrupt: usize,

    /// Инструменты через запятую, например "EURUSD,USDJPY"
    #[arg(long, default_value = config::DEFAULT_SYMBOLS)]
    pub(crate) symbols: String,
}
