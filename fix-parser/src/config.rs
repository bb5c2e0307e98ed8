use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use fix_core::DecodeOptions;

use crate::cli::{Mode, ParseArgs};

pub(crate) const DEFAULT_DATA_FILENAME: &str = "example-fix-data.bin";

pub(crate) const DEFAULT_SYMBOLS: &str = "EURUSD,USDJPY,GBPUSD,AUDUSD,USDCHF";

/// Модель исполнения единиц работы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConcurrencyMode {
    /// всё на вызывающем потоке
    Sync,
    /// общий work-stealing пул (rayon)
    WorkStealing { threads: Option<NonZeroUsize> },
    /// фиксированный пул воркеров с общей очередью
    Fixed { threads: Option<NonZeroUsize> },
}

impl ConcurrencyMode {
    pub(crate) fn from_cli(mode: Mode, threads: Option<NonZeroUsize>) -> Self {
        match mode {
            Mode::Sync => ConcurrencyMode::Sync,
            Mode::WorkStealing => ConcurrencyMode::WorkStealing { threads },
            Mode::Fixed => ConcurrencyMode::Fixed { threads },
        }
    }
}

/// max(1, ядра - 1): одно ядро оставляем читателю записей
pub(crate) fn default_pool_size() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).max(1))
        .unwrap_or(1)
}

/// Неизменяемая конфигурация прогона; собирается один раз в `main`
#[derive(Debug, Clone)]
pub(crate) struct DriverConfig {
    pub(crate) mode: ConcurrencyMode,
    pub(crate) decode: DecodeOptions,
    /// логировать проекцию каждого валидного сообщения
    pub(crate) log_messages: bool,
    /// `None` — очередь без ограничений, `Some(n)` — submit блокируется
    pub(crate) queue_capacity: Option<NonZeroUsize>,
    /// однопроходная проекция вместо полного разбора
    pub(crate) fast_path: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: ConcurrencyMode::Sync,
            decode: DecodeOptions::default(),
            log_messages: true,
            queue_capacity: None,
            fast_path: false,
        }
    }
}

impl DriverConfig {
    pub(crate) fn from_args(args: &ParseArgs) -> Self {
        Self {
            mode: ConcurrencyMode::from_cli(args.mode, args.threads),
            decode: DecodeOptions {
                validate_checksum: !args.no_checksum,
                validate_syntax: args.strict_syntax,
            },
            log_messages: !args.quiet,
            queue_capacity: args.queue_capacity,
            fast_path: args.fast,
        }
    }
}

pub(crate) fn input_path(args: &ParseArgs) -> PathBuf {
    args.file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILENAME))
}

/// Список инструментов из строки вида "eurusd, USDJPY, ,gbpusd".
/// Результат отсортирован, без повторов, в верхнем регистре.
pub(crate) fn parse_symbols_csv(raw: &str) -> Vec<String> {
    let mut set = BTreeSet::new();

    for part in raw.split(',') {
        let s = part.trim();
        if s.is_empty() {
            continue;
        }
        set.insert(s.to_ascii_uppercase());
    }

    set.into_iter().collect()
}
