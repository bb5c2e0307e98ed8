use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Счётчики одного прогона. Инкременты атомарные: их трогают воркеры пула.
#[derive(Debug)]
pub(crate) struct RunStats {
    read: AtomicU64,
    parsed: AtomicU64,
    failed: AtomicU64,
    started: Instant,
}

impl RunStats {
    pub(crate) fn new() -> Self {
        Self {
            read: AtomicU64::new(0),
            parsed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Возвращает порядковый номер прочитанной записи (с 1)
    pub(crate) fn record_read(&self) -> u64 {
        self.read.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn record_parsed(&self) {
        self.parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Снимок на момент окончания прогона
    pub(crate) fn finish(&self) -> RunReport {
        RunReport {
            read: self.read.load(Ordering::Acquire),
            parsed: self.parsed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            elapsed: self.started.elapsed(),
        }
    }
}

/// Итог прогона
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RunReport {
    pub(crate) read: u64,
    pub(crate) parsed: u64,
    pub(crate) failed: u64,
    pub(crate) elapsed: Duration,
}

impl RunReport {
    /// Разобранных сообщений в секунду
    pub(crate) fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.parsed as f64 / secs
    }

    pub(crate) fn is_balanced(&self) -> bool {
        self.parsed + self.failed == self.read
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read={} parsed={} failed={} elapsed_ms={} msg_per_sec={:.2}",
            self.read,
            self.parsed,
            self.failed,
            self.elapsed.as_millis(),
            self.throughput()
        )
    }
}
