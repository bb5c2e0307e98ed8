use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use log::{debug, error, info, warn};

use fix_core::{Decoder, FieldDictionary, fast_project};

use crate::config::{ConcurrencyMode, DriverConfig, default_pool_size};
use crate::pool::{self, InFlightLimit};
use crate::stats::{RunReport, RunStats};

/// Состояние драйвера; переходы только вперёд
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DriverState {
    Idle,
    Running,
    Draining,
    Done,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DriverState::Idle => "idle",
            DriverState::Running => "running",
            DriverState::Draining => "draining",
            DriverState::Done => "done",
        };
        f.write_str(s)
    }
}

fn enter(state: &mut DriverState, next: DriverState) {
    debug!("driver: {state} -> {next}");
    *state = next;
}

/// Всё, что нужно одной единице работы. Разделяется между воркерами по ссылке.
struct UnitContext {
    decoder: Decoder,
    stats: RunStats,
    log_messages: bool,
    fast_path: bool,
}

impl UnitContext {
    /// decode + учёт результата. Ошибка одной записи не влияет на остальные.
    fn handle_record(&self, seq: u64, record: &str) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(seq, record)));
        match outcome {
            Ok(true) => self.stats.record_parsed(),
            Ok(false) => self.stats.record_failed(),
            Err(_) => {
                error!("record #{seq}: decoder panicked");
                self.stats.record_failed();
            }
        }
    }

    fn evaluate(&self, seq: u64, record: &str) -> bool {
        if self.fast_path {
            return match fast_project(record) {
                Ok(p) => {
                    if self.log_messages {
                        info!("{p}");
                    }
                    true
                }
                Err(e) => {
                    warn!("record #{seq} rejected: {e}");
                    false
                }
            };
        }

        let msg = self.decoder.decode(record);
        if !msg.is_valid() {
            let reason = msg
                .errors()
                .first()
                .map(ToString::to_string)
                .unwrap_or_default();
            warn!("record #{seq} rejected: {reason}");
            return false;
        }

        if self.log_messages {
            match msg.projection() {
                Ok(p) => info!("{p}"),
                Err(e) => debug!("record #{seq}: nothing to show: {e}"),
            }
        }
        true
    }
}

/// Драйвер прогона: читает записи, раздаёт работу, дожидается завершения.
pub(crate) struct DispatchDriver {
    cfg: DriverConfig,
    dict: Arc<FieldDictionary>,
    state: DriverState,
}

impl DispatchDriver {
    pub(crate) fn new(cfg: DriverConfig, dict: Arc<FieldDictionary>) -> Self {
        Self {
            cfg,
            dict,
            state: DriverState::Idle,
        }
    }

    pub(crate) fn state(&self) -> DriverState {
        self.state
    }

    /// Один прогон по источнику записей.
    ///
    /// Ошибка чтения источника прерывает подачу новых записей, но уже
    /// отправленные дорабатываются до конца, и только потом ошибка
    /// возвращается наружу.
    pub(crate) fn run<I>(&mut self, records: I) -> anyhow::Result<RunReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        if self.state != DriverState::Idle {
            anyhow::bail!("driver already used (state: {})", self.state);
        }

        let ctx = UnitContext {
            decoder: Decoder::new(self.dict.clone(), self.cfg.decode),
            stats: RunStats::new(),
            log_messages: self.cfg.log_messages,
            fast_path: self.cfg.fast_path,
        };
        let capacity = self.cfg.queue_capacity.map(|c| c.get());

        enter(&mut self.state, DriverState::Running);
        let fed = match self.cfg.mode {
            ConcurrencyMode::Sync => {
                info!("single threaded synchronous parsing");
                let res = feed(records, &ctx.stats, |seq, record| {
                    ctx.handle_record(seq, &record);
                    Ok(())
                });
                enter(&mut self.state, DriverState::Draining);
                res
            }
            ConcurrencyMode::WorkStealing { threads } => {
                run_work_stealing(&ctx, records, threads.map(|t| t.get()), capacity, &mut self.state)?
            }
            ConcurrencyMode::Fixed { threads } => {
                let threads = threads.map_or_else(default_pool_size, |t| t.get());
                run_fixed(&ctx, records, threads, capacity, &mut self.state)?
            }
        };

        let report = ctx.stats.finish();
        enter(&mut self.state, DriverState::Done);

        fed?;
        Ok(report)
    }
}

/// Подача записей: `read` растёт в порядке источника
fn feed<I, S>(records: I, stats: &RunStats, mut submit: S) -> anyhow::Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
    S: FnMut(u64, String) -> anyhow::Result<()>,
{
    for record in records {
        let record = record.context("read record from source")?;
        let seq = stats.record_read();
        submit(seq, record)?;
    }
    Ok(())
}

fn run_work_stealing<I>(
    ctx: &UnitContext,
    records: I,
    threads: Option<usize>,
    capacity: Option<usize>,
    state: &mut DriverState,
) -> anyhow::Result<anyhow::Result<()>>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let ws = pool::work_stealing_pool(threads)?;
    info!(
        "work-stealing pool: threads={} queue_capacity={:?}",
        ws.current_num_threads(),
        capacity
    );
    let limit = capacity.map(InFlightLimit::new);
    let limit = limit.as_ref();

    // in_place_scope возвращается, только когда все задачи завершены
    let fed = ws.in_place_scope(|s| {
        let res = feed(records, &ctx.stats, |seq, record| {
            if let Some(l) = limit {
                l.acquire();
            }
            s.spawn(move |_| {
                ctx.handle_record(seq, &record);
                if let Some(l) = limit {
                    l.release();
                }
            });
            Ok(())
        });
        enter(state, DriverState::Draining);
        if let Some(l) = limit {
            debug!("draining: {} jobs in flight", l.in_flight());
        }
        res
    });
    Ok(fed)
}

fn run_fixed<I>(
    ctx: &UnitContext,
    records: I,
    threads: usize,
    capacity: Option<usize>,
    state: &mut DriverState,
) -> anyhow::Result<anyhow::Result<()>>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    info!("fixed pool: threads={threads} queue_capacity={capacity:?}");
    let work = |seq: u64, record: &str| ctx.handle_record(seq, record);

    thread::scope(|s| {
        let (tx, rx) = pool::job_queue(capacity);
        let workers = pool::spawn_workers(s, threads, &rx, &work).context("spawn worker threads")?;
        drop(rx);

        let fed = feed(records, &ctx.stats, |seq, record| {
            tx.send((seq, record))
                .map_err(|_| anyhow::anyhow!("all workers are gone"))
        });

        enter(state, DriverState::Draining);
        debug!("draining: {} jobs queued", tx.len());
        // закрытая очередь = сигнал воркерам завершиться
        drop(tx);
        pool::join_workers(workers);
        Ok(fed)
    })
}
