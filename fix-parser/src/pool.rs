use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::warn;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Задача для фиксированного пула: (номер записи, запись)
pub(crate) type Job = (u64, String);

/// Очередь фиксированного пула: без ограничений или с блокирующим send
pub(crate) fn job_queue(capacity: Option<usize>) -> (Sender<Job>, Receiver<Job>) {
    match capacity {
        Some(cap) => crossbeam_channel::bounded(cap),
        None => crossbeam_channel::unbounded(),
    }
}

/// Поднимает `threads` воркеров, каждый разгребает общую очередь,
/// пока все отправители не закрыты.
pub(crate) fn spawn_workers<'scope, 'env, F>(
    scope: &'scope Scope<'scope, 'env>,
    threads: usize,
    rx: &Receiver<Job>,
    work: &'env F,
) -> io::Result<Vec<ScopedJoinHandle<'scope, ()>>>
where
    F: Fn(u64, &str) + Sync,
{
    (0..threads)
        .map(|i| {
            let rx = rx.clone();
            thread::Builder::new()
                .name(format!("fix-worker-{i}"))
                .spawn_scoped(scope, move || {
                    for (seq, record) in rx {
                        work(seq, &record);
                    }
                })
        })
        .collect()
}

/// Дожидается воркеров; паника воркера не роняет прогон
pub(crate) fn join_workers(handles: Vec<ScopedJoinHandle<'_, ()>>) {
    for h in handles {
        if let Err(panic) = h.join() {
            warn!("worker thread panicked: {:?}", panic);
        }
    }
}

/// Work-stealing пул; `None` — по числу ядер
pub(crate) fn work_stealing_pool(threads: Option<usize>) -> anyhow::Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("fix-ws-{i}"))
        .build()?;
    Ok(pool)
}

/// Ограничение числа задач "в полёте" для пула без собственной очереди.
///
/// Слот занимается перед отправкой задачи и освобождается по её завершении;
/// `acquire` блокируется, пока все слоты заняты.
pub(crate) struct InFlightLimit {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl InFlightLimit {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self { tx, rx }
    }

    pub(crate) fn acquire(&self) {
        // rx живёт вместе с self, поэтому send не может вернуть Disconnected
        let _ = self.tx.send(());
    }

    pub(crate) fn release(&self) {
        let _ = self.rx.try_recv();
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.tx.len()
    }
}
