//! Bounded parallelism: a counting admission gate plus a join barrier.
//!
//! Each item runs `work` on tokio's blocking pool. A task may only start after
//! acquiring a semaphore permit and gives it back when it finishes, so at most
//! `limit` tasks run at once and a free slot is reused as soon as any task
//! completes. `run` returns only after every dispatched task has finished or
//! the optional deadline fires. Blocking tasks cannot be aborted, so the
//! deadline also sets the caller's [`CancelFlag`] for the work to observe.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::cancel::CancelFlag;
use tokio::task::JoinSet;
use tracing::warn;

/// How one item's task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<R> {
    Done(R),
    /// The task panicked.
    Failed(String),
    /// The run deadline fired before the task finished (or started).
    TimedOut,
}

impl<R> Completion<R> {
    pub fn done(self) -> Option<R> {
        match self {
            Completion::Done(r) => Some(r),
            _ => None,
        }
    }
}

/// Reusable bounded worker pool.
#[derive(Debug, Clone, Copy)]
pub struct BoundedPool {
    limit: usize,
}

impl BoundedPool {
    /// Pool admitting at most `limit` concurrent tasks (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Runs `work` for every item and returns completions in input order.
    ///
    /// When `deadline` fires, `cancel` is set, nothing further is dispatched
    /// and unfinished items complete as [`Completion::TimedOut`].
    pub async fn run<T, R, F>(
        &self,
        items: Vec<T>,
        deadline: Option<Duration>,
        cancel: &CancelFlag,
        work: Arc<F>,
    ) -> Vec<Completion<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let mut slots: Vec<Completion<R>> =
            items.iter().map(|_| Completion::TimedOut).collect();
        let gate = Arc::new(Semaphore::new(self.limit));
        let mut join_set: JoinSet<(usize, Result<R, String>)> = JoinSet::new();

        let drive = dispatch_and_join(&gate, items, &work, &mut join_set, &mut slots);
        match deadline {
            Some(d) => {
                if tokio::time::timeout(d, drive).await.is_err() {
                    warn!(
                        deadline_ms = d.as_millis() as u64,
                        still_running = join_set.len(),
                        "run deadline exceeded, cancelling outstanding tasks"
                    );
                    cancel.cancel();
                    join_set.abort_all();
                }
            }
            None => drive.await,
        }

        slots
    }
}

/// Available hardware parallelism, or 4 when it cannot be determined.
pub fn default_limit() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

async fn dispatch_and_join<T, R, F>(
    gate: &Arc<Semaphore>,
    items: Vec<T>,
    work: &Arc<F>,
    join_set: &mut JoinSet<(usize, Result<R, String>)>,
    slots: &mut [Completion<R>],
) where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    for (index, item) in items.into_iter().enumerate() {
        // Dispatch waits here while `limit` tasks hold permits; finished
        // tasks are collected in the meantime.
        let permit = loop {
            tokio::select! {
                acquired = Arc::clone(gate).acquire_owned() => match acquired {
                    Ok(permit) => break permit,
                    Err(_) => return,
                },
                Some(joined) = join_set.join_next(), if !join_set.is_empty() => {
                    record(joined, slots);
                }
            }
        };
        let work = Arc::clone(work);
        join_set.spawn_blocking(move || {
            let _permit = permit;
            let result = panic::catch_unwind(AssertUnwindSafe(|| work(item)))
                .map_err(|_| "probe task panicked".to_string());
            (index, result)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        record(joined, slots);
    }
}

fn record<R>(
    joined: Result<(usize, Result<R, String>), tokio::task::JoinError>,
    slots: &mut [Completion<R>],
) {
    match joined {
        Ok((index, Ok(result))) => slots[index] = Completion::Done(result),
        Ok((index, Err(msg))) => {
            warn!(index, "{}", msg);
            slots[index] = Completion::Failed(msg);
        }
        Err(e) => warn!(error = %e, "pool task failed to join"),
    }
}
