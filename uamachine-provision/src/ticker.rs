//! Periodic mutation of a state cell.
//!
//! The ticker runs as a tokio task and adds a fixed step to its cell once per
//! interval. Each tick is a single locked update, so ticks never overlap.
//! Missed ticks are replayed rather than skipped, keeping the count exact.

use crate::cell::StateCell;
use crate::error::{ProvisionError, ProvisionResult};
use std::ops::Add;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Spawns periodic increments of a [`StateCell`].
pub struct Ticker;

impl Ticker {
    /// Starts incrementing `cell` by `step` every `period`. The first
    /// increment happens one full period after this call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T>(period: Duration, cell: StateCell<T>, step: T) -> ProvisionResult<TickerHandle>
    where
        T: Add<Output = T> + Copy + Send + 'static,
    {
        if period.is_zero() {
            return Err(ProvisionError::InvalidConfig(
                "tick interval must be non-zero".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|_| ProvisionError::NoRuntime)?;
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ticks);
        let start = Instant::now() + period;

        let task = runtime.spawn(async move {
            let mut interval = time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        cell.update(|v| v + step);
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
            counter.load(Ordering::Relaxed)
        });

        info!("Ticker started ({:?} interval)", period);
        Ok(TickerHandle {
            stop: Some(stop_tx),
            task,
            ticks,
        })
    }
}

/// Owner of a running ticker. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct TickerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
    ticks: Arc<AtomicU64>,
}

impl TickerHandle {
    /// Ticks performed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the ticker, waits for the task to exit and returns the total
    /// number of ticks performed.
    pub async fn stop(mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let total = match (&mut self.task).await {
            Ok(total) => total,
            Err(e) => {
                debug!("Ticker task ended abnormally: {}", e);
                self.ticks()
            }
        };
        info!("Ticker stopped after {} ticks", total);
        total
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
