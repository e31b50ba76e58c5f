//! Single-instance progress ticker
//!
//! The ticker is keyed on the transport fields it depends on. Any change to
//! the key tears the running task down before a replacement is armed, and
//! every task carries the generation it was armed with; a tick whose
//! generation is stale is discarded. Together these keep at most one ticker
//! effective at any time.

use crate::types::TickerKey;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct Armed {
    key: TickerKey,
    handle: JoinHandle<()>,
}

/// Owner of the (at most one) ticker task
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    generation: u64,
    armed: Option<Armed>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            armed: None,
        }
    }

    /// Generation of the most recent arm/disarm
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Whether a task armed with `generation` may still apply ticks
    pub fn is_current(&self, generation: u64) -> bool {
        self.armed.is_some() && self.generation == generation
    }

    /// Bring the ticker in line with `key`
    ///
    /// Unchanged key: nothing happens. Changed key: the running task is
    /// aborted, then `spawn` is called with the new generation and the
    /// period if `key` says a ticker should run.
    pub fn sync<F>(&mut self, key: TickerKey, spawn: F)
    where
        F: FnOnce(u64, Duration) -> JoinHandle<()>,
    {
        if self.armed.as_ref().is_some_and(|armed| armed.key == key) {
            return;
        }

        self.disarm();

        if key.should_run() {
            let handle = spawn(self.generation, self.period);
            tracing::trace!(generation = self.generation, "Ticker armed");
            self.armed = Some(Armed { key, handle });
        }
    }

    /// Abort the running task, if any, and invalidate its generation
    pub fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
            tracing::trace!(generation = self.generation, "Ticker disarmed");
        }
        self.generation += 1;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
        }
    }
}
