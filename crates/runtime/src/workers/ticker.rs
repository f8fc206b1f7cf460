//! Fixed-interval battle loop.
//!
//! Advances the battle by the configured interval on every tick until the
//! battle worker goes away or the task is aborted.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::api::RuntimeHandle;

pub struct TickWorker {
    interval: Duration,
    handle: RuntimeHandle,
}

impl TickWorker {
    pub fn new(interval: Duration, handle: RuntimeHandle) -> Self {
        Self { interval, handle }
    }

    pub async fn run(self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of `interval` completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.handle.advance(self.interval).await {
                Ok(report) if !report.is_empty() => {
                    trace!(completed = ?report.completed, "tick");
                }
                Ok(_) => {}
                Err(error) => {
                    debug!(%error, "TickWorker stopped");
                    break;
                }
            }
        }
    }
}
