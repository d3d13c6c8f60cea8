use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

use crate::error::MirrorError;
use crate::mirror::FetchSummary;
use crate::shared::SharedMirror;

pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(60);

/// Refreshes the mirror on a fixed interval for the life of the process
pub struct SyncWorker {
    mirror: SharedMirror,
    interval: Duration,
}

impl SyncWorker {
    pub fn new(mirror: SharedMirror, interval: Duration) -> Self {
        Self { mirror, interval }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately and the mirror was fetched at startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(err) = self.sync_once().await {
                error!("Background fetch failed, serving previous mirror state: {}", err);
            }
        }
    }

    /// Run a single refresh cycle off the async runtime
    pub async fn sync_once(&self) -> Result<FetchSummary, MirrorError> {
        let mirror = self.mirror.clone();
        let summary = tokio::task::spawn_blocking(move || mirror.refresh())
            .await
            .map_err(|err| MirrorError::Task(err.to_string()))??;

        debug!(
            "Fetched {} objects, {} bytes",
            summary.received_objects, summary.received_bytes
        );
        Ok(summary)
    }
}
