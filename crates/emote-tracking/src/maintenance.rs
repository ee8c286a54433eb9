//! Nightly purge of daily buckets that fell out of the retention window.

use crate::store::EmoteStore;
use chrono::{DateTime, Days, Local, TimeZone};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Fallback delay when the next local midnight cannot be resolved.
const FALLBACK_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Time from `now` until one second past the next local midnight.
pub fn delay_until_next_run<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next_run = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 1))
        .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest());

    next_run
        .and_then(|at| (at - now.clone()).to_std().ok())
        .unwrap_or(FALLBACK_DELAY)
}

/// Runs the purge loop until `shutdown` is cancelled. `next_delay` is
/// consulted before every run.
pub async fn run_daily_purge<S, F>(
    store: Arc<S>,
    retention_days: u32,
    shutdown: CancellationToken,
    next_delay: F,
) where
    S: EmoteStore + ?Sized,
    F: Fn() -> Duration + Send,
{
    loop {
        let delay = next_delay();
        debug!("Next daily purge in {:?}", delay);

        tokio::select! {
            () = shutdown.cancelled() => {
                info!("Daily purge stopped");
                return;
            }
            () = tokio::time::sleep(delay) => {}
        }

        match store.purge_older_than(retention_days).await {
            Ok(removed) => info!("Purged {} stale daily counts", removed),
            Err(e) => error!("Daily purge failed: {}", e),
        }
    }
}

/// Spawns the purge loop, scheduled for shortly after each local midnight.
pub fn spawn_daily_purge(
    store: Arc<dyn EmoteStore>,
    retention_days: u32,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_daily_purge(store, retention_days, shutdown, || {
            delay_until_next_run(&Local::now())
        })
        .await;
    })
}
