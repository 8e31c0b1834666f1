use std::sync::Arc;
use std::time::Duration;
use boxoffice_core::SeatRepository;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn the periodic expiry sweep.
///
/// Request handlers already sweep before every operation; this keeps an idle
/// inventory clean. The first sweep runs one full `every` after start.
///
/// # Panics
///
/// Panics if `every` is zero.
pub fn start_expiry_sweeper(repo: Arc<dyn SeatRepository>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        info!("Expiry sweeper started, running every {:?}", every);

        loop {
            ticker.tick().await;
            match repo.release_expired_locks().await {
                0 => debug!("Expiry sweep found no stale locks"),
                released => info!("Expiry sweep released {} stale lock(s)", released),
            }
        }
    })
}
