//! Cache Maintenance Task
//!
//! Background task that periodically removes expired cache entries and logs
//! cache statistics.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Handle to a running maintenance task.
///
/// The task stops on [`stop`](Self::stop) or when the handle is dropped, so
/// its lifetime is bound to whoever started it.
#[derive(Debug)]
pub struct MaintenanceHandle {
    handle: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Stops the task. Safe to call more than once.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for MaintenanceHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Cadence is best-effort: the sweep only reclaims memory, and reads never
/// depend on it having run.
///
/// # Example
/// ```ignore
/// let cache = cache::shared(CacheStore::<String>::new(500, Duration::from_secs(300)));
/// let maintenance = spawn_cleanup_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// maintenance.stop();
/// ```
pub fn spawn_cleanup_task<V>(cache: SharedCache<V>, interval: Duration) -> MaintenanceHandle
where
    V: Clone + Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        info!(
            "Starting cache maintenance task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.stats())
            };

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
            info!("Cache stats: {}", stats);
        }
    });

    MaintenanceHandle { handle }
}
