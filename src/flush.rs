use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::storage::Storage;
use crate::store::TaskStore;

pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(300);

pub struct FlushHandle {
    stop: Arc<Notify>,
    task: JoinHandle<()>,
}

impl FlushHandle {
    /// Writes any pending generation and stops the loop. Clean exit is the
    /// one point where durable storage is guaranteed to match memory.
    pub async fn shutdown(self) {
        self.stop.notify_one();
        let _ = self.task.await;
    }
}

/// Spawns the background writer. Each tick compares the store generation with
/// the last one written and snapshots both files when storage is behind, so
/// rapid successive mutations coalesce into a single write. Mutating callers
/// never wait on this.
pub fn start_flusher(store: TaskStore, storage: Storage, interval: Duration) -> FlushHandle {
    let stop = Arc::new(Notify::new());
    let stop_signal = stop.clone();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut written = store.generation();
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    flush_if_behind(&store, &storage, &mut written);
                }
                _ = stop_signal.notified() => {
                    flush_if_behind(&store, &storage, &mut written);
                    break;
                }
            }
        }
    });
    FlushHandle { stop, task }
}

fn flush_if_behind(store: &TaskStore, storage: &Storage, written: &mut u64) {
    let generation = store.generation();
    if generation == *written {
        return;
    }
    let result = storage
        .ensure_dirs()
        .and_then(|_| storage.save_tasks(&store.tasks_file()))
        .and_then(|_| storage.save_settings(&store.settings_file()));
    match result {
        Ok(()) => log::debug!("flushed generation {generation}"),
        // Best-effort: a failed write is logged, not retried; the next
        // mutation schedules the next attempt.
        Err(error) => log::warn!("flush failed: {error}"),
    }
    *written = generation;
}
