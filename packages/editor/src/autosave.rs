//! # Autosave
//!
//! Trailing-edge debounce of local persistence writes. Each `schedule`
//! cancels the pending write (if any) and arms a new one that fires after
//! the quiet period, so a burst of edits produces one write carrying the
//! final state. At most one write is ever pending.
//!
//! The store write itself runs on the blocking pool, so file-backed slots
//! never stall the async workers.

use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

pub struct Autosaver {
    store: Arc<dyn KeyValueStore>,
    key: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            delay,
            pending: None,
        }
    }

    /// Arm a write of `snapshot`, replacing any pending one.
    ///
    /// Outside a tokio runtime there is no timer to arm, so the write happens
    /// immediately.
    pub fn schedule(&mut self, snapshot: String) {
        self.cancel();

        let Ok(runtime) = Handle::try_current() else {
            warn!(key = %self.key, "no async runtime, autosaving synchronously");
            if let Err(e) = self.store.set(&self.key, &snapshot) {
                error!(key = %self.key, error = %e, "autosave failed");
            }
            return;
        };

        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let delay = self.delay;

        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let bytes = snapshot.len();
            let write = tokio::task::spawn_blocking({
                let key = key.clone();
                move || store.set(&key, &snapshot)
            });
            match write.await {
                Ok(Ok(())) => debug!(key = %key, bytes, "autosaved"),
                Ok(Err(e)) => error!(key = %key, error = %e, "autosave failed"),
                Err(e) => error!(key = %key, error = %e, "autosave task failed"),
            }
        }));
    }

    /// Drop the pending write, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the pending write and store `snapshot` now
    pub fn write_now(&mut self, snapshot: &str) -> Result<(), crate::storage::StorageError> {
        self.cancel();
        self.store.set(&self.key, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn autosaver(store: &Arc<MemoryStore>) -> Autosaver {
        Autosaver::new(store.clone(), "slot", DEFAULT_AUTOSAVE_DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_write_after_quiet_period() {
        let store = Arc::new(MemoryStore::new());
        let mut saver = autosaver(&store);

        saver.schedule("v1".into());
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(store.write_count(), 0);
        assert!(saver.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("v1"));
        assert!(!saver.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_state() {
        let store = Arc::new(MemoryStore::new());
        let mut saver = autosaver(&store);

        saver.schedule("t0".into());
        tokio::time::sleep(Duration::from_millis(500)).await;
        saver.schedule("t500".into());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("t500"));
    }

    /// Slot that drives async I/O from a synchronous `set`, which only works
    /// off the runtime's worker threads
    struct BridgedStore(MemoryStore);

    impl KeyValueStore for BridgedStore {
        fn get(&self, key: &str) -> crate::storage::StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> crate::storage::StorageResult<()> {
            Handle::current().block_on(tokio::task::yield_now());
            self.0.set(key, value)
        }
    }

    #[tokio::test]
    async fn test_write_runs_off_the_async_workers() {
        let store = Arc::new(BridgedStore(MemoryStore::new()));
        let mut saver = Autosaver::new(store.clone(), "slot", Duration::from_millis(10));

        saver.schedule("bridged".into());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.0.get("slot").unwrap().as_deref(), Some("bridged"));
    }

    #[tokio::test]
    async fn test_file_store_autosave() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(crate::storage::FileStore::new(dir.path()));
        let mut saver = Autosaver::new(store.clone(), "slot", Duration::from_millis(10));

        saver.schedule("{}".into());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.get("slot").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_without_runtime_writes_immediately() {
        let store = Arc::new(MemoryStore::new());
        let mut saver = autosaver(&store);

        saver.schedule("sync".into());
        assert_eq!(store.write_count(), 1);
        assert!(!saver.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_now_cancels_pending() {
        let store = Arc::new(MemoryStore::new());
        let mut saver = autosaver(&store);

        saver.schedule("later".into());
        saver.write_now("now").unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("now"));
    }
}
