use crate::traits::PersistenceGateway;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ticklist_core::TicklistResult;
use tokio::sync::Mutex;

/// In-memory gateway backed by a shared map
/// Useful for tests and for sessions that should not touch the disk;
/// clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed `write` calls across all keys
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Seed a value directly, without counting it as a write
    pub async fn put(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.inner
            .entries
            .lock()
            .await
            .insert(key.into(), bytes.into());
    }

    /// Copy of the value currently stored under `key`
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.entries.lock().await.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn read(&self, key: &str) -> TicklistResult<Option<Vec<u8>>> {
        Ok(self.get(key).await)
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> TicklistResult<()> {
        self.inner
            .entries
            .lock()
            .await
            .insert(key.to_string(), bytes.to_vec());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
