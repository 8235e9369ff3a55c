use async_trait::async_trait;
use ticklist_core::TicklistResult;

/// Trait for abstract durable key/value storage
/// Implementations handle different backends (file, in-memory, database, etc.)
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Read the value stored under `key`
    /// Returns `Ok(None)` when the key has never been written; an empty
    /// value reads back as `Ok(Some(vec![]))`, not `None`
    async fn read(&self, key: &str) -> TicklistResult<Option<Vec<u8>>>;

    /// Replace the value stored under `key`, creating it if absent
    async fn write(&self, key: &str, bytes: &[u8]) -> TicklistResult<()>;
}
