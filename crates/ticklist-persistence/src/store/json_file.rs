use crate::store::atomic_writer::AtomicWriter;
use crate::traits::PersistenceGateway;
use std::path::{Path, PathBuf};
use ticklist_core::TicklistResult;

/// File-backed gateway that stores each key as `<dir>/<key>.json`
/// Writes go through [`AtomicWriter`] so readers never observe a torn file
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    dir: PathBuf,
}

impl JsonFileGateway {
    /// Create a gateway rooted at `dir`
    /// The directory is created lazily on the first write
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn read(&self, key: &str) -> TicklistResult<Option<Vec<u8>>> {
        AtomicWriter::read_optional(&self.file_path(key)).await
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> TicklistResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        AtomicWriter::write_atomic(&self.file_path(key), bytes).await?;

        tracing::info!("Saved {} bytes under key '{}'", bytes.len(), key);
        Ok(())
    }
}
