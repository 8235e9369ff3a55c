use std::io;
use std::path::Path;
use ticklist_core::TicklistResult;
use tokio::fs;

/// Atomic file writer using the write-to-temp-file then rename pattern
/// A crash mid-write leaves the previous file contents intact
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically
    /// The temporary file lives in the destination directory so the final
    /// rename never crosses a filesystem boundary
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TicklistResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.path().to_path_buf();

        tokio::fs::write(&temp_path, data).await?;

        // Atomic on POSIX systems
        fs::rename(&temp_path, path).await?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read all data from a file, mapping a missing file to `None`
    pub async fn read_optional(path: &Path) -> TicklistResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
