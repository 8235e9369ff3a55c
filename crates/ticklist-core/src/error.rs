use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicklistError {
    /// The storage medium could not be reached for a read or write.
    /// Distinct from "the key was never written", which is not an error.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    /// Persisted bytes did not decode into a task collection.
    #[error("malformed task data: {0}")]
    MalformedData(String),

    /// A task collection could not be encoded for writing.
    #[error("serialization error: {0}")]
    Serialization(String),
}
