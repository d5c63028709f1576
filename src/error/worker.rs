use thiserror::Error;

/// Worker queue error type.
///
/// These errors occur during job validation or serialization for Redis
/// storage. They indicate programming bugs (invalid job parameters) rather
/// than client errors, so submission fails loudly while the worker pool
/// skips rather than crashes on a malformed job it popped.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// A job was built with a non-positive season or episode number.
    #[error("invalid episode key: season {season} and episode {episode} must be positive")]
    InvalidEpisodeKey { season: i32, episode: i32 },
    /// Failed to serialize or deserialize a job payload for Redis storage.
    #[error("failed to serialize/deserialize worker job: {0}")]
    SerializationError(String),
}
