use thiserror::Error;

/// Object store error type.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The HTTP request to the store failed outright.
    #[error("object store request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The store answered with a status the operation cannot treat as success.
    #[error("object store returned status {status} for key {key}")]
    UnexpectedStatus { status: u16, key: String },
}
