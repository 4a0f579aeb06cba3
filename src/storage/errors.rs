use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage root does not exist or is not a directory")]
    RootDoesNotExist,

    #[error("insufficient permissions to access storage")]
    PermissionError,

    #[error(transparent)]
    IoError(#[from] IoError),

    #[error("document not found")]
    NotFound,

    #[error("document too large")]
    TooBig,

    #[error("stored document is not valid: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
