use std::io::Error as IoError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStorageError {
    #[error(transparent)]
    IoError(#[from] IoError),

    #[error("session file parsing error: {0}")]
    ParsingError(#[from] toml::de::Error),

    #[error("session file serialization error: {0}")]
    SerializationError(#[from] toml::ser::Error),
}
