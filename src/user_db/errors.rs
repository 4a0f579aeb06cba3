use std::io::Error as IoError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserDbError {
    #[error(transparent)]
    IoError(#[from] IoError),

    #[error("user db parsing error: {0}")]
    ParsingError(#[from] toml::de::Error),
}
