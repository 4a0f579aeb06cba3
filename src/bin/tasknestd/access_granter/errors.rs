use thiserror::Error;

use tasknest::session_storage::SessionStorageError;
use tasknest::user_db::UserDbError;

#[derive(Debug, Error)]
pub enum AccessGranterError {
    #[error("malformed authorization header")]
    HeaderFormatError,

    #[error("unknown or malformed session token")]
    InvalidToken,

    #[error("session has expired")]
    ExpiredSession,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    SessionStorageError(#[from] SessionStorageError),

    #[error(transparent)]
    UserDbError(#[from] UserDbError),
}
