use std::io::Cursor;

use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::Request;
use thiserror::Error;

use tasknest::data::ValidationError;
use tasknest::storage::StorageError;

use crate::access_granter::AccessGranterError;

/// Everything a route can answer with, already collapsed to the client
/// taxonomy. Internal causes are logged at the conversion site and never
/// echoed to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request body")]
    MalformedBody,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Unauthenticated => Status::Unauthorized,
            ApiError::InvalidCredentials => Status::Unauthorized,
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::MalformedBody => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Internal => Status::InternalServerError,
        }
    }

    /// Maps a storage failure, naming the resource so cross-owner reads
    /// surface as an ordinary missing document.
    pub fn from_storage(e: StorageError, resource: &'static str) -> ApiError {
        match e {
            StorageError::NotFound => ApiError::NotFound(resource),
            e => {
                error!("storage error: {e}");
                ApiError::Internal
            },
        }
    }
}

impl From<AccessGranterError> for ApiError {
    fn from(e: AccessGranterError) -> ApiError {
        match e {
            AccessGranterError::InvalidCredentials =>
                ApiError::InvalidCredentials,
            AccessGranterError::HeaderFormatError
                | AccessGranterError::InvalidToken
                | AccessGranterError::ExpiredSession
                => ApiError::Unauthenticated,
            e => {
                error!("authentication backend error: {e}");
                ApiError::Internal
            },
        }
    }
}

pub fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let body = error_body(&self.to_string());
        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
