use std::sync::Arc;

use async_trait::async_trait;
use log::error;
use rocket::http::hyper::header;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};

use tasknest::session_storage::Session;

use crate::access_granter::{AccessGranter, AccessGranterError};

/// Request guard for every owner-scoped route. Success hands the route the
/// resolved session, and with it the owner username.
#[derive(Debug)]
pub struct Authenticated(pub Arc<Session>);

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_header =
            match request.headers().get_one(header::AUTHORIZATION.as_str()) {
                Some(h) => h,
                None => return Outcome::Error((Status::Unauthorized, ())),
            };
        let granter = try_outcome!(request.guard::<&State<AccessGranter>>().await);
        match granter.check_access(auth_header).await {
            Ok(session) => Outcome::Success(Authenticated(session)),
            Err(
                AccessGranterError::HeaderFormatError
                | AccessGranterError::InvalidToken
                | AccessGranterError::ExpiredSession
            ) => Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("session lookup failed: {e}");
                Outcome::Error((Status::InternalServerError, ()))
            },
        }
    }
}
