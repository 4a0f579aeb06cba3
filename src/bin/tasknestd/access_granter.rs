use std::sync::Arc;

use log::{debug, info, trace};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use tasknest::session_storage::{Session, SessionStorage};
use tasknest::user_db::UserDb;
use tasknest::username_string::UsernameString;

mod errors;

pub use errors::AccessGranterError;

/// Glues credential checking to session handout. Routes only ever talk to
/// this; the storages behind it are trait objects so tests can swap them.
pub struct AccessGranter {
    session_storage: Box<dyn SessionStorage>,
    user_db: Box<dyn UserDb>,
    session_ttl: Duration,
}

impl AccessGranter {
    pub fn new(
        session_storage: Box<dyn SessionStorage>,
        user_db: Box<dyn UserDb>,
        session_ttl: Duration,
    ) -> Self {
        AccessGranter {
            session_storage,
            user_db,
            session_ttl,
        }
    }

    pub async fn login_user(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<Arc<Session>, AccessGranterError> {
        debug!("logging user \"{username}\" in");
        if !self.user_db.check_user_credentials(username, password).await? {
            return Err(AccessGranterError::InvalidCredentials);
        }
        let now = OffsetDateTime::now_utc();
        let session = self.session_storage
            .create_session(username, now + self.session_ttl)
            .await?;
        info!(
            "logged user \"{username}\" in with session \"{}\"",
            session.token,
        );
        Ok(session)
    }

    pub async fn check_access(
        &self,
        auth_header_value: &str,
    ) -> Result<Arc<Session>, AccessGranterError> {
        let token = auth_header_value.strip_prefix("Bearer ")
            .ok_or(AccessGranterError::HeaderFormatError)?;
        let token = Uuid::parse_str(token)
            .map_err(|_| AccessGranterError::InvalidToken)?;
        let session = self.session_storage
            .get_session(token)
            .await?
            .ok_or(AccessGranterError::InvalidToken)?;
        if session.is_expired(OffsetDateTime::now_utc()) {
            trace!("expired session for user \"{}\"", session.username);
            return Err(AccessGranterError::ExpiredSession);
        }
        trace!("valid session for user \"{}\"", session.username);
        Ok(session)
    }

    pub async fn logout_user(
        &self,
        token: Uuid,
    ) -> Result<bool, AccessGranterError> {
        let deleted = self.session_storage.delete_session(token).await?;
        if deleted {
            info!("session \"{token}\" logged out");
        }
        Ok(deleted)
    }
}
