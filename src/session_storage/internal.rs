use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::rng::SyncRng;
use crate::session_storage::errors::SessionStorageError;
use crate::session_storage::internal::data::{SessionData, SessionsData};
use crate::session_storage::internal::io_trait::{
    ProductionSessionIo, SessionIo,
};
use crate::username_string::UsernameString;

mod data;
mod io_trait;
pub(super) mod session;
#[cfg(test)] mod tests;

use session::Session;

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn create_session(
        &self,
        username: &UsernameString,
        expires_at: OffsetDateTime,
    ) -> Result<Arc<Session>, SessionStorageError>;

    /// Returns the session regardless of expiry; the caller decides what an
    /// expired session means.
    async fn get_session(
        &self,
        token: Uuid,
    ) -> Result<Option<Arc<Session>>, SessionStorageError>;

    async fn delete_session(
        &self,
        token: Uuid,
    ) -> Result<bool, SessionStorageError>;
}

#[allow(private_bounds)]
pub struct SessionStorageImpl<Io: SessionIo> {
    state: RwLock<HashMap<Uuid, Arc<Session>>>,
    io: Io,
}

#[allow(private_bounds)]
impl<Io: SessionIo> SessionStorageImpl<Io> {
    async fn new_internal(
        io: Io,
    ) -> Result<SessionStorageImpl<Io>, SessionStorageError> {
        let stored = io.read_sessions().await?;
        let now = io.now();
        let state = stored.sessions
            .into_iter()
            .filter(|s| s.expires_at > now)
            .map(|s| {
                let session = Session {
                    token: s.token,
                    username: s.username,
                    created_at: s.created_at,
                    expires_at: s.expires_at,
                };
                (session.token, Arc::new(session))
            })
            .collect();
        Ok(
            SessionStorageImpl {
                state: RwLock::new(state),
                io,
            }
        )
    }

    /// Persists the current map, dropping sessions that have expired since
    /// the last rewrite.
    async fn write_state(
        &self,
        state: &HashMap<Uuid, Arc<Session>>,
    ) -> Result<(), SessionStorageError> {
        let now = self.io.now();
        let mut sessions: Vec<_> = state
            .values()
            .filter(|s| s.expires_at > now)
            .map(|s| {
                SessionData {
                    token: s.token,
                    username: s.username.clone(),
                    created_at: s.created_at,
                    expires_at: s.expires_at,
                }
            })
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        self.io.write_sessions(SessionsData { sessions }).await
    }
}

#[async_trait]
impl<Io: SessionIo> SessionStorage for SessionStorageImpl<Io> {
    // TODO: cap the number of live sessions per user
    async fn create_session(
        &self,
        username: &UsernameString,
        expires_at: OffsetDateTime,
    ) -> Result<Arc<Session>, SessionStorageError> {
        let session = Arc::new(
            Session {
                token: self.io.generate_token(),
                username: username.clone(),
                created_at: self.io.now(),
                expires_at,
            }
        );
        let mut state = self.state.write().await;
        state.insert(session.token, session.clone());
        self.write_state(&state).await?;
        Ok(session)
    }

    async fn get_session(
        &self,
        token: Uuid,
    ) -> Result<Option<Arc<Session>>, SessionStorageError> {
        Ok(self.state.read().await.get(&token).cloned())
    }

    async fn delete_session(
        &self,
        token: Uuid,
    ) -> Result<bool, SessionStorageError> {
        let mut state = self.state.write().await;
        match state.remove(&token) {
            Some(_) => {
                self.write_state(&state).await?;
                Ok(true)
            },
            None => Ok(false),
        }
    }
}

pub type ProductionSessionStorage = SessionStorageImpl<ProductionSessionIo>;

impl ProductionSessionStorage {
    pub async fn new(
        session_file: impl AsRef<Path>,
        rng: SyncRng<StdRng>,
    ) -> Result<ProductionSessionStorage, SessionStorageError> {
        Self::new_internal(ProductionSessionIo::new(session_file, rng)).await
    }
}
