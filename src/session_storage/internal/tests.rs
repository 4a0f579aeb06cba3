use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use time::macros::datetime;

use super::io_trait::SessionIo;
use super::*;

const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);
const LATER: OffsetDateTime = datetime!(2026-03-02 12:00 UTC);

struct MockSessionIo {
    stored: Mutex<SessionsData>,
    next_token: Mutex<u128>,
    now: Mutex<OffsetDateTime>,
}

impl MockSessionIo {
    fn new() -> Self {
        MockSessionIo {
            stored: Mutex::new(SessionsData::default()),
            next_token: Mutex::new(1),
            now: Mutex::new(NOW),
        }
    }

    fn stored_tokens(&self) -> Vec<Uuid> {
        self.stored
            .lock()
            .unwrap()
            .sessions
            .iter()
            .map(|s| s.token)
            .collect()
    }
}

#[async_trait]
impl SessionIo for MockSessionIo {
    async fn read_sessions(&self) -> Result<SessionsData, SessionStorageError> {
        let stored = self.stored.lock().unwrap();
        Ok(
            SessionsData {
                sessions: stored.sessions
                    .iter()
                    .map(|s| {
                        SessionData {
                            token: s.token,
                            username: s.username.clone(),
                            created_at: s.created_at,
                            expires_at: s.expires_at,
                        }
                    })
                    .collect(),
            }
        )
    }

    async fn write_sessions(
        &self,
        data: SessionsData,
    ) -> Result<(), SessionStorageError> {
        *self.stored.lock().unwrap() = data;
        Ok(())
    }

    fn generate_token(&self) -> Uuid {
        let mut next = self.next_token.lock().unwrap();
        *next += 1;
        Uuid::from_u128(*next)
    }

    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap()
    }
}

fn username() -> UsernameString {
    UsernameString::from_str("abc").unwrap()
}

async fn make_storage(
    io: MockSessionIo,
) -> SessionStorageImpl<MockSessionIo> {
    SessionStorageImpl::new_internal(io)
        .await
        .expect("session storage creation failed")
}

#[tokio::test]
async fn created_session_is_retrievable() {
    let storage = make_storage(MockSessionIo::new()).await;
    let session = storage.create_session(&username(), LATER).await.unwrap();
    let found = storage.get_session(session.token).await.unwrap()
        .expect("session should exist");
    assert_eq!(found, session);
}

#[tokio::test]
async fn unknown_token_yields_none() {
    let storage = make_storage(MockSessionIo::new()).await;
    assert!(
        storage.get_session(Uuid::from_u128(999)).await.unwrap().is_none()
    );
}

#[tokio::test]
async fn created_session_is_persisted() {
    let storage = make_storage(MockSessionIo::new()).await;
    let session = storage.create_session(&username(), LATER).await.unwrap();
    assert_eq!(storage.io.stored_tokens(), vec![session.token]);
}

#[tokio::test]
async fn deleted_session_is_gone_and_unpersisted() {
    let storage = make_storage(MockSessionIo::new()).await;
    let session = storage.create_session(&username(), LATER).await.unwrap();
    assert!(storage.delete_session(session.token).await.unwrap());
    assert!(storage.get_session(session.token).await.unwrap().is_none());
    assert!(storage.io.stored_tokens().is_empty());
}

#[tokio::test]
async fn deleting_twice_reports_false() {
    let storage = make_storage(MockSessionIo::new()).await;
    let session = storage.create_session(&username(), LATER).await.unwrap();
    assert!(storage.delete_session(session.token).await.unwrap());
    assert!(!storage.delete_session(session.token).await.unwrap());
}

#[tokio::test]
async fn expired_sessions_are_dropped_on_load() {
    let io = MockSessionIo::new();
    let expired_token = Uuid::from_u128(100);
    let live_token = Uuid::from_u128(101);
    io.stored.lock().unwrap().sessions = vec![
        SessionData {
            token: expired_token,
            username: username(),
            created_at: datetime!(2026-02-01 00:00 UTC),
            expires_at: datetime!(2026-02-02 00:00 UTC),
        },
        SessionData {
            token: live_token,
            username: username(),
            created_at: NOW,
            expires_at: LATER,
        },
    ];
    let storage = make_storage(io).await;
    assert!(storage.get_session(expired_token).await.unwrap().is_none());
    assert!(storage.get_session(live_token).await.unwrap().is_some());
}

#[tokio::test]
async fn rewrite_drops_sessions_that_expired_since_load() {
    let io = MockSessionIo::new();
    io.stored.lock().unwrap().sessions = vec![
        SessionData {
            token: Uuid::from_u128(100),
            username: username(),
            // alive at load time, expired by the time of the next write
            created_at: datetime!(2026-02-01 00:00 UTC),
            expires_at: datetime!(2026-03-01 13:00 UTC),
        },
    ];
    let storage = make_storage(io).await;
    *storage.io.now.lock().unwrap() = datetime!(2026-03-01 14:00 UTC);
    let session = storage.create_session(&username(), LATER).await.unwrap();
    assert_eq!(storage.io.stored_tokens(), vec![session.token]);
}

#[tokio::test]
async fn session_expiry_check() {
    let session = Session {
        token: Uuid::from_u128(1),
        username: username(),
        created_at: NOW,
        expires_at: LATER,
    };
    assert!(!session.is_expired(NOW));
    assert!(session.is_expired(LATER));
}

#[tokio::test]
async fn sessions_data_toml_roundtrip() {
    let data = SessionsData {
        sessions: vec![
            SessionData {
                token: Uuid::from_u128(7),
                username: username(),
                created_at: NOW,
                expires_at: LATER,
            },
        ],
    };
    let serialized = toml::to_string(&data).unwrap();
    let parsed: SessionsData = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.sessions.len(), 1);
    assert_eq!(parsed.sessions[0].token, Uuid::from_u128(7));
    assert_eq!(parsed.sessions[0].expires_at, LATER);
}
