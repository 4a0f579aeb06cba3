use time::OffsetDateTime;
use uuid::Uuid;

use crate::username_string::UsernameString;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub username: UsernameString,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}
