use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use argon2::password_hash::PasswordHashString;
use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use tokio::fs;

use crate::hasher::{Hasher, ProductionHasher};
use crate::user_db::errors::UserDbError;
use crate::username_string::UsernameString;


#[async_trait]
pub trait UserDb: Send + Sync {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError>;

    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError>;
}

/// On-disk form of the user database: a TOML file of `[[user]]` tables.
#[derive(Debug, Default, Deserialize)]
pub struct UsersData {
    #[serde(default, rename = "user")]
    pub users: Vec<UserData>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub username: UsernameString,
    pub hash: String,
}

pub struct UserDbImpl<H: Hasher> {
    hasher: H,
    users: HashMap<UsernameString, PasswordHashString>,
}

impl<H: Hasher> UserDbImpl<H> {
    /// Builds the in-memory table. Entries with an unparsable hash are
    /// logged and dropped so one bad line cannot lock every account out;
    /// on a duplicate username the first entry wins.
    pub fn from_data(data: UsersData, hasher: H) -> UserDbImpl<H> {
        let mut users = HashMap::with_capacity(data.users.len());
        for entry in data.users {
            let hash = match PasswordHashString::from_str(&entry.hash) {
                Ok(hash) => hash,
                Err(e) => {
                    warn!(
                        "ignoring user \"{}\": invalid password hash: {e}",
                        entry.username,
                    );
                    continue;
                },
            };
            if users.contains_key(&entry.username) {
                warn!(
                    "duplicate user db entry for \"{}\", keeping the first",
                    entry.username,
                );
                continue;
            }
            users.insert(entry.username, hash);
        }
        UserDbImpl {
            hasher,
            users,
        }
    }
}

#[async_trait]
impl<H: Hasher> UserDb for UserDbImpl<H> {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError> {
        Ok(self.users.contains_key(username))
    }

    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError> {
        match self.users.get(username) {
            None => Ok(false),
            Some(hash) => Ok(self.hasher.check_hash(hash, password)),
        }
    }
}

pub type ProductionUserDb = UserDbImpl<ProductionHasher>;

impl ProductionUserDb {
    pub async fn load(
        user_db_path: impl AsRef<Path> + Send,
        hasher: ProductionHasher,
    ) -> Result<ProductionUserDb, UserDbError> {
        let contents = fs::read_to_string(user_db_path).await?;
        let data: UsersData = toml::from_str(&contents)?;
        Ok(Self::from_data(data, hasher))
    }
}
