use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tokio::fs;
use uuid::Uuid;

use crate::rng::SyncRng;
use crate::session_storage::errors::SessionStorageError;
use crate::session_storage::internal::data::SessionsData;

#[async_trait]
pub(super) trait SessionIo: Send + Sync {
    async fn read_sessions(&self) -> Result<SessionsData, SessionStorageError>;

    async fn write_sessions(
        &self,
        data: SessionsData,
    ) -> Result<(), SessionStorageError>;

    fn generate_token(&self) -> Uuid;

    fn now(&self) -> OffsetDateTime;
}

pub struct ProductionSessionIo {
    path: PathBuf,
    rng: SyncRng<StdRng>,
}

impl ProductionSessionIo {
    pub(super) fn new(path: impl AsRef<Path>, rng: SyncRng<StdRng>) -> Self {
        ProductionSessionIo {
            path: path.as_ref().to_path_buf(),
            rng,
        }
    }
}

#[async_trait]
impl SessionIo for ProductionSessionIo {
    async fn read_sessions(&self) -> Result<SessionsData, SessionStorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            // the file appears on the first write
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionsData::default());
            },
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&contents)?)
    }

    async fn write_sessions(
        &self,
        data: SessionsData,
    ) -> Result<(), SessionStorageError> {
        let serialized = toml::to_string(&data)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, serialized).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    fn generate_token(&self) -> Uuid {
        self.rng.make_uuid()
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
