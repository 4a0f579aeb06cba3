use std::ffi::OsString;
use std::path::Path;

#[cfg(unix)] use std::os::unix::fs::MetadataExt;
#[cfg(unix)] use std::os::unix::fs::PermissionsExt;

use tokio::{fs, io};

/// The slice of filesystem metadata the storage cares about. Kept as a
/// plain struct so mock IO can fabricate values without touching the
/// filesystem.
pub(super) struct Metadata {
    pub is_dir: bool,
    pub len: u64,
    pub uid: Option<u32>,
    pub mode: Option<u32>,
}

impl From<std::fs::Metadata> for Metadata {
    #[cfg(unix)]
    fn from(meta: std::fs::Metadata) -> Self {
        Metadata {
            is_dir: meta.is_dir(),
            len: meta.len(),
            uid: Some(meta.uid()),
            mode: Some(meta.permissions().mode()),
        }
    }

    #[cfg(not(unix))]
    fn from(meta: std::fs::Metadata) -> Self {
        Metadata {
            is_dir: meta.is_dir(),
            len: meta.len(),
            uid: None,
            mode: None,
        }
    }
}

pub(super) trait StorageIo: Send + Sync {
    async fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        Ok(fs::metadata(path).await?.into())
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write_file(&self, path: &Path, data: Vec<u8>) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    #[cfg(unix)]
    fn process_uid(&self) -> Option<u32> {
        Some(unsafe { libc::getuid() })
    }

    #[cfg(not(unix))]
    fn process_uid(&self) -> Option<u32> {
        None
    }
}

pub struct ProductionStorageIo {}
impl StorageIo for ProductionStorageIo {}
