use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::data::{Note, Todo};
use crate::lib_constants::MAX_DOCUMENT_LEN;
use crate::storage::errors::StorageError;
use crate::storage::internal::io_trait::{ProductionStorageIo, StorageIo};
use crate::username_string::UsernameString;

mod io_trait;

const TODOS_SUBDIR: &str = "todos";
const NOTES_SUBDIR: &str = "notes";
const DOC_EXTENSION: &str = "json";

// unix permission bits the storage root must carry for the process owner
const REQUIRED_ROOT_PERMISSIONS: u32 = 0o700;

pub type DocumentStorage = DocumentStorageImpl<ProductionStorageIo>;

/// Owner-scoped document store. Each user's collections live under
/// `<root>/<username>/{todos,notes}/<uuid>.json`. Writes go through a
/// temporary file and a rename, so a crashed write never leaves a
/// half-serialized document behind.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct DocumentStorageImpl<Io: StorageIo> {
    io: Io,
    basedir: PathBuf,
}

impl DocumentStorage {
    pub async fn new(
        basedir: impl AsRef<Path>,
    ) -> Result<DocumentStorage, StorageError> {
        Self::new_internal(basedir.as_ref(), ProductionStorageIo {}).await
    }
}

#[allow(private_bounds)]
impl<Io: StorageIo> DocumentStorageImpl<Io> {
    async fn new_internal(
        basedir: &Path,
        io: Io,
    ) -> Result<DocumentStorageImpl<Io>, StorageError> {
        let meta = io.metadata(basedir).await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    StorageError::RootDoesNotExist
                } else {
                    e.into()
                }
            })?;
        if !meta.is_dir {
            return Err(StorageError::RootDoesNotExist);
        }
        if let (Some(uid), Some(mode)) = (meta.uid, meta.mode) {
            let process_uid = io.process_uid();
            if process_uid.is_some_and(|process_uid| process_uid != uid)
                || mode & REQUIRED_ROOT_PERMISSIONS != REQUIRED_ROOT_PERMISSIONS
            {
                return Err(StorageError::PermissionError);
            }
        }
        Ok(
            DocumentStorageImpl {
                io,
                basedir: basedir.to_path_buf(),
            }
        )
    }

    pub async fn read_todo(
        &self,
        owner: &UsernameString,
        id: Uuid,
    ) -> Result<Todo, StorageError> {
        self.read_doc(owner, TODOS_SUBDIR, id).await
    }

    pub async fn write_todo(
        &self,
        owner: &UsernameString,
        todo: &Todo,
    ) -> Result<(), StorageError> {
        self.write_doc(owner, TODOS_SUBDIR, todo.id, todo).await
    }

    pub async fn delete_todo(
        &self,
        owner: &UsernameString,
        id: Uuid,
    ) -> Result<(), StorageError> {
        self.delete_doc(owner, TODOS_SUBDIR, id).await
    }

    pub async fn list_todos(
        &self,
        owner: &UsernameString,
    ) -> Result<Vec<Todo>, StorageError> {
        self.list_docs(owner, TODOS_SUBDIR).await
    }

    pub async fn read_note(
        &self,
        owner: &UsernameString,
        id: Uuid,
    ) -> Result<Note, StorageError> {
        self.read_doc(owner, NOTES_SUBDIR, id).await
    }

    pub async fn write_note(
        &self,
        owner: &UsernameString,
        note: &Note,
    ) -> Result<(), StorageError> {
        self.write_doc(owner, NOTES_SUBDIR, note.id, note).await
    }

    pub async fn delete_note(
        &self,
        owner: &UsernameString,
        id: Uuid,
    ) -> Result<(), StorageError> {
        self.delete_doc(owner, NOTES_SUBDIR, id).await
    }

    pub async fn list_notes(
        &self,
        owner: &UsernameString,
    ) -> Result<Vec<Note>, StorageError> {
        self.list_docs(owner, NOTES_SUBDIR).await
    }

    fn collection_dir(&self, owner: &UsernameString, subdir: &str) -> PathBuf {
        self.basedir.join(owner as &str).join(subdir)
    }

    fn doc_path(
        &self,
        owner: &UsernameString,
        subdir: &str,
        id: Uuid,
    ) -> PathBuf {
        self.collection_dir(owner, subdir)
            .join(format!("{id}.{DOC_EXTENSION}"))
    }

    async fn read_doc<T: DeserializeOwned>(
        &self,
        owner: &UsernameString,
        subdir: &str,
        id: Uuid,
    ) -> Result<T, StorageError> {
        let path = self.doc_path(owner, subdir, id);
        let meta = self.io.metadata(&path).await
            .map_err(not_found_filter)?;
        if meta.len > MAX_DOCUMENT_LEN {
            return Err(StorageError::TooBig);
        }
        let bytes = self.io.read_file(&path).await
            .map_err(not_found_filter)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // TODO: sweep for orphaned .tmp files left by a crashed write at
    //  startup
    async fn write_doc<T: Serialize>(
        &self,
        owner: &UsernameString,
        subdir: &str,
        id: Uuid,
        doc: &T,
    ) -> Result<(), StorageError> {
        let dir = self.collection_dir(owner, subdir);
        self.io.create_dir_all(&dir).await?;
        let path = self.doc_path(owner, subdir, id);
        let tmp_path = dir.join(format!(".{id}.{DOC_EXTENSION}.tmp"));
        let bytes = serde_json::to_vec(doc)?;
        self.io.write_file(&tmp_path, bytes).await?;
        if let Err(e) = self.io.rename_file(&tmp_path, &path).await {
            if let Err(cleanup) = self.io.remove_file(&tmp_path).await {
                warn!(
                    "could not clean up temporary file {}: {cleanup}",
                    tmp_path.display(),
                );
            }
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete_doc(
        &self,
        owner: &UsernameString,
        subdir: &str,
        id: Uuid,
    ) -> Result<(), StorageError> {
        let path = self.doc_path(owner, subdir, id);
        self.io.remove_file(&path).await
            .map_err(not_found_filter)
    }

    async fn list_docs<T: DeserializeOwned>(
        &self,
        owner: &UsernameString,
        subdir: &str,
    ) -> Result<Vec<T>, StorageError> {
        let dir = self.collection_dir(owner, subdir);
        let names = match self.io.list_dir(&dir).await {
            Ok(names) => names,
            // a user without documents has no directory yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            },
            Err(e) => return Err(e.into()),
        };
        let mut docs = Vec::with_capacity(names.len());
        for name in names {
            let id = match doc_id_from_filename(&name) {
                Some(id) => id,
                None => continue,
            };
            match self.read_doc(owner, subdir, id).await {
                Ok(doc) => docs.push(doc),
                // a single damaged file should not take the whole
                // collection down
                Err(e @ StorageError::InvalidDocument(_)) => {
                    warn!("skipping unreadable document {id}: {e}");
                },
                Err(e) => return Err(e),
            }
        }
        Ok(docs)
    }
}

fn doc_id_from_filename(name: &std::ffi::OsStr) -> Option<Uuid> {
    let name = name.to_str()?;
    let stem = name.strip_suffix(&format!(".{DOC_EXTENSION}"))?;
    stem.parse().ok()
}

fn not_found_filter(e: std::io::Error) -> StorageError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound
    } else {
        e.into()
    }
}
