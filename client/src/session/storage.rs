use super::errors::SessionError;
use super::store::SessionData;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const APP_DIR: &str = "barberbook";
const SESSION_FILE: &str = "session.json";

/// Where the session document lives unless configured otherwise.
pub fn default_session_path() -> PathBuf {
    data_dir().join(SESSION_FILE)
}

pub(crate) fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
}

/// Backend for the session document.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<SessionData>, SessionError>;
    fn store(&self, data: &SessionData) -> Result<(), SessionError>;
    fn remove(&self) -> Result<(), SessionError>;
}

/// Session document as a JSON file, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSessionStorage {
    fn default() -> Self {
        Self::new(default_session_path())
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<SessionData>, SessionError> {
        read_document(&self.path)
    }

    fn store(&self, data: &SessionData) -> Result<(), SessionError> {
        write_document(&self.path, data)
    }

    fn remove(&self) -> Result<(), SessionError> {
        remove_document(&self.path)
    }
}

/// In-process storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    data: Mutex<Option<SessionData>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<SessionData>, SessionError> {
        Ok(self
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, data: &SessionData) -> Result<(), SessionError> {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = Some(data.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Read a JSON document; a missing file is `None`.
pub(crate) fn read_document<T>(path: &Path) -> Result<Option<T>, SessionError>
where
    T: DeserializeOwned,
{
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SessionError::io(path, e)),
    }
}

/// Write a JSON document through a sibling temp file and a rename, so readers
/// see either the old document or the new one.
pub(crate) fn write_document<T>(path: &Path, value: &T) -> Result<(), SessionError>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
    }

    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).map_err(|e| SessionError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        SessionError::io(path, e)
    })
}

pub(crate) fn remove_document(path: &Path) -> Result<(), SessionError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::io(path, e)),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
