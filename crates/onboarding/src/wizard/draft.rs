//! Draft persistence: a key-value interface for autosave and recovery of
//! the in-progress record. The engine serializes with serde_json and treats
//! unparsable payloads as absent.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Process-wide key for the one in-progress draft.
pub const DRAFT_KEY: &str = "employee-onboarding-form";

/// Storage abstraction so the wizard can be exercised against any medium.
pub trait DraftStore: Send + Sync {
    fn save(&self, key: &str, draft: &str) -> Result<(), DraftError>;
    fn load(&self, key: &str) -> Result<Option<String>, DraftError>;
    fn clear(&self, key: &str) -> Result<(), DraftError>;
}

/// Error enumeration for draft store failures.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
}

/// File-backed draft store keeping one JSON file per key under a base
/// directory. The server-side analog of the browser storage the draft
/// format originated in.
#[derive(Debug, Clone)]
pub struct JsonFileDraftStore {
    base_dir: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl DraftStore for JsonFileDraftStore {
    fn save(&self, key: &str, draft: &str) -> Result<(), DraftError> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|err| DraftError::Unavailable(err.to_string()))?;
        fs::write(self.path_for(key), draft).map_err(|err| DraftError::Unavailable(err.to_string()))
    }

    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DraftError::Unavailable(err.to_string())),
        }
    }

    fn clear(&self, key: &str) -> Result<(), DraftError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DraftError::Unavailable(err.to_string())),
        }
    }
}
