// storage.rs — The whole-blob storage seam.
//
// The host exposes a per-installation key-value config store; one key
// holds the entire goal blob. Writes are whole-blob replace, reads happen
// once at startup — last-writer-wins, and the single-thread model means
// no concurrent writer exists.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;

/// Load/store one text blob.
///
/// `load` returns `Ok(None)` when nothing has been stored yet — an absent
/// blob is an empty goal list, not an error.
pub trait GoalStorage {
    fn load(&self) -> Result<Option<String>, TrackerError>;
    fn store(&self, blob: &str) -> Result<(), TrackerError>;
}

/// File-backed storage: the blob lives in a single file.
///
/// Stands in for the host's config store when running outside the host
/// (and in integration tests).
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl GoalStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, TrackerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&self.path).map_err(|source| TrackerError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(blob))
    }

    fn store(&self, blob: &str) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| TrackerError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&self.path, blob).map_err(|source| TrackerError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// In-memory storage for tests.
///
/// `RefCell` is fine here: the tracker is single-threaded by design.
#[derive(Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
    fail_stores: RefCell<bool>,
    store_count: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
            ..Self::default()
        }
    }

    /// Make every subsequent `store` fail, for failure-path tests.
    pub fn fail_stores(&self) {
        *self.fail_stores.borrow_mut() = true;
    }

    /// How many times `store` succeeded.
    pub fn store_count(&self) -> usize {
        *self.store_count.borrow()
    }

    /// The current blob, if any.
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl GoalStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, TrackerError> {
        Ok(self.blob.borrow().clone())
    }

    fn store(&self, blob: &str) -> Result<(), TrackerError> {
        if *self.fail_stores.borrow() {
            return Err(TrackerError::Io {
                path: "<memory>".to_string(),
                source: std::io::Error::other("simulated storage failure"),
            });
        }
        *self.blob.borrow_mut() = Some(blob.to_string());
        *self.store_count.borrow_mut() += 1;
        Ok(())
    }
}
