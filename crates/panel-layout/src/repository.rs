//! Persistence of user panel sets
//!
//! Records are stored per user identity. [`JsonFileRepository`] keeps one
//! pretty-printed JSON file per user and writes it with the atomic
//! temp-file, fsync, rename pattern. [`MemoryRepository`] keeps the same
//! serialized form in memory.
//!
//! Concurrent saves of the same user are last-write-wins.

use crate::error::{Result, StorageError};
use crate::registry::PanelRegistry;
use crate::types::{PanelRecord, UserPanelSet, SCHEMA_VERSION};
use chrono::Local;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum length of a user identity.
const MAX_USER_LEN: usize = 30;

/// Load/save of user panel sets keyed by user identity
pub trait PanelSetRepository {
    /// Load the stored panel set, or `None` if the user has none yet.
    fn load(&self, user: &str) -> Result<Option<UserPanelSet>>;

    /// Replace the stored panel set.
    fn save(&self, user: &str, panels: &UserPanelSet) -> Result<()>;
}

/// Load a user's panel set, enabling every registered panel for new users.
pub fn load_or_default<R: PanelSetRepository + ?Sized>(
    repository: &R,
    user: &str,
    registry: &PanelRegistry,
) -> Result<UserPanelSet> {
    match repository.load(user)? {
        Some(panels) => Ok(panels),
        None => {
            log::debug!("no panel record for {}, enabling all panels", user);
            Ok(UserPanelSet::with_all_panels(registry))
        }
    }
}

/// Checks that `user` is usable as a storage key.
///
/// Accepts 1 to 30 characters from letters, digits and `_ . @ + -`.
pub fn validate_user(user: &str) -> std::result::Result<(), StorageError> {
    let valid = !user.is_empty()
        && user.chars().count() <= MAX_USER_LEN
        && user != "."
        && user != ".."
        && user
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidUser(user.to_string()))
    }
}

fn encode(user: &str, panels: &UserPanelSet) -> Result<String> {
    let record = PanelRecord::new(user, panels.clone());
    serde_json::to_string_pretty(&record)
        .map_err(|e| StorageError::Serialize(e.to_string()).into())
}

fn decode(content: &str, path: &Path) -> Result<UserPanelSet> {
    let record: PanelRecord = serde_json::from_str(content).map_err(|e| StorageError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if record.schema_version != SCHEMA_VERSION {
        log::warn!(
            "panel record {} has schema version {}, expected {}",
            path.display(),
            record.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(record.panels)
}

/// Repository storing one JSON file per user in a directory
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository rooted at `dir`. The directory is created on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `user`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidUser` if `user` is not a valid identity.
    pub fn record_path(&self, user: &str) -> Result<PathBuf> {
        validate_user(user)?;
        Ok(self.dir.join(format!("{}.json", user)))
    }
}

impl PanelSetRepository for JsonFileRepository {
    fn load(&self, user: &str) -> Result<Option<UserPanelSet>> {
        let path = self.record_path(user)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(StorageError::Io)?;
        decode(&content, &path).map(Some)
    }

    /// Write the record atomically
    ///
    /// 1. Write to temp file with timestamp suffix
    /// 2. Fsync to disk
    /// 3. Rename temp to record (atomic operation)
    ///
    /// On failure before rename, the temp file is kept as a safety copy.
    fn save(&self, user: &str, panels: &UserPanelSet) -> Result<()> {
        let path = self.record_path(user)?;
        fs::create_dir_all(&self.dir).map_err(StorageError::Io)?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.f").to_string();
        let temp_path = path.with_file_name(format!("{}.json.tmp.{}", user, timestamp));

        let json = encode(user, panels)?;
        fs::write(&temp_path, json).map_err(StorageError::Io)?;

        let file = fs::File::open(&temp_path).map_err(StorageError::Io)?;
        file.sync_all().map_err(StorageError::Io)?;

        fs::rename(&temp_path, &path).map_err(|_| StorageError::WriteAtomic {
            path: path.clone(),
            temp_path: temp_path.clone(),
        })?;

        log::debug!("saved panel record {}", path.display());
        Ok(())
    }
}

/// Repository keeping serialized records in memory
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Returns `true` if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl PanelSetRepository for MemoryRepository {
    fn load(&self, user: &str) -> Result<Option<UserPanelSet>> {
        validate_user(user)?;
        match self.records.borrow().get(user) {
            Some(content) => decode(content, Path::new(user)).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, user: &str, panels: &UserPanelSet) -> Result<()> {
        validate_user(user)?;
        let json = encode(user, panels)?;
        self.records.borrow_mut().insert(user.to_string(), json);
        Ok(())
    }
}
