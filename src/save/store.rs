//! On-disk persistence for the save record
//!
//! One fixed-name file under the user's home directory. Load failures are
//! never surfaced to the user: a missing, short, or corrupt file just means
//! defaults. Write failures are reported to the caller so it can skip the
//! confirmation popup.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::record::SaveRecord;

/// Error type for save-file writes.
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::IoError(err)
    }
}

/// Reads and writes the single save record.
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SaveStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `~/.template2d/save.dat`, falling back to the working directory when
    /// no home directory can be resolved.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".template2d"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("save.dat")
    }

    /// Loads the record, falling back to defaults when the file is missing
    /// or does not decode. Never fails.
    pub fn load_or_default(&self) -> SaveRecord {
        match fs::read(&self.path) {
            Ok(bytes) => match SaveRecord::decode(&bytes) {
                Some(record) => record,
                None => {
                    warn!(
                        "save file {} is corrupt, using defaults",
                        self.path.display()
                    );
                    SaveRecord::default()
                }
            },
            Err(e) => {
                info!("no save file ({}), using defaults", e);
                SaveRecord::default()
            }
        }
    }

    /// Writes the full record, creating the save directory on first use.
    pub fn save(&self, record: &SaveRecord) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, record.encode())?;
        info!(
            "saved position ({:.2}, {:.2}), fullscreen: {}",
            record.player_pos.0, record.player_pos.1, record.fullscreen
        );
        Ok(())
    }
}
