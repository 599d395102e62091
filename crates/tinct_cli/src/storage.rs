//! Directory-backed theme storage
//!
//! Each theme is written to `<dir>/<id>.json`; saving an existing id
//! overwrites it.

use std::fs;
use std::path::{Path, PathBuf};

use tinct_theme::{PersistedTheme, StorageError, ThemeStorage};
use tracing::debug;

pub struct DirectoryStorage {
    dir: PathBuf,
}

impl DirectoryStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write(&self, theme: &PersistedTheme) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let json = serde_json::to_string_pretty(theme)
            .map_err(|e| StorageError::new(format!("Failed to encode theme {}: {e}", theme.id)))?;
        let path = self.path_for(&theme.id);
        fs::write(&path, json).map_err(|e| io_error(&path, e))?;
        Ok(path)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::new(format!("Failed to write {}: {err}", path.display()))
}

impl ThemeStorage for DirectoryStorage {
    async fn save_theme(&self, theme: &PersistedTheme) -> Result<(), StorageError> {
        let path = self.write(theme)?;
        debug!("DirectoryStorage: wrote {}", path.display());
        Ok(())
    }
}
