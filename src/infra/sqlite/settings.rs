use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::settings::{SettingsError, SettingsStore};

pub fn load_setting(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT value FROM setting WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .with_context(|| format!("failed to read setting {key}"))
}

pub fn save_setting(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO setting(key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )
    .with_context(|| format!("failed to write setting {key}"))?;
    Ok(())
}

pub fn remove_setting(db_path: &Path, key: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM setting WHERE key = ?1", params![key])
        .with_context(|| format!("failed to delete setting {key}"))?;
    Ok(())
}

pub struct SqliteSettingsStore {
    pub db_path: PathBuf,
}

impl SqliteSettingsStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn init(&self) -> Result<(), SettingsError> {
        init_db(&self.db_path).map_err(|err| SettingsError::Storage(format!("{err:#}")))
    }

    fn load(&self, key: &str) -> Result<Option<String>, SettingsError> {
        load_setting(&self.db_path, key).map_err(|err| SettingsError::Storage(format!("{err:#}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        save_setting(&self.db_path, key, value)
            .map_err(|err| SettingsError::Storage(format!("{err:#}")))
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        remove_setting(&self.db_path, key)
            .map_err(|err| SettingsError::Storage(format!("{err:#}")))
    }
}
