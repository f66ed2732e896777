//! JSON habit documents.
//!
//! The persisted file and the export document share one format: a JSON
//! array of habits in store order. A document is accepted whole or not at
//! all.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::data_dir;
use crate::error::{Result, SnapshotError};
use crate::habit::Habit;
use crate::store::HabitStore;

/// File name of the persisted collection.
const HABITS_FILE: &str = "habits.json";

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse and validate a document.
///
/// # Errors
///
/// Fails if the text is not JSON, the root is not an array, any element is
/// not a habit, or any habit breaks an invariant.
pub fn decode_document(text: &str) -> Result<HabitStore, SnapshotError> {
    let root: Value = serde_json::from_str(text)?;
    let items = match root {
        Value::Array(items) => items,
        other => {
            return Err(SnapshotError::NotAnArray {
                found: kind_of(&other),
            })
        }
    };

    let habits = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Habit>(item).map_err(|e| SnapshotError::MalformedRecord {
                index,
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    HabitStore::from_habits(habits)
}

/// Serialize a collection, preserving order.
pub fn encode_document(habits: &[Habit]) -> Result<String> {
    Ok(serde_json::to_string_pretty(habits)?)
}

/// Replace `path` with `content` without exposing a half-written file.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, content)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// The on-disk habit collection.
#[derive(Debug, Clone)]
pub struct HabitFile {
    path: PathBuf,
}

impl HabitFile {
    /// `habits.json` in the data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(HABITS_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<HabitStore> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no habit file yet");
                return Ok(HabitStore::new());
            }
            Err(e) => return Err(e.into()),
        };

        match decode_document(&text) {
            Ok(store) => {
                tracing::debug!(path = %self.path.display(), habits = store.len(), "habits loaded");
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "rejected habit file");
                Err(e.into())
            }
        }
    }

    /// Persist the full collection.
    pub fn save(&self, store: &HabitStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        write_atomic(&self.path, &encode_document(store.habits())?)?;
        tracing::info!(path = %self.path.display(), habits = store.len(), "habits saved");
        Ok(())
    }
}

/// Write a portable copy of the collection to `path`.
pub fn export_to(store: &HabitStore, path: &Path) -> Result<()> {
    HabitFile::at(path).save(store)
}

/// Read a portable document from `path`. The document must exist.
pub fn import_from(path: &Path) -> Result<HabitStore> {
    let text = std::fs::read_to_string(path)?;
    Ok(decode_document(&text)?)
}
