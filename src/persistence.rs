//! JSON storage for named sequences and saved histories.
//!
//! Both files hold one object keyed by cube-type name, so several cube types
//! can share them:
//! - `sequences.json`: `{ "<cube type>": { "<name>": "<sequence>", ... } }`
//! - `saves.json`: `{ "<cube type>": { "<save name>": "<history>", ... } }`
//!
//! A missing file reads as empty. Writes re-read the file first and only
//! replace this cube type's entries.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::sequences::SequenceMap;

pub const SEQUENCES_JSON: &str = "sequences.json";
pub const SAVES_JSON: &str = "saves.json";

type Document = BTreeMap<String, BTreeMap<String, String>>;

/// Locations of the two JSON documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    sequences_path: PathBuf,
    saves_path: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SEQUENCES_JSON, SAVES_JSON)
    }
}

impl Store {
    pub fn new(sequences_path: impl Into<PathBuf>, saves_path: impl Into<PathBuf>) -> Self {
        Self {
            sequences_path: sequences_path.into(),
            saves_path: saves_path.into(),
        }
    }

    /// Named sequences stored for `cube_type`, validated on load.
    pub fn load_sequences(&self, cube_type: &str) -> Result<SequenceMap, StoreError> {
        let mut document = read_document(&self.sequences_path)?;
        let entries = document.remove(cube_type).unwrap_or_default();
        Ok(SequenceMap::try_from(entries)?)
    }

    pub fn save_sequences(
        &self,
        cube_type: &str,
        sequences: &SequenceMap,
    ) -> Result<(), StoreError> {
        let mut document = read_document(&self.sequences_path)?;
        document.insert(cube_type.to_owned(), sequences.clone().into());
        write_document(&self.sequences_path, &document)
    }

    /// Stores `history` under `save_name`, replacing an earlier save of that name.
    pub fn save_history(
        &self,
        cube_type: &str,
        save_name: &str,
        history: &str,
    ) -> Result<(), StoreError> {
        let mut document = read_document(&self.saves_path)?;
        document
            .entry(cube_type.to_owned())
            .or_default()
            .insert(save_name.to_owned(), history.to_owned());
        write_document(&self.saves_path, &document)
    }

    pub fn load_history(
        &self,
        cube_type: &str,
        save_name: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut document = read_document(&self.saves_path)?;
        Ok(document
            .get_mut(cube_type)
            .and_then(|saves| saves.remove(save_name)))
    }

    /// Save names for `cube_type`, sorted.
    pub fn saved_names(&self, cube_type: &str) -> Result<Vec<String>, StoreError> {
        let mut document = read_document(&self.saves_path)?;
        Ok(document
            .remove(cube_type)
            .map(|saves| saves.into_keys().collect())
            .unwrap_or_default())
    }
}

fn read_document(path: &Path) -> Result<Document, StoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no document yet, starting empty");
            Ok(Document::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn write_document(path: &Path, document: &Document) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}
