//! Local recipe book storage with smart backups.
//!
//! Books live in a single JSON file. Before an import overwrites a book,
//! a `.bak` copy is taken; hashes tracked in a sidecar file keep repeated
//! imports from replacing that backup with content it already holds.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::recipe::{RecipeBook, RecipeError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// Hashes tracked for a book's backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Hash of the book when the backup was taken
    pub original_hash: String,

    /// Hash of the book after the last write through this module
    pub last_write_hash: String,
}

impl BackupMetadata {
    pub fn new(hash: String) -> Self {
        BackupMetadata {
            original_hash: hash.clone(),
            last_write_hash: hash,
        }
    }
}

/// SHA-256 of a file, hex encoded
pub fn hash_file(path: &Path) -> Result<String, StoreError> {
    let data = fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&data)))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Backup and metadata paths for a book file
pub fn backup_paths(book_path: &Path) -> (PathBuf, PathBuf) {
    (with_suffix(book_path, ".bak"), with_suffix(book_path, ".bak.json"))
}

fn read_metadata(metadata_path: &Path) -> Result<Option<BackupMetadata>, StoreError> {
    if !metadata_path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(metadata_path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_metadata(metadata_path: &Path, metadata: &BackupMetadata) -> Result<(), StoreError> {
    fs::write(metadata_path, serde_json::to_string_pretty(metadata)?)?;
    Ok(())
}

/// Load a book; a missing file is an empty book
pub fn load_book(path: &Path) -> Result<RecipeBook, StoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no recipe book yet");
        return Ok(RecipeBook::new());
    }
    let json = fs::read_to_string(path)?;
    Ok(RecipeBook::from_json(&json)?)
}

/// Write a book and record its hash for backup tracking
pub fn save_book(path: &Path, book: &RecipeBook) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, book.to_json()?)?;

    let (_, metadata_path) = backup_paths(path);
    if let Some(mut metadata) = read_metadata(&metadata_path)? {
        metadata.last_write_hash = hash_file(path)?;
        write_metadata(&metadata_path, &metadata)?;
    }

    tracing::debug!(path = %path.display(), recipes = book.len(), "saved recipe book");
    Ok(())
}

/// Back up the book file unless the backup already covers its content
///
/// Returns true when a new backup was written.
pub fn smart_backup(path: &Path) -> Result<bool, StoreError> {
    if !path.exists() {
        return Ok(false);
    }

    let (backup_path, metadata_path) = backup_paths(path);
    let current = hash_file(path)?;

    if backup_path.exists() {
        match read_metadata(&metadata_path)? {
            // Backup without metadata: leave it alone
            None => return Ok(false),
            Some(m) if current == m.original_hash || current == m.last_write_hash => {
                return Ok(false)
            }
            Some(_) => {}
        }
    }

    fs::copy(path, &backup_path)?;
    write_metadata(&metadata_path, &BackupMetadata::new(current))?;
    tracing::info!(backup = %backup_path.display(), "backed up recipe book");
    Ok(true)
}

/// Replace the stored book with an imported JSON export
///
/// The JSON is parsed before anything is touched on disk. Recipes outside
/// the editing ranges are imported as-is and only reported.
pub fn import_book(path: &Path, json: &str) -> Result<RecipeBook, StoreError> {
    let book = RecipeBook::from_json(json)?;
    for recipe in &book {
        if let Err(e) = recipe.validate() {
            tracing::warn!(recipe = %recipe.id, "{}", e);
        }
    }
    smart_backup(path)?;
    save_book(path, &book)?;
    Ok(book)
}
