//! JSON import/export module for vocabulary lists.
//! Saves a Language with its words to a JSON file and loads it back into the database.

use crate::database::db;
use crate::database::StoreError;
use crate::models::Language;
use log::info;
use rusqlite::Connection;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Exports a language to a JSON file at the specified path.
pub fn export_json_to_path(language: &Language, path: &Path) -> Result<(), ExportError> {
    let json_string = serde_json::to_string_pretty(language)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a language from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Language, ExportError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let language: Language = serde_json::from_str(&contents)?;

    info!(
        "language '{}' with {} words read from '{}'",
        language.name,
        language.words.len(),
        path.display()
    );
    Ok(language)
}

/// Stores the language and its words, returning the IDs of the words.
/// Words whose term already exists in the language are kept as they are.
pub fn save_language(language: &Language, conn: &mut Connection) -> Result<Vec<i64>, ExportError> {
    let tx = conn.transaction().map_err(StoreError::from)?;

    db::add_language(&language.code, &language.name, &tx)?;
    let ids = language
        .words
        .iter()
        .map(|word| db::add_word(&language.code, word, &tx))
        .collect::<Result<Vec<_>, _>>()?;

    tx.commit().map_err(StoreError::from)?;
    Ok(ids)
}

/// Reads a JSON file and stores its contents in the database.
pub fn import_into_database(path: &Path, conn: &mut Connection) -> Result<Language, ExportError> {
    let language = import_json(path)?;
    save_language(&language, conn)?;
    Ok(language)
}

/// Writes a stored language with all of its words to a JSON file.
pub fn export_from_database(
    code: &str,
    path: &Path,
    conn: &Connection,
) -> Result<Language, ExportError> {
    let language = db::load_language(code, conn)?;
    export_json_to_path(&language, path)?;
    info!(
        "language '{}' exported to '{}' ({} words)",
        language.name,
        path.display(),
        language.words.len()
    );
    Ok(language)
}
