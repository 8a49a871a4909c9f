//! Save file format: `{ "map": [[tile, ...], ...] }`
//!
//! One nested array of `rows` arrays of `cols` integers, `-1` for an empty
//! cell. No version field, no metadata.

use crate::{Palette, TileGrid};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Integer stored for an empty cell
pub const EMPTY_CELL: i64 = -1;

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentError {
    IoError(String),
    InvalidDocument(String),
    SerializeError(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::IoError(e) => write!(f, "IO error: {}", e),
            DocumentError::InvalidDocument(e) => write!(f, "Invalid map document: {}", e),
            DocumentError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    pub map: Vec<Vec<i64>>,
}

impl MapDocument {
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(content).map_err(|e| DocumentError::InvalidDocument(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::SerializeError(e.to_string()))
    }

    /// Load a document from file
    pub fn read_from(path: &Path) -> Result<Self, DocumentError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Save a document to file
    ///
    /// Writes to a sibling temporary file first and renames it over `path`,
    /// so the destination is either the old document or the complete new one.
    pub fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let content = self.to_json()?;
        let staging = staging_path(path);

        if let Err(e) = std::fs::write(&staging, content) {
            let _ = std::fs::remove_file(&staging);
            return Err(DocumentError::IoError(e.to_string()));
        }
        std::fs::rename(&staging, path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            DocumentError::IoError(e.to_string())
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

impl TileGrid {
    pub fn to_document(&self) -> MapDocument {
        let map = (0..self.rows())
            .map(|row| {
                self.row(row)
                    .map(|tile| tile.map_or(EMPTY_CELL, i64::from))
                    .collect()
            })
            .collect();
        MapDocument { map }
    }

    /// Rebuild a grid shaped like `self` from a document
    ///
    /// The document must have exactly this grid's dimensions and every cell
    /// must be `-1` or a palette index. `self` is not modified.
    pub fn from_document(&self, doc: &MapDocument, palette: &Palette) -> Result<Self, DocumentError> {
        if doc.map.len() != self.rows() {
            return Err(DocumentError::InvalidDocument(format!(
                "expected {} rows, found {}",
                self.rows(),
                doc.map.len()
            )));
        }

        let mut tiles = Vec::with_capacity(self.rows() * self.cols());
        for (row, cells) in doc.map.iter().enumerate() {
            if cells.len() != self.cols() {
                return Err(DocumentError::InvalidDocument(format!(
                    "row {} has {} columns, expected {}",
                    row,
                    cells.len(),
                    self.cols()
                )));
            }
            for (col, &value) in cells.iter().enumerate() {
                tiles.push(decode_cell(value, palette).ok_or_else(|| {
                    DocumentError::InvalidDocument(format!(
                        "cell ({}, {}) holds unknown tile {}",
                        row, col, value
                    ))
                })?);
            }
        }

        Ok(TileGrid::from_cells(
            self.rows(),
            self.cols(),
            self.ground_row(),
            self.ground_kind(),
            tiles,
        ))
    }
}

/// `Some(None)` for an empty cell, `Some(Some(idx))` for a palette kind,
/// `None` for anything else
fn decode_cell(value: i64, palette: &Palette) -> Option<Option<u32>> {
    if value == EMPTY_CELL {
        return Some(None);
    }
    let index = u32::try_from(value).ok()?;
    palette.contains(index).then_some(Some(index))
}
