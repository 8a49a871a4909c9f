//! Tile grid storage

use crate::CellCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { row: usize, col: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size grid of tile indices
///
/// `None` is an empty cell, `Some(idx)` indexes into the palette. Cells are
/// stored row-major. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Option<u32>>,
    ground_row: usize,
    ground_kind: u32,
}

impl TileGrid {
    /// Create a grid with every cell empty except the ground row
    pub fn new(rows: usize, cols: usize, ground_row: usize, ground_kind: u32) -> Self {
        let mut grid = Self {
            rows,
            cols,
            tiles: vec![None; rows * cols],
            ground_row,
            ground_kind,
        };
        grid.paint_ground();
        grid
    }

    /// Build a grid directly from row-major cells (caller checks the length)
    pub(crate) fn from_cells(
        rows: usize,
        cols: usize,
        ground_row: usize,
        ground_kind: u32,
        tiles: Vec<Option<u32>>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), rows * cols);
        Self {
            rows,
            cols,
            tiles,
            ground_row,
            ground_kind,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ground_row(&self) -> usize {
        self.ground_row
    }

    pub fn ground_kind(&self) -> u32 {
        self.ground_kind
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.contains(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::OutOfBounds { row, col })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<u32>, GridError> {
        let index = self.index(row, col)?;
        Ok(self.tiles[index])
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Option<u32>) -> Result<(), GridError> {
        let index = self.index(row, col)?;
        self.tiles[index] = tile;
        Ok(())
    }

    pub fn get_cell(&self, cell: CellCoord) -> Result<Option<u32>, GridError> {
        self.get(cell.row, cell.col)
    }

    pub fn set_cell(&mut self, cell: CellCoord, tile: Option<u32>) -> Result<(), GridError> {
        self.set(cell.row, cell.col, tile)
    }

    /// Clear every cell, then repaint the ground row
    pub fn reset(&mut self) {
        self.tiles.fill(None);
        self.paint_ground();
    }

    fn paint_ground(&mut self) {
        if self.ground_row >= self.rows {
            return;
        }
        let start = self.ground_row * self.cols;
        self.tiles[start..start + self.cols].fill(Some(self.ground_kind));
    }

    /// Iterate one row of cells
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<u32>> + '_ {
        let start = row.min(self.rows) * self.cols;
        let end = if row < self.rows { start + self.cols } else { start };
        self.tiles[start..end].iter().copied()
    }

    /// Count of non-empty cells
    pub fn painted_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}
