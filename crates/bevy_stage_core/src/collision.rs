//! Point collision queries against the tile grid
//!
//! Probes are taken at individual pixels (character corners), never by
//! scanning the grid. A pixel blocks when its cell is inside the grid,
//! painted, and not a passable kind.

use crate::{CellCoord, Palette, TileGrid, WorldX};

/// Borrowed view of a grid for collision queries
#[derive(Debug, Clone, Copy)]
pub struct CollisionProbe<'a> {
    grid: &'a TileGrid,
    palette: &'a Palette,
    tile_size: i32,
}

impl<'a> CollisionProbe<'a> {
    pub fn new(grid: &'a TileGrid, palette: &'a Palette, tile_size: i32) -> Self {
        Self {
            grid,
            palette,
            tile_size,
        }
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Right edge of the grid in world pixels
    pub fn map_width_px(&self) -> i32 {
        self.grid.cols() as i32 * self.tile_size
    }

    /// Bottom edge of the grid in pixels
    pub fn grid_height_px(&self) -> i32 {
        self.grid.rows() as i32 * self.tile_size
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Cell containing a world pixel, if inside the grid
    pub fn cell_at(&self, x: WorldX, y: i32) -> Option<CellCoord> {
        CellCoord::from_world(x, y, self.tile_size)
            .filter(|cell| self.grid.contains(cell.row, cell.col))
    }

    pub fn is_blocking(&self, x: WorldX, y: i32) -> bool {
        let Some(cell) = self.cell_at(x, y) else {
            return false;
        };
        match self.grid.get_cell(cell) {
            Ok(Some(kind)) => !self.palette.is_passable(kind),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: i32 = 40;

    fn setup() -> (TileGrid, Palette) {
        let mut grid = TileGrid::new(16, 150, 14, 1);
        grid.set(3, 3, Some(2)).unwrap();
        grid.set(5, 7, Some(3)).unwrap();
        (grid, Palette::default())
    }

    #[test]
    fn test_empty_cell_is_open() {
        let (grid, palette) = setup();
        let probe = CollisionProbe::new(&grid, &palette, TILE);
        assert!(!probe.is_blocking(WorldX(10), 10));
    }

    #[test]
    fn test_solid_cell_blocks_everywhere_inside() {
        let (grid, palette) = setup();
        let probe = CollisionProbe::new(&grid, &palette, TILE);
        for (x, y) in [(280, 200), (319, 239), (300, 220)] {
            assert!(probe.is_blocking(WorldX(x), y), "({}, {})", x, y);
        }
        assert!(!probe.is_blocking(WorldX(320), 200));
        assert!(!probe.is_blocking(WorldX(279), 200));
    }

    #[test]
    fn test_ground_row_blocks() {
        let (grid, palette) = setup();
        let probe = CollisionProbe::new(&grid, &palette, TILE);
        assert!(probe.is_blocking(WorldX(0), 14 * TILE));
        assert!(probe.is_blocking(WorldX(5999), 15 * TILE - 1));
    }

    #[test]
    fn test_bush_is_passable() {
        let (grid, palette) = setup();
        let probe = CollisionProbe::new(&grid, &palette, TILE);
        assert_eq!(grid.get(3, 3), Ok(Some(2)));
        assert!(!probe.is_blocking(WorldX(3 * TILE), 3 * TILE));
        assert!(!probe.is_blocking(WorldX(4 * TILE - 1), 4 * TILE - 1));
    }

    #[test]
    fn test_outside_grid_is_open() {
        let (mut grid, palette) = setup();
        for col in 0..grid.cols() {
            grid.set(0, col, Some(0)).unwrap();
        }
        let probe = CollisionProbe::new(&grid, &palette, TILE);
        assert!(!probe.is_blocking(WorldX(-1), 0));
        assert!(!probe.is_blocking(WorldX(6000), 0));
        assert!(!probe.is_blocking(WorldX(100), -1));
        assert!(!probe.is_blocking(WorldX(100), 16 * TILE));
        assert_eq!(probe.cell_at(WorldX(6000), 0), None);
    }
}
