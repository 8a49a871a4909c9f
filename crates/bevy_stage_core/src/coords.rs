//! Coordinate spaces
//!
//! Horizontal positions live in one of two spaces: `ScreenX` is relative to
//! the left edge of the viewport, `WorldX` is relative to the left edge of the
//! tile grid. Only `ScrollWindow` converts between them. The vertical axis
//! never scrolls, so y stays a plain pixel coordinate.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Horizontal pixel position relative to the viewport's left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ScreenX(pub i32);

/// Horizontal pixel position relative to the grid's left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct WorldX(pub i32);

impl Add<i32> for WorldX {
    type Output = WorldX;

    fn add(self, rhs: i32) -> WorldX {
        WorldX(self.0 + rhs)
    }
}

/// A pointer position in window pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A grid cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Map a world pixel to the cell containing it.
    ///
    /// Uses floor division, so any negative coordinate yields `None`.
    /// Upper bounds are left to the caller.
    pub fn from_world(x: WorldX, y: i32, tile_size: i32) -> Option<Self> {
        let col = x.0.div_euclid(tile_size);
        let row = y.div_euclid(tile_size);
        if col < 0 || row < 0 {
            return None;
        }
        Some(Self::new(row as usize, col as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_world_floors() {
        assert_eq!(
            CellCoord::from_world(WorldX(79), 40, 40),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(
            CellCoord::from_world(WorldX(80), 39, 40),
            Some(CellCoord::new(0, 2))
        );
    }

    #[test]
    fn test_from_world_negative_is_outside() {
        assert_eq!(CellCoord::from_world(WorldX(-1), 10, 40), None);
        assert_eq!(CellCoord::from_world(WorldX(10), -1, 40), None);
    }
}
