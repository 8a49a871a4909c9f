//! Tile palette

use serde::{Deserialize, Serialize};

/// One paintable tile kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileKind {
    pub name: String,
    /// Fill color used by the editor in place of a tile image
    pub color: [u8; 3],
    /// Passable kinds can be painted but never block the character
    #[serde(default)]
    pub passable: bool,
}

impl TileKind {
    pub fn solid(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
            passable: false,
        }
    }

    pub fn passable(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
            passable: true,
        }
    }
}

/// The ordered set of tile kinds available for painting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub kinds: Vec<TileKind>,
    /// Kind painted along the ground row of a fresh grid
    pub ground: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            kinds: vec![
                TileKind::solid("Dirt", [134, 96, 67]),
                TileKind::solid("Grass", [88, 160, 72]),
                TileKind::passable("Bush", [46, 110, 52]),
                TileKind::solid("Stone", [128, 128, 136]),
                TileKind::solid("Brick", [170, 74, 68]),
            ],
            ground: 1,
        }
    }
}

impl Palette {
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Check whether `index` names a kind in this palette
    pub fn contains(&self, index: u32) -> bool {
        (index as usize) < self.kinds.len()
    }

    pub fn get(&self, index: u32) -> Option<&TileKind> {
        self.kinds.get(index as usize)
    }

    /// Unknown indices are treated as solid
    pub fn is_passable(&self, index: u32) -> bool {
        self.get(index).is_some_and(|kind| kind.passable)
    }
}
