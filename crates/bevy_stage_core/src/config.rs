//! Stage configuration: grid dimensions, viewport size and motion constants

use crate::Palette;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    TooFewRows(usize),
    NoColumns,
    /// Viewport too short to give each row at least one pixel
    ZeroTileSize,
    EmptyPalette,
    GroundOutsidePalette(u32),
    NegativeSpeed(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TooFewRows(rows) => {
                write!(f, "Grid needs at least 2 rows, got {}", rows)
            }
            ConfigError::NoColumns => write!(f, "Grid needs at least 1 column"),
            ConfigError::ZeroTileSize => {
                write!(f, "Viewport height is smaller than the row count")
            }
            ConfigError::EmptyPalette => write!(f, "Palette has no tile kinds"),
            ConfigError::GroundOutsidePalette(index) => {
                write!(f, "Ground kind {} is not in the palette", index)
            }
            ConfigError::NegativeSpeed(name) => write!(f, "{} must not be negative", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Stage configuration
///
/// All distances are in pixels, all speeds in pixels per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Strip below the grid (status text, close button)
    pub lower_margin: i32,
    /// Strip right of the grid (tool buttons)
    pub side_margin: i32,
    pub rows: usize,
    pub cols: usize,
    pub player_speed: i32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: i32,
    pub gravity: i32,
    /// Distance from a viewport edge at which the camera starts following
    pub follow_margin: i32,
    pub follow_speed: i32,
    pub palette: Palette,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800,
            viewport_height: 640,
            lower_margin: 100,
            side_margin: 300,
            rows: 16,
            cols: 150,
            player_speed: 5,
            jump_velocity: -15,
            gravity: 1,
            follow_margin: 100,
            follow_speed: 5,
            palette: Palette::default(),
        }
    }
}

impl StageConfig {
    /// Pixel footprint of one cell on both axes
    pub fn tile_size(&self) -> i32 {
        if self.rows == 0 {
            return 0;
        }
        self.viewport_height / self.rows as i32
    }

    pub fn grid_height(&self) -> i32 {
        self.rows as i32 * self.tile_size()
    }

    pub fn map_width_px(&self) -> i32 {
        self.cols as i32 * self.tile_size()
    }

    /// Row pre-painted with the ground kind (second to last)
    pub fn ground_row(&self) -> usize {
        self.rows.saturating_sub(2)
    }

    /// Full window size: viewport plus side and lower margins
    pub fn window_size(&self) -> (i32, i32) {
        (
            self.viewport_width + self.side_margin,
            self.viewport_height + self.lower_margin,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.cols == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.tile_size() < 1 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !self.palette.contains(self.palette.ground) {
            return Err(ConfigError::GroundOutsidePalette(self.palette.ground));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("follow_speed", self.follow_speed),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeSpeed(name));
            }
        }
        Ok(())
    }
}
