//! Horizontal camera over the tile grid
//!
//! The offset is the pixel distance from the grid's left edge to the
//! viewport's left edge. It always stays inside `[0, map_width - viewport]`,
//! or at 0 when the map is narrower than the viewport.

use crate::{Character, ScreenX, StageConfig, WorldX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollWindow {
    offset_px: i32,
    map_width_px: i32,
    viewport_width_px: i32,
}

impl ScrollWindow {
    pub fn new(map_width_px: i32, viewport_width_px: i32) -> Self {
        Self {
            offset_px: 0,
            map_width_px,
            viewport_width_px,
        }
    }

    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(config.map_width_px(), config.viewport_width)
    }

    pub fn offset(&self) -> i32 {
        self.offset_px
    }

    /// Largest valid offset (0 when the map fits in the viewport)
    pub fn max_offset(&self) -> i32 {
        (self.map_width_px - self.viewport_width_px).max(0)
    }

    pub fn to_world(&self, x: ScreenX) -> WorldX {
        WorldX(x.0 + self.offset_px)
    }

    pub fn to_screen(&self, x: WorldX) -> ScreenX {
        ScreenX(x.0 - self.offset_px)
    }

    /// Set the offset directly, clamped to the map
    pub fn set_offset(&mut self, offset_px: i32) {
        self.offset_px = offset_px;
        self.clamp();
    }

    /// Pan by a pointer drag of `delta_screen_x` pixels
    ///
    /// Dragging the pointer right moves the camera left, as if the canvas
    /// were grabbed.
    pub fn drag(&mut self, delta_screen_x: i32) {
        self.offset_px -= delta_screen_x;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.offset_px = self.offset_px.clamp(0, self.max_offset());
    }

    /// Pan the camera after a character pushing against a viewport edge
    ///
    /// While the character is moving left at or past the left threshold
    /// (or right at or past the right one) and the camera still has room, the
    /// camera advances by `speed` and the character is pinned to the
    /// threshold on screen. Returns whether the camera moved.
    ///
    /// The pan itself is not collision-checked: on a pinned frame the
    /// character's world x still advances by the horizontal move, so a wall
    /// right at the threshold can be walked into while the camera has room.
    pub fn follow(&mut self, character: &mut Character, margin: i32, speed: i32) -> bool {
        let left_threshold = ScreenX(margin);
        let right_threshold = ScreenX(self.viewport_width_px - margin);
        let before = self.offset_px;

        if character.x <= left_threshold && self.offset_px > 0 && character.vx < 0 {
            self.offset_px -= speed;
            self.clamp();
            character.x = left_threshold;
        } else if character.x >= right_threshold
            && self.offset_px < self.max_offset()
            && character.vx > 0
        {
            self.offset_px += speed;
            self.clamp();
            character.x = right_threshold;
        }

        self.offset_px != before
    }
}
