//! Playable preview character
//!
//! A square the size of one tile, moved one axis at a time against the grid.
//! Each axis uses try-then-reject resolution: compute the candidate position,
//! probe the corners that lead the motion, and keep the old position on any
//! hit. There is no sliding; the one exception is a fall, which stops on the
//! last free pixel row above the floor.
//!
//! The horizontal position is stored relative to the viewport (`ScreenX`) and
//! converted to world space through the `ScrollWindow` for every probe, so
//! dragging the camera carries the character along with the view.

use crate::{CellCoord, CollisionProbe, ScreenX, ScrollWindow, WorldX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// The last vertical update found solid ground under the character
    Grounded,
    Airborne,
}

/// Horizontal movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Left,
    Right,
}

/// Result of the vertical half of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// Feet would enter a solid cell; the character rests where it was
    Landed,
    /// Head would enter a solid cell; the character stays put but is still
    /// airborne and keeps accumulating gravity
    Ceiling,
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    /// Fell onto the bottom edge of the grid
    Despawned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub x: ScreenX,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    /// Edge length in pixels (one tile)
    pub size: i32,
    pub facing: Facing,
    pub state: MotionState,
    held_left: bool,
    held_right: bool,
}

impl Character {
    /// Place a new character with its top-left corner on `cell`
    pub fn spawn(cell: CellCoord, tile_size: i32, scroll: &ScrollWindow) -> Self {
        let mut character = Self {
            x: ScreenX(0),
            y: 0,
            vx: 0,
            vy: 0,
            size: tile_size,
            facing: Facing::Right,
            state: MotionState::Airborne,
            held_left: false,
            held_right: false,
        };
        character.relocate(cell, scroll);
        character
    }

    /// Move to `cell` and drop all velocity; facing is kept
    pub fn relocate(&mut self, cell: CellCoord, scroll: &ScrollWindow) {
        let world_x = WorldX(cell.col as i32 * self.size);
        self.x = scroll.to_screen(world_x);
        self.y = cell.row as i32 * self.size;
        self.vx = 0;
        self.vy = 0;
        self.state = MotionState::Airborne;
        self.held_left = false;
        self.held_right = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.state == MotionState::Grounded
    }

    /// Start a jump; ignored unless grounded
    pub fn jump(&mut self, jump_velocity: i32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vy = jump_velocity;
        self.state = MotionState::Airborne;
        true
    }

    pub fn press(&mut self, key: MoveKey, speed: i32) {
        match key {
            MoveKey::Left => {
                self.held_left = true;
                self.vx = -speed;
                self.facing = Facing::Left;
            }
            MoveKey::Right => {
                self.held_right = true;
                self.vx = speed;
                self.facing = Facing::Right;
            }
        }
    }

    /// Stop moving in `key`'s direction, resuming the opposite key if held
    pub fn release(&mut self, key: MoveKey, speed: i32) {
        match key {
            MoveKey::Left => {
                self.held_left = false;
                if self.vx < 0 {
                    self.vx = 0;
                    if self.held_right {
                        self.press(MoveKey::Right, speed);
                    }
                }
            }
            MoveKey::Right => {
                self.held_right = false;
                if self.vx > 0 {
                    self.vx = 0;
                    if self.held_left {
                        self.press(MoveKey::Left, speed);
                    }
                }
            }
        }
    }

    /// Advance one frame: horizontal move, vertical move, gravity, despawn check
    pub fn update(
        &mut self,
        probe: &CollisionProbe,
        scroll: &ScrollWindow,
        gravity: i32,
    ) -> StepOutcome {
        self.x = self.resolve_horizontal(probe, scroll);

        let (y, contact) = self.resolve_vertical(probe, scroll);
        self.y = y;
        match contact {
            VerticalContact::Landed => {
                self.vy = 0;
                self.state = MotionState::Grounded;
            }
            VerticalContact::Ceiling | VerticalContact::Free => {
                self.vy += gravity;
                self.state = MotionState::Airborne;
            }
        }

        if self.has_fallen_out(probe) {
            StepOutcome::Despawned
        } else {
            StepOutcome::Alive
        }
    }

    /// Screen x after applying `vx`, or the current x if the move is blocked
    pub fn resolve_horizontal(&self, probe: &CollisionProbe, scroll: &ScrollWindow) -> ScreenX {
        let top = self.y;
        let bottom = self.y + self.size - 1;
        let candidate = scroll.to_world(self.x) + self.vx;

        let blocked = if self.vx > 0 {
            let edge = candidate + self.size;
            edge.0 > probe.map_width_px()
                || probe.is_blocking(edge, top)
                || probe.is_blocking(edge, bottom)
        } else if self.vx < 0 {
            candidate.0 < 0
                || probe.is_blocking(candidate, top)
                || probe.is_blocking(candidate, bottom)
        } else {
            true
        };

        if blocked {
            self.x
        } else {
            scroll.to_screen(candidate)
        }
    }

    /// Y after applying `vy`, with the contact that stopped it (if any)
    ///
    /// A blocked fall stops on the last free pixel row, with the feet resting
    /// directly on the floor. A resting character (`vy == 0`) probes the pixel
    /// row under its feet, so standing on ground reports `Landed` every frame.
    pub fn resolve_vertical(
        &self,
        probe: &CollisionProbe,
        scroll: &ScrollWindow,
    ) -> (i32, VerticalContact) {
        let left = scroll.to_world(self.x);
        let right = left + (self.size - 1);
        let candidate = self.y + self.vy;

        if self.vy >= 0 {
            let resting_at = |y: i32| {
                let feet = y + self.size;
                probe.is_blocking(left, feet) || probe.is_blocking(right, feet)
            };
            if resting_at(candidate) {
                let mut y = self.y;
                while y < candidate && !resting_at(y) {
                    y += 1;
                }
                return (y, VerticalContact::Landed);
            }
        } else if probe.is_blocking(left, candidate) || probe.is_blocking(right, candidate) {
            return (self.y, VerticalContact::Ceiling);
        }

        (candidate, VerticalContact::Free)
    }

    /// Bottom edge at or past the grid bottom while in the last row
    pub fn has_fallen_out(&self, probe: &CollisionProbe) -> bool {
        let last_row = probe.rows().saturating_sub(1) as i32;
        self.y + self.size >= probe.grid_height_px()
            && self.y.div_euclid(probe.tile_size()) >= last_row
    }
}
