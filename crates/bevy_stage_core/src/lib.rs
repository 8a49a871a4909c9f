//! Core data structures for bevy_stage
//!
//! This crate holds everything the level editor needs that is not rendering:
//! - `TileGrid` - The fixed-size grid of painted tile indices
//! - `CollisionProbe` - Point queries against the grid (blocking or not)
//! - `ScrollWindow` - Horizontal camera offset and screen/world conversion
//! - `Character` - The playable preview character and its physics
//! - `EditorSession` - Aggregate owning all of the above plus tool state
//! - `route` - Translates input events into session mutations
//! - `MapDocument` - The `{ "map": [[...]] }` save file format

mod character;
mod collision;
mod config;
mod coords;
mod document;
mod grid;
mod input;
mod layout;
mod palette;
mod scroll;
mod session;

pub use character::{Character, Facing, MotionState, MoveKey, StepOutcome, VerticalContact};
pub use collision::CollisionProbe;
pub use config::{ConfigError, StageConfig};
pub use coords::{CellCoord, Point, ScreenX, WorldX};
pub use document::{DocumentError, MapDocument, EMPTY_CELL};
pub use grid::{GridError, TileGrid};
pub use input::{route, InputEvent, PointerButton, RouteOutcome, StageKey};
pub use layout::{Action, Button, PanelLayout, Rect};
pub use palette::{Palette, TileKind};
pub use scroll::ScrollWindow;
pub use session::{EditorSession, FileRequest, FileResponse, SessionStatus, Tool};
