//! Editor session: the single owner of all editable state
//!
//! `EditorSession` holds the grid, the camera, the optional character and the
//! tool selection. The input router mutates it, the presentation layer reads
//! it, and `step` advances it by one frame.
//!
//! Saving and loading are modelled as requests. The session queues a
//! `FileRequest`, the presentation layer runs whatever file chooser it has and
//! answers with a `FileResponse` on the same or a later frame. The core never
//! blocks on a dialog.

use crate::{
    Action, CellCoord, Character, CollisionProbe, DocumentError, MapDocument, MoveKey,
    PanelLayout, ScrollWindow, StageConfig, StepOutcome, TileGrid,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Erase,
    Paint(u32),
    PlaceCharacter,
}

/// Work the presentation layer must perform for the session
#[derive(Debug, Clone, PartialEq)]
pub enum FileRequest {
    /// Ask for a destination and write this snapshot there
    Save(MapDocument),
    /// Ask for a source document and answer with `FileResponse::Loaded`
    Load,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileResponse {
    Saved(PathBuf),
    Loaded {
        path: PathBuf,
        document: MapDocument,
    },
    Failed(DocumentError),
    /// The user dismissed the dialog
    Cancelled,
}

/// Outcome of the last one-shot action, for display
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Saved(PathBuf),
    Loaded(PathBuf),
    Reset,
    Failed(String),
}

impl SessionStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, SessionStatus::Failed(_))
    }
}

/// Pointer drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DragTracker {
    active: bool,
    last_x: i32,
}

#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: StageConfig,
    layout: PanelLayout,
    grid: TileGrid,
    scroll: ScrollWindow,
    character: Option<Character>,
    tool: Tool,
    selected_button: Option<Action>,
    highlighted_cell: Option<CellCoord>,
    drag: DragTracker,
    requests: Vec<FileRequest>,
    status: Option<SessionStatus>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

impl EditorSession {
    /// Create a session with a fresh grid
    ///
    /// The config is expected to have passed `StageConfig::validate`.
    pub fn new(config: StageConfig) -> Self {
        let grid = TileGrid::new(
            config.rows,
            config.cols,
            config.ground_row(),
            config.palette.ground,
        );
        Self {
            layout: PanelLayout::standard(&config),
            scroll: ScrollWindow::from_config(&config),
            grid,
            config,
            character: None,
            tool: Tool::default(),
            selected_button: None,
            highlighted_cell: None,
            drag: DragTracker::default(),
            requests: Vec::new(),
            status: None,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn scroll(&self) -> &ScrollWindow {
        &self.scroll
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Button drawn as selected, if any
    pub fn selected_button(&self) -> Option<Action> {
        self.selected_button
    }

    /// Cell under the last pointer press, until release
    pub fn highlighted_cell(&self) -> Option<CellCoord> {
        self.highlighted_cell
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    pub fn status(&self) -> Option<&SessionStatus> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn probe(&self) -> CollisionProbe<'_> {
        CollisionProbe::new(&self.grid, &self.config.palette, self.config.tile_size())
    }

    /// Run a panel action and mark its button as the selected one
    pub fn apply(&mut self, action: Action) {
        if let Action::SelectPalette(index) = action {
            if !self.config.palette.contains(index) {
                warn!("Ignoring unknown palette index {}", index);
                return;
            }
        }

        self.selected_button = Some(action);
        match action {
            Action::Reset => self.reset(),
            Action::Save => self.request_save(),
            Action::Load => self.requests.push(FileRequest::Load),
            Action::SelectPalette(index) => self.tool = Tool::Paint(index),
            Action::SelectEraser => self.tool = Tool::Erase,
            Action::SelectCharacterTool => self.tool = Tool::PlaceCharacter,
        }
    }

    /// Clear the grid back to its default and remove the character
    pub fn reset(&mut self) {
        self.grid.reset();
        self.character = None;
        self.highlighted_cell = None;
        self.status = Some(SessionStatus::Reset);
        info!("Map reset");
    }

    fn request_save(&mut self) {
        self.requests.push(FileRequest::Save(self.grid.to_document()));
    }

    /// Take all queued file requests, oldest first
    pub fn take_requests(&mut self) -> Vec<FileRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Finish a file request
    ///
    /// A loaded document replaces the grid only if it matches the grid's
    /// dimensions and palette. On any failure the grid is left untouched.
    pub fn complete(&mut self, response: FileResponse) {
        match response {
            FileResponse::Saved(path) => {
                info!("Saved map to {}", path.display());
                self.status = Some(SessionStatus::Saved(path));
            }
            FileResponse::Loaded { path, document } => {
                match self.grid.from_document(&document, &self.config.palette) {
                    Ok(grid) => {
                        self.grid = grid;
                        info!("Loaded map from {}", path.display());
                        self.status = Some(SessionStatus::Loaded(path));
                    }
                    Err(e) => {
                        warn!("Rejected map {}: {}", path.display(), e);
                        self.status = Some(SessionStatus::Failed(format!(
                            "Failed to load {}: {}",
                            path.display(),
                            e
                        )));
                    }
                }
            }
            FileResponse::Failed(e) => {
                warn!("File operation failed: {}", e);
                self.status = Some(SessionStatus::Failed(e.to_string()));
            }
            FileResponse::Cancelled => debug!("File dialog cancelled"),
        }
    }

    /// Cell under a window point inside the grid area after scrolling
    pub fn cell_at_screen(&self, x: i32, y: i32) -> Option<CellCoord> {
        let world = self.scroll.to_world(crate::ScreenX(x));
        self.probe().cell_at(world, y)
    }

    /// Apply the active tool to `cell`
    ///
    /// Painting highlights the cell; erasing clears the highlight.
    pub fn use_tool(&mut self, cell: CellCoord) {
        let tile = match self.tool {
            Tool::PlaceCharacter => {
                if self.grid.contains(cell.row, cell.col) {
                    self.highlighted_cell = Some(cell);
                    self.place_character(cell);
                } else {
                    warn!("Cannot place character at row {} col {}", cell.row, cell.col);
                }
                return;
            }
            Tool::Erase => None,
            Tool::Paint(kind) => Some(kind),
        };

        match self.grid.set_cell(cell, tile) {
            Ok(()) => self.highlighted_cell = tile.map(|_| cell),
            Err(e) => warn!("Cannot apply tool: {}", e),
        }
    }

    fn place_character(&mut self, cell: CellCoord) {
        let tile_size = self.config.tile_size();
        match self.character.as_mut() {
            Some(character) => character.relocate(cell, &self.scroll),
            None => self.character = Some(Character::spawn(cell, tile_size, &self.scroll)),
        }
        debug!("Character placed at row {} col {}", cell.row, cell.col);
    }

    pub fn begin_drag(&mut self, x: i32) {
        self.drag = DragTracker {
            active: true,
            last_x: x,
        };
    }

    /// Pan the camera by the pointer movement since the last drag update
    pub fn drag_to(&mut self, x: i32) {
        if !self.drag.active {
            return;
        }
        self.scroll.drag(x - self.drag.last_x);
        self.drag.last_x = x;
    }

    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted_cell = None;
    }

    pub fn press_move(&mut self, key: MoveKey) {
        let speed = self.config.player_speed;
        if let Some(character) = self.character.as_mut() {
            character.press(key, speed);
        }
    }

    pub fn release_move(&mut self, key: MoveKey) {
        let speed = self.config.player_speed;
        if let Some(character) = self.character.as_mut() {
            character.release(key, speed);
        }
    }

    pub fn jump(&mut self) {
        let jump_velocity = self.config.jump_velocity;
        if let Some(character) = self.character.as_mut() {
            character.jump(jump_velocity);
        }
    }

    /// Advance one frame: camera follow, then character physics
    pub fn step(&mut self) {
        let Some(mut character) = self.character.take() else {
            return;
        };

        self.scroll.follow(
            &mut character,
            self.config.follow_margin,
            self.config.follow_speed,
        );

        let outcome = character.update(&self.probe(), &self.scroll, self.config.gravity);
        match outcome {
            StepOutcome::Alive => self.character = Some(character),
            StepOutcome::Despawned => info!("Character fell off the map"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScreenX, WorldX, EMPTY_CELL};

    fn session() -> EditorSession {
        EditorSession::default()
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.tool(), Tool::Erase);
        assert!(session.character().is_none());
        assert_eq!(session.scroll().offset(), 0);
        assert_eq!(session.selected_button(), None);
        assert!(session.grid().row(14).all(|t| t == Some(1)));
    }

    #[test]
    fn test_select_tools() {
        let mut session = session();
        session.apply(Action::SelectPalette(3));
        assert_eq!(session.tool(), Tool::Paint(3));
        assert_eq!(session.selected_button(), Some(Action::SelectPalette(3)));

        session.apply(Action::SelectCharacterTool);
        assert_eq!(session.tool(), Tool::PlaceCharacter);
        assert_eq!(session.selected_button(), Some(Action::SelectCharacterTool));

        session.apply(Action::SelectEraser);
        assert_eq!(session.tool(), Tool::Erase);
    }

    #[test]
    fn test_unknown_palette_ignored() {
        let mut session = session();
        session.apply(Action::SelectPalette(2));
        session.apply(Action::SelectPalette(42));
        assert_eq!(session.tool(), Tool::Paint(2));
        assert_eq!(session.selected_button(), Some(Action::SelectPalette(2)));
    }

    #[test]
    fn test_paint_and_erase() {
        let mut session = session();
        let cell = CellCoord::new(3, 3);

        session.apply(Action::SelectPalette(4));
        session.use_tool(cell);
        assert_eq!(session.grid().get_cell(cell), Ok(Some(4)));
        assert_eq!(session.highlighted_cell(), Some(cell));

        session.apply(Action::SelectEraser);
        session.use_tool(cell);
        assert_eq!(session.grid().get_cell(cell), Ok(None));
        assert_eq!(session.highlighted_cell(), None);
    }

    #[test]
    fn test_tool_outside_grid_changes_nothing() {
        let mut session = session();
        let before = session.grid().clone();
        let outside = CellCoord::new(3, 150);

        for action in [
            Action::SelectPalette(1),
            Action::SelectEraser,
            Action::SelectCharacterTool,
        ] {
            session.apply(action);
            session.use_tool(outside);
            assert_eq!(session.grid(), &before);
            assert_eq!(session.highlighted_cell(), None);
        }
        assert!(session.character().is_none());
    }

    #[test]
    fn test_reset_keeps_tool_and_drops_character() {
        let mut session = session();
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(13, 5));
        session.apply(Action::SelectPalette(0));
        session.use_tool(CellCoord::new(2, 2));

        session.apply(Action::Reset);

        assert!(session.character().is_none());
        assert_eq!(session.grid().get(2, 2), Ok(None));
        assert_eq!(session.tool(), Tool::Paint(0));
        assert_eq!(session.status(), Some(&SessionStatus::Reset));
    }

    #[test]
    fn test_save_snapshots_grid() {
        let mut session = session();
        session.apply(Action::SelectPalette(3));
        session.use_tool(CellCoord::new(0, 0));
        session.apply(Action::Save);
        session.use_tool(CellCoord::new(0, 1));

        let requests = session.take_requests();
        assert_eq!(requests.len(), 1);
        let FileRequest::Save(doc) = &requests[0] else {
            panic!("Expected save request");
        };
        assert_eq!(doc.map[0][0], 3);
        assert_eq!(doc.map[0][1], EMPTY_CELL);
        assert!(session.take_requests().is_empty());
        assert_eq!(session.tool(), Tool::Paint(3));
    }

    #[test]
    fn test_load_replaces_grid() {
        let mut session = session();
        let mut source = EditorSession::default();
        source.apply(Action::SelectPalette(2));
        source.use_tool(CellCoord::new(7, 70));

        session.apply(Action::Load);
        assert_eq!(session.take_requests(), vec![FileRequest::Load]);
        session.complete(FileResponse::Loaded {
            path: PathBuf::from("level.json"),
            document: source.grid().to_document(),
        });

        assert_eq!(session.grid(), source.grid());
        assert_eq!(
            session.status(),
            Some(&SessionStatus::Loaded(PathBuf::from("level.json")))
        );
    }

    #[test]
    fn test_invalid_load_keeps_grid() {
        let mut session = session();
        session.apply(Action::SelectPalette(0));
        session.use_tool(CellCoord::new(1, 1));
        let before = session.grid().clone();

        session.complete(FileResponse::Loaded {
            path: PathBuf::from("bad.json"),
            document: MapDocument {
                map: vec![vec![0; 3]; 2],
            },
        });

        assert_eq!(session.grid(), &before);
        assert!(session.status().is_some_and(|s| s.is_error()));
    }

    #[test]
    fn test_cancel_is_noop() {
        let mut session = session();
        let before = session.grid().clone();
        session.apply(Action::Load);
        session.take_requests();
        session.complete(FileResponse::Cancelled);
        assert_eq!(session.grid(), &before);
        assert_eq!(session.status(), None);
    }

    #[test]
    fn test_io_failure_reported() {
        let mut session = session();
        session.complete(FileResponse::Failed(DocumentError::IoError(
            "disk full".to_string(),
        )));
        assert_eq!(
            session.status(),
            Some(&SessionStatus::Failed("IO error: disk full".to_string()))
        );
        session.clear_status();
        assert_eq!(session.status(), None);
    }

    #[test]
    fn test_character_grounded_on_spawn_row() {
        let mut session = session();
        let ground_row = session.config().ground_row();
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(ground_row - 1, 5));

        session.step();

        let character = session.character().expect("character spawned");
        assert_eq!(character.y, (ground_row as i32 - 1) * 40);
        assert_eq!(character.vy, 0);
        assert!(character.is_grounded());
    }

    #[test]
    fn test_character_blocked_at_world_origin() {
        let mut session = session();
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(13, 0));
        session.step();
        session.press_move(MoveKey::Left);

        for _ in 0..5 {
            session.step();
        }

        let character = session.character().expect("character spawned");
        assert_eq!(session.scroll().to_world(character.x), WorldX(0));
    }

    #[test]
    fn test_bush_overlap_is_not_blocking() {
        let mut session = session();
        session.apply(Action::SelectPalette(2));
        session.use_tool(CellCoord::new(3, 3));
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(3, 3));

        assert_eq!(session.grid().get(3, 3), Ok(Some(2)));
        assert!(!session.probe().is_blocking(WorldX(120), 120));
        assert!(!session.probe().is_blocking(WorldX(159), 159));
    }

    #[test]
    fn test_character_despawns_in_last_row() {
        let mut session = session();
        session.apply(Action::SelectEraser);
        session.use_tool(CellCoord::new(14, 5));
        session.use_tool(CellCoord::new(14, 6));
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(14, 5));

        for _ in 0..30 {
            session.step();
        }

        assert!(session.character().is_none());
        assert_eq!(session.tool(), Tool::PlaceCharacter);
    }

    #[test]
    fn test_camera_follows_walking_character() {
        let mut session = session();
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(13, 17));
        session.step();
        session.press_move(MoveKey::Right);

        for _ in 0..40 {
            session.step();
        }

        let character = session.character().expect("character spawned");
        assert!(session.scroll().offset() > 0);
        assert!(character.x <= ScreenX(705));
        assert!(session.scroll().offset() <= session.scroll().max_offset());
    }

    #[test]
    fn test_camera_pan_is_not_collision_checked() {
        let mut session = session();
        session.apply(Action::SelectPalette(3));
        session.use_tool(CellCoord::new(13, 19));
        session.apply(Action::SelectCharacterTool);
        session.use_tool(CellCoord::new(13, 17));
        session.step();
        session.press_move(MoveKey::Right);

        for _ in 0..40 {
            session.step();
        }

        let character = session.character().expect("character spawned");
        // The wall at col 19 never stopped it
        assert!(session.scroll().to_world(character.x) > WorldX(19 * 40));
        assert!(character.x <= ScreenX(705));
    }

    #[test]
    fn test_drag_pans_camera() {
        let mut session = session();
        session.begin_drag(400);
        session.drag_to(300);
        assert_eq!(session.scroll().offset(), 100);
        session.drag_to(350);
        assert_eq!(session.scroll().offset(), 50);
        session.end_drag();
        session.drag_to(0);
        assert_eq!(session.scroll().offset(), 50);
    }

    #[test]
    fn test_keys_ignored_without_character() {
        let mut session = session();
        session.press_move(MoveKey::Right);
        session.jump();
        session.step();
        assert!(session.character().is_none());
    }
}
