//! bevy_stage_editor - tile map level editor with a platformer preview
//!
//! Paint tiles onto a scrolling grid, drop a character onto the map and walk
//! or jump it around to try the level out. All editing state lives in
//! [`bevy_stage_core::EditorSession`]; this crate draws it and feeds it input.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_stage_editor::StageEditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(StageEditorPlugin::new())
//!         .run();
//! }
//! ```

pub mod dialogs;
pub mod input;
pub mod preferences;
pub mod render;

pub use bevy_stage_core;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use bevy_stage_core::{EditorSession, StageConfig};

use preferences::EditorPreferences;

/// Frames per second of the character preview
pub const STEP_RATE_HZ: f64 = 60.0;

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy_stage_editor::StageEditorPlugin;
/// use bevy_stage_editor::bevy_stage_core::StageConfig;
///
/// let config = StageConfig { cols: 60, ..StageConfig::default() };
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(StageEditorPlugin::new().with_config(config))
///     .run();
/// ```
#[derive(Default)]
pub struct StageEditorPlugin {
    /// Overrides the stage settings stored in preferences
    pub config: Option<StageConfig>,
}

impl StageEditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of the stage settings from preferences
    pub fn with_config(mut self, config: StageConfig) -> Self {
        self.config = Some(config);
        self
    }

    fn resolve_config(&self, preferences: &EditorPreferences) -> StageConfig {
        let config = self
            .config
            .clone()
            .unwrap_or_else(|| preferences.stage.clone());
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                bevy::log::warn!("Invalid stage config: {}. Using defaults.", e);
                StageConfig::default()
            }
        }
    }
}

impl Plugin for StageEditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let config = self.resolve_config(&preferences);
        bevy::log::info!(
            "StageEditorPlugin: {}x{} grid, {}px tiles",
            config.rows,
            config.cols,
            config.tile_size()
        );

        app.add_plugins(EguiPlugin::default())
            .insert_resource(EditorSession::new(config))
            .insert_resource(preferences)
            .insert_resource(Time::<Fixed>::from_hz(STEP_RATE_HZ))
            .init_resource::<input::PointerTracker>()
            .add_systems(
                Startup,
                (setup_editor_camera, fit_window, render::spawn_stage),
            )
            .add_systems(FixedUpdate, step_session)
            .add_systems(
                Update,
                (
                    input::handle_input,
                    dialogs::process_file_requests,
                    render::sync_cells,
                    render::sync_character,
                    render::sync_status_text,
                    render::draw_overlays,
                )
                    .chain(),
            )
            .add_systems(EguiPrimaryContextPass, dialogs::render_error_window);
    }
}

/// Advance the character preview by one frame
fn step_session(mut session: ResMut<EditorSession>) {
    session.step();
}

fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Size the primary window to the viewport plus side and lower margins
fn fit_window(
    session: Res<EditorSession>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    let (width, height) = session.config().window_size();
    window.resolution.set(width as f32, height as f32);
    window.resizable = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_config_override() {
        let config = StageConfig {
            cols: 60,
            ..StageConfig::default()
        };
        let plugin = StageEditorPlugin::new().with_config(config.clone());
        assert_eq!(plugin.resolve_config(&EditorPreferences::default()), config);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let mut preferences = EditorPreferences::default();
        preferences.stage.rows = 1;
        let plugin = StageEditorPlugin::new();
        assert_eq!(plugin.resolve_config(&preferences), StageConfig::default());
    }

    #[test]
    fn test_preferences_config_used() {
        let mut preferences = EditorPreferences::default();
        preferences.stage.gravity = 2;
        assert_eq!(
            StageEditorPlugin::new()
                .resolve_config(&preferences)
                .gravity,
            2
        );
    }
}
