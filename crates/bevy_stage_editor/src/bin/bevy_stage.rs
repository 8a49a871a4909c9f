//! Standalone level editor binary
//!
//! Run with: bevy_stage

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_stage_editor::bevy_stage_core::{EditorSession, FileResponse, MapDocument, StageConfig};
use bevy_stage_editor::preferences::EditorPreferences;
use bevy_stage_editor::StageEditorPlugin;

fn main() {
    let (width, height) = StageConfig::default().window_size();
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Stage".to_string(),
                resolution: WindowResolution::new(width as u32, height as u32)
                    .with_scale_factor_override(1.0),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(StageEditorPlugin::default())
        .add_systems(Startup, auto_open_last_map)
        .run();
}

/// Reopen the last saved or loaded map if enabled in preferences
fn auto_open_last_map(mut session: ResMut<EditorSession>, preferences: Res<EditorPreferences>) {
    if !preferences.auto_open_last_map {
        return;
    }
    let Some(path) = preferences.last_map() else {
        return;
    };
    if !path.exists() {
        warn!("Last map file not found: {}", path.display());
        return;
    }

    match MapDocument::read_from(path) {
        Ok(document) => {
            session.complete(FileResponse::Loaded {
                path: path.to_path_buf(),
                document,
            });
            if session.status().is_some_and(|s| !s.is_error()) {
                info!("Auto-opened last map: {}", path.display());
            }
        }
        Err(e) => warn!("Failed to auto-open map '{}': {}", path.display(), e),
    }
}
