//! File dialogs and the error window
//!
//! Answers the session's queued save/load requests with native file choosers
//! and shows failed operations in an egui window.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use bevy_stage_core::{EditorSession, FileRequest, FileResponse, MapDocument, SessionStatus};
use std::path::Path;

use crate::preferences::EditorPreferences;

/// Write `document` to `path` and describe the result
pub fn save_to(document: &MapDocument, path: &Path) -> FileResponse {
    match document.write_to(path) {
        Ok(()) => FileResponse::Saved(path.to_path_buf()),
        Err(e) => FileResponse::Failed(e),
    }
}

/// Read the document at `path` and describe the result
pub fn load_from(path: &Path) -> FileResponse {
    match MapDocument::read_from(path) {
        Ok(document) => FileResponse::Loaded {
            path: path.to_path_buf(),
            document,
        },
        Err(e) => FileResponse::Failed(e),
    }
}

#[cfg(feature = "native")]
fn run_dialog(request: FileRequest, last_map: Option<&Path>) -> FileResponse {
    let mut dialog = rfd::FileDialog::new().add_filter("Map", &["json"]);
    if let Some(dir) = last_map.and_then(Path::parent) {
        dialog = dialog.set_directory(dir);
    }

    match request {
        FileRequest::Save(document) => match dialog.set_file_name("map.json").save_file() {
            Some(path) => save_to(&document, &path),
            None => FileResponse::Cancelled,
        },
        FileRequest::Load => match dialog.pick_file() {
            Some(path) => load_from(&path),
            None => FileResponse::Cancelled,
        },
    }
}

#[cfg(not(feature = "native"))]
fn run_dialog(_request: FileRequest, _last_map: Option<&Path>) -> FileResponse {
    bevy::log::warn!("File dialogs need the `native` feature");
    FileResponse::Cancelled
}

/// Drain the session's file requests and feed back the responses
pub fn process_file_requests(
    mut session: ResMut<EditorSession>,
    mut preferences: ResMut<EditorPreferences>,
) {
    for request in session.take_requests() {
        let response = run_dialog(request, preferences.last_map());
        session.complete(response);
        remember_completed_map(&session, &mut preferences);
    }
}

/// Store the path of a successful save or load in preferences
fn remember_completed_map(session: &EditorSession, preferences: &mut EditorPreferences) {
    let path = match session.status() {
        Some(SessionStatus::Saved(path) | SessionStatus::Loaded(path)) => path,
        _ => return,
    };
    if preferences.remember_map(path) {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}

/// Show the last failed operation until dismissed
pub fn render_error_window(mut contexts: EguiContexts, mut session: ResMut<EditorSession>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let Some(SessionStatus::Failed(message)) = session.status().cloned() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&message);
            ui.separator();
            if ui.button("OK").clicked() {
                session.clear_status();
            }
        });
}
