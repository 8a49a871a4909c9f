//! Translation of Bevy input into editor input events

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use bevy_stage_core::{route, EditorSession, InputEvent, Point, PointerButton, RouteOutcome, StageKey};

/// Last cursor position seen, in window pixels
#[derive(Resource, Default)]
pub struct PointerTracker {
    pub last: Option<Point>,
}

pub fn translate_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

pub fn translate_key(key: KeyCode) -> Option<StageKey> {
    match key {
        KeyCode::KeyW => Some(StageKey::Jump),
        KeyCode::KeyA => Some(StageKey::MoveLeft),
        KeyCode::KeyD => Some(StageKey::MoveRight),
        _ => None,
    }
}

/// Cursor position rounded to whole window pixels
pub fn to_point(cursor: Vec2) -> Point {
    Point::new(cursor.x.floor() as i32, cursor.y.floor() as i32)
}

/// Gather this frame's events: motion first, then presses, releases and keys
fn collect_events(
    cursor: Option<Point>,
    tracker: &mut PointerTracker,
    pointer_blocked: bool,
    mouse_buttons: &ButtonInput<MouseButton>,
    keyboard: &ButtonInput<KeyCode>,
) -> Vec<InputEvent> {
    let mut events = Vec::new();

    if let Some(pos) = cursor {
        if tracker.last != Some(pos) {
            events.push(InputEvent::PointerMove { pos });
        }
        tracker.last = Some(pos);

        if !pointer_blocked {
            events.extend(
                mouse_buttons
                    .get_just_pressed()
                    .filter_map(|b| translate_button(*b))
                    .map(|button| InputEvent::PointerDown { pos, button }),
            );
        }
    }

    events.extend(
        mouse_buttons
            .get_just_released()
            .filter_map(|b| translate_button(*b))
            .map(|button| InputEvent::PointerUp { button }),
    );
    events.extend(
        keyboard
            .get_just_pressed()
            .filter_map(|k| translate_key(*k))
            .map(InputEvent::KeyDown),
    );
    events.extend(
        keyboard
            .get_just_released()
            .filter_map(|k| translate_key(*k))
            .map(InputEvent::KeyUp),
    );
    events
}

pub fn handle_input(
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
    mut tracker: ResMut<PointerTracker>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    // Clicks on the error window belong to egui
    let pointer_blocked = contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.is_pointer_over_area());

    let cursor = window.cursor_position().map(to_point);
    let events = collect_events(
        cursor,
        &mut tracker,
        pointer_blocked,
        &mouse_buttons,
        &keyboard,
    );

    for event in events {
        if route(&mut session, event) == RouteOutcome::Quit {
            bevy::log::info!("Quit requested");
            exit.write(AppExit::Success);
            return;
        }
    }
}
