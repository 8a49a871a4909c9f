//! Input routing
//!
//! Translates pointer and key events into session mutations. Pointer presses
//! are dispatched in a fixed priority order: close affordance, drag start,
//! side buttons, palette buttons, then the grid.

use crate::{EditorSession, MoveKey, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the character preview responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKey {
    Jump,
    MoveLeft,
    MoveRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: PointerButton },
    PointerUp { button: PointerButton },
    PointerMove { pos: Point },
    KeyDown(StageKey),
    KeyUp(StageKey),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Continue,
    Quit,
}

/// Apply one input event to the session
pub fn route(session: &mut EditorSession, event: InputEvent) -> RouteOutcome {
    match event {
        InputEvent::PointerDown {
            pos,
            button: PointerButton::Primary,
        } => return pointer_down(session, pos),
        InputEvent::PointerDown { .. } => {}
        InputEvent::PointerUp { button } => {
            if button == PointerButton::Primary {
                session.end_drag();
            }
            session.clear_highlight();
        }
        InputEvent::PointerMove { pos } => session.drag_to(pos.x),
        InputEvent::KeyDown(key) => match key {
            StageKey::Jump => session.jump(),
            StageKey::MoveLeft => session.press_move(MoveKey::Left),
            StageKey::MoveRight => session.press_move(MoveKey::Right),
        },
        InputEvent::KeyUp(key) => match key {
            StageKey::Jump => {}
            StageKey::MoveLeft => session.release_move(MoveKey::Left),
            StageKey::MoveRight => session.release_move(MoveKey::Right),
        },
        InputEvent::Quit => return RouteOutcome::Quit,
    }
    RouteOutcome::Continue
}

fn pointer_down(session: &mut EditorSession, pos: Point) -> RouteOutcome {
    if session.layout().close.contains(pos) {
        return RouteOutcome::Quit;
    }

    session.begin_drag(pos.x);

    if let Some(action) = session.layout().button_at(pos).map(|b| b.action) {
        session.apply(action);
        return RouteOutcome::Continue;
    }

    if session.layout().is_over_grid(pos) {
        if let Some(cell) = session.cell_at_screen(pos.x, pos.y) {
            session.use_tool(cell);
        }
    }
    RouteOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, CellCoord, FileRequest, ScreenX, Tool};

    fn click(session: &mut EditorSession, x: i32, y: i32) -> RouteOutcome {
        let outcome = route(
            session,
            InputEvent::PointerDown {
                pos: Point::new(x, y),
                button: PointerButton::Primary,
            },
        );
        route(
            session,
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            },
        );
        outcome
    }

    #[test]
    fn test_close_button_quits() {
        let mut session = EditorSession::default();
        assert_eq!(click(&mut session, 1060, 700), RouteOutcome::Quit);
        assert_eq!(route(&mut session, InputEvent::Quit), RouteOutcome::Quit);
    }

    #[test]
    fn test_palette_then_paint() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 160);
        assert_eq!(session.tool(), Tool::Paint(2));

        click(&mut session, 125, 130);
        assert_eq!(session.grid().get(3, 3), Ok(Some(2)));
    }

    #[test]
    fn test_paint_respects_scroll() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 60);
        route(
            &mut session,
            InputEvent::PointerDown {
                pos: Point::new(500, 700),
                button: PointerButton::Primary,
            },
        );
        route(
            &mut session,
            InputEvent::PointerMove {
                pos: Point::new(420, 700),
            },
        );
        route(
            &mut session,
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            },
        );
        assert_eq!(session.scroll().offset(), 80);

        click(&mut session, 0, 0);
        assert_eq!(session.grid().get(0, 2), Ok(Some(0)));
        assert_eq!(session.grid().get(0, 0), Ok(None));
    }

    #[test]
    fn test_side_buttons() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 60);
        click(&mut session, 900, 500);
        assert_eq!(session.tool(), Tool::Erase);
        assert_eq!(session.selected_button(), Some(Action::SelectEraser));

        click(&mut session, 900, 550);
        click(&mut session, 900, 600);
        let requests = session.take_requests();
        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], FileRequest::Save(_)));
        assert_eq!(requests[1], FileRequest::Load);
        assert_eq!(session.tool(), Tool::Erase);
        assert_eq!(session.selected_button(), Some(Action::Load));
    }

    #[test]
    fn test_panel_click_does_not_paint() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 60);
        let before = session.grid().painted_count();
        click(&mut session, 1000, 20);
        assert_eq!(session.grid().painted_count(), before);
        assert_eq!(session.tool(), Tool::Paint(0));
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 60);
        route(
            &mut session,
            InputEvent::PointerDown {
                pos: Point::new(10, 10),
                button: PointerButton::Secondary,
            },
        );
        assert_eq!(session.grid().get(0, 0), Ok(None));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_release_clears_highlight() {
        let mut session = EditorSession::default();
        click(&mut session, 860, 60);
        route(
            &mut session,
            InputEvent::PointerDown {
                pos: Point::new(10, 10),
                button: PointerButton::Primary,
            },
        );
        assert_eq!(session.highlighted_cell(), Some(CellCoord::new(0, 0)));
        route(
            &mut session,
            InputEvent::PointerUp {
                button: PointerButton::Middle,
            },
        );
        assert_eq!(session.highlighted_cell(), None);
        assert!(session.is_dragging());
    }

    #[test]
    fn test_movement_keys_drive_character() {
        let mut session = EditorSession::default();
        route(&mut session, InputEvent::KeyDown(StageKey::MoveRight));
        assert!(session.character().is_none());

        click(&mut session, 860, 310);
        assert_eq!(session.tool(), Tool::PlaceCharacter);
        click(&mut session, 205, 525);
        session.step();

        route(&mut session, InputEvent::KeyDown(StageKey::MoveRight));
        session.step();
        let character = session.character().expect("character spawned");
        assert_eq!(character.x, ScreenX(205));

        route(&mut session, InputEvent::KeyUp(StageKey::MoveRight));
        route(&mut session, InputEvent::KeyDown(StageKey::Jump));
        session.step();
        let character = session.character().expect("character spawned");
        assert_eq!(character.x, ScreenX(205));
        assert_eq!(character.y, 13 * 40 - 15);
    }
}
