//! Sprite and gizmo rendering of the editor session
//!
//! Layout math is done in window pixels (origin top-left, y down) and mapped
//! into the 2D camera's space, which is centered on the window with y up.

use bevy::prelude::*;
use bevy_stage_core::{Action, EditorSession, Facing, Rect, SessionStatus, StageConfig};

const CELL_Z: f32 = 0.0;
const CHARACTER_Z: f32 = 1.0;
const PANEL_Z: f32 = 2.0;
const BUTTON_Z: f32 = 3.0;
const LABEL_Z: f32 = 4.0;

const PANEL_COLOR: Color = Color::srgb(0.16, 0.16, 0.2);
const BUTTON_COLOR: Color = Color::srgb(0.3, 0.3, 0.36);
const CLOSE_COLOR: Color = Color::srgb(0.7, 0.2, 0.2);
const CHARACTER_COLOR: Color = Color::srgb(0.95, 0.55, 0.15);
const GRID_LINE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const HIGHLIGHT_COLOR: Color = Color::srgb(1.0, 0.9, 0.2);
const BACKGROUND_COLOR: Color = Color::srgb(0.45, 0.7, 0.9);

/// Pooled sprite for one visible cell column slot of one row
#[derive(Component)]
pub struct CellSprite {
    pub row: usize,
    pub slot: usize,
}

#[derive(Component)]
pub struct CharacterSprite;

#[derive(Component)]
pub struct StatusText;

/// Map a window pixel position to camera space
pub fn window_to_camera(window: (i32, i32), x: f32, y: f32) -> Vec2 {
    let (width, height) = window;
    Vec2::new(x - width as f32 / 2.0, height as f32 / 2.0 - y)
}

fn rect_center(window: (i32, i32), rect: &Rect) -> Vec2 {
    let (x, y) = rect.center();
    window_to_camera(window, x, y)
}

fn rect_size(rect: &Rect) -> Vec2 {
    Vec2::new(rect.w as f32, rect.h as f32)
}

fn kind_color(config: &StageConfig, kind: u32) -> Option<Color> {
    config
        .palette
        .get(kind)
        .map(|k| Color::srgb_u8(k.color[0], k.color[1], k.color[2]))
}

/// Number of cell slots per row that can be on screen at once
pub fn visible_slots(config: &StageConfig) -> usize {
    let tile = config.tile_size().max(1);
    let cols = (config.viewport_width + tile - 1) / tile + 1;
    (cols.max(0) as usize).min(config.cols)
}

/// Spawn the sprite pool, panel, buttons and labels
pub fn spawn_stage(
    mut commands: Commands,
    mut clear_color: ResMut<ClearColor>,
    session: Res<EditorSession>,
) {
    let config = session.config();
    let window = config.window_size();
    let tile = config.tile_size() as f32;
    clear_color.0 = BACKGROUND_COLOR;

    for row in 0..config.rows {
        for slot in 0..visible_slots(config) {
            commands.spawn((
                Sprite::from_color(Color::WHITE, Vec2::splat(tile)),
                Transform::from_xyz(0.0, 0.0, CELL_Z),
                Visibility::Hidden,
                CellSprite { row, slot },
            ));
        }
    }

    commands.spawn((
        Sprite::from_color(CHARACTER_COLOR, Vec2::splat(tile)),
        Transform::from_xyz(0.0, 0.0, CHARACTER_Z),
        Visibility::Hidden,
        CharacterSprite,
    ));

    let panel = Rect::new(
        config.viewport_width,
        0,
        window.0 - config.viewport_width,
        window.1,
    );
    commands.spawn((
        Sprite::from_color(PANEL_COLOR, rect_size(&panel)),
        Transform::from_translation(rect_center(window, &panel).extend(PANEL_Z)),
    ));

    let layout = session.layout();
    for button in layout.palette_buttons.iter() {
        let color = match button.action {
            Action::SelectPalette(kind) => kind_color(config, kind).unwrap_or(BUTTON_COLOR),
            _ => CHARACTER_COLOR,
        };
        commands.spawn((
            Sprite::from_color(color, rect_size(&button.rect)),
            Transform::from_translation(rect_center(window, &button.rect).extend(BUTTON_Z)),
        ));
        let label_offset = Vec2::new(button.rect.w as f32 + 40.0, 0.0);
        spawn_label(
            &mut commands,
            &button.label,
            rect_center(window, &button.rect) + label_offset,
        );
    }

    for button in layout.side_buttons.iter() {
        commands.spawn((
            Sprite::from_color(BUTTON_COLOR, rect_size(&button.rect)),
            Transform::from_translation(rect_center(window, &button.rect).extend(BUTTON_Z)),
        ));
        spawn_label(&mut commands, &button.label, rect_center(window, &button.rect));
    }

    commands.spawn((
        Sprite::from_color(CLOSE_COLOR, rect_size(&layout.close)),
        Transform::from_translation(rect_center(window, &layout.close).extend(BUTTON_Z)),
    ));
    spawn_label(&mut commands, "X", rect_center(window, &layout.close));

    let title_pos = window_to_camera(window, config.viewport_width as f32 + 150.0, 20.0);
    spawn_label(&mut commands, "Level Editor", title_pos);

    let status_pos = window_to_camera(
        window,
        config.viewport_width as f32 / 2.0,
        config.grid_height() as f32 + config.lower_margin as f32 / 2.0,
    );
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_translation(status_pos.extend(LABEL_Z)),
        StatusText,
    ));
}

fn spawn_label(commands: &mut Commands, text: &str, pos: Vec2) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_translation(pos.extend(LABEL_Z)),
    ));
}

/// Point the pooled cell sprites at the visible slice of the grid
pub fn sync_cells(
    session: Res<EditorSession>,
    mut cells: Query<(&CellSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let config = session.config();
    let window = config.window_size();
    let tile = config.tile_size();
    let offset = session.scroll().offset();
    let first_col = (offset / tile.max(1)) as usize;

    for (cell, mut sprite, mut transform, mut visibility) in cells.iter_mut() {
        let col = first_col + cell.slot;
        let color = session
            .grid()
            .get(cell.row, col)
            .ok()
            .flatten()
            .and_then(|kind| kind_color(config, kind));

        let Some(color) = color else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let x = col as i32 * tile - offset;
        let y = cell.row as i32 * tile;
        let center = window_to_camera(
            window,
            x as f32 + tile as f32 / 2.0,
            y as f32 + tile as f32 / 2.0,
        );
        sprite.color = color;
        transform.translation = center.extend(CELL_Z);
        *visibility = Visibility::Visible;
    }
}

pub fn sync_character(
    session: Res<EditorSession>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<CharacterSprite>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = query.single_mut() else {
        return;
    };
    let Some(character) = session.character() else {
        *visibility = Visibility::Hidden;
        return;
    };

    let half = character.size as f32 / 2.0;
    let center = window_to_camera(
        session.config().window_size(),
        character.x.0 as f32 + half,
        character.y as f32 + half,
    );
    sprite.flip_x = character.facing == Facing::Left;
    transform.translation = center.extend(CHARACTER_Z);
    *visibility = Visibility::Visible;
}

fn status_line(status: Option<&SessionStatus>) -> String {
    match status {
        Some(SessionStatus::Saved(path)) => format!("Saved {}", path.display()),
        Some(SessionStatus::Loaded(path)) => format!("Loaded {}", path.display()),
        Some(SessionStatus::Reset) => "Map reset".to_string(),
        Some(SessionStatus::Failed(_)) | None => String::new(),
    }
}

pub fn sync_status_text(
    session: Res<EditorSession>,
    mut query: Query<&mut Text2d, With<StatusText>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut text) = query.single_mut() else {
        return;
    };
    let line = status_line(session.status());
    if text.0 != line {
        text.0 = line;
    }
}

/// Grid lines, the highlighted cell, the selected button and the facing marker
pub fn draw_overlays(session: Res<EditorSession>, mut gizmos: Gizmos) {
    let config = session.config();
    let window = config.window_size();
    let tile = config.tile_size();
    let offset = session.scroll().offset();
    let grid_height = config.grid_height() as f32;
    let viewport_width = config.viewport_width as f32;

    let first_col = offset / tile.max(1);
    for col in first_col..=first_col + visible_slots(config) as i32 {
        let x = (col * tile - offset) as f32;
        if x < 0.0 || x > viewport_width {
            continue;
        }
        gizmos.line_2d(
            window_to_camera(window, x, 0.0),
            window_to_camera(window, x, grid_height),
            GRID_LINE_COLOR,
        );
    }
    for row in 0..=config.rows {
        let y = (row as i32 * tile) as f32;
        gizmos.line_2d(
            window_to_camera(window, 0.0, y),
            window_to_camera(window, viewport_width, y),
            GRID_LINE_COLOR,
        );
    }

    if let Some(cell) = session.highlighted_cell() {
        let rect = Rect::new(cell.col as i32 * tile - offset, cell.row as i32 * tile, tile, tile);
        gizmos.rect_2d(rect_center(window, &rect), rect_size(&rect), HIGHLIGHT_COLOR);
    }

    if let Some(selected) = session.selected_button() {
        for button in session.layout().buttons().filter(|b| b.action == selected) {
            gizmos.rect_2d(
                rect_center(window, &button.rect),
                rect_size(&button.rect) + Vec2::splat(4.0),
                HIGHLIGHT_COLOR,
            );
        }
    }

    if let Some(character) = session.character() {
        let half = character.size as f32 / 2.0;
        let center = window_to_camera(
            window,
            character.x.0 as f32 + half,
            character.y as f32 + half,
        );
        let direction = match character.facing {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        };
        gizmos.line_2d(center, center + Vec2::new(direction * half, 0.0), Color::BLACK);
    }
}
