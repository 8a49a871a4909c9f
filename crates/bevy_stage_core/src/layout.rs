//! Side panel layout
//!
//! Buttons are plain data: a rectangle, a label and the action they trigger.
//! The input router hit-tests them and the renderer draws them.

use crate::{Point, StageConfig};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.x + self.w && point.y >= self.y && point.y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }
}

/// Everything a panel button can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Reset,
    Save,
    Load,
    SelectPalette(u32),
    SelectEraser,
    SelectCharacterTool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, action: Action) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    /// Quit affordance in the bottom-right corner
    pub close: Rect,
    /// Palette kinds in order, then the character tool
    pub palette_buttons: Vec<Button>,
    /// Reset, Eraser, Save, Load
    pub side_buttons: Vec<Button>,
    /// Viewport area where tools apply
    pub grid_area: Rect,
}

impl PanelLayout {
    pub fn standard(config: &StageConfig) -> Self {
        let (window_w, window_h) = config.window_size();
        let tile = config.tile_size();
        let column_x = config.viewport_width + 50;
        let vh = config.viewport_height;

        let mut palette_buttons: Vec<Button> = config
            .palette
            .kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                Button::new(
                    Rect::new(column_x, 50 + i as i32 * (tile + 10), tile, tile),
                    kind.name.clone(),
                    Action::SelectPalette(i as u32),
                )
            })
            .collect();
        let next = palette_buttons.len() as i32;
        palette_buttons.push(Button::new(
            Rect::new(column_x, 50 + next * (tile + 10), tile, tile),
            "Character",
            Action::SelectCharacterTool,
        ));

        let side_buttons = [
            ("Reset", Action::Reset, 200),
            ("Eraser", Action::SelectEraser, 150),
            ("Save", Action::Save, 100),
            ("Load", Action::Load, 50),
        ]
        .into_iter()
        .map(|(label, action, from_bottom)| {
            Button::new(Rect::new(column_x, vh - from_bottom, 100, 40), label, action)
        })
        .collect();

        Self {
            close: Rect::new(window_w - 50, window_h - 50, 40, 40),
            palette_buttons,
            side_buttons,
            grid_area: Rect::new(0, 0, config.viewport_width, config.grid_height()),
        }
    }

    /// Side buttons win over palette buttons when both contain the point
    pub fn button_at(&self, point: Point) -> Option<&Button> {
        self.side_buttons
            .iter()
            .chain(self.palette_buttons.iter())
            .find(|b| b.rect.contains(point))
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.palette_buttons.iter().chain(self.side_buttons.iter())
    }

    pub fn is_over_grid(&self, point: Point) -> bool {
        self.grid_area.contains(point)
    }
}
