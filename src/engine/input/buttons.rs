// On-screen action buttons

use super::action::Action;
use crate::core::Rect;
use crate::engine::renderer::Sprite;
use glam::{Vec2, Vec4};

const BUTTON_SIZE: Vec2 = Vec2::new(120.0, 48.0);
const BUTTON_GAP: f32 = 16.0;
const BOTTOM_MARGIN: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub action: Action,
    pub rect: Rect,
    pub color: Vec4,
}

/// A row of clickable buttons, one per action, centered along the bottom edge.
///
/// A click only ever produces a press; buttons have no release.
#[derive(Debug, Clone)]
pub struct ButtonBar {
    buttons: Vec<Button>,
}

impl ButtonBar {
    /// Lay out the buttons for a viewport of the given size
    pub fn new(viewport: Vec2) -> Self {
        let count = Action::ALL.len() as f32;
        let total_width = BUTTON_SIZE.x * count + BUTTON_GAP * (count - 1.0);
        let start_x = (viewport.x - total_width) / 2.0;
        let y = viewport.y - BOTTOM_MARGIN - BUTTON_SIZE.y;

        let buttons = Action::ALL
            .iter()
            .enumerate()
            .map(|(i, &action)| Button {
                action,
                rect: Rect::new(
                    start_x + i as f32 * (BUTTON_SIZE.x + BUTTON_GAP),
                    y,
                    BUTTON_SIZE.x,
                    BUTTON_SIZE.y,
                ),
                color: button_color(action),
            })
            .collect();

        Self { buttons }
    }

    /// Which button, if any, lies under a screen position
    pub fn hit(&self, position: Vec2) -> Option<Action> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(position))
            .map(|button| button.action)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Quads to draw this frame
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.buttons
            .iter()
            .map(|button| Sprite::solid(button.rect, button.color))
    }
}

fn button_color(action: Action) -> Vec4 {
    match action {
        Action::Run => Vec4::new(0.25, 0.6, 0.3, 0.85),
        Action::Attack => Vec4::new(0.7, 0.25, 0.25, 0.85),
        Action::Jump => Vec4::new(0.25, 0.4, 0.75, 0.85),
    }
}
