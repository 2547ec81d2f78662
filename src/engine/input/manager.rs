// Input manager - turns window events into queued input events

use super::action::{Action, InputEvent};
use super::buffer::InputQueue;
use super::buttons::ButtonBar;
use super::config::InputConfig;
use glam::Vec2;
use log::debug;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub struct InputManager {
    config: InputConfig,
    buttons: ButtonBar,
    queue: InputQueue,
    cursor: Vec2,
}

impl InputManager {
    pub fn new(config: InputConfig, buttons: ButtonBar) -> Self {
        Self {
            config,
            buttons,
            queue: InputQueue::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Process a keyboard event from winit.
    ///
    /// Auto-repeat presses are forwarded: a held run key resumes running
    /// once an attack or jump finishes.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state == ElementState::Pressed);
        }
    }

    /// Queue the action bound to a key, if any
    pub fn process_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(action) = self.config.get_action(key) {
            self.queue.push(if pressed {
                InputEvent::Pressed(action)
            } else {
                InputEvent::Released(action)
            });
        }
    }

    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Handle a primary-button click at the last cursor position
    pub fn process_click(&mut self) -> Option<Action> {
        let action = self.buttons.hit(self.cursor)?;
        debug!("{} button clicked", action.label());
        self.queue.push(InputEvent::Pressed(action));
        Some(action)
    }

    /// Take every event queued since the last tick
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.queue.drain()
    }

    pub fn buttons(&self) -> &ButtonBar {
        &self.buttons
    }
}
