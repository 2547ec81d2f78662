// Input handling system
//
// Keyboard events and button clicks become `InputEvent`s on a queue that the
// animation loop drains once per tick.
//
// - `action`: actions, input events and default key bindings
// - `buffer`: the inbound event queue
// - `buttons`: on-screen buttons and hit testing
// - `config`: key binding and remapping
// - `manager`: glue from winit events to the queue
//
// ```rust
// let mut input = InputManager::new(InputConfig::default(), ButtonBar::new(viewport));
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // At the start of each tick
// for event in input.drain() {
//     // apply to the character
// }
// ```

pub mod action;
pub mod buffer;
pub mod buttons;
pub mod config;
pub mod manager;

pub use action::{Action, InputEvent};
pub use buttons::ButtonBar;
pub use config::InputConfig;
pub use manager::InputManager;
