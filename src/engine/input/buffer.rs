// Inbound input queue
//
// Event handlers push here; the animation loop drains the queue once at the
// start of each tick. Nothing else touches character state between ticks.

use super::action::InputEvent;
use std::collections::VecDeque;

/// Maximum number of pending events kept between ticks
const MAX_QUEUE_SIZE: usize = 64;

#[derive(Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Queue an event, dropping the oldest when full
    pub fn push(&mut self, event: InputEvent) {
        if self.len() == MAX_QUEUE_SIZE {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
