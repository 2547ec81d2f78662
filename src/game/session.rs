// One running scene: the character, its input and the per-redraw tick

use super::character::{Character, Request, SpriteSheets};
use crate::engine::assets::LoadGate;
use crate::engine::audio::SoundBoard;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Action, InputEvent, InputManager};
use crate::engine::renderer::Sprite;
use glam::Vec2;
use log::{info, trace, warn};
use winit::window::Window;

/// Arranges for the next tick to happen on the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// Map a queued input event onto a character request
pub fn request_for(event: InputEvent) -> Option<Request> {
    match event {
        InputEvent::Pressed(Action::Run) => Some(Request::Run),
        InputEvent::Pressed(Action::Attack) => Some(Request::Attack),
        InputEvent::Pressed(Action::Jump) => Some(Request::Jump),
        InputEvent::Released(Action::Run) => Some(Request::ReleaseRun),
        InputEvent::Released(_) => None,
    }
}

pub struct Game {
    character: Character,
    input: InputManager,
    sheets: SpriteSheets,
    viewport: Vec2,
    clock: GameLoop,
    started: bool,
}

impl Game {
    pub fn new(character: Character, input: InputManager, sheets: SpriteSheets, viewport: Vec2) -> Self {
        Self {
            character,
            input,
            sheets,
            viewport,
            clock: GameLoop::new(),
            started: false,
        }
    }

    /// Arm the first tick once every sheet is in.
    ///
    /// Until this succeeds, `tick` neither draws nor schedules anything.
    pub fn start(&mut self, gate: &LoadGate, scheduler: &dyn FrameScheduler) -> bool {
        if self.started {
            return true;
        }
        if !gate.is_ready() || !self.sheets.is_complete() {
            warn!(
                "Animation loop held: {}/{} sprite sheets loaded",
                gate.loaded(),
                gate.expected()
            );
            return false;
        }

        info!("Assets ready, starting animation loop");
        self.started = true;
        scheduler.request_frame();
        true
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    #[cfg(test)]
    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn clock(&self) -> &GameLoop {
        &self.clock
    }

    /// Run one tick and return the sprites to present.
    ///
    /// The next tick is scheduled first, so a slow frame never stalls the loop.
    /// Input queued since the last tick is applied before the character draws.
    pub fn tick(&mut self, scheduler: &dyn FrameScheduler, sounds: &mut dyn SoundBoard) -> Vec<Sprite> {
        let mut sprites = Vec::new();
        if !self.started {
            return sprites;
        }
        scheduler.request_frame();
        self.clock.begin_frame();

        let requests: Vec<Request> = self.input.drain().filter_map(request_for).collect();
        for request in requests {
            if let Err(rejected) = self.character.handle(request, sounds) {
                trace!("{}", rejected);
            }
        }

        if let Some(draw) = self.character.tick(&self.sheets, self.viewport, sounds) {
            sprites.push(draw.to_sprite());
        }
        sprites.extend(self.input.buttons().sprites());
        sprites
    }
}
