// The animated character: state machine, descriptors and sound hookup

use super::animation::{frame_source, DrawCommand, SpriteSheets, ViewTransform};
use super::kind::{AnimationKind, AnimationSet};
use super::state::{AnimationState, RejectedRequest, Request, SoundCue, Transition};
use crate::config::PlaybackConfig;
use crate::engine::assets::SoundHandle;
use crate::engine::audio::SoundBoard;
use glam::Vec2;
use log::debug;
use std::collections::HashMap;

/// Sound clip for each kind that has one
#[derive(Debug, Clone, Default)]
pub struct CharacterSounds {
    clips: HashMap<AnimationKind, SoundHandle>,
}

impl CharacterSounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: AnimationKind, clip: SoundHandle) {
        self.clips.insert(kind, clip);
    }

    pub fn get(&self, kind: AnimationKind) -> Option<SoundHandle> {
        self.clips.get(&kind).copied()
    }

    /// Forward a cue to the board. Kinds without a clip are silent.
    pub fn cue(&self, cue: SoundCue, board: &mut dyn SoundBoard) {
        match cue {
            SoundCue::Play(kind) => {
                if let Some(clip) = self.get(kind) {
                    board.play(clip);
                }
            }
            SoundCue::Stop(kind) => {
                if let Some(clip) = self.get(kind) {
                    board.stop(clip);
                }
            }
        }
    }
}

/// A single animated character
#[derive(Debug, Clone)]
pub struct Character {
    state: AnimationState,
    animations: AnimationSet,
    sounds: CharacterSounds,
    scale: f32,
}

impl Character {
    pub fn new(animations: AnimationSet, sounds: CharacterSounds, playback: &PlaybackConfig) -> Self {
        Self {
            state: AnimationState::new(playback.ticks_per_frame),
            animations,
            sounds,
            scale: playback.scale,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Apply a request and fire its sound cues
    pub fn handle(
        &mut self,
        request: Request,
        board: &mut dyn SoundBoard,
    ) -> Result<Transition, RejectedRequest> {
        let transition = self.state.request(request)?;
        debug!(
            "{:?}: {} -> {}",
            request,
            transition.from.name(),
            transition.to.name()
        );
        self.play_cues(transition, board);
        Ok(transition)
    }

    fn play_cues(&self, transition: Transition, board: &mut dyn SoundBoard) {
        for cue in transition.sound_cues() {
            self.sounds.cue(cue, board);
        }
    }

    /// One tick of the animation loop.
    ///
    /// Returns what to draw for the frame shown this tick, then counts the
    /// tick and lets a finished attack or jump fall back to idle.
    pub fn tick(
        &mut self,
        sheets: &SpriteSheets,
        viewport: Vec2,
        board: &mut dyn SoundBoard,
    ) -> Option<DrawCommand> {
        let descriptor = self.animations.get(self.state.kind());
        let frame = self.state.wrap_frame(&self.animations);

        let draw = sheets.get(descriptor.kind).and_then(|sheet| {
            let sheet_size = Vec2::new(sheet.width as f32, sheet.height as f32);
            let source = frame_source(sheet_size, descriptor.column_count, frame);
            // An empty sheet has nothing to show
            (!source.is_empty()).then(|| DrawCommand {
                texture: sheet.texture,
                sheet_size,
                source,
                transform: ViewTransform::centered(viewport, source.size(), self.scale),
            })
        });

        if let Some(transition) = self.state.advance(&self.animations) {
            debug!(
                "{} finished, back to {}",
                transition.from.name(),
                transition.to.name()
            );
            self.play_cues(transition, board);
        }

        draw
    }
}
