// The animated character
//
// - `kind`: the four animations and their sheet descriptors
// - `state`: guarded transitions and the throttled frame counter
// - `animation`: slicing a sheet frame and placing it on screen
// - `character`: state plus sounds, ticked once per redraw

pub mod animation;
pub mod character;
pub mod kind;
pub mod state;

pub use animation::{DrawCommand, SpriteSheets};
pub use character::{Character, CharacterSounds};
pub use kind::{AnimationKind, AnimationSet};
pub use state::{Request, Transition};
