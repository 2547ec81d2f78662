pub mod character;
pub mod session;

pub use session::{FrameScheduler, Game};
