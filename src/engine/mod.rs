// Engine modules: renderer, input, assets, audio

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod renderer;
