use anyhow::{Context, Result};
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::AppConfig;
use engine::assets::AssetManager;
use engine::audio::{LogSoundBoard, RodioSoundBoard, SoundBoard};
use engine::input::{ButtonBar, InputConfig, InputManager};
use engine::renderer::Renderer;
use game::character::{AnimationSet, Character, CharacterSounds, SpriteSheets};
use game::Game;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = AppConfig::load()?;
    info!("Starting {}...", config.window.title);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    // Every sheet has to be on the GPU before the first tick
    let animations = AnimationSet::from_config(&config.animations);
    let mut assets = AssetManager::new(&config.assets.base_path);
    assets.expect_sheets(animations.sheet_names().len());

    let mut sheets = SpriteSheets::new();
    for descriptor in animations.iter() {
        let sheet = assets
            .load_sheet(&mut renderer, &descriptor.sheet)
            .with_context(|| format!("Failed to load {} sheet", descriptor.kind.name()))
            .map_err(|e| {
                error!("{:#}", e);
                e
            })?;
        sheets.insert(descriptor.kind, sheet);
    }

    let mut board: Box<dyn SoundBoard> = match RodioSoundBoard::try_new() {
        Ok(board) => Box::new(board),
        Err(e) => {
            warn!("{}; sound cues will only be logged", e);
            Box::new(LogSoundBoard::new())
        }
    };
    let mut sounds = CharacterSounds::new();
    for descriptor in animations.iter() {
        let Some(name) = &descriptor.sound else {
            continue;
        };
        let registered = assets
            .register_sound(name)
            .map_err(anyhow::Error::from)
            .and_then(|clip| {
                board.register(&clip)?;
                Ok(clip.handle)
            });
        match registered {
            Ok(handle) => sounds.insert(descriptor.kind, handle),
            Err(e) => warn!("{} will play silently: {:#}", descriptor.kind.name(), e),
        }
    }

    let viewport = renderer.viewport();
    let character = Character::new(animations, sounds, &config.playback);
    let input = InputManager::new(
        InputConfig::from_config(&config.input),
        ButtonBar::new(viewport),
    );
    let mut game = Game::new(character, input, sheets, viewport);

    if !game.start(&assets.gate(), window.as_ref()) {
        anyhow::bail!("Sprite sheets missing, animation loop not started");
    }

    event_loop
        .run(move |event, elwt| {
            let Event::WindowEvent { event, .. } = event else {
                return;
            };

            match event {
                WindowEvent::CloseRequested => {
                    info!(
                        "Close requested after {} frames ({:.1} fps), shutting down...",
                        game.clock().frame_count(),
                        game.clock().fps()
                    );
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    game.input_mut().process_keyboard_event(&event);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    game.input_mut()
                        .set_cursor(glam::Vec2::new(position.x as f32, position.y as f32));
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    game.input_mut().process_click();
                }
                WindowEvent::RedrawRequested => {
                    let sprites = game.tick(window.as_ref(), board.as_mut());
                    match renderer.render(&sprites) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("GPU out of memory, exiting");
                            elwt.exit();
                        }
                        Err(e) => warn!("Dropped frame: {:?}", e),
                    }
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
