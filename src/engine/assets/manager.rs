// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, AssetType, SoundHandle};
use crate::engine::renderer::{Renderer, TextureHandle};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// A sprite sheet uploaded to the GPU, with its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedSheet {
    pub texture: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// An encoded sound clip read from the sounds directory
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub handle: SoundHandle,
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Counts completed loads against the number expected.
///
/// The animation loop must not start until `is_ready()` holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadGate {
    expected: usize,
    loaded: usize,
}

impl LoadGate {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            loaded: 0,
        }
    }

    /// Record one completed load. Returns true on the load that opens the gate.
    pub fn mark_loaded(&mut self) -> bool {
        if self.loaded >= self.expected {
            return false;
        }
        self.loaded += 1;
        self.loaded == self.expected
    }

    pub fn is_ready(&self) -> bool {
        self.loaded == self.expected
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn expected(&self) -> usize {
        self.expected
    }
}

/// Central asset manager
///
/// Loads sprite sheets into the renderer, registers sound clips and tracks
/// startup progress through a [`LoadGate`].
pub struct AssetManager {
    loader: AssetLoader,
    gate: LoadGate,

    /// Loaded sheets keyed by file name
    sheets: HashMap<AssetId, LoadedSheet>,
}

impl AssetManager {
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            gate: LoadGate::default(),
            sheets: HashMap::new(),
        }
    }

    /// Declare how many distinct sprite sheets startup has to wait for
    pub fn expect_sheets(&mut self, count: usize) {
        self.gate = LoadGate::new(count);
    }

    /// Load a sprite sheet and upload it to the GPU
    pub fn load_sheet(&mut self, renderer: &mut Renderer, name: &str) -> Result<LoadedSheet, AssetError> {
        let id = AssetId::from_path(name);
        if let Some(sheet) = self.sheets.get(&id) {
            return Ok(*sheet);
        }

        let bytes = self.loader.load_bytes(AssetType::Texture, name)?;
        let sheet = renderer.upload_texture(&bytes, name)?;
        self.sheets.insert(id, sheet);

        if self.gate.mark_loaded() {
            info!("All {} sprite sheets loaded", self.gate.expected());
        } else {
            debug!(
                "Loaded sheet {} ({}/{})",
                name,
                self.gate.loaded(),
                self.gate.expected()
            );
        }

        Ok(sheet)
    }

    /// Read a sound clip so a sound board can decode it
    pub fn register_sound(&self, name: &str) -> Result<SoundClip, AssetError> {
        let bytes = self.loader.load_bytes(AssetType::Sound, name)?;
        debug!("Registered sound {} ({} bytes)", name, bytes.len());
        Ok(SoundClip {
            handle: AssetHandle::new(AssetId::from_path(name)),
            name: name.to_string(),
            bytes,
        })
    }

    pub fn gate(&self) -> LoadGate {
        self.gate
    }
}
