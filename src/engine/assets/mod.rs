// Asset management system
//
// Resolves sprite sheets and sound clips on disk and gates startup on
// every sprite sheet being loaded.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, SoundAsset, SoundHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, LoadGate, LoadedSheet, SoundClip};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("Idle.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: Idle.png");
    }
}
