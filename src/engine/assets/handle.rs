// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset, derived from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe handle to a registered asset
///
/// The `T` parameter keeps sound handles from being mixed up with other asset kinds.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: derives would require `T: Clone + Copy` on the marker.
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker type for sound clips
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SoundAsset;

pub type SoundHandle = AssetHandle<SoundAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("run.wav");
        let id2 = AssetId::from_path("run.wav");
        let id3 = AssetId::from_path("jump.mp3");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_sound_handle_is_copy() {
        let handle: SoundHandle = AssetHandle::new(AssetId::from_path("attack.wav"));
        let copy = handle;
        assert_eq!(handle.id(), copy.id());
    }
}
