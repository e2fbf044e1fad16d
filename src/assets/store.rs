use std::{collections::HashMap, sync::Arc};

use image::RgbaImage;

use crate::{assets::decode, foundation::error::InterfacerResult};

/// Decoded pixel buffer shared between the loader, caches and draw ops.
pub type FrameImage = Arc<RgbaImage>;

/// Result of asking a loader for an asset.
#[derive(Clone, Debug)]
pub enum AssetPoll {
    /// Pixels are available.
    Ready(FrameImage),
    /// Not available yet; ask again on a later tick.
    Pending,
    /// The loader gave up on this key for now.
    Failed(String),
}

/// External collaborator that turns opaque asset keys into pixel buffers.
///
/// The engine never touches the filesystem itself; it only polls this trait.
pub trait AssetLoader {
    fn load(&self, key: &str) -> AssetPoll;
}

impl<L: AssetLoader + ?Sized> AssetLoader for &L {
    fn load(&self, key: &str) -> AssetPoll {
        (**self).load(key)
    }
}

#[derive(Clone, Debug)]
enum Entry {
    Ready(FrameImage),
    Pending,
    Failed(String),
}

/// In-memory [`AssetLoader`] keyed by asset path.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetLoader {
    entries: HashMap<String, Entry>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, image: RgbaImage) {
        self.entries
            .insert(key.into(), Entry::Ready(Arc::new(image)));
    }

    /// Decode encoded bytes (PNG, JPEG, ...) and store the result.
    pub fn insert_encoded(&mut self, key: impl Into<String>, bytes: &[u8]) -> InterfacerResult<()> {
        let image = decode::decode_image(bytes)?;
        self.insert(key, image);
        Ok(())
    }

    pub fn mark_pending(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), Entry::Pending);
    }

    pub fn mark_failed(&mut self, key: impl Into<String>, reason: impl Into<String>) {
        self.entries
            .insert(key.into(), Entry::Failed(reason.into()));
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load(&self, key: &str) -> AssetPoll {
        match self.entries.get(key) {
            Some(Entry::Ready(img)) => AssetPoll::Ready(Arc::clone(img)),
            Some(Entry::Pending) => AssetPoll::Pending,
            Some(Entry::Failed(reason)) => AssetPoll::Failed(reason.clone()),
            None => AssetPoll::Failed(format!("unknown asset key '{key}'")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
