use std::{collections::HashMap, sync::Arc};

use image::RgbaImage;

use crate::{
    animation::spritesheet::{SpriteGeometry, slice_spritesheet},
    assets::store::{AssetLoader, AssetPoll, FrameImage},
    foundation::{color::Rgba8, error::DiagnosticKind},
};

/// Copy of `img` where every pixel whose RGB equals `key` has alpha 0.
pub fn apply_colorkey(img: &RgbaImage, key: Rgba8) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        if key.same_rgb(px[0], px[1], px[2]) {
            px[3] = 0;
        }
    }
    out
}

/// Outcome of asking the cache for a frame sequence.
#[derive(Clone, Debug)]
pub enum FramePoll {
    Ready(Vec<FrameImage>),
    Pending,
    /// Permanent failure (bad geometry). The caller stops polling.
    Invalid(DiagnosticKind),
    /// Loader failure; worth retrying later.
    Unavailable(DiagnosticKind),
}

/// Keyed frames, computed once per distinct source image and colorkey.
///
/// Owned by the component tree; entries are immutable once inserted.
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    images: HashMap<(String, Option<Rgba8>), FrameImage>,
    sheets: HashMap<(String, SpriteGeometry, Option<Rgba8>), Vec<FrameImage>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached images plus cached sheet frames.
    pub fn len(&self) -> usize {
        self.images.len() + self.sheets.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn image(
        &mut self,
        loader: &dyn AssetLoader,
        key: &str,
        colorkey: Option<Rgba8>,
    ) -> AssetPoll {
        let cache_key = (key.to_owned(), colorkey);
        if let Some(img) = self.images.get(&cache_key) {
            return AssetPoll::Ready(Arc::clone(img));
        }
        match loader.load(key) {
            AssetPoll::Ready(src) => {
                let img = match colorkey {
                    Some(c) => Arc::new(apply_colorkey(&src, c)),
                    None => src,
                };
                tracing::trace!(asset = key, "frame image cached");
                self.images.insert(cache_key, Arc::clone(&img));
                AssetPoll::Ready(img)
            }
            other => other,
        }
    }

    /// All frames of an explicit image list, or nothing until every one is ready.
    pub fn sequence(
        &mut self,
        loader: &dyn AssetLoader,
        keys: &[String],
        colorkey: Option<Rgba8>,
    ) -> FramePoll {
        let mut frames = Vec::with_capacity(keys.len());
        let mut pending = false;
        for key in keys {
            match self.image(loader, key, colorkey) {
                AssetPoll::Ready(img) => frames.push(img),
                AssetPoll::Pending => pending = true,
                AssetPoll::Failed(reason) => {
                    return FramePoll::Unavailable(DiagnosticKind::AssetUnavailable {
                        key: key.clone(),
                        reason,
                    });
                }
            }
        }
        if pending {
            return FramePoll::Pending;
        }
        FramePoll::Ready(frames)
    }

    pub fn spritesheet(
        &mut self,
        loader: &dyn AssetLoader,
        key: &str,
        geometry: SpriteGeometry,
        colorkey: Option<Rgba8>,
    ) -> FramePoll {
        let cache_key = (key.to_owned(), geometry, colorkey);
        if let Some(frames) = self.sheets.get(&cache_key) {
            return FramePoll::Ready(frames.clone());
        }
        let sheet = match loader.load(key) {
            AssetPoll::Ready(sheet) => sheet,
            AssetPoll::Pending => return FramePoll::Pending,
            AssetPoll::Failed(reason) => {
                return FramePoll::Unavailable(DiagnosticKind::AssetUnavailable {
                    key: key.to_owned(),
                    reason,
                });
            }
        };
        let frames: Vec<FrameImage> = match slice_spritesheet(&sheet, geometry) {
            Ok(frames) => frames
                .into_iter()
                .map(|f| match colorkey {
                    Some(c) => Arc::new(apply_colorkey(&f, c)),
                    None => Arc::new(f),
                })
                .collect(),
            Err(kind) => return FramePoll::Invalid(kind),
        };
        tracing::debug!(asset = key, frames = frames.len(), "spritesheet sliced");
        self.sheets.insert(cache_key, frames.clone());
        FramePoll::Ready(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frames.rs"]
mod tests;
