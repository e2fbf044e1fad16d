use crate::{
    animation::{
        frames::{FrameCache, FramePoll},
        spritesheet::SpriteGeometry,
    },
    assets::store::{AssetLoader, FrameImage},
    foundation::{color::Rgba8, error::DiagnosticKind},
};

/// Where an animation's frames come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FrameSource {
    Images { keys: Vec<String> },
    Spritesheet { key: String, geometry: SpriteGeometry },
}

#[derive(Clone, Debug)]
enum Frames {
    /// Waiting on the loader; polled every tick.
    Pending,
    Ready(Vec<FrameImage>),
    /// Nothing will ever be drawn (empty sequence, bad geometry).
    Dead,
}

/// Per-component playback state: frames, current index and the delay accumulator.
///
/// Playback loops forward forever. A missing or non-positive delay pins the animation to
/// frame 0.
#[derive(Clone, Debug)]
pub struct AnimationState {
    source: FrameSource,
    colorkey: Option<Rgba8>,
    frames: Frames,
    current: usize,
    elapsed: f64,
    delay: Option<f64>,
    failure_reported: bool,
}

impl AnimationState {
    pub fn new(source: FrameSource, delay: Option<f64>, colorkey: Option<Rgba8>) -> Self {
        let delay = delay.filter(|d| d.is_finite() && *d > 0.0);
        let frames = match &source {
            FrameSource::Images { keys } if keys.is_empty() => Frames::Dead,
            _ => Frames::Pending,
        };
        Self {
            source,
            colorkey,
            frames,
            current: 0,
            elapsed: 0.0,
            delay,
            failure_reported: false,
        }
    }

    /// A state that never draws anything, for animations whose source could not be built.
    pub fn inert() -> Self {
        Self::new(FrameSource::Images { keys: Vec::new() }, None, None)
    }

    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    pub fn colorkey(&self) -> Option<Rgba8> {
        self.colorkey
    }

    pub fn delay(&self) -> Option<f64> {
        self.delay
    }

    pub fn is_static(&self) -> bool {
        self.delay.is_none()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.frames, Frames::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.frames, Frames::Pending)
    }

    /// Loaded frame count; zero until the frames are ready.
    pub fn frame_count(&self) -> usize {
        match &self.frames {
            Frames::Ready(frames) => frames.len(),
            _ => 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn current_frame(&self) -> Option<&FrameImage> {
        match &self.frames {
            Frames::Ready(frames) => frames.get(self.current),
            _ => None,
        }
    }

    pub fn frames(&self) -> &[FrameImage] {
        match &self.frames {
            Frames::Ready(frames) => frames,
            _ => &[],
        }
    }

    /// Add `elapsed` to the accumulator and step one frame per whole `delay` contained in it.
    ///
    /// Time only accumulates once frames are loaded.
    pub fn advance(&mut self, elapsed: f64) {
        let Some(delay) = self.delay else {
            return;
        };
        let count = self.frame_count();
        if count == 0 || !elapsed.is_finite() || elapsed <= 0.0 {
            return;
        }
        self.elapsed += elapsed;
        if self.elapsed < delay {
            return;
        }
        let steps = (self.elapsed / delay).floor();
        self.elapsed -= steps * delay;
        let steps = (steps % count as f64) as usize;
        self.current = (self.current + steps) % count;
    }

    /// Try to obtain frames from the loader. Returns a diagnostic the first time a failure is
    /// seen; a loader failure keeps the state pending so a later tick can recover.
    pub fn poll_frames(
        &mut self,
        loader: &dyn AssetLoader,
        cache: &mut FrameCache,
    ) -> Option<DiagnosticKind> {
        if !self.is_pending() {
            return None;
        }
        let poll = match &self.source {
            FrameSource::Images { keys } => cache.sequence(loader, keys, self.colorkey),
            FrameSource::Spritesheet { key, geometry } => {
                cache.spritesheet(loader, key, *geometry, self.colorkey)
            }
        };
        match poll {
            FramePoll::Ready(frames) if frames.is_empty() => {
                self.frames = Frames::Dead;
                Some(DiagnosticKind::EmptyAnimationSequence)
            }
            FramePoll::Ready(frames) => {
                tracing::debug!(frames = frames.len(), "animation frames ready");
                self.frames = Frames::Ready(frames);
                self.current = 0;
                self.elapsed = 0.0;
                self.failure_reported = false;
                None
            }
            FramePoll::Pending => None,
            FramePoll::Invalid(kind) => {
                self.frames = Frames::Dead;
                Some(kind)
            }
            FramePoll::Unavailable(kind) => {
                if self.failure_reported {
                    return None;
                }
                self.failure_reported = true;
                Some(kind)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
