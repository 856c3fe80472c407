use std::time::Duration;

use crate::shared::image::Image;

/// How many times an animation plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    /// Loops forever.
    Infinite,
    /// Plays this many times in total (at least once), then rests on the last frame.
    Finite(u32),
}

impl std::fmt::Display for LoopCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopCount::Infinite => write!(f, "infinite"),
            LoopCount::Finite(n) => write!(f, "{n}"),
        }
    }
}

/// One frame of an animation: a full-canvas image and how long it stays on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    image: Image,
    delay: Duration,
}

impl AnimationFrame {
    pub fn new(image: Image, delay: Duration) -> Self {
        Self { image, delay }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// A decoded, playback-ready animation.
///
/// Always holds at least one frame; every frame has the same dimensions and a
/// positive delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatedImage {
    frames: Vec<AnimationFrame>,
    loop_count: LoopCount,
}

impl AnimatedImage {
    /// Returns `None` if `frames` is empty, any delay is zero, frame sizes
    /// differ, or `loop_count` is `Finite(0)`.
    pub fn new(frames: Vec<AnimationFrame>, loop_count: LoopCount) -> Option<Self> {
        let first = frames.first()?;
        let dims = first.image.dimensions();
        if frames
            .iter()
            .any(|f| f.delay.is_zero() || f.image.dimensions() != dims)
        {
            return None;
        }
        if loop_count == LoopCount::Finite(0) {
            return None;
        }
        Some(Self { frames, loop_count })
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<AnimationFrame> {
        self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    pub fn first_frame(&self) -> &AnimationFrame {
        &self.frames[0]
    }

    pub fn width(&self) -> u32 {
        self.first_frame().image.width()
    }

    pub fn height(&self) -> u32 {
        self.first_frame().image.height()
    }

    /// Duration of a single pass through all frames.
    pub fn total_duration(&self) -> Duration {
        self.frames.iter().map(|f| f.delay).sum()
    }

    /// The frame on screen `elapsed` after playback started.
    ///
    /// Infinite animations wrap around; finite ones stop on the last frame
    /// once every pass has played.
    pub fn frame_at(&self, elapsed: Duration) -> &AnimationFrame {
        let cycle = self.total_duration().as_nanos();
        let elapsed = elapsed.as_nanos();
        if let LoopCount::Finite(plays) = self.loop_count {
            if elapsed >= cycle * plays as u128 {
                return &self.frames[self.frames.len() - 1];
            }
        }

        let mut offset = elapsed % cycle;
        for frame in &self.frames {
            let delay = frame.delay.as_nanos();
            if offset < delay {
                return frame;
            }
            offset -= delay;
        }
        &self.frames[self.frames.len() - 1]
    }
}
