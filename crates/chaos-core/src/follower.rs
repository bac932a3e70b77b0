use crate::constants::{NOMINAL_FRAME_MS, SETTLE_EPSILON_PX};
use crate::error::Result;
use crate::smoothing::{Lerp, Smoothing, SmoothingFactor};

/// What a follower shows before its first input sample arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Warmup {
    /// Current and target both start at zero and frames render immediately.
    #[default]
    FromOrigin,
    /// Nothing renders until the first sample, which `current` snaps onto.
    SnapToFirst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowerConfig {
    pub smoothing: Smoothing,
    pub warmup: Warmup,
}

impl FollowerConfig {
    pub fn per_frame(alpha: f32) -> Result<Self> {
        Ok(Self {
            smoothing: Smoothing::PerFrame(SmoothingFactor::new(alpha)?),
            warmup: Warmup::FromOrigin,
        })
    }

    pub fn with_warmup(mut self, warmup: Warmup) -> Self {
        self.warmup = warmup;
        self
    }
}

/// Private state of one follower instance: a lagged copy of the latest
/// input sample, advanced once per frame.
#[derive(Clone, Debug)]
pub struct Follower<T: Lerp> {
    config: FollowerConfig,
    current: T,
    target: T,
    has_sample: bool,
}

impl<T: Lerp> Follower<T> {
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            config,
            current: T::ZERO,
            target: T::ZERO,
            has_sample: false,
        }
    }

    pub fn with_factor(alpha: f32) -> Result<Self> {
        Ok(Self::new(FollowerConfig::per_frame(alpha)?))
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Record the latest sample. Earlier samples that were never ticked are
    /// simply overwritten.
    pub fn set_target(&mut self, sample: T) {
        if !self.has_sample && self.config.warmup == Warmup::SnapToFirst {
            self.current = sample;
        }
        self.target = sample;
        self.has_sample = true;
    }

    /// Advance one frame at the nominal refresh rate.
    pub fn tick(&mut self) -> Option<T> {
        self.tick_elapsed((NOMINAL_FRAME_MS / 1000.0) as f32)
    }

    /// Advance one frame that lasted `dt_sec`. Returns `None` while there is
    /// nothing to render yet.
    pub fn tick_elapsed(&mut self, dt_sec: f32) -> Option<T> {
        if !self.is_visible() {
            return None;
        }
        let factor = self.config.smoothing.factor(dt_sec);
        self.current = self.current.approach(self.target, factor);
        Some(self.current)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.has_sample || self.config.warmup == Warmup::FromOrigin
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    pub fn has_sample(&self) -> bool {
        self.has_sample
    }

    pub fn distance_to_target(&self) -> f32 {
        self.current.distance(self.target)
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.distance_to_target() <= epsilon
    }

    pub fn is_at_rest(&self) -> bool {
        self.is_settled(SETTLE_EPSILON_PX)
    }

    /// Place both current and target at `value`, as if it had been tracked forever.
    pub fn reset(&mut self, value: T) {
        self.current = value;
        self.target = value;
        self.has_sample = true;
    }
}

impl<T: Lerp> Default for Follower<T> {
    fn default() -> Self {
        Self::new(FollowerConfig::default())
    }
}
