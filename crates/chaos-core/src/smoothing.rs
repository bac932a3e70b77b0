//! Exponential smoothing: the per-frame `current ← current + (target − current) · α` step.
//!
//! Every follower in the catalog reduces to this step applied once per frame.
//! Values that can be smoothed implement [`Lerp`]; the factor is carried by a
//! validated [`SmoothingFactor`].

use crate::error::{ChaosError, Result};
use glam::Vec2;

/// Fraction of the remaining distance to the target closed on each frame.
///
/// `0` freezes the follower and `1` snaps it onto the target; both are
/// accepted as degenerate settings rather than treated as errors.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SmoothingFactor(f32);

impl SmoothingFactor {
    pub const FROZEN: SmoothingFactor = SmoothingFactor(0.0);
    pub const SNAP: SmoothingFactor = SmoothingFactor(1.0);

    pub fn new(alpha: f32) -> Result<Self> {
        if alpha.is_nan() || !(0.0..=1.0).contains(&alpha) {
            return Err(ChaosError::InvalidFactor(alpha));
        }
        Ok(Self(alpha))
    }

    /// Frame-rate independent factor for a first-order lag with time
    /// constant `tau_sec`, evaluated over a frame of `dt_sec`.
    ///
    /// A NaN on either side, or a ratio with no value (`inf / inf`), freezes
    /// the follower rather than poisoning its position.
    pub fn from_time_constant(tau_sec: f32, dt_sec: f32) -> Self {
        if tau_sec.is_nan() || dt_sec.is_nan() || dt_sec <= 0.0 {
            return Self::FROZEN;
        }
        if tau_sec <= 0.0 {
            return Self::SNAP;
        }
        let alpha = 1.0 - (-dt_sec / tau_sec).exp();
        if alpha.is_nan() {
            return Self::FROZEN;
        }
        Self(alpha.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_frozen(self) -> bool {
        self.0 <= 0.0
    }

    #[inline]
    pub fn is_snap(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for SmoothingFactor {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_SMOOTHING)
    }
}

impl TryFrom<f32> for SmoothingFactor {
    type Error = ChaosError;

    fn try_from(alpha: f32) -> Result<Self> {
        Self::new(alpha)
    }
}

/// How the per-frame factor is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed fraction per frame, regardless of frame duration.
    PerFrame(SmoothingFactor),
    /// First-order lag with the given time constant in seconds.
    TimeConstant(f32),
}

impl Smoothing {
    /// Validated time-constant smoothing. `0` snaps and `+inf` freezes;
    /// NaN and negative constants are rejected.
    pub fn time_constant(tau_sec: f32) -> Result<Self> {
        if tau_sec.is_nan() || tau_sec < 0.0 {
            return Err(ChaosError::InvalidTimeConstant(tau_sec));
        }
        Ok(Smoothing::TimeConstant(tau_sec))
    }

    /// Factor to apply for a frame lasting `dt_sec`.
    pub fn factor(self, dt_sec: f32) -> SmoothingFactor {
        match self {
            Smoothing::PerFrame(f) => f,
            Smoothing::TimeConstant(tau) => SmoothingFactor::from_time_constant(tau, dt_sec),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerFrame(SmoothingFactor::default())
    }
}

/// A value that can chase a target geometrically.
pub trait Lerp: Copy + PartialEq {
    const ZERO: Self;

    fn lerp_unclamped(self, target: Self, alpha: f32) -> Self;

    fn distance(self, other: Self) -> f32;

    /// One smoothing step. Exact at both degenerate factors.
    #[inline]
    fn approach(self, target: Self, factor: SmoothingFactor) -> Self {
        if factor.is_snap() {
            target
        } else if factor.is_frozen() || self == target {
            self
        } else {
            self.lerp_unclamped(target, factor.get())
        }
    }
}

impl Lerp for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn lerp_unclamped(self, target: Self, alpha: f32) -> Self {
        self + (target - self) * alpha
    }

    #[inline]
    fn distance(self, other: Self) -> f32 {
        (other - self).abs()
    }
}

impl Lerp for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    #[inline]
    fn lerp_unclamped(self, target: Self, alpha: f32) -> Self {
        self + (target - self) * alpha
    }

    #[inline]
    fn distance(self, other: Self) -> f32 {
        self.distance(other)
    }
}
