//! Catalog presets. The cursor variants share one follower and differ only in
//! how the result is drawn.

use crate::constants::*;
use crate::error::ChaosError;
use crate::follower::{FollowerConfig, Warmup};
use crate::smoothing::{Smoothing, SmoothingFactor};
use glam::Vec2;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Dot,
    Ring,
    Crosshair,
    Ghost,
}

impl CursorStyle {
    pub fn size_px(self) -> f32 {
        match self {
            CursorStyle::Dot => DOT_SIZE_PX,
            CursorStyle::Ring => RING_SIZE_PX,
            CursorStyle::Crosshair => CROSSHAIR_SIZE_PX,
            CursorStyle::Ghost => GHOST_SIZE_PX,
        }
    }

    /// Class added to the mounted element so stylesheets can pick the shape.
    pub fn class_name(self) -> &'static str {
        match self {
            CursorStyle::Dot => "chaos-cursor-dot",
            CursorStyle::Ring => "chaos-cursor-ring",
            CursorStyle::Crosshair => "chaos-cursor-crosshair",
            CursorStyle::Ghost => "chaos-cursor-ghost",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Normal,
    Difference,
    Screen,
    Exclusion,
}

impl BlendMode {
    /// Value for the CSS `mix-blend-mode` property.
    pub fn css_name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Difference => "difference",
            BlendMode::Screen => "screen",
            BlendMode::Exclusion => "exclusion",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    CursorFollower,
    CursorTrail,
    CursorMagnet,
    GhostLayer,
    ScrollIndicator,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::CursorFollower,
        Preset::CursorTrail,
        Preset::CursorMagnet,
        Preset::GhostLayer,
        Preset::ScrollIndicator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::CursorFollower => "cursor-follower",
            Preset::CursorTrail => "cursor-trail",
            Preset::CursorMagnet => "cursor-magnet",
            Preset::GhostLayer => "ghost-layer",
            Preset::ScrollIndicator => "scroll-indicator",
        }
    }

    pub fn appearance(self) -> Appearance {
        let (alpha, style, blend, warmup) = match self {
            Preset::CursorFollower => (
                CURSOR_FOLLOWER_SMOOTHING,
                CursorStyle::Ring,
                BlendMode::Difference,
                Warmup::SnapToFirst,
            ),
            Preset::CursorTrail => (
                TRAIL_HEAD_SMOOTHING,
                CursorStyle::Dot,
                BlendMode::Screen,
                Warmup::SnapToFirst,
            ),
            Preset::CursorMagnet => (
                CURSOR_MAGNET_SMOOTHING,
                CursorStyle::Dot,
                BlendMode::Normal,
                Warmup::FromOrigin,
            ),
            Preset::GhostLayer => (
                GHOST_LAYER_SMOOTHING,
                CursorStyle::Ghost,
                BlendMode::Exclusion,
                Warmup::SnapToFirst,
            ),
            Preset::ScrollIndicator => (
                SCROLL_INDICATOR_SMOOTHING,
                CursorStyle::Dot,
                BlendMode::Normal,
                Warmup::FromOrigin,
            ),
        };
        Appearance {
            follower: FollowerConfig {
                // Constants are all within [0, 1].
                smoothing: Smoothing::PerFrame(
                    SmoothingFactor::new(alpha).unwrap_or_default(),
                ),
                warmup,
            },
            style,
            blend,
            size_px: style.size_px(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ChaosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ChaosError::UnknownPreset(s.to_string()))
    }
}

/// Follower settings plus how to draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub follower: FollowerConfig,
    pub style: CursorStyle,
    pub blend: BlendMode,
    pub size_px: f32,
}

impl Appearance {
    pub fn with_factor(mut self, factor: SmoothingFactor) -> Self {
        self.follower.smoothing = Smoothing::PerFrame(factor);
        self
    }

    pub fn with_style(mut self, style: CursorStyle) -> Self {
        self.style = style;
        self.size_px = style.size_px();
        self
    }
}

/// CSS transform that centres a `size`-px element on `position`.
pub fn translate_css(position: Vec2, size: f32) -> String {
    let half = size * 0.5;
    format!(
        "translate3d({:.2}px, {:.2}px, 0)",
        position.x - half,
        position.y - half
    )
}

/// CSS transform for a horizontal progress bar.
pub fn scale_x_css(progress: f32) -> String {
    format!("scaleX({:.4})", progress.clamp(0.0, 1.0))
}
