//! Seeded layout generation for decorative overlays (runes, stains, cracks).
//!
//! Output depends only on the seed, so a server render and a client render
//! agree and tests can pin exact layouts.

use crate::error::{ChaosError, Result};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// Both corners finite, with a finite positive extent on each axis.
    pub fn validate(&self) -> Result<()> {
        let size = self.size();
        if !(self.min.is_finite() && self.max.is_finite() && size.is_finite()) {
            return Err(ChaosError::UnboundedBounds);
        }
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(ChaosError::EmptyBounds);
        }
        Ok(())
    }
}

/// One randomly placed decoration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Animation delay, lets identical glyphs flicker out of phase.
    pub delay_sec: f32,
    /// Index into whatever glyph/texture set the caller uses.
    pub variant: u32,
}

pub fn scatter(seed: u64, count: usize, bounds: Bounds, variants: u32) -> Result<Vec<Placement>> {
    bounds.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let placements = (0..count)
        .map(|_| Placement {
            position: Vec2::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                rng.gen_range(bounds.min.y..=bounds.max.y),
            ),
            rotation_deg: rng.gen_range(0.0..360.0),
            scale: rng.gen_range(0.5..1.5),
            opacity: rng.gen_range(0.2..0.9),
            delay_sec: rng.gen_range(0.0..3.0),
            variant: if variants > 0 {
                rng.gen_range(0..variants)
            } else {
                0
            },
        })
        .collect();
    Ok(placements)
}

/// Jagged polyline starting at `origin`, heading in a random direction and
/// wandering by up to ±35° per segment. Points are clamped to `bounds`.
pub fn crack_path(
    seed: u64,
    segments: usize,
    origin: Vec2,
    length: f32,
    bounds: Bounds,
) -> Result<Vec<Vec2>> {
    bounds.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = if origin.is_finite() { origin } else { bounds.min };
    let step = if segments > 0 && length.is_finite() {
        length / segments as f32
    } else {
        0.0
    };
    let mut heading: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let mut point = origin.clamp(bounds.min, bounds.max);
    let mut path = Vec::with_capacity(segments + 1);
    path.push(point);
    for _ in 0..segments {
        heading += rng.gen_range(-35.0_f32..35.0).to_radians();
        let jitter: f32 = rng.gen_range(0.6..1.4);
        point = (point + Vec2::from_angle(heading) * step * jitter).clamp(bounds.min, bounds.max);
        path.push(point);
    }
    Ok(path)
}
