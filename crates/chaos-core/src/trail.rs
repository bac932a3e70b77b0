use crate::constants::{TRAIL_FALLOFF, TRAIL_HEAD_SMOOTHING, TRAIL_MIN_SMOOTHING};
use crate::error::{ChaosError, Result};
use crate::follower::{Follower, FollowerConfig, Warmup};
use crate::host::Animate;
use crate::smoothing::{Smoothing, SmoothingFactor};
use glam::Vec2;
use smallvec::SmallVec;

pub type TrailPoints = SmallVec<[Vec2; 16]>;

/// Cursor trail: link 0 chases the pointer, every later link chases the one
/// ahead of it with a progressively smaller factor.
#[derive(Clone, Debug)]
pub struct Trail {
    links: SmallVec<[Follower<Vec2>; 16]>,
}

impl Trail {
    pub fn new(links: usize, head: SmoothingFactor, falloff: f32, warmup: Warmup) -> Result<Self> {
        if links == 0 {
            return Err(ChaosError::EmptyTrail);
        }
        let falloff = falloff.clamp(0.0, 1.0);
        let links = (0..links)
            .map(|i| -> Result<Follower<Vec2>> {
                let floor = TRAIL_MIN_SMOOTHING.min(head.get());
                let alpha = (head.get() * falloff.powi(i as i32)).max(floor);
                let factor = SmoothingFactor::new(alpha.clamp(0.0, 1.0))?;
                Ok(Follower::new(FollowerConfig {
                    smoothing: Smoothing::PerFrame(factor),
                    warmup,
                }))
            })
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self { links })
    }

    pub fn with_links(links: usize) -> Result<Self> {
        Self::new(
            links,
            SmoothingFactor::new(TRAIL_HEAD_SMOOTHING)?,
            TRAIL_FALLOFF,
            Warmup::SnapToFirst,
        )
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn set_target(&mut self, pointer: Vec2) {
        // Only the head sees the pointer; the rest are fed during `tick`.
        if let Some(head) = self.links.first_mut() {
            head.set_target(pointer);
        }
        if !self.links.iter().skip(1).any(|l| l.has_sample()) {
            for link in self.links.iter_mut().skip(1) {
                link.set_target(pointer);
            }
        }
    }

    /// Advance every link one frame, head first.
    pub fn tick(&mut self) -> Option<TrailPoints> {
        self.tick_elapsed((crate::constants::NOMINAL_FRAME_MS / 1000.0) as f32)
    }

    pub fn tick_elapsed(&mut self, dt_sec: f32) -> Option<TrailPoints> {
        let mut points = TrailPoints::with_capacity(self.links.len());
        let mut ahead: Option<Vec2> = None;
        for link in self.links.iter_mut() {
            if let Some(leader) = ahead {
                link.set_target(leader);
            }
            let pos = link.tick_elapsed(dt_sec)?;
            points.push(pos);
            ahead = Some(pos);
        }
        Some(points)
    }

    pub fn points(&self) -> TrailPoints {
        self.links.iter().map(|l| l.current()).collect()
    }
}

impl Animate for Trail {
    type Input = Vec2;
    type Output = TrailPoints;

    fn set_target(&mut self, sample: Vec2) {
        Trail::set_target(self, sample)
    }

    fn advance(&mut self, dt_sec: f32) -> Option<TrailPoints> {
        self.tick_elapsed(dt_sec)
    }
}
