use std::f32::consts::TAU;
use std::rc::Rc;

use chaos_core::{
    Follower, FrameScheduler, InputSource, Magnet, ManualInput, ManualScheduler, Mounted, Preset,
    Trail, TrailPoints, NOMINAL_FRAME_MS, SETTLE_EPSILON_PX,
};
use glam::Vec2;
use std::cell::RefCell;

// Synthetic pointer path: a circle sampled twice per frame, then a jump.
const PATH_CENTER: Vec2 = Vec2::new(400.0, 300.0);
const PATH_RADIUS: f32 = 150.0;
const PATH_FRAMES: usize = 120;
const SAMPLES_PER_FRAME: usize = 2;
const JUMP_TARGET: Vec2 = Vec2::new(100.0, 100.0);
const SETTLE_LIMIT_FRAMES: usize = 600;

fn circle_point(i: usize, total: usize) -> Vec2 {
    let t = i as f32 / total as f32 * TAU;
    PATH_CENTER + Vec2::new(t.cos(), t.sin()) * PATH_RADIUS
}

/// Feed the circle, then a single jump, and count frames until `settled` says so.
fn replay(
    input: &ManualInput<Vec2>,
    scheduler: &ManualScheduler,
    settled: impl Fn() -> bool,
) -> Option<usize> {
    let total = PATH_FRAMES * SAMPLES_PER_FRAME;
    for i in 0..total {
        input.push(circle_point(i, total));
        if (i + 1) % SAMPLES_PER_FRAME == 0 {
            scheduler.step(NOMINAL_FRAME_MS);
        }
    }
    input.push(JUMP_TARGET);
    (1..=SETTLE_LIMIT_FRAMES).find(|_| {
        scheduler.step(NOMINAL_FRAME_MS);
        settled()
    })
}

fn run_preset(preset: Preset) -> anyhow::Result<()> {
    let input = Rc::new(ManualInput::<Vec2>::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let source: Rc<dyn InputSource<Vec2>> = input.clone();
    let frames: Rc<dyn FrameScheduler> = scheduler.clone();
    let appearance = preset.appearance();
    let last = Rc::new(RefCell::new(None::<Vec2>));

    let settle_frames = match preset {
        Preset::CursorFollower | Preset::GhostLayer => {
            let out = last.clone();
            let mounted = Mounted::mount(
                Follower::<Vec2>::new(appearance.follower),
                source,
                frames,
                move |p: Vec2| *out.borrow_mut() = Some(p),
            );
            replay(&input, &scheduler, || {
                mounted.with_animator(|f| f.is_settled(SETTLE_EPSILON_PX))
            })
        }
        Preset::CursorTrail => {
            let out = last.clone();
            let trail = Trail::with_links(chaos_core::TRAIL_DEFAULT_LINKS)?;
            let mounted = Mounted::mount(trail, source, frames, move |pts: TrailPoints| {
                *out.borrow_mut() = pts.last().copied();
            });
            replay(&input, &scheduler, || {
                mounted.with_animator(|t| {
                    t.points()
                        .iter()
                        .all(|p| p.distance(JUMP_TARGET) <= SETTLE_EPSILON_PX)
                })
            })
        }
        Preset::CursorMagnet => {
            let out = last.clone();
            let magnet = Magnet::with_defaults(JUMP_TARGET + Vec2::new(40.0, 0.0))?;
            let mounted = Mounted::mount(magnet, source, frames, move |o: Vec2| {
                *out.borrow_mut() = Some(o)
            });
            replay(&input, &scheduler, || {
                mounted.with_animator(|m| m.offset().distance(Vec2::new(-14.0, 0.0)) <= 0.01)
            })
        }
        Preset::ScrollIndicator => {
            log::info!("[{}] skipped: needs a scroll source", preset);
            return Ok(());
        }
    };

    match settle_frames {
        Some(n) => log::info!(
            "[{}] settled {} frames after the jump, last sample {:?}",
            preset,
            n,
            last.borrow()
        ),
        None => log::warn!(
            "[{}] not settled within {} frames",
            preset,
            SETTLE_LIMIT_FRAMES
        ),
    }
    log::debug!(
        "[{}] subscribers after teardown: {}",
        preset,
        input.subscriber_count()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    for preset in Preset::ALL {
        run_preset(preset)?;
    }
    Ok(())
}
