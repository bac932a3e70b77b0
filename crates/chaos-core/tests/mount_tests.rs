// Host-side lifecycle tests: mounting followers on the manual host.

use chaos_core::{
    Follower, FollowerConfig, FrameCallback, FrameHandle, FrameScheduler, InputSource, ManualInput,
    ManualScheduler, Mounted, MountedFollower, Phase, Smoothing, SubscriptionId, Warmup,
};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_MS: f64 = 16.0;

struct Rig {
    input: Rc<ManualInput<Vec2>>,
    scheduler: Rc<ManualScheduler>,
}

impl Rig {
    fn new() -> Self {
        Self {
            input: Rc::new(ManualInput::new()),
            scheduler: Rc::new(ManualScheduler::new()),
        }
    }

    fn source(&self) -> Rc<dyn InputSource<Vec2>> {
        self.input.clone()
    }

    fn frames(&self) -> Rc<dyn FrameScheduler> {
        self.scheduler.clone()
    }

    /// Mount a follower whose sink records every rendered position.
    fn mount(
        &self,
        follower: Follower<Vec2>,
    ) -> (Mounted<Follower<Vec2>>, Rc<RefCell<Vec<Vec2>>>) {
        let written = Rc::new(RefCell::new(Vec::new()));
        let sink = written.clone();
        let mounted = Mounted::mount(follower, self.source(), self.frames(), move |p: Vec2| {
            sink.borrow_mut().push(p)
        });
        (mounted, written)
    }
}

fn close(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-4
}

#[test]
fn mount_subscribes_and_schedules_one_frame() {
    let rig = Rig::new();
    assert_eq!(rig.input.subscriber_count(), 0);
    let (m, _) = rig.mount(Follower::with_factor(0.15).unwrap());
    assert_eq!(m.phase(), Phase::Running);
    assert_eq!(rig.input.subscriber_count(), 1);
    assert_eq!(rig.scheduler.pending(), 1);

    // Every tick re-schedules exactly one frame.
    for _ in 0..5 {
        assert_eq!(rig.scheduler.step(FRAME_MS), 1);
        assert_eq!(rig.scheduler.pending(), 1);
    }
    assert_eq!(m.frames(), 5);
}

#[test]
fn frames_write_interpolated_positions_to_sink() {
    let rig = Rig::new();
    let (m, written) = rig.mount(Follower::with_factor(0.15).unwrap());
    rig.input.push(Vec2::new(100.0, 100.0));
    rig.scheduler.step(FRAME_MS);
    rig.scheduler.step(FRAME_MS);

    let w = written.borrow();
    assert_eq!(w.len(), 2);
    assert!(close(w[0], Vec2::new(15.0, 15.0)));
    assert!(close(w[1], Vec2::new(27.75, 27.75)));
    assert!(close(m.current(), w[1]));
}

#[test]
fn samples_between_frames_are_coalesced() {
    let rig = Rig::new();
    let (_m, written) = rig.mount(Follower::with_factor(0.5).unwrap());
    rig.input.push(Vec2::new(-900.0, 4.0));
    rig.input.push(Vec2::new(50.0, 50.0));
    rig.input.push(Vec2::new(20.0, 40.0));
    rig.scheduler.step(FRAME_MS);

    assert_eq!(written.borrow().as_slice(), &[Vec2::new(10.0, 20.0)]);
}

#[test]
fn snap_to_first_renders_nothing_before_input() {
    let rig = Rig::new();
    let config = FollowerConfig::per_frame(0.15)
        .unwrap()
        .with_warmup(Warmup::SnapToFirst);
    let (_m, written) = rig.mount(Follower::new(config));
    rig.scheduler.run(10, FRAME_MS);
    assert!(written.borrow().is_empty());

    rig.input.push(Vec2::new(30.0, 40.0));
    rig.scheduler.step(FRAME_MS);
    assert_eq!(written.borrow().as_slice(), &[Vec2::new(30.0, 40.0)]);
}

#[test]
fn unmount_stops_writes_and_releases_host() {
    let rig = Rig::new();
    let (mut m, written) = rig.mount(Follower::with_factor(0.15).unwrap());
    rig.input.push(Vec2::new(100.0, 0.0));
    rig.scheduler.run(3, FRAME_MS);
    assert_eq!(written.borrow().len(), 3);

    m.unmount();
    assert_eq!(m.phase(), Phase::Idle);
    assert_eq!(rig.input.subscriber_count(), 0);
    assert_eq!(rig.scheduler.pending(), 0);

    rig.input.push(Vec2::new(-100.0, 0.0));
    rig.scheduler.run(10, FRAME_MS);
    assert_eq!(written.borrow().len(), 3);

    // Second unmount is a no-op.
    m.unmount();
    assert_eq!(m.phase(), Phase::Idle);
}

#[test]
fn drop_releases_host() {
    let rig = Rig::new();
    let written = {
        let (_m, written) = rig.mount(Follower::with_factor(0.15).unwrap());
        rig.scheduler.step(FRAME_MS);
        written
    };
    assert_eq!(rig.input.subscriber_count(), 0);
    assert_eq!(rig.scheduler.pending(), 0);
    rig.scheduler.run(5, FRAME_MS);
    assert_eq!(written.borrow().len(), 1);
}

#[test]
fn panic_in_owner_still_releases_host() {
    let rig = Rig::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let (_m, _) = rig.mount(Follower::with_factor(0.15).unwrap());
        rig.scheduler.step(FRAME_MS);
        panic!("owner failed mid-render");
    }));
    assert!(result.is_err());
    assert_eq!(rig.input.subscriber_count(), 0);
    assert_eq!(rig.scheduler.pending(), 0);
}

#[test]
fn unmounting_one_leaves_others_running() {
    let rig = Rig::new();
    let (mut a, a_written) = rig.mount(Follower::with_factor(0.15).unwrap());
    let (_b, b_written) = rig.mount(Follower::with_factor(0.15).unwrap());
    assert_eq!(rig.input.subscriber_count(), 2);

    a.unmount();
    assert_eq!(rig.input.subscriber_count(), 1);
    assert_eq!(rig.scheduler.pending(), 1);

    rig.input.push(Vec2::new(10.0, 0.0));
    rig.scheduler.run(2, FRAME_MS);
    assert!(a_written.borrow().is_empty());
    assert_eq!(b_written.borrow().len(), 2);
}

#[test]
fn independent_instances_share_trajectory() {
    let rig = Rig::new();
    let (_a, a_written) = rig.mount(Follower::with_factor(0.2).unwrap());
    let (_b, b_written) = rig.mount(Follower::with_factor(0.2).unwrap());

    let path = [
        Vec2::new(10.0, 5.0),
        Vec2::new(80.0, -20.0),
        Vec2::new(300.0, 120.0),
    ];
    for p in path {
        rig.input.push(p);
        rig.scheduler.run(4, FRAME_MS);
    }
    assert_eq!(a_written.borrow().len(), 12);
    assert_eq!(*a_written.borrow(), *b_written.borrow());
}

#[test]
fn time_constant_follows_host_timestamps() {
    let rig = Rig::new();
    let config = FollowerConfig {
        smoothing: Smoothing::TimeConstant(0.1),
        warmup: Warmup::FromOrigin,
    };
    let (_m, written) = rig.mount(Follower::new(config));
    rig.input.push(Vec2::new(100.0, 0.0));
    rig.scheduler.step(100.0);
    rig.scheduler.step(100.0);

    let w = written.borrow();
    // First frame has no previous timestamp and assumes a nominal 60 Hz frame.
    let first = 100.0 * (1.0 - (-(1.0 / 60.0) / 0.1_f32).exp());
    assert!((w[0].x - first).abs() < 1e-2, "{} vs {}", w[0].x, first);
    // Second frame lasted 100 ms: one full time constant.
    let second = first + (100.0 - first) * (1.0 - (-1.0f32).exp());
    assert!((w[1].x - second).abs() < 1e-2, "{} vs {}", w[1].x, second);
}

#[test]
fn animator_can_be_inspected_and_adjusted() {
    let rig = Rig::new();
    let (m, written) = rig.mount(Follower::with_factor(0.5).unwrap());
    m.with_animator_mut(|f| f.reset(Vec2::new(7.0, 7.0)));
    rig.scheduler.step(FRAME_MS);
    assert_eq!(written.borrow().as_slice(), &[Vec2::new(7.0, 7.0)]);
    assert!(m.with_animator(|f| f.is_at_rest()));
}

/// Host whose frame queue refuses every request.
struct BrokenScheduler;

impl FrameScheduler for BrokenScheduler {
    fn schedule_next(&self, _callback: FrameCallback) -> FrameHandle {
        panic!("frame queue unavailable");
    }

    fn cancel(&self, _handle: FrameHandle) {}
}

#[test]
fn failed_first_schedule_releases_subscription() {
    let input = Rc::new(ManualInput::<Vec2>::new());
    let source: Rc<dyn InputSource<Vec2>> = input.clone();
    let frames: Rc<dyn FrameScheduler> = Rc::new(BrokenScheduler);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        Mounted::mount(Follower::<Vec2>::default(), source, frames, |_: Vec2| {})
    }));
    assert!(result.is_err());
    assert_eq!(input.subscriber_count(), 0);
}

#[test]
fn sink_may_unmount_its_own_owner() {
    let rig = Rig::new();
    let owner: Rc<RefCell<Option<MountedFollower<Vec2>>>> = Rc::new(RefCell::new(None));
    let renders = Rc::new(Cell::new(0));

    let slot = owner.clone();
    let count = renders.clone();
    let mounted = Mounted::mount(
        Follower::<Vec2>::with_factor(0.5).unwrap(),
        rig.source(),
        rig.frames(),
        move |_: Vec2| {
            count.set(count.get() + 1);
            let taken = slot.borrow_mut().take();
            drop(taken);
        },
    );
    *owner.borrow_mut() = Some(mounted);

    rig.scheduler.step(FRAME_MS);
    assert_eq!(renders.get(), 1);
    assert!(owner.borrow().is_none());
    assert_eq!(rig.input.subscriber_count(), 0);
    assert_eq!(rig.scheduler.pending(), 0);

    rig.input.push(Vec2::new(40.0, 0.0));
    rig.scheduler.run(3, FRAME_MS);
    assert_eq!(renders.get(), 1);
}

#[test]
fn sink_may_read_its_owner_while_rendering() {
    let rig = Rig::new();
    let owner: Rc<RefCell<Option<MountedFollower<Vec2>>>> = Rc::new(RefCell::new(None));
    let seen = Rc::new(RefCell::new(Vec::new()));

    let slot = owner.clone();
    let out = seen.clone();
    let mounted = Mounted::mount(
        Follower::<Vec2>::with_factor(0.5).unwrap(),
        rig.source(),
        rig.frames(),
        move |p: Vec2| {
            let current = slot.borrow().as_ref().map(|m| m.current());
            out.borrow_mut().push((p, current));
        },
    );
    *owner.borrow_mut() = Some(mounted);

    rig.input.push(Vec2::new(8.0, 0.0));
    rig.scheduler.step(FRAME_MS);
    assert_eq!(
        seen.borrow().as_slice(),
        &[(Vec2::new(4.0, 0.0), Some(Vec2::new(4.0, 0.0)))]
    );
    owner.borrow_mut().take();
    assert_eq!(rig.input.subscriber_count(), 0);
}

#[test]
fn listener_may_unsubscribe_itself_during_push() {
    let input = Rc::new(ManualInput::<f32>::new());
    let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
    let heard = Rc::new(Cell::new(0));

    let source = input.clone();
    let id_slot = own_id.clone();
    let count = heard.clone();
    let id = input.subscribe(Box::new(move |_| {
        count.set(count.get() + 1);
        if let Some(id) = id_slot.get() {
            source.unsubscribe(id);
        }
    }));
    own_id.set(Some(id));

    input.push(1.0);
    input.push(2.0);
    assert_eq!(heard.get(), 1);
    assert_eq!(input.subscriber_count(), 0);
}

#[test]
fn listener_added_during_push_hears_the_next_sample() {
    let input = Rc::new(ManualInput::<f32>::new());
    let late = Rc::new(RefCell::new(Vec::new()));

    let source = input.clone();
    let out = late.clone();
    let added = Cell::new(false);
    input.subscribe(Box::new(move |_| {
        if !added.replace(true) {
            let out = out.clone();
            source.subscribe(Box::new(move |v| out.borrow_mut().push(v)));
        }
    }));

    input.push(1.0);
    assert!(late.borrow().is_empty());
    input.push(2.0);
    assert_eq!(late.borrow().as_slice(), &[2.0]);
    assert_eq!(input.subscriber_count(), 2);
}
