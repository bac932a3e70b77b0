//! Mount/unmount lifecycle binding an animator to a host.
//!
//! `Idle → Running` on [`Mounted::mount`]; each frame re-schedules the next
//! (`Running → Running`); [`Mounted::unmount`] or drop goes back to `Idle`,
//! cancelling the pending frame and the input subscription synchronously.

use crate::constants::NOMINAL_FRAME_MS;
use crate::follower::Follower;
use crate::host::{
    Animate, FrameHandle, FrameScheduler, FrameTick, InputSource, RenderSink, SubscriptionId,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

pub type MountedFollower<T> = Mounted<Follower<T>>;

type SharedSink<T> = Rc<RefCell<Box<dyn RenderSink<T>>>>;

struct Shared<A: Animate> {
    animator: A,
    // Borrowed on its own during `render`, so a sink may unmount its owner.
    sink: SharedSink<A::Output>,
    phase: Phase,
    pending: Option<FrameHandle>,
    last_timestamp_ms: Option<f64>,
    frames: u64,
}

/// A running animator owned by one visual element.
pub struct Mounted<A: Animate + 'static> {
    shared: Rc<RefCell<Shared<A>>>,
    // Latest sample since the previous frame; older ones are overwritten.
    latest: Rc<Cell<Option<A::Input>>>,
    source: Rc<dyn InputSource<A::Input>>,
    scheduler: Rc<dyn FrameScheduler>,
    subscription: Option<SubscriptionId>,
}

impl<A: Animate + 'static> Mounted<A> {
    pub fn mount(
        animator: A,
        source: Rc<dyn InputSource<A::Input>>,
        scheduler: Rc<dyn FrameScheduler>,
        sink: impl RenderSink<A::Output> + 'static,
    ) -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            animator,
            sink: Rc::new(RefCell::new(Box::new(sink) as Box<dyn RenderSink<A::Output>>)),
            phase: Phase::Running,
            pending: None,
            last_timestamp_ms: None,
            frames: 0,
        }));
        // Built before touching the host so that `Drop` releases whatever
        // was acquired if a later step unwinds.
        let mut mounted = Self {
            shared,
            latest: Rc::new(Cell::new(None)),
            source,
            scheduler,
            subscription: None,
        };

        let slot = Rc::clone(&mounted.latest);
        mounted.subscription = Some(
            mounted
                .source
                .subscribe(Box::new(move |sample| slot.set(Some(sample)))),
        );
        schedule_frame(&mounted.shared, &mounted.scheduler, &mounted.latest);
        log::debug!(
            "[follower] mounted (subscribers={})",
            mounted.source.subscriber_count()
        );
        mounted
    }

    /// Stop the animation and release the host resources. Safe to call more
    /// than once; also runs on drop.
    pub fn unmount(&mut self) {
        let pending = {
            let mut s = self.shared.borrow_mut();
            if s.phase == Phase::Idle {
                return;
            }
            s.phase = Phase::Idle;
            s.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
        }
        self.latest.set(None);
        log::debug!(
            "[follower] unmounted after {} frames",
            self.shared.borrow().frames
        );
    }

    pub fn phase(&self) -> Phase {
        self.shared.borrow().phase
    }

    pub fn frames(&self) -> u64 {
        self.shared.borrow().frames
    }

    /// Read-only access to the animator state.
    pub fn with_animator<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        f(&self.shared.borrow().animator)
    }

    /// Adjust the animator between frames (e.g. after the owner moved).
    pub fn with_animator_mut<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut self.shared.borrow_mut().animator)
    }
}

impl<T: crate::smoothing::Lerp + 'static> Mounted<Follower<T>> {
    pub fn current(&self) -> T {
        self.shared.borrow().animator.current()
    }
}

impl<A: Animate + 'static> Drop for Mounted<A> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn schedule_frame<A: Animate + 'static>(
    shared: &Rc<RefCell<Shared<A>>>,
    scheduler: &Rc<dyn FrameScheduler>,
    latest: &Rc<Cell<Option<A::Input>>>,
) {
    let weak_shared = Rc::downgrade(shared);
    let weak_scheduler = Rc::downgrade(scheduler);
    let latest = Rc::clone(latest);
    let handle = scheduler.schedule_next(Box::new(move |tick| {
        run_frame(weak_shared, weak_scheduler, latest, tick)
    }));
    shared.borrow_mut().pending = Some(handle);
}

fn run_frame<A: Animate + 'static>(
    shared: Weak<RefCell<Shared<A>>>,
    scheduler: Weak<dyn FrameScheduler>,
    latest: Rc<Cell<Option<A::Input>>>,
    tick: FrameTick,
) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let (output, sink) = {
        let mut guard = shared.borrow_mut();
        let s = &mut *guard;
        if s.phase != Phase::Running {
            return;
        }
        s.pending = None;

        if let Some(sample) = latest.take() {
            s.animator.set_target(sample);
        }
        let dt_ms = match s.last_timestamp_ms {
            Some(prev) => (tick.timestamp_ms - prev).max(0.0),
            None => NOMINAL_FRAME_MS,
        };
        s.last_timestamp_ms = Some(tick.timestamp_ms);
        s.frames += 1;
        log::trace!("[follower] frame {} dt={:.2}ms", s.frames, dt_ms);

        (s.animator.advance((dt_ms / 1000.0) as f32), Rc::clone(&s.sink))
    };

    if let Some(value) = output {
        sink.borrow_mut().render(value);
    }

    // The sink may have unmounted the owner.
    if shared.borrow().phase != Phase::Running {
        return;
    }
    if let Some(scheduler) = scheduler.upgrade() {
        schedule_frame(&shared, &scheduler, &latest);
    }
}
