//! Seams to the UI host: an input event stream and a "before next repaint"
//! frame scheduler. Hosts are single-threaded, so implementations use
//! interior mutability and are shared through `Rc`.

use crate::follower::Follower;
use crate::smoothing::Lerp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// One invocation of the host's pre-repaint callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Host clock in milliseconds (same time base as `performance.now()`).
    pub timestamp_ms: f64,
}

pub type InputListener<T> = Box<dyn FnMut(T)>;
pub type FrameCallback = Box<dyn FnOnce(FrameTick)>;

/// Read-only stream of input samples (pointer position, scroll progress).
pub trait InputSource<T> {
    fn subscribe(&self, listener: InputListener<T>) -> SubscriptionId;

    /// Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    fn subscriber_count(&self) -> usize;
}

pub trait FrameScheduler {
    /// Run `callback` once, before the next repaint.
    fn schedule_next(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending callback without running it. Unknown or already fired
    /// handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

/// Receives the interpolated value each frame, typically writing a transform.
pub trait RenderSink<T> {
    fn render(&mut self, value: T);
}

impl<T, F: FnMut(T)> RenderSink<T> for F {
    fn render(&mut self, value: T) {
        self(value)
    }
}

/// Anything that turns a stream of samples into one rendered value per frame.
pub trait Animate {
    type Input: Copy + 'static;
    type Output;

    fn set_target(&mut self, sample: Self::Input);

    /// `None` means nothing should be rendered this frame.
    fn advance(&mut self, dt_sec: f32) -> Option<Self::Output>;
}

impl<T: Lerp + 'static> Animate for Follower<T> {
    type Input = T;
    type Output = T;

    fn set_target(&mut self, sample: T) {
        Follower::set_target(self, sample)
    }

    fn advance(&mut self, dt_sec: f32) -> Option<T> {
        self.tick_elapsed(dt_sec)
    }
}
