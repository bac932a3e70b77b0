//! Deterministic in-memory host: an input source fed by hand and a scheduler
//! stepped by hand. Used by tests and the headless native host.

use crate::host::{
    FrameCallback, FrameHandle, FrameScheduler, FrameTick, InputListener, InputSource,
    SubscriptionId,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Slot<T> = Rc<RefCell<InputListener<T>>>;

pub struct ManualInput<T> {
    listeners: RefCell<Vec<(SubscriptionId, Slot<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Copy> ManualInput<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Deliver one sample to every subscriber, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while the sample is being
    /// delivered. New listeners first hear the next sample; removed ones are
    /// skipped if they have not run yet.
    pub fn push(&self, sample: T) {
        let snapshot: Vec<(SubscriptionId, Slot<T>)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            // A listener pushing into its own source does not hear itself.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener(sample);
            }
        }
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow().iter().any(|(sid, _)| *sid == id)
    }
}

impl<T: Copy> Default for ManualInput<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> InputSource<T> for ManualInput<T> {
    fn subscribe(&self, listener: InputListener<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Frame scheduler driven by explicit [`ManualScheduler::step`] calls.
pub struct ManualScheduler {
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<u64>,
    now_ms: Cell<f64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(Vec::new()),
            next_handle: Cell::new(0),
            now_ms: Cell::new(0.0),
        }
    }

    /// Advance the clock by `dt_ms` and run every callback that was pending
    /// before the call. Callbacks scheduled while stepping wait for the next
    /// step. Returns how many callbacks ran.
    pub fn step(&self, dt_ms: f64) -> usize {
        let now = self.now_ms.get() + dt_ms;
        self.now_ms.set(now);
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let ran = due.len();
        for (_, callback) in due {
            callback(FrameTick { timestamp_ms: now });
        }
        ran
    }

    /// Step `frames` times with a fixed frame duration.
    pub fn run(&self, frames: usize, dt_ms: f64) {
        for _ in 0..frames {
            self.step(dt_ms);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
