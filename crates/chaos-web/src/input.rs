//! Window-level input streams exposed as [`InputSource`]s.
//!
//! Each subscription owns its own JS closure and detaches it from the window
//! on unsubscribe, so dropping a follower leaves no listener behind.

use crate::dom;
use chaos_core::{scroll_progress, InputListener, InputSource, SubscriptionId};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    id: SubscriptionId,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Shared bookkeeping for one DOM event type on the window.
struct WindowListeners {
    window: web::Window,
    event: &'static str,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl WindowListeners {
    fn new(window: web::Window, event: &'static str) -> Self {
        Self {
            window,
            event,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    fn attach(&self, handler: Box<dyn FnMut(web::Event)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let closure = Closure::wrap(handler);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref())
        {
            log::error!("[input] failed to add {} listener: {:?}", self.event, e);
        }
        self.listeners.borrow_mut().push(Listener { id, closure });
        id
    }

    fn detach(&self, id: SubscriptionId) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| l.id == id)
                .map(|i| listeners.remove(i))
        };
        if let Some(l) = removed {
            self.remove_from_window(&l);
        }
    }

    fn remove_from_window(&self, l: &Listener) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(self.event, l.closure.as_ref().unchecked_ref())
        {
            log::warn!("[input] failed to remove {} listener: {:?}", self.event, e);
        }
    }

    fn len(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        for l in self.listeners.borrow_mut().drain(..) {
            self.remove_from_window(&l);
        }
    }
}

/// Pointer position in viewport (client) CSS pixels from `pointermove`.
pub struct PointerSource {
    inner: WindowListeners,
}

impl PointerSource {
    pub fn new(window: web::Window) -> Self {
        Self {
            inner: WindowListeners::new(window, "pointermove"),
        }
    }
}

impl InputSource<Vec2> for PointerSource {
    fn subscribe(&self, mut listener: InputListener<Vec2>) -> SubscriptionId {
        self.inner.attach(Box::new(move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                listener(Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
            }
        }))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.detach(id);
    }

    fn subscriber_count(&self) -> usize {
        self.inner.len()
    }
}

/// Document scroll progress in `[0, 1]` from `scroll`.
pub struct ScrollSource {
    inner: WindowListeners,
}

impl ScrollSource {
    pub fn new(window: web::Window) -> Self {
        Self {
            inner: WindowListeners::new(window, "scroll"),
        }
    }

    fn progress(window: &web::Window) -> f32 {
        let (offset, scroll_height, viewport) = dom::scroll_metrics(window);
        scroll_progress(offset, scroll_height, viewport)
    }
}

impl InputSource<f32> for ScrollSource {
    fn subscribe(&self, mut listener: InputListener<f32>) -> SubscriptionId {
        // The page may already be scrolled when the indicator mounts.
        listener(Self::progress(&self.inner.window));
        let window = self.inner.window.clone();
        self.inner
            .attach(Box::new(move |_ev: web::Event| listener(Self::progress(&window))))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.detach(id);
    }

    fn subscriber_count(&self) -> usize {
        self.inner.len()
    }
}
