use chaos_core::{FrameCallback, FrameHandle, FrameScheduler, FrameTick};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct RafQueue {
    pending: Vec<(FrameHandle, FrameCallback)>,
    raf_id: Option<i32>,
    next_handle: u64,
}

/// [`FrameScheduler`] on top of `requestAnimationFrame`.
///
/// All callbacks pending at a repaint share one native frame request, so any
/// number of followers cost a single rAF per frame.
pub struct RafScheduler {
    window: web::Window,
    queue: Rc<RefCell<RafQueue>>,
    tick: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        let queue: Rc<RefCell<RafQueue>> = Rc::default();
        let queue_tick = queue.clone();
        let tick = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let due = {
                let mut q = queue_tick.borrow_mut();
                q.raf_id = None;
                std::mem::take(&mut q.pending)
            };
            for (_, callback) in due {
                callback(FrameTick { timestamp_ms });
            }
        }) as Box<dyn FnMut(f64)>);
        Self {
            window,
            queue,
            tick,
        }
    }

    fn request(&self) {
        if self.queue.borrow().raf_id.is_some() {
            return;
        }
        match self
            .window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
        {
            Ok(id) => self.queue.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule_next(&self, callback: FrameCallback) -> FrameHandle {
        let handle = {
            let mut q = self.queue.borrow_mut();
            let handle = FrameHandle(q.next_handle);
            q.next_handle += 1;
            q.pending.push((handle, callback));
            handle
        };
        self.request();
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        let idle_raf = {
            let mut q = self.queue.borrow_mut();
            q.pending.retain(|(h, _)| *h != handle);
            if q.pending.is_empty() {
                q.raf_id.take()
            } else {
                None
            }
        };
        if let Some(id) = idle_raf {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("[frame] cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        // The tick closure is freed with us; make sure the browser won't call it.
        if let Some(id) = self.queue.borrow_mut().raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
