#![cfg(target_arch = "wasm32")]
use chaos_core::{
    scatter, Bounds, Follower, FrameScheduler, InputSource, Magnet, Mounted, Preset, Smoothing,
    SmoothingFactor, Trail, MAGNET_RADIUS_PX, MAGNET_STRENGTH, TRAIL_DEFAULT_LINKS, TRAIL_FALLOFF,
};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod input;
mod render;

use constants::{PRESET_ATTR, TRAIL_DOT_CLASS};
use frame::RafScheduler;
use input::{PointerSource, ScrollSource};
use render::{OffsetSink, ProgressSink, TrailSink, TransformSink};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("chaos-web starting");
    Ok(())
}

/// Input sources and the frame scheduler shared by every mounted follower.
struct Host {
    pointer: Rc<PointerSource>,
    scroll: Rc<ScrollSource>,
    scheduler: Rc<RafScheduler>,
}

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

fn host() -> anyhow::Result<Rc<Host>> {
    HOST.with(|cell| {
        if let Some(h) = cell.borrow().as_ref() {
            return Ok(h.clone());
        }
        let window = dom::window()?;
        let h = Rc::new(Host {
            pointer: Rc::new(PointerSource::new(window.clone())),
            scroll: Rc::new(ScrollSource::new(window.clone())),
            scheduler: Rc::new(RafScheduler::new(window)),
        });
        *cell.borrow_mut() = Some(h.clone());
        Ok(h)
    })
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

enum Running {
    Cursor(Mounted<Follower<Vec2>>),
    Trail(Mounted<Trail>),
    Magnet(Mounted<Magnet>),
}

/// A pointer follower mounted on a DOM element. Call `unmount` (or let the
/// JS wrapper be freed) when the element goes away.
#[wasm_bindgen]
pub struct ChaosFollower {
    running: Option<Running>,
    element: web::HtmlElement,
    generated: Vec<web::HtmlElement>,
}

#[wasm_bindgen]
impl ChaosFollower {
    /// Mount `preset` (e.g. `"cursor-follower"`, `"cursor-trail"`) on
    /// `#element_id`. `smoothing` overrides the preset's factor when given.
    pub fn mount(
        element_id: &str,
        preset: &str,
        smoothing: Option<f32>,
    ) -> Result<ChaosFollower, JsValue> {
        Self::try_mount(element_id, preset, smoothing).map_err(to_js)
    }

    /// Unmount the follower, cancelling its frame request and input listener.
    pub fn unmount(&mut self) {
        if let Some(running) = self.running.take() {
            drop(running);
            for el in self.generated.drain(..) {
                el.remove();
            }
            let _ = self.element.remove_attribute(PRESET_ATTR);
            dom::clear_style(&self.element, "transform");
            log::info!("[follower] unmounted");
        }
    }

    /// Re-read the element's position after layout changes (magnet only).
    pub fn remeasure(&self) {
        if let Some(Running::Magnet(m)) = &self.running {
            let measured = dom::element_center(&self.element);
            m.with_animator_mut(|magnet| magnet.set_measured_center(measured));
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.running.is_some()
    }
}

impl ChaosFollower {
    fn try_mount(
        element_id: &str,
        preset: &str,
        smoothing: Option<f32>,
    ) -> anyhow::Result<ChaosFollower> {
        let preset: Preset = preset.parse()?;
        if preset == Preset::ScrollIndicator {
            anyhow::bail!("scroll-indicator mounts through ChaosScrollIndicator");
        }
        let mut appearance = preset.appearance();
        if let Some(alpha) = smoothing {
            appearance = appearance.with_factor(SmoothingFactor::new(alpha)?);
        }

        let document = dom::window_document()?;
        let element = dom::html_element_by_id(&document, element_id)?;
        let host = host()?;
        let pointer: Rc<dyn InputSource<Vec2>> = host.pointer.clone();
        let scheduler: Rc<dyn FrameScheduler> = host.scheduler.clone();
        let _ = element.set_attribute(PRESET_ATTR, preset.name());

        let mut generated = Vec::new();
        let running = match preset {
            Preset::CursorFollower | Preset::GhostLayer => {
                let sink = TransformSink::new(element.clone(), &appearance);
                Running::Cursor(Mounted::mount(
                    Follower::<Vec2>::new(appearance.follower),
                    pointer,
                    scheduler,
                    sink,
                ))
            }
            Preset::CursorTrail => {
                let head = match appearance.follower.smoothing {
                    Smoothing::PerFrame(f) => f,
                    Smoothing::TimeConstant(_) => SmoothingFactor::default(),
                };
                let trail = Trail::new(
                    TRAIL_DEFAULT_LINKS,
                    head,
                    TRAIL_FALLOFF,
                    appearance.follower.warmup,
                )?;
                generated = dom::append_divs(&document, &element, trail.len(), TRAIL_DOT_CLASS)?;
                let sink = TrailSink::new(generated.clone(), &appearance);
                Running::Trail(Mounted::mount(trail, pointer, scheduler, sink))
            }
            Preset::CursorMagnet => {
                let magnet = Magnet::new(
                    dom::element_center(&element),
                    MAGNET_RADIUS_PX,
                    MAGNET_STRENGTH,
                    appearance.follower,
                );
                let sink = OffsetSink::new(element.clone());
                Running::Magnet(Mounted::mount(magnet, pointer, scheduler, sink))
            }
            Preset::ScrollIndicator => unreachable!("rejected above"),
        };
        log::info!("[follower] mounted {} on #{}", preset, element_id);

        Ok(ChaosFollower {
            running: Some(running),
            element,
            generated,
        })
    }
}

impl Drop for ChaosFollower {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// A reading-progress bar that eases toward the document scroll position.
#[wasm_bindgen]
pub struct ChaosScrollIndicator {
    running: Option<Mounted<Follower<f32>>>,
    element: web::HtmlElement,
}

#[wasm_bindgen]
impl ChaosScrollIndicator {
    pub fn mount(element_id: &str) -> Result<ChaosScrollIndicator, JsValue> {
        Self::try_mount(element_id).map_err(to_js)
    }

    /// Unmount the indicator and clear the styles it wrote.
    pub fn unmount(&mut self) {
        if let Some(running) = self.running.take() {
            drop(running);
            dom::clear_style(&self.element, "transform");
            dom::clear_style(&self.element, "transform-origin");
            log::info!("[scroll] indicator unmounted");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.running.as_ref().map(|m| m.current()).unwrap_or(0.0)
    }
}

impl ChaosScrollIndicator {
    fn try_mount(element_id: &str) -> anyhow::Result<ChaosScrollIndicator> {
        let document = dom::window_document()?;
        let element = dom::html_element_by_id(&document, element_id)?;
        let host = host()?;
        let scroll: Rc<dyn InputSource<f32>> = host.scroll.clone();
        let scheduler: Rc<dyn FrameScheduler> = host.scheduler.clone();
        let appearance = Preset::ScrollIndicator.appearance();
        let mounted = Mounted::mount(
            Follower::<f32>::new(appearance.follower),
            scroll,
            scheduler,
            ProgressSink::new(element.clone()),
        );
        log::info!("[scroll] indicator mounted on #{}", element_id);
        Ok(ChaosScrollIndicator {
            running: Some(mounted),
            element,
        })
    }
}

impl Drop for ChaosScrollIndicator {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Seeded decoration layout as a flat array of
/// `[x, y, rotation_deg, scale, opacity, delay_sec, variant]` records.
#[wasm_bindgen]
pub fn chaos_scatter(
    seed: u64,
    count: usize,
    width: f32,
    height: f32,
    variants: u32,
) -> Result<js_sys::Float32Array, JsValue> {
    let placements = scatter(seed, count, Bounds::new(width, height), variants)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let flat: Vec<f32> = placements
        .iter()
        .flat_map(|p| {
            [
                p.position.x,
                p.position.y,
                p.rotation_deg,
                p.scale,
                p.opacity,
                p.delay_sec,
                p.variant as f32,
            ]
        })
        .collect();
    Ok(js_sys::Float32Array::from(flat.as_slice()))
}
