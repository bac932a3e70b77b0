//! Render sinks that write follower output into element styles.

use crate::constants::HIDDEN_CLASS;
use crate::dom;
use chaos_core::{scale_x_css, translate_css, Appearance, RenderSink, TrailPoints};
use glam::Vec2;
use web_sys as web;

fn reveal(element: &web::HtmlElement, shown: &mut bool) {
    if !*shown {
        let _ = element.class_list().remove_1(HIDDEN_CLASS);
        *shown = true;
    }
}

/// Centres `element` on the follower position.
pub struct TransformSink {
    element: web::HtmlElement,
    size_px: f32,
    shown: bool,
}

impl TransformSink {
    pub fn new(element: web::HtmlElement, appearance: &Appearance) -> Self {
        dom::set_style(&element, "width", &format!("{}px", appearance.size_px));
        dom::set_style(&element, "height", &format!("{}px", appearance.size_px));
        dom::set_style(&element, "mix-blend-mode", appearance.blend.css_name());
        dom::set_style(&element, "pointer-events", "none");
        let _ = element.class_list().add_2(HIDDEN_CLASS, appearance.style.class_name());
        Self {
            element,
            size_px: appearance.size_px,
            shown: false,
        }
    }
}

impl RenderSink<Vec2> for TransformSink {
    fn render(&mut self, position: Vec2) {
        reveal(&self.element, &mut self.shown);
        dom::set_style(&self.element, "transform", &translate_css(position, self.size_px));
    }
}

/// Shifts `element` by an offset relative to its layout position.
pub struct OffsetSink {
    element: web::HtmlElement,
}

impl OffsetSink {
    pub fn new(element: web::HtmlElement) -> Self {
        Self { element }
    }
}

impl RenderSink<Vec2> for OffsetSink {
    fn render(&mut self, offset: Vec2) {
        dom::set_style(&self.element, "transform", &translate_css(offset, 0.0));
    }
}

/// Scales a full-width bar by scroll progress.
pub struct ProgressSink {
    element: web::HtmlElement,
}

impl ProgressSink {
    pub fn new(element: web::HtmlElement) -> Self {
        dom::set_style(&element, "transform-origin", "0 50%");
        Self { element }
    }
}

impl RenderSink<f32> for ProgressSink {
    fn render(&mut self, progress: f32) {
        dom::set_style(&self.element, "transform", &scale_x_css(progress));
    }
}

/// One generated dot per trail link, fading toward the tail.
pub struct TrailSink {
    dots: Vec<web::HtmlElement>,
    size_px: f32,
    shown: bool,
}

impl TrailSink {
    pub fn new(dots: Vec<web::HtmlElement>, appearance: &Appearance) -> Self {
        let n = dots.len().max(1) as f32;
        for (i, dot) in dots.iter().enumerate() {
            let falloff = 1.0 - i as f32 / n;
            dom::set_style(dot, "position", "fixed");
            dom::set_style(dot, "left", "0");
            dom::set_style(dot, "top", "0");
            dom::set_style(dot, "width", &format!("{}px", appearance.size_px * falloff));
            dom::set_style(dot, "height", &format!("{}px", appearance.size_px * falloff));
            dom::set_style(dot, "opacity", &format!("{:.2}", falloff));
            dom::set_style(dot, "mix-blend-mode", appearance.blend.css_name());
            dom::set_style(dot, "pointer-events", "none");
            let _ = dot.class_list().add_1(HIDDEN_CLASS);
        }
        Self {
            dots,
            size_px: appearance.size_px,
            shown: false,
        }
    }
}

impl RenderSink<TrailPoints> for TrailSink {
    fn render(&mut self, points: TrailPoints) {
        let n = self.dots.len().max(1) as f32;
        let first_frame = !self.shown;
        for (i, (dot, p)) in self.dots.iter().zip(points.iter()).enumerate() {
            if first_frame {
                let _ = dot.class_list().remove_1(HIDDEN_CLASS);
            }
            let size = self.size_px * (1.0 - i as f32 / n);
            dom::set_style(dot, "transform", &translate_css(*p, size));
        }
        self.shown = true;
    }
}
