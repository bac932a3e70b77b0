use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

#[inline]
pub fn window_document() -> anyhow::Result<web::Document> {
    window()?.document().ok_or_else(|| anyhow!("no document"))
}

pub fn html_element_by_id(
    document: &web::Document,
    element_id: &str,
) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow!("missing #{element_id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("#{element_id} is not an HTML element: {:?}", e))
}

/// Centre of the element's layout box in viewport (client) coordinates.
pub fn element_center(element: &web::Element) -> Vec2 {
    let rect = element.get_bounding_client_rect();
    Vec2::new(
        (rect.left() + rect.width() * 0.5) as f32,
        (rect.top() + rect.height() * 0.5) as f32,
    )
}

pub fn set_style(element: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("[dom] failed to set {property}: {:?}", e);
    }
}

pub fn clear_style(element: &web::HtmlElement, property: &str) {
    if let Err(e) = element.style().remove_property(property) {
        log::warn!("[dom] failed to clear {property}: {:?}", e);
    }
}

/// Child `<div>`s appended to `parent`; removed by the caller on teardown.
pub fn append_divs(
    document: &web::Document,
    parent: &web::Element,
    count: usize,
    class_name: &str,
) -> anyhow::Result<Vec<web::HtmlElement>> {
    (0..count)
        .map(|_| -> anyhow::Result<web::HtmlElement> {
            let el = document
                .create_element("div")
                .map_err(|e| anyhow!("{:?}", e))?
                .dyn_into::<web::HtmlElement>()
                .map_err(|e| anyhow!("{:?}", e))?;
            el.set_class_name(class_name);
            parent.append_child(&el).map_err(|e| anyhow!("{:?}", e))?;
            Ok(el)
        })
        .collect()
}

/// Document scroll offset and the heights needed to turn it into progress.
pub fn scroll_metrics(window: &web::Window) -> (f32, f32, f32) {
    let offset = window.scroll_y().unwrap_or(0.0) as f32;
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(viewport);
    (offset, scroll_height, viewport)
}
