/// Fraction of the document scrolled, in `[0, 1]`.
///
/// A document no taller than its viewport cannot scroll and reports `0`.
#[inline]
pub fn scroll_progress(offset: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let range = scroll_height - viewport_height;
    if !(range > 0.0) || !offset.is_finite() {
        return 0.0;
    }
    (offset / range).clamp(0.0, 1.0)
}
