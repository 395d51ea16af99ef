use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::types::Rect;

/// Narrowphase primitive tests for axis-aligned rects.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn overlap_rect_rect(a: &Rect, b: &Rect) -> bool {
        a.left < b.right() && a.right() > b.left && a.top < b.bottom() && a.bottom() > b.top
    }

    fn mtv_rect_rect(a: &Rect, b: &Rect) -> Vec2 {
        // Signed single-axis corrections, x candidates listed before y.
        let candidates = [
            Vec2::new(b.right() - a.left, 0.0),
            Vec2::new(b.left - a.right(), 0.0),
            Vec2::new(0.0, b.bottom() - a.top),
            Vec2::new(0.0, b.top - a.bottom()),
        ];
        // Strict comparison keeps the earliest candidate on ties.
        let mut best = candidates[0];
        for c in &candidates[1..] {
            if c.length_squared() < best.length_squared() {
                best = *c;
            }
        }
        best
    }
}
