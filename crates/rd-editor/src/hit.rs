//! Hit testing: page point → pointer target.
//!
//! Used when the host cannot attribute a pointer-down through the
//! projected HTML. Handles of the selected component win, then the
//! topmost component body in paint order.

use crate::input::PointerTarget;
use crate::interaction::ResizeHandle;
use rd_core::id::ComponentId;
use rd_core::scene::Scene;
use rd_core::{Point, Rect};

/// Side length of the square grab area around each resize handle.
pub const HANDLE_SIZE: f64 = 8.0;

fn handle_rect(anchor: Point) -> Rect {
    Rect::from_center_size(anchor, (HANDLE_SIZE, HANDLE_SIZE))
}

/// The handle of `rect` under `point`, if any.
pub fn hit_handle(rect: Rect, point: Point) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|h| handle_rect(h.anchor(rect)).contains(point))
}

/// Find what lies under `point` on page `page_id`.
pub fn hit_test(
    scene: &Scene,
    page_id: u32,
    point: Point,
    selected: Option<ComponentId>,
) -> PointerTarget {
    if let Some(id) = selected
        && scene.page_of(id) == Some(page_id)
        && let Some(component) = scene.component(id)
        && let Some(handle) = hit_handle(component.rect(), point)
    {
        return PointerTarget::Handle(id, handle);
    }

    // Walk back-to-front order in reverse: last painted is topmost.
    scene
        .components_in_paint_order(page_id)
        .into_iter()
        .rev()
        .find(|c| c.rect().contains(point))
        .map_or(PointerTarget::Background, |c| PointerTarget::Component(c.id))
}
