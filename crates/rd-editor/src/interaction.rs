//! Interaction controller: selection plus the drag and resize gestures.
//!
//! ```text
//! Idle ──down on body──▶ Dragging ──up──▶ Idle
//! Idle ──down on handle─▶ Resizing(h) ──up──▶ Idle
//! ```
//!
//! Every move while a gesture is active yields one geometry mutation.
//! Moves while idle and downs during a gesture are no-ops. Pointer-up ends
//! any gesture no matter where it lands; the host captures the pointer
//! for the gesture's duration.

use crate::input::{InputEvent, PointerTarget};
use crate::mutation::SceneMutation;
use rd_core::geometry::{GridSettings, MIN_COMPONENT_SIZE};
use rd_core::id::ComponentId;
use rd_core::scene::Scene;
use rd_core::{Point, Rect};

// ─── Resize handles ──────────────────────────────────────────────────────

/// The eight compass handles around a selected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
        ResizeHandle::NorthWest,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "n" => Some(Self::North),
            "ne" => Some(Self::NorthEast),
            "e" => Some(Self::East),
            "se" => Some(Self::SouthEast),
            "s" => Some(Self::South),
            "sw" => Some(Self::SouthWest),
            "w" => Some(Self::West),
            "nw" => Some(Self::NorthWest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        }
    }

    fn north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    fn west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    /// Where this handle sits on `rect`.
    pub fn anchor(self, rect: Rect) -> Point {
        let x = if self.west() {
            rect.x0
        } else if self.east() {
            rect.x1
        } else {
            rect.center().x
        };
        let y = if self.north() {
            rect.y0
        } else if self.south() {
            rect.y1
        } else {
            rect.center().y
        };
        Point::new(x, y)
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Move a box of `rect`'s size by the pointer delta, keeping it on the page.
pub fn drag_position(
    origin: Rect,
    start: Point,
    pointer: Point,
    container: kurbo::Size,
    grid: GridSettings,
) -> (f64, f64) {
    let delta = pointer - start;
    let max_x = container.width - origin.width();
    let max_y = container.height - origin.height();
    (
        grid.apply_within(origin.x0 + delta.x, max_x),
        grid.apply_within(origin.y0 + delta.y, max_y),
    )
}

/// Move one or two edges of `origin` by the pointer delta.
///
/// West/north handles snap the moved coordinate and keep the far edge
/// fixed. East/south handles snap the resulting width/height, so an
/// off-grid origin still ends up with an on-grid size. The 20 px floor is
/// applied last, pushing the moving edge back while the opposite edge
/// stays put.
pub fn resize_rect(
    origin: Rect,
    handle: ResizeHandle,
    start: Point,
    pointer: Point,
    container: kurbo::Size,
    grid: GridSettings,
) -> Rect {
    let delta = pointer - start;
    let Rect {
        mut x0,
        mut y0,
        mut x1,
        mut y1,
    } = origin;

    if handle.west() {
        x0 = grid.apply(x0 + delta.x).max(0.0);
        if x1 - x0 < MIN_COMPONENT_SIZE {
            x0 = x1 - MIN_COMPONENT_SIZE;
        }
    } else if handle.east() {
        let width = grid.apply_within(x1 + delta.x - x0, container.width - x0);
        x1 = x0 + width.max(MIN_COMPONENT_SIZE);
    }

    if handle.north() {
        y0 = grid.apply(y0 + delta.y).max(0.0);
        if y1 - y0 < MIN_COMPONENT_SIZE {
            y0 = y1 - MIN_COMPONENT_SIZE;
        }
    } else if handle.south() {
        let height = grid.apply_within(y1 + delta.y - y0, container.height - y0);
        y1 = y0 + height.max(MIN_COMPONENT_SIZE);
    }

    Rect::new(x0, y0, x1, y1)
}

// ─── State machine ───────────────────────────────────────────────────────

/// The gesture in progress, if any. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        id: ComponentId,
        start: Point,
        origin: Rect,
    },
    Resizing {
        id: ComponentId,
        handle: ResizeHandle,
        start: Point,
        origin: Rect,
    },
}

/// Owns selection and the active gesture.
#[derive(Debug, Clone)]
pub struct InteractionController {
    pub selected: Option<ComponentId>,
    gesture: Gesture,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            selected: None,
            gesture: Gesture::Idle,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn select(&mut self, id: Option<ComponentId>) {
        self.selected = id;
    }

    /// Forget selection and gesture state for a component that went away.
    pub fn forget(&mut self, id: ComponentId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        let active = match self.gesture {
            Gesture::Dragging { id, .. } | Gesture::Resizing { id, .. } => Some(id),
            Gesture::Idle => None,
        };
        if active == Some(id) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Handle a pointer event, returning the mutations to apply.
    pub fn handle(&mut self, event: &InputEvent, scene: &Scene) -> Vec<SceneMutation> {
        match event {
            InputEvent::PointerDown { point, target, .. } => {
                self.pointer_down(*point, *target, scene);
                Vec::new()
            }
            InputEvent::PointerMove { point } => self.pointer_move(*point, scene),
            InputEvent::PointerUp { .. } => {
                if !self.is_idle() {
                    log::debug!("interaction: gesture ended {:?}", self.gesture);
                }
                self.gesture = Gesture::Idle;
                Vec::new()
            }
            InputEvent::Key { .. } => Vec::new(),
        }
    }

    fn pointer_down(&mut self, point: Point, target: PointerTarget, scene: &Scene) {
        if !self.is_idle() {
            log::debug!("interaction: pointer-down during {:?} ignored", self.gesture);
            return;
        }
        match target {
            PointerTarget::Background => {
                self.selected = None;
            }
            PointerTarget::Component(id) => {
                let Some(component) = scene.component(id) else {
                    log::warn!("interaction: pointer-down on unknown component {id}");
                    return;
                };
                self.selected = Some(id);
                self.gesture = Gesture::Dragging {
                    id,
                    start: point,
                    origin: component.rect(),
                };
                log::debug!("interaction: drag {id} from {point:?}");
            }
            PointerTarget::Handle(id, handle) => {
                let Some(component) = scene.component(id) else {
                    log::warn!("interaction: pointer-down on handle of unknown component {id}");
                    return;
                };
                self.selected = Some(id);
                self.gesture = Gesture::Resizing {
                    id,
                    handle,
                    start: point,
                    origin: component.rect(),
                };
                log::debug!("interaction: resize {id} via {}", handle.as_str());
            }
        }
    }

    fn pointer_move(&mut self, point: Point, scene: &Scene) -> Vec<SceneMutation> {
        let container = scene.page_size();
        match self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Dragging { id, start, origin } => {
                let (x, y) = drag_position(origin, start, point, container, scene.grid);
                log::trace!("interaction: drag {id} → ({x}, {y})");
                vec![SceneMutation::MoveComponent { id, x, y }]
            }
            Gesture::Resizing {
                id,
                handle,
                start,
                origin,
            } => {
                let rect = resize_rect(origin, handle, start, point, container, scene.grid);
                log::trace!("interaction: resize {id} → {rect:?}");
                vec![SceneMutation::ResizeComponent { id, rect }]
            }
        }
    }
}
