//! Pointer and keyboard input delivered by the host.
//!
//! Pointer coordinates are page-local pixels. The host resolves what was
//! under the pointer (a component body, one of its resize handles, or the
//! page background) from the `data-component-id` / `data-handle`
//! attributes of the projected HTML, or asks `hit::hit_test` when it can't.

use crate::interaction::ResizeHandle;
use rd_core::id::ComponentId;
use rd_core::Point;

/// Held modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Windows/Linux, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Component(ComponentId),
    Handle(ComponentId, ResizeHandle),
}

impl PointerTarget {
    /// Build a target from the delegated-dispatch attributes.
    pub fn from_attributes(component_id: Option<&str>, handle: Option<&str>) -> Self {
        match (component_id, handle.and_then(ResizeHandle::from_name)) {
            (Some(id), Some(handle)) => Self::Handle(ComponentId::intern(id), handle),
            (Some(id), None) => Self::Component(ComponentId::intern(id)),
            (None, _) => Self::Background,
        }
    }

    pub fn component(&self) -> Option<ComponentId> {
        match self {
            Self::Background => None,
            Self::Component(id) | Self::Handle(id, _) => Some(*id),
        }
    }
}

/// Unified input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        point: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
    },
    /// Released anywhere, including outside the page.
    PointerUp {
        point: Point,
    },
    Key {
        key: String,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, target: PointerTarget) -> Self {
        Self::PointerDown {
            point: Point::new(x, y),
            target,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            point: Point::new(x, y),
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            point: Point::new(x, y),
        }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }
}
