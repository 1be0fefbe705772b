//! Scene mutations produced by input handling.
//!
//! The interaction controller and shortcut handling never touch the scene
//! directly; they emit `SceneMutation`s which the session applies here.

use rd_core::id::ComponentId;
use rd_core::model::{Component, ComponentType};
use rd_core::scene::Scene;
use rd_core::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    AddComponent {
        page_id: u32,
        kind: ComponentType,
        x: f64,
        y: f64,
    },
    MoveComponent {
        id: ComponentId,
        x: f64,
        y: f64,
    },
    ResizeComponent {
        id: ComponentId,
        rect: Rect,
    },
    RemoveComponent {
        id: ComponentId,
    },
    DuplicateComponent {
        id: ComponentId,
    },
    BringToFront {
        id: ComponentId,
    },
    SendToBack {
        id: ComponentId,
    },
    MoveToPage {
        id: ComponentId,
        page_id: u32,
    },
}

/// What applying a mutation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A component was created (add or duplicate).
    Created(Component),
    Removed(Component),
    Changed(ComponentId),
    /// The target was missing; the scene is unchanged.
    Ignored,
}

impl SceneMutation {
    /// Apply to `scene`. A mutation naming a missing component or page is
    /// ignored with a warning.
    pub fn apply(self, scene: &mut Scene) -> Applied {
        let applied = match &self {
            SceneMutation::AddComponent {
                page_id,
                kind,
                x,
                y,
            } => scene
                .add_component(*page_id, kind.clone(), *x, *y)
                .map(Applied::Created),
            SceneMutation::MoveComponent { id, x, y } => {
                scene.component_mut(*id).map(|c| {
                    c.position.x = *x;
                    c.position.y = *y;
                    Applied::Changed(*id)
                })
            }
            SceneMutation::ResizeComponent { id, rect } => scene
                .update_geometry(*id, *rect)
                .then_some(Applied::Changed(*id)),
            SceneMutation::RemoveComponent { id } => {
                scene.remove_component(*id).map(Applied::Removed)
            }
            SceneMutation::DuplicateComponent { id } => {
                scene.duplicate_component(*id).map(Applied::Created)
            }
            SceneMutation::BringToFront { id } => {
                scene.bring_to_front(*id).map(|_| Applied::Changed(*id))
            }
            SceneMutation::SendToBack { id } => {
                scene.send_to_back(*id).map(|_| Applied::Changed(*id))
            }
            SceneMutation::MoveToPage { id, page_id } => scene
                .move_to_page(*id, *page_id)
                .then_some(Applied::Changed(*id)),
        };
        applied.unwrap_or_else(|| {
            log::warn!("mutation: target missing, ignored: {self:?}");
            Applied::Ignored
        })
    }
}
