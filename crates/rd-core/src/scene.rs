//! Scene model: the canonical in-memory layout of a report.
//!
//! All editor mutations go through `Scene`. Every operation either fully
//! applies or leaves the scene untouched, and component ids stay unique
//! across all pages.

use crate::geometry::GridSettings;
use crate::id::ComponentId;
use crate::model::*;
use kurbo::Rect;
use std::collections::HashSet;

/// Offset applied to a duplicated component, in pixels.
pub const DUPLICATE_OFFSET: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub meta: TemplateMeta,
    pub pages: Vec<Page>,
    /// Snapping applied when components are placed.
    pub grid: GridSettings,
    next_page_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// A blank scene with a single empty page.
    pub fn new() -> Self {
        let mut scene = Self::empty(TemplateMeta::default());
        scene.add_page();
        scene
    }

    /// A scene with no pages at all. Used when rebuilding from a template.
    pub fn empty(meta: TemplateMeta) -> Self {
        Self {
            meta,
            pages: Vec::new(),
            grid: GridSettings::default(),
            next_page_id: 1,
        }
    }

    /// Page canvas size in pixels.
    pub fn page_size(&self) -> kurbo::Size {
        let (w, h) = self.meta.paper_size.size_px(self.meta.orientation);
        kurbo::Size::new(w, h)
    }

    // ─── Pages ───────────────────────────────────────────────────────────

    /// Append a new page with the next sequential id.
    pub fn add_page(&mut self) -> &Page {
        let id = self.next_page_id;
        self.next_page_id += 1;
        self.pages.push(Page::new(id));
        log::debug!("scene: added page {id}");
        &self.pages[self.pages.len() - 1]
    }

    /// Insert an already-built page, keeping the id counter ahead of it.
    pub(crate) fn push_page(&mut self, page: Page) {
        self.next_page_id = self.next_page_id.max(page.id.saturating_add(1));
        self.pages.push(page);
    }

    /// Remove a page and all its components. The last page cannot be removed.
    pub fn remove_page(&mut self, page_id: u32) -> Option<Page> {
        if self.pages.len() <= 1 {
            log::warn!("scene: refusing to remove the only page");
            return None;
        }
        let pos = self.pages.iter().position(|p| p.id == page_id)?;
        Some(self.pages.remove(pos))
    }

    pub fn page(&self, page_id: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: u32) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// The id of the page holding component `id`.
    pub fn page_of(&self, id: ComponentId) -> Option<u32> {
        self.pages
            .iter()
            .find(|p| p.get(id).is_some())
            .map(|p| p.id)
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.pages.iter().find_map(|p| p.get(id))
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.pages.iter_mut().find_map(|p| p.get_mut(id))
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.component(id).is_some()
    }

    /// Components of `page_id` back-to-front; empty if the page is missing.
    pub fn components_in_paint_order(&self, page_id: u32) -> Vec<&Component> {
        self.page(page_id)
            .map(Page::paint_order)
            .unwrap_or_default()
    }

    pub fn component_count(&self) -> usize {
        self.pages.iter().map(|p| p.components.len()).sum()
    }

    /// All component ids in the scene.
    pub fn ids(&self) -> HashSet<ComponentId> {
        self.pages
            .iter()
            .flat_map(|p| p.components.iter().map(|c| c.id))
            .collect()
    }

    /// A generated id that no component in the scene uses yet.
    pub fn fresh_id(&self) -> ComponentId {
        let taken = self.ids();
        loop {
            let id = ComponentId::generate();
            if !taken.contains(&id) {
                return id;
            }
        }
    }

    // ─── Component operations ────────────────────────────────────────────

    /// Create a component of `kind` at `(x, y)` on `page_id`.
    ///
    /// The position is snapped to the grid when snapping is on. Returns
    /// `None` if the page does not exist.
    pub fn add_component(
        &mut self,
        page_id: u32,
        kind: ComponentType,
        x: f64,
        y: f64,
    ) -> Option<Component> {
        let id = self.fresh_id();
        let (x, y) = (self.grid.apply(x), self.grid.apply(y));
        let page = self.page_mut(page_id)?;
        let component = Component::new(id, kind, x, y);
        page.components.push(component.clone());
        log::debug!(
            "scene: added {} {} at ({x}, {y}) on page {page_id}",
            component.kind.as_str(),
            id
        );
        Some(component)
    }

    /// Insert a fully-formed component, rejecting duplicate ids.
    pub fn insert_component(&mut self, page_id: u32, component: Component) -> bool {
        if self.contains(component.id) {
            log::warn!("scene: id {} already in use", component.id);
            return false;
        }
        match self.page_mut(page_id) {
            Some(page) => {
                page.components.push(component);
                true
            }
            None => false,
        }
    }

    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        for page in &mut self.pages {
            if let Some(pos) = page.components.iter().position(|c| c.id == id) {
                log::debug!("scene: removed {id} from page {}", page.id);
                return Some(page.components.remove(pos));
            }
        }
        None
    }

    /// Copy component `id` under a fresh id, offset by (20, 20), on the same page.
    pub fn duplicate_component(&mut self, id: ComponentId) -> Option<Component> {
        let new_id = self.fresh_id();
        let page_id = self.page_of(id)?;
        let mut copy = self.component(id)?.clone();
        copy.id = new_id;
        copy.position.x += DUPLICATE_OFFSET;
        copy.position.y += DUPLICATE_OFFSET;
        self.page_mut(page_id)?.components.push(copy.clone());
        log::debug!("scene: duplicated {id} as {new_id}");
        Some(copy)
    }

    /// Move component `id` to another page, keeping its geometry.
    pub fn move_to_page(&mut self, id: ComponentId, page_id: u32) -> bool {
        if self.page(page_id).is_none() {
            return false;
        }
        let Some(component) = self.remove_component(id) else {
            return false;
        };
        match self.page_mut(page_id) {
            Some(page) => {
                page.components.push(component);
                true
            }
            None => false,
        }
    }

    /// Set the bounding box of component `id`. Returns false if missing.
    pub fn update_geometry(&mut self, id: ComponentId, rect: Rect) -> bool {
        match self.component_mut(id) {
            Some(c) => {
                c.set_rect(rect);
                true
            }
            None => false,
        }
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    /// Raise `id` above every sibling on its page: `max(z) + 1`.
    pub fn bring_to_front(&mut self, id: ComponentId) -> Option<i64> {
        let page = self.pages.iter_mut().find(|p| p.get(id).is_some())?;
        let max = page.components.iter().map(|c| c.style.z_index).max()?;
        let z = max.saturating_add(1);
        page.get_mut(id)?.style.z_index = z;
        Some(z)
    }

    /// Lower `id` below every sibling on its page: `max(1, min(z) - 1)`.
    pub fn send_to_back(&mut self, id: ComponentId) -> Option<i64> {
        let page = self.pages.iter_mut().find(|p| p.get(id).is_some())?;
        let min = page.components.iter().map(|c| c.style.z_index).min()?;
        let z = min.saturating_sub(1).max(1);
        page.get_mut(id)?.style.z_index = z;
        Some(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_z(values: &[i64]) -> (Scene, Vec<ComponentId>) {
        let mut scene = Scene::new();
        let mut ids = Vec::new();
        for z in values {
            let c = scene
                .add_component(1, ComponentType::Rectangle, 0.0, 0.0)
                .unwrap();
            scene.component_mut(c.id).unwrap().style.z_index = *z;
            ids.push(c.id);
        }
        (scene, ids)
    }

    #[test]
    fn new_scene_has_one_page() {
        let scene = Scene::new();
        assert_eq!(scene.pages.len(), 1);
        assert_eq!(scene.pages[0].id, 1);
    }

    #[test]
    fn add_page_assigns_sequential_ids() {
        let mut scene = Scene::new();
        assert_eq!(scene.add_page().id, 2);
        assert_eq!(scene.add_page().id, 3);
    }

    #[test]
    fn page_ids_are_not_reused_after_removal() {
        let mut scene = Scene::new();
        scene.add_page();
        assert!(scene.remove_page(2).is_some());
        assert_eq!(scene.add_page().id, 3);
    }

    #[test]
    fn last_page_cannot_be_removed() {
        let mut scene = Scene::new();
        assert!(scene.remove_page(1).is_none());
        assert_eq!(scene.pages.len(), 1);
    }

    #[test]
    fn add_component_uses_defaults_and_snaps() {
        let mut scene = Scene::new();
        let c = scene
            .add_component(1, ComponentType::Date, 43.0, 117.0)
            .unwrap();
        assert_eq!(c.position, Position { x: 40.0, y: 120.0 });
        assert_eq!(c.size, DEFAULT_SIZE);
        assert_eq!(c.style, BoxStyle::default());
        assert!(c.content.is_none());
        assert_eq!(scene.component(c.id), Some(&c));
    }

    #[test]
    fn add_component_without_snapping_keeps_position() {
        let mut scene = Scene::new();
        scene.grid.enabled = false;
        let c = scene
            .add_component(1, ComponentType::Title, 43.0, 117.0)
            .unwrap();
        assert_eq!(c.position, Position { x: 43.0, y: 117.0 });
        assert_eq!(c.content.as_deref(), Some("Title"));
    }

    #[test]
    fn add_component_on_missing_page_fails() {
        let mut scene = Scene::new();
        assert!(scene.add_component(9, ComponentType::Text, 0.0, 0.0).is_none());
        assert_eq!(scene.component_count(), 0);
    }

    #[test]
    fn ids_are_unique_across_pages() {
        let mut scene = Scene::new();
        scene.add_page();
        for page in [1, 2, 1, 2] {
            scene.add_component(page, ComponentType::Text, 0.0, 0.0);
        }
        assert_eq!(scene.ids().len(), 4);
    }

    #[test]
    fn duplicate_offsets_and_copies() {
        let mut scene = Scene::new();
        let original = scene
            .add_component(1, ComponentType::Text, 100.0, 100.0)
            .unwrap();
        {
            let c = scene.component_mut(original.id).unwrap();
            c.content = Some("Hello".into());
            c.style.background = "#eee".into();
        }
        let copy = scene.duplicate_component(original.id).unwrap();
        let original = scene.component(original.id).unwrap().clone();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.position.x, original.position.x + 20.0);
        assert_eq!(copy.position.y, original.position.y + 20.0);
        assert_eq!(copy.style, original.style);
        assert_eq!(copy.content, original.content);
        assert_eq!(copy.text_style, original.text_style);
        assert_eq!(scene.page(1).unwrap().components.len(), 2);
    }

    #[test]
    fn duplicate_missing_component_is_none() {
        let mut scene = Scene::new();
        assert!(scene.duplicate_component(ComponentId::intern("nope")).is_none());
    }

    #[test]
    fn bring_to_front_uses_max_plus_one() {
        let (mut scene, ids) = scene_with_z(&[1, 3, 5]);
        assert_eq!(scene.bring_to_front(ids[0]), Some(6));
        assert_eq!(scene.component(ids[0]).unwrap().style.z_index, 6);
    }

    #[test]
    fn send_to_back_floors_at_one() {
        let (mut scene, ids) = scene_with_z(&[1, 3, 5]);
        assert_eq!(scene.send_to_back(ids[2]), Some(1));
        let (mut scene, ids) = scene_with_z(&[4, 6]);
        assert_eq!(scene.send_to_back(ids[1]), Some(3));
    }

    #[test]
    fn z_order_saturates_at_extremes() {
        let (mut scene, ids) = scene_with_z(&[i64::MAX, 2]);
        assert_eq!(scene.bring_to_front(ids[1]), Some(i64::MAX));
        let (mut scene, ids) = scene_with_z(&[i64::MIN, 2]);
        assert_eq!(scene.send_to_back(ids[1]), Some(1));
    }

    #[test]
    fn z_order_only_scans_siblings() {
        let mut scene = Scene::new();
        scene.add_page();
        let far = scene.add_component(2, ComponentType::Line, 0.0, 0.0).unwrap();
        scene.component_mut(far.id).unwrap().style.z_index = 50;
        let near = scene.add_component(1, ComponentType::Line, 0.0, 0.0).unwrap();
        assert_eq!(scene.bring_to_front(near.id), Some(2));
    }

    #[test]
    fn remove_component_reports_missing() {
        let mut scene = Scene::new();
        let c = scene.add_component(1, ComponentType::Line, 0.0, 0.0).unwrap();
        assert!(scene.remove_component(c.id).is_some());
        assert!(scene.remove_component(c.id).is_none());
    }

    #[test]
    fn move_to_page_keeps_geometry() {
        let mut scene = Scene::new();
        scene.add_page();
        let c = scene.add_component(1, ComponentType::Status, 30.0, 30.0).unwrap();
        assert!(scene.move_to_page(c.id, 2));
        assert_eq!(scene.page_of(c.id), Some(2));
        assert_eq!(scene.component(c.id).unwrap().position, c.position);
        assert!(!scene.move_to_page(c.id, 7));
        assert_eq!(scene.page_of(c.id), Some(2));
    }

    #[test]
    fn insert_component_rejects_duplicate_id() {
        let mut scene = Scene::new();
        let c = scene.add_component(1, ComponentType::Line, 0.0, 0.0).unwrap();
        assert!(!scene.insert_component(1, c));
        assert_eq!(scene.component_count(), 1);
    }
}
