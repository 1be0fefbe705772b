//! Editor session: the one object a host talks to.
//!
//! Owns the scene, the record cursor, settings, selection and the
//! persistence store. Input goes in through `handle_input`; everything the
//! host needs to redraw comes back out through `render_html` and
//! `properties`.

use crate::input::InputEvent;
use crate::interaction::InteractionController;
use crate::mutation::{Applied, SceneMutation};
use crate::properties::{PropertiesView, apply_property};
use crate::shortcuts::{ShortcutAction, ShortcutMap, action_name};
use crate::view::{ViewOptions, render_scene};
use rd_core::error::{LoadError, SaveError};
use rd_core::geometry::clamp_position;
use rd_core::id::ComponentId;
use rd_core::model::{Component, ComponentType, Template, TemplateMeta};
use rd_core::record::{Project, Record, RecordCursor};
use rd_core::scene::Scene;
use rd_core::serializer::{deserialize, serialize};
use rd_core::settings::EditorSettings;
use rd_core::store::{self, KeyValueStore};

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// Scene or selection changed; redraw.
    Changed,
    /// The user asked to save the template.
    Save,
    /// The user asked to export the current record.
    Export,
}

pub struct EditorSession<S: KeyValueStore> {
    store: S,
    scene: Scene,
    records: RecordCursor,
    settings: EditorSettings,
    interaction: InteractionController,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Start a session from whatever the store holds. Missing or malformed
    /// settings and projects fall back to defaults.
    pub fn new(store: S) -> Self {
        let settings = EditorSettings::load(&store);
        let project = store::load_project(&store);
        let mut scene = Scene::new();
        scene.grid = settings.grid();
        log::debug!(
            "session: started with {} record(s), grid {:?}",
            project.records.len(),
            scene.grid
        );
        Self {
            store,
            scene,
            records: RecordCursor::new(project.records),
            settings,
            interaction: InteractionController::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected(&self) -> Option<ComponentId> {
        self.interaction.selected
    }

    pub fn select(&mut self, id: Option<ComponentId>) -> bool {
        if let Some(id) = id
            && !self.scene.contains(id)
        {
            log::warn!("session: cannot select missing component {id}");
            return false;
        }
        self.interaction.select(id);
        true
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.records.current()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> Response {
        if let InputEvent::Key { key, modifiers } = event {
            return match ShortcutMap::resolve(key, *modifiers) {
                Some(action) => self.run_action(action),
                None => Response::Ignored,
            };
        }

        let selected_before = self.interaction.selected;
        let mutations = self.interaction.handle(event, &self.scene);
        let mut changed = selected_before != self.interaction.selected;
        for mutation in mutations {
            changed |= self.apply(mutation);
        }
        if changed {
            Response::Changed
        } else {
            Response::Ignored
        }
    }

    /// Apply a mutation, keeping selection consistent. Returns whether
    /// anything changed.
    fn apply(&mut self, mutation: SceneMutation) -> bool {
        match mutation.apply(&mut self.scene) {
            Applied::Created(c) => {
                self.interaction.select(Some(c.id));
                true
            }
            Applied::Removed(c) => {
                self.interaction.forget(c.id);
                true
            }
            Applied::Changed(_) => true,
            Applied::Ignored => false,
        }
    }

    fn run_action(&mut self, action: ShortcutAction) -> Response {
        log::debug!("session: shortcut {}", action_name(action));
        let changed = match action {
            ShortcutAction::Save => return Response::Save,
            ShortcutAction::Export => return Response::Export,
            ShortcutAction::ToggleSnap => {
                self.set_snap_to_grid(!self.settings.snap_to_grid);
                true
            }
            ShortcutAction::Deselect => self.interaction.selected.take().is_some(),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Duplicate => self.duplicate_selected().is_some(),
            ShortcutAction::BringToFront => self.with_selected(|id| SceneMutation::BringToFront { id }),
            ShortcutAction::SendToBack => self.with_selected(|id| SceneMutation::SendToBack { id }),
            ShortcutAction::Nudge { dx, dy, fine } => {
                let step = if fine { 1.0 } else { self.settings.grid_size };
                self.nudge_selected(f64::from(dx) * step, f64::from(dy) * step)
            }
        };
        if changed {
            Response::Changed
        } else {
            Response::Ignored
        }
    }

    fn with_selected(&mut self, make: impl FnOnce(ComponentId) -> SceneMutation) -> bool {
        match self.interaction.selected {
            Some(id) => self.apply(make(id)),
            None => false,
        }
    }

    // ─── Component operations ────────────────────────────────────────────

    /// Drop a palette item onto a page. The new component is selected.
    pub fn add_component(
        &mut self,
        page_id: u32,
        kind: ComponentType,
        x: f64,
        y: f64,
    ) -> Option<Component> {
        let add = SceneMutation::AddComponent { page_id, kind, x, y };
        match add.apply(&mut self.scene) {
            Applied::Created(c) => {
                self.interaction.select(Some(c.id));
                Some(c)
            }
            _ => None,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        self.with_selected(|id| SceneMutation::RemoveComponent { id })
    }

    /// Duplicate the selection and select the copy.
    pub fn duplicate_selected(&mut self) -> Option<ComponentId> {
        let id = self.interaction.selected?;
        let duplicate = SceneMutation::DuplicateComponent { id };
        match duplicate.apply(&mut self.scene) {
            Applied::Created(copy) => {
                self.interaction.select(Some(copy.id));
                Some(copy.id)
            }
            _ => None,
        }
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.with_selected(|id| SceneMutation::BringToFront { id })
    }

    pub fn send_to_back(&mut self) -> bool {
        self.with_selected(|id| SceneMutation::SendToBack { id })
    }

    /// Move the selection by `(dx, dy)` pixels, staying on the page.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.interaction.selected else {
            return false;
        };
        let Some(c) = self.scene.component(id) else {
            return false;
        };
        let size = c.rect().size();
        let (x, y) = clamp_position(
            c.position.x + dx,
            c.position.y + dy,
            size,
            self.scene.page_size(),
        );
        self.apply(SceneMutation::MoveComponent { id, x, y })
    }

    /// Move the selection onto another page.
    pub fn move_selected_to_page(&mut self, page_id: u32) -> bool {
        self.with_selected(|id| SceneMutation::MoveToPage { id, page_id })
    }

    pub fn properties(&self) -> Option<PropertiesView> {
        let id = self.interaction.selected?;
        self.scene.component(id).map(PropertiesView::of)
    }

    /// Write a properties-panel field to the selection.
    pub fn set_property(&mut self, key: &str, value: &str) -> bool {
        match self.interaction.selected {
            Some(id) => apply_property(&mut self.scene, id, key, value),
            None => false,
        }
    }

    // ─── Pages ───────────────────────────────────────────────────────────

    pub fn add_page(&mut self) -> u32 {
        self.scene.add_page().id
    }

    pub fn remove_page(&mut self, page_id: u32) -> bool {
        match self.scene.remove_page(page_id) {
            Some(page) => {
                for c in &page.components {
                    self.interaction.forget(c.id);
                }
                true
            }
            None => false,
        }
    }

    // ─── Records ─────────────────────────────────────────────────────────

    pub fn load_project(&mut self, project: Project) {
        log::debug!("session: loaded project `{}`", project.name);
        self.records.load(project.records);
    }

    /// Select record `index`. Out-of-range indices leave the cursor alone.
    pub fn set_current_record(&mut self, index: usize) -> bool {
        self.records.set_current(index)
    }

    pub fn next_record(&mut self) -> bool {
        self.records.next()
    }

    pub fn prev_record(&mut self) -> bool {
        self.records.prev()
    }

    pub fn current_record_index(&self) -> usize {
        self.records.current_index()
    }

    pub fn record_labels(&self) -> Vec<String> {
        self.records.labels()
    }

    // ─── Settings ────────────────────────────────────────────────────────

    fn persist_settings(&mut self) {
        self.scene.grid = self.settings.grid();
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("session: settings not saved: {e}");
        }
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.settings.snap_to_grid = enabled;
        self.persist_settings();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.settings.show_grid = show;
        self.persist_settings();
    }

    /// Change the grid pitch. Non-positive or non-finite values are ignored.
    pub fn set_grid_size(&mut self, size: f64) -> bool {
        if !size.is_finite() || size <= 0.0 {
            log::warn!("session: ignoring grid size {size}");
            return false;
        }
        self.settings.grid_size = size;
        self.persist_settings();
        true
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.persist_settings();
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.settings.locale = locale.to_string();
        self.persist_settings();
    }

    // ─── Templates ───────────────────────────────────────────────────────

    pub fn template(&self) -> Template {
        serialize(&self.scene)
    }

    pub fn template_name(&self) -> &str {
        &self.scene.meta.name
    }

    /// Discard the current layout and start from one empty page.
    pub fn new_template(&mut self, name: &str) {
        let mut scene = Scene::empty(TemplateMeta {
            name: name.to_string(),
            ..Default::default()
        });
        scene.grid = self.settings.grid();
        scene.add_page();
        self.scene = scene;
        self.interaction = InteractionController::new();
    }

    /// Save under the current template name.
    pub fn save(&mut self) -> Result<(), SaveError> {
        let template = self.template();
        store::save_template(&mut self.store, &template.meta.name, &template)
    }

    /// Rename the template and save it under the new name.
    pub fn save_as(&mut self, name: &str) -> Result<(), SaveError> {
        self.scene.meta.name = name.to_string();
        self.save()
    }

    /// Replace the scene with the named template. On error the current
    /// scene is kept.
    pub fn open(&mut self, name: &str) -> Result<(), LoadError> {
        let template = store::load_template(&self.store, name)?;
        self.scene = deserialize(&template, self.settings.grid());
        self.interaction = InteractionController::new();
        Ok(())
    }

    pub fn delete_template(&mut self, name: &str) -> Result<bool, SaveError> {
        store::delete_template(&mut self.store, name)
    }

    pub fn template_names(&self) -> Vec<String> {
        store::template_names(&self.store)
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn render_html(&self) -> String {
        render_scene(
            &self.scene,
            self.records.current(),
            self.interaction.selected,
            ViewOptions {
                show_grid: self.settings.show_grid,
                grid_size: self.settings.grid_size,
            },
        )
    }
}
