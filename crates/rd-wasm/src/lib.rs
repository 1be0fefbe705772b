//! WASM bridge for RD: exposes the report designer to the browser page.
//!
//! Compiled via `wasm-pack build --target web`. The page renders the HTML
//! from [`ReportDesigner::render_html`] and forwards pointer and keyboard
//! events with the `data-component-id` / `data-handle` attributes of
//! whatever element they hit.

mod storage;

use chrono::NaiveDate;
use rd_core::id::ComponentId;
use rd_core::model::ComponentType;
use rd_core::record::Project;
use rd_core::Point;
use rd_editor::hit::hit_test;
use rd_editor::{EditorSession, InputEvent, Modifiers, PointerTarget, Response};
use storage::BrowserStore;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn response_name(response: Response) -> &'static str {
    match response {
        Response::Ignored => "ignored",
        Response::Changed => "changed",
        Response::Save => "save",
        Response::Export => "export",
    }
}

/// A finished export handed back to the page for download.
#[wasm_bindgen]
pub struct ExportFile {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl ExportFile {
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }
}

/// The main WASM-facing designer controller.
///
/// Wraps an [`EditorSession`] backed by `localStorage`. All interaction
/// from the page goes through this struct.
#[wasm_bindgen]
pub struct ReportDesigner {
    session: EditorSession<BrowserStore>,
}

impl Default for ReportDesigner {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ReportDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            session: EditorSession::new(BrowserStore::open()),
        }
    }

    /// Current canvas markup, bound to the active record.
    pub fn render_html(&self) -> String {
        self.session.render_html()
    }

    // ─── Palette & pointer ───────────────────────────────────────────────

    /// Drop a palette item. Returns the new component id.
    pub fn add_component(&mut self, page_id: u32, kind: &str, x: f64, y: f64) -> Option<String> {
        self.session
            .add_component(page_id, ComponentType::from_name(kind), x, y)
            .map(|c| c.id.as_str().to_string())
    }

    /// Pointer down on `page_id`. When the page could not resolve a target
    /// from the DOM, pass `None` for both attributes and the scene is
    /// hit-tested instead. Returns true if a redraw is needed.
    pub fn pointer_down(
        &mut self,
        page_id: u32,
        x: f64,
        y: f64,
        component_id: Option<String>,
        handle: Option<String>,
    ) -> bool {
        let target = match component_id.as_deref() {
            Some(_) => PointerTarget::from_attributes(component_id.as_deref(), handle.as_deref()),
            None => hit_test(
                self.session.scene(),
                page_id,
                Point::new(x, y),
                self.session.selected(),
            ),
        };
        let event = InputEvent::pointer_down(x, y, target);
        self.session.handle_input(&event) == Response::Changed
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.session.handle_input(&InputEvent::pointer_move(x, y)) == Response::Changed
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.session.handle_input(&InputEvent::pointer_up(x, y)) == Response::Changed
    }

    /// Keyboard shortcut. Returns `"ignored"`, `"changed"`, `"save"` or
    /// `"export"`; the last two are left to the page to carry out.
    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let response = self.session.handle_input(&InputEvent::key(key, modifiers));
        response_name(response).to_string()
    }

    // ─── Selection & properties ──────────────────────────────────────────

    pub fn selected_id(&self) -> Option<String> {
        self.session.selected().map(|id| id.as_str().to_string())
    }

    pub fn select(&mut self, id: Option<String>) -> bool {
        self.session.select(id.as_deref().map(ComponentId::intern))
    }

    /// Properties of the selection as JSON, or `null`.
    pub fn get_selected_props(&self) -> String {
        match self.session.properties() {
            Some(view) => serde_json::to_string(&view).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    pub fn set_prop(&mut self, key: &str, value: &str) -> bool {
        self.session.set_property(key, value)
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    pub fn duplicate_selected(&mut self) -> Option<String> {
        self.session
            .duplicate_selected()
            .map(|id| id.as_str().to_string())
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.session.bring_to_front()
    }

    pub fn send_to_back(&mut self) -> bool {
        self.session.send_to_back()
    }

    pub fn move_selected_to_page(&mut self, page_id: u32) -> bool {
        self.session.move_selected_to_page(page_id)
    }

    // ─── Pages ───────────────────────────────────────────────────────────

    pub fn add_page(&mut self) -> u32 {
        self.session.add_page()
    }

    pub fn remove_page(&mut self, page_id: u32) -> bool {
        self.session.remove_page(page_id)
    }

    // ─── Records ─────────────────────────────────────────────────────────

    /// Replace the loaded project with `json` (a measurement project file).
    pub fn load_project(&mut self, json: &str) -> Result<(), JsValue> {
        let project: Project = serde_json::from_str(json).map_err(js_err)?;
        self.session.load_project(project);
        Ok(())
    }

    /// Labels for the record picker, as a JSON array.
    pub fn record_options(&self) -> String {
        serde_json::to_string(&self.session.record_labels()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn current_record_index(&self) -> usize {
        self.session.current_record_index()
    }

    pub fn select_record(&mut self, index: usize) -> bool {
        self.session.set_current_record(index)
    }

    pub fn next_record(&mut self) -> bool {
        self.session.next_record()
    }

    pub fn prev_record(&mut self) -> bool {
        self.session.prev_record()
    }

    // ─── Templates ───────────────────────────────────────────────────────

    pub fn template_name(&self) -> String {
        self.session.template_name().to_string()
    }

    /// Names in the template library, as a JSON array.
    pub fn template_names(&self) -> String {
        serde_json::to_string(&self.session.template_names()).unwrap_or_else(|_| "[]".to_string())
    }

    /// The current layout as template JSON.
    pub fn template_json(&self) -> Result<String, JsValue> {
        rd_core::serializer::to_json(&self.session.template()).map_err(js_err)
    }

    pub fn new_template(&mut self, name: &str) {
        self.session.new_template(name);
    }

    pub fn save(&mut self) -> Result<(), JsValue> {
        self.session.save().map_err(js_err)
    }

    pub fn save_as(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.save_as(name).map_err(js_err)
    }

    pub fn open(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.open(name).map_err(js_err)
    }

    pub fn delete_template(&mut self, name: &str) -> Result<bool, JsValue> {
        self.session.delete_template(name).map_err(js_err)
    }

    // ─── Settings ────────────────────────────────────────────────────────

    pub fn settings_json(&self) -> String {
        serde_json::to_string(self.session.settings()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.session.set_snap_to_grid(enabled);
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.session.set_show_grid(show);
    }

    pub fn set_grid_size(&mut self, size: f64) -> bool {
        self.session.set_grid_size(size)
    }

    /// Flip light/dark. Returns true when the new theme is dark.
    pub fn toggle_theme(&mut self) -> bool {
        self.session.toggle_theme();
        self.session.settings().theme == rd_core::Theme::Dark
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.session.set_locale(locale);
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Export the layout against the active record, dated today.
    pub fn export(&self) -> Result<ExportFile, JsValue> {
        let backend = rd_export::default_backend();
        let output = rd_export::export(
            self.session.scene(),
            self.session.current_record(),
            backend.as_deref(),
            today()?,
        )
        .map_err(js_err)?;
        Ok(ExportFile {
            file_name: output.file_name,
            mime_type: output.mime_type.to_string(),
            bytes: output.bytes,
        })
    }
}

/// Local calendar date from the browser clock.
fn today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| js_err("browser clock returned an invalid date"))
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("RD WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
