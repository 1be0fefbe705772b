//! Scene → HTML projection for the canvas.
//!
//! Pure function of the scene, the active record and the selection. Every
//! component element carries `data-component-id` and every resize handle
//! carries `data-handle`, so the host can dispatch pointer events through
//! a single delegated listener.

use crate::interaction::ResizeHandle;
use rd_core::id::ComponentId;
use rd_core::model::{Component, Page};
use rd_core::record::Record;
use rd_core::render::{escape_html, render_component};
use rd_core::scene::Scene;

/// Canvas projection options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub show_grid: bool,
    pub grid_size: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: 10.0,
        }
    }
}

fn component_class(c: &Component) -> String {
    // Unknown type names come from template data; keep them out of markup.
    let kind = if c.kind.is_known() {
        c.kind.as_str()
    } else {
        "unknown"
    };
    format!("rd-component rd-{kind}")
}

fn component_style(c: &Component) -> String {
    let mut style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; z-index: {}; border: {}; background: {}; padding: {}; box-sizing: border-box;",
        c.position.x,
        c.position.y,
        c.size.width,
        c.size.height,
        c.style.z_index,
        c.style.border,
        c.style.background,
        c.style.padding,
    );
    if let Some(text) = &c.text_style {
        style.push_str(&format!(
            " font-family: {}; font-size: {}; font-weight: {}; color: {}; text-align: {};",
            text.font_family,
            text.font_size,
            text.font_weight,
            text.color,
            text.text_align.as_str()
        ));
    }
    escape_html(&style)
}

fn render_handles(out: &mut String, id: &str) {
    for handle in ResizeHandle::ALL {
        let name = handle.as_str();
        out.push_str(&format!(
            "<div class=\"rd-handle rd-handle-{name}\" data-component-id=\"{id}\" data-handle=\"{name}\"></div>"
        ));
    }
}

fn render_page(
    out: &mut String,
    scene: &Scene,
    page: &Page,
    record: Option<&Record>,
    selected: Option<ComponentId>,
    options: ViewOptions,
) {
    let size = scene.page_size();
    let mut class = String::from("rd-page");
    let mut style = format!(
        "position: relative; width: {}px; height: {}px;",
        size.width, size.height
    );
    if options.show_grid && options.grid_size > 0.0 {
        class.push_str(" rd-grid");
        style.push_str(&format!(
            " background-size: {g}px {g}px;",
            g = options.grid_size
        ));
    }
    out.push_str(&format!(
        "<div class=\"{class}\" data-page-id=\"{}\" style=\"{style}\">",
        page.id
    ));

    for c in page.paint_order() {
        let id = escape_html(c.id.as_str());
        let is_selected = selected == Some(c.id);
        let mut class = component_class(c);
        if is_selected {
            class.push_str(" selected");
        }
        out.push_str(&format!(
            "<div class=\"{class}\" data-component-id=\"{id}\" style=\"{}\">",
            component_style(c)
        ));
        out.push_str(&render_component(c, record).to_html());
        if is_selected {
            render_handles(out, &id);
        }
        out.push_str("</div>");
    }

    out.push_str("</div>");
}

/// Project every page of the scene.
pub fn render_scene(
    scene: &Scene,
    record: Option<&Record>,
    selected: Option<ComponentId>,
    options: ViewOptions,
) -> String {
    let mut out = String::new();
    for page in &scene.pages {
        render_page(&mut out, scene, page, record, selected, options);
    }
    out
}
