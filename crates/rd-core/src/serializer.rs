//! Template serializer: Scene ⇄ Template ⇄ JSON.
//!
//! `serialize` reads only the scene model and normalizes it: unset box
//! styles get their documented defaults, free-text components get trimmed
//! content and a complete typography snapshot, every other type drops
//! content entirely. `deserialize` is the inverse and keeps ids stable.

use crate::error::LoadError;
use crate::geometry::GridSettings;
use crate::id::ComponentId;
use crate::model::*;
use crate::scene::Scene;
use std::collections::HashSet;

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn normalize_box_style(style: &BoxStyle) -> BoxStyle {
    BoxStyle {
        z_index: style.z_index,
        border: or_default(&style.border, DEFAULT_BORDER),
        background: or_default(&style.background, DEFAULT_BACKGROUND),
        padding: or_default(&style.padding, DEFAULT_PADDING),
    }
}

fn complete_text_style(style: Option<&TextStyle>, kind: &ComponentType) -> TextStyle {
    let defaults = TextStyle::for_type(kind);
    match style {
        Some(s) => TextStyle {
            font_family: or_default(&s.font_family, &defaults.font_family),
            font_size: or_default(&s.font_size, &defaults.font_size),
            font_weight: or_default(&s.font_weight, &defaults.font_weight),
            color: or_default(&s.color, &defaults.color),
            text_align: s.text_align,
        },
        None => defaults,
    }
}

fn normalize_component(c: &Component) -> Component {
    let (content, text_style) = if c.kind.is_free_text() {
        (
            Some(c.content.as_deref().unwrap_or_default().trim().to_string()),
            Some(complete_text_style(c.text_style.as_ref(), &c.kind)),
        )
    } else {
        (None, None)
    };
    Component {
        id: c.id,
        kind: c.kind.clone(),
        position: c.position,
        size: c.size,
        style: normalize_box_style(&c.style),
        content,
        text_style,
    }
}

/// Snapshot the scene as a persistable template.
pub fn serialize(scene: &Scene) -> Template {
    Template {
        meta: scene.meta.clone(),
        pages: scene
            .pages
            .iter()
            .map(|page| Page {
                id: page.id,
                components: page.components.iter().map(normalize_component).collect(),
            })
            .collect(),
    }
}

/// Rebuild a scene from a stored template.
///
/// Ids are kept; a repeated component id is re-keyed with a warning, as is
/// a repeated or zero page id. A template without pages gets one empty page.
pub fn deserialize(template: &Template, grid: GridSettings) -> Scene {
    let mut scene = Scene::empty(template.meta.clone());
    scene.grid = grid;

    let mut seen_pages = HashSet::new();
    let mut seen_ids = HashSet::new();
    let stored_ids: HashSet<ComponentId> = template
        .pages
        .iter()
        .flat_map(|p| p.components.iter().map(|c| c.id))
        .collect();
    for stored in &template.pages {
        let mut page_id = stored.id;
        if page_id == 0 || !seen_pages.insert(page_id) {
            page_id = seen_pages.iter().copied().max().unwrap_or(0) + 1;
            log::warn!("serializer: page id {} reused; loading as {page_id}", stored.id);
            seen_pages.insert(page_id);
        }

        let mut page = Page::new(page_id);
        for stored_component in &stored.components {
            let mut component = normalize_component(stored_component);
            if stored_component.content.is_none() {
                component.content = component.kind.default_content().map(str::to_string);
            }
            if !seen_ids.insert(component.id) {
                let fresh = loop {
                    let id = ComponentId::generate();
                    if !seen_ids.contains(&id) && !stored_ids.contains(&id) {
                        break id;
                    }
                };
                log::warn!(
                    "serializer: duplicate component id {}; re-keyed as {fresh}",
                    component.id
                );
                seen_ids.insert(fresh);
                component.id = fresh;
            }
            page.components.push(component);
        }
        scene.push_page(page);
    }

    if scene.pages.is_empty() {
        scene.add_page();
    }
    log::debug!(
        "serializer: loaded `{}` with {} page(s), {} component(s)",
        scene.meta.name,
        scene.pages.len(),
        scene.component_count()
    );
    scene
}

/// Pretty-printed JSON for a template.
pub fn to_json(template: &Template) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(template)
}

pub fn from_json(json: &str) -> Result<Template, LoadError> {
    Ok(serde_json::from_str(json)?)
}
