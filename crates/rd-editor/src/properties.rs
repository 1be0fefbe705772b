//! Properties panel: a flat view of the selected component and the write
//! path for edits coming back from the panel's inputs.
//!
//! Numeric inputs are coerced, never rejected: `x`/`y` fall back to 0,
//! `width`/`height` to the 20 px minimum, `zIndex` to 1.

use rd_core::css;
use rd_core::geometry::MIN_COMPONENT_SIZE;
use rd_core::id::ComponentId;
use rd_core::model::{Component, DEFAULT_Z_INDEX, MAX_Z_INDEX, TextAlign};
use rd_core::scene::Scene;
use serde::Serialize;

/// Snapshot of the editable attributes of one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub border: String,
    pub background: String,
    pub padding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<&'static str>,
}

impl PropertiesView {
    pub fn of(c: &Component) -> Self {
        let text = c.text_style.as_ref();
        Self {
            id: c.id.to_string(),
            kind: c.kind.as_str().to_string(),
            x: c.position.x,
            y: c.position.y,
            width: c.size.width,
            height: c.size.height,
            z_index: c.style.z_index,
            border: c.style.border.clone(),
            background: c.style.background.clone(),
            padding: c.style.padding.clone(),
            content: c.content.clone(),
            font_family: text.map(|t| t.font_family.clone()),
            font_size: text.map(|t| t.font_size.clone()),
            font_weight: text.map(|t| t.font_weight.clone()),
            color: text.map(|t| t.color.clone()),
            text_align: text.map(|t| t.text_align.as_str()),
        }
    }
}

fn number_or(value: &str, fallback: f64) -> f64 {
    css::parse_length(value).unwrap_or(fallback)
}

/// Write one panel field back into the scene.
///
/// Returns `false` when the component is missing, the key is unknown, or
/// the key does not apply to this component type. The scene is unchanged
/// in that case.
pub fn apply_property(scene: &mut Scene, id: ComponentId, key: &str, value: &str) -> bool {
    let Some(c) = scene.component_mut(id) else {
        log::warn!("properties: component {id} not found");
        return false;
    };

    match key {
        "x" => c.position.x = number_or(value, 0.0),
        "y" => c.position.y = number_or(value, 0.0),
        "width" => c.size.width = number_or(value, 0.0).max(MIN_COMPONENT_SIZE),
        "height" => c.size.height = number_or(value, 0.0).max(MIN_COMPONENT_SIZE),
        "zIndex" => {
            c.style.z_index = value
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| css::parse_length(value).map(|v| v.trunc() as i64))
                .unwrap_or(DEFAULT_Z_INDEX)
                .clamp(-MAX_Z_INDEX, MAX_Z_INDEX)
        }
        "border" => c.style.border = value.trim().to_string(),
        "background" => c.style.background = value.trim().to_string(),
        "padding" => c.style.padding = value.trim().to_string(),
        "content" if c.kind.is_free_text() => c.content = Some(value.to_string()),
        "fontFamily" | "fontSize" | "fontWeight" | "color" | "textAlign" => {
            let Some(style) = c.text_style.as_mut() else {
                log::warn!("properties: {key} does not apply to {}", c.kind.as_str());
                return false;
            };
            match key {
                "fontFamily" => style.font_family = value.trim().to_string(),
                "fontSize" => match css::parse_length(value) {
                    Some(px) if px > 0.0 => style.font_size = format!("{px}px"),
                    _ => return false,
                },
                "fontWeight" => match css::parse_font_weight(value) {
                    Some(_) => style.font_weight = value.trim().to_string(),
                    None => return false,
                },
                "color" => style.color = value.trim().to_string(),
                _ => match TextAlign::from_name(value) {
                    Some(align) => style.text_align = align,
                    None => return false,
                },
            }
        }
        _ => {
            log::warn!("properties: unknown or inapplicable key `{key}` for {id}");
            return false;
        }
    }
    log::debug!("properties: {id}.{key} = {value:?}");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::model::ComponentType;

    fn scene() -> (Scene, ComponentId) {
        let mut scene = Scene::new();
        let c = scene
            .add_component(1, ComponentType::Title, 40.0, 40.0)
            .unwrap();
        (scene, c.id)
    }

    #[test]
    fn numeric_fields_are_coerced() {
        let (mut scene, id) = scene();
        assert!(apply_property(&mut scene, id, "x", "abc"));
        assert!(apply_property(&mut scene, id, "width", ""));
        assert!(apply_property(&mut scene, id, "height", "5"));
        assert!(apply_property(&mut scene, id, "zIndex", "top"));
        let c = scene.component(id).unwrap();
        assert_eq!(c.position.x, 0.0);
        assert_eq!(c.size.width, 20.0);
        assert_eq!(c.size.height, 20.0);
        assert_eq!(c.style.z_index, 1);
    }

    #[test]
    fn numeric_fields_accept_px() {
        let (mut scene, id) = scene();
        apply_property(&mut scene, id, "y", "125px");
        apply_property(&mut scene, id, "width", "300");
        apply_property(&mut scene, id, "zIndex", "7");
        let c = scene.component(id).unwrap();
        assert_eq!(c.position.y, 125.0);
        assert_eq!(c.size.width, 300.0);
        assert_eq!(c.style.z_index, 7);
    }

    #[test]
    fn z_index_is_clamped() {
        let (mut scene, id) = scene();
        apply_property(&mut scene, id, "zIndex", "99999999999999999999");
        assert_eq!(scene.component(id).unwrap().style.z_index, MAX_Z_INDEX);
        apply_property(&mut scene, id, "zIndex", "-99999999999999999999");
        assert_eq!(scene.component(id).unwrap().style.z_index, -MAX_Z_INDEX);
    }

    #[test]
    fn text_fields_only_for_free_text() {
        let (mut scene, title) = scene();
        let date = scene
            .add_component(1, ComponentType::Date, 0.0, 0.0)
            .unwrap()
            .id;
        assert!(apply_property(&mut scene, title, "content", "Report"));
        assert!(!apply_property(&mut scene, date, "content", "Report"));
        assert!(!apply_property(&mut scene, date, "fontSize", "20px"));
        assert!(scene.component(date).unwrap().content.is_none());
    }

    #[test]
    fn typography_is_validated() {
        let (mut scene, id) = scene();
        assert!(apply_property(&mut scene, id, "fontSize", "18"));
        assert!(apply_property(&mut scene, id, "fontWeight", "bold"));
        assert!(apply_property(&mut scene, id, "textAlign", "center"));
        assert!(!apply_property(&mut scene, id, "fontWeight", "heavy"));
        assert!(!apply_property(&mut scene, id, "textAlign", "middle"));
        let style = scene.component(id).unwrap().text_style.clone().unwrap();
        assert_eq!(style.font_size, "18px");
        assert_eq!(style.font_weight, "bold");
        assert_eq!(style.text_align, TextAlign::Center);
    }

    #[test]
    fn unknown_key_and_missing_component() {
        let (mut scene, id) = scene();
        assert!(!apply_property(&mut scene, id, "rotation", "45"));
        assert!(!apply_property(
            &mut scene,
            ComponentId::intern("missing"),
            "x",
            "1"
        ));
    }

    #[test]
    fn view_reflects_component() {
        let (scene, id) = scene();
        let view = PropertiesView::of(scene.component(id).unwrap());
        assert_eq!(view.kind, "title");
        assert_eq!(view.font_weight.as_deref(), Some("700"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["textAlign"], "left");
    }
}
