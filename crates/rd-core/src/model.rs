//! Template data model for report layouts.
//!
//! A `Template` is an ordered list of pages, each holding absolutely
//! positioned components. The same types are used in memory (see
//! `scene::Scene`) and on disk (JSON, camelCase keys), so the persisted
//! document is always a faithful snapshot of the editor model.

use crate::id::ComponentId;
use kurbo::Rect;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Paper ───────────────────────────────────────────────────────────────

/// A4 width in CSS pixels at 96 dpi.
pub const A4_WIDTH_PX: f64 = 794.0;
/// A4 height in CSS pixels at 96 dpi.
pub const A4_HEIGHT_PX: f64 = 1123.0;
/// A4 width in millimetres.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 height in millimetres.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Paper preset. Only A4 is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl PaperSize {
    /// Canvas size in pixels `(width, height)` for the given orientation.
    pub fn size_px(self, orientation: Orientation) -> (f64, f64) {
        match (self, orientation) {
            (PaperSize::A4, Orientation::Portrait) => (A4_WIDTH_PX, A4_HEIGHT_PX),
            (PaperSize::A4, Orientation::Landscape) => (A4_HEIGHT_PX, A4_WIDTH_PX),
        }
    }

    /// Physical size in millimetres `(width, height)` for the given orientation.
    pub fn size_mm(self, orientation: Orientation) -> (f64, f64) {
        match (self, orientation) {
            (PaperSize::A4, Orientation::Portrait) => (A4_WIDTH_MM, A4_HEIGHT_MM),
            (PaperSize::A4, Orientation::Landscape) => (A4_HEIGHT_MM, A4_WIDTH_MM),
        }
    }
}

// ─── Component type ──────────────────────────────────────────────────────

/// The closed set of component types a template may contain.
///
/// Anything else found in persisted data becomes `Unknown`, which renders
/// as an inert placeholder and is written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Text,
    Title,
    Image,
    Line,
    Rectangle,
    Date,
    Time,
    User,
    SchemaName,
    SchemaVersion,
    QrCode,
    Status,
    Table,
    Chart,
    Field,
    PageNumber,
    BarChart,
    PieChart,
    Gauge,
    Unknown(String),
}

impl ComponentType {
    /// Every known type, in palette order.
    pub const ALL: [ComponentType; 19] = [
        ComponentType::Text,
        ComponentType::Title,
        ComponentType::Image,
        ComponentType::Line,
        ComponentType::Rectangle,
        ComponentType::Date,
        ComponentType::Time,
        ComponentType::User,
        ComponentType::SchemaName,
        ComponentType::SchemaVersion,
        ComponentType::QrCode,
        ComponentType::Status,
        ComponentType::Table,
        ComponentType::Chart,
        ComponentType::Field,
        ComponentType::PageNumber,
        ComponentType::BarChart,
        ComponentType::PieChart,
        ComponentType::Gauge,
    ];

    /// Parse a persisted type name. Never fails.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "title" => Self::Title,
            "image" => Self::Image,
            "line" => Self::Line,
            "rectangle" => Self::Rectangle,
            "date" => Self::Date,
            "time" => Self::Time,
            "user" => Self::User,
            "schemaName" => Self::SchemaName,
            "schemaVersion" => Self::SchemaVersion,
            "qrCode" => Self::QrCode,
            "status" => Self::Status,
            "table" => Self::Table,
            "chart" => Self::Chart,
            "field" => Self::Field,
            "pageNumber" => Self::PageNumber,
            "barChart" => Self::BarChart,
            "pieChart" => Self::PieChart,
            "gauge" => Self::Gauge,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Title => "title",
            Self::Image => "image",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Date => "date",
            Self::Time => "time",
            Self::User => "user",
            Self::SchemaName => "schemaName",
            Self::SchemaVersion => "schemaVersion",
            Self::QrCode => "qrCode",
            Self::Status => "status",
            Self::Table => "table",
            Self::Chart => "chart",
            Self::Field => "field",
            Self::PageNumber => "pageNumber",
            Self::BarChart => "barChart",
            Self::PieChart => "pieChart",
            Self::Gauge => "gauge",
            Self::Unknown(name) => name,
        }
    }

    /// Free-text types carry their own `content` and `textStyle`.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Text | Self::Title)
    }

    /// Types whose visible content is a single record field.
    pub fn is_record_field(&self) -> bool {
        matches!(
            self,
            Self::Date
                | Self::Time
                | Self::User
                | Self::SchemaName
                | Self::SchemaVersion
                | Self::QrCode
                | Self::Status
        )
    }

    /// Initial `content` of a freshly created component.
    pub fn default_content(&self) -> Option<&'static str> {
        match self {
            Self::Text => Some("Text"),
            Self::Title => Some("Title"),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ComponentType::from_name(&s))
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Default footprint of a freshly dropped component.
pub const DEFAULT_SIZE: Size = Size {
    width: 200.0,
    height: 50.0,
};

impl Default for Size {
    fn default() -> Self {
        DEFAULT_SIZE
    }
}

// ─── Styling ─────────────────────────────────────────────────────────────

pub const DEFAULT_BORDER: &str = "1px dashed #ccc";
pub const DEFAULT_BACKGROUND: &str = "transparent";
pub const DEFAULT_PADDING: &str = "5px";
pub const DEFAULT_Z_INDEX: i64 = 1;
/// Largest stacking value the properties panel accepts, either sign.
pub const MAX_Z_INDEX: i64 = 1_000_000;

/// Box styling shared by every component. Empty strings mean "unset" and
/// are replaced by the defaults above when a template is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    #[serde(default = "default_z_index")]
    pub z_index: i64,
    #[serde(default)]
    pub border: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub padding: String,
}

fn default_z_index() -> i64 {
    DEFAULT_Z_INDEX
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            z_index: DEFAULT_Z_INDEX,
            border: DEFAULT_BORDER.into(),
            background: DEFAULT_BACKGROUND.into(),
            padding: DEFAULT_PADDING.into(),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Typography snapshot for free-text components. Sizes and weights keep
/// their CSS spelling (`"14px"`, `"700"`) so they can be written straight
/// into inline styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub font_size: String,
    #[serde(default)]
    pub font_weight: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
}

pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

impl TextStyle {
    /// Default typography for the given free-text type.
    pub fn for_type(kind: &ComponentType) -> Self {
        let (size, weight) = match kind {
            ComponentType::Title => ("24px", "700"),
            _ => ("14px", "400"),
        };
        Self {
            font_family: DEFAULT_FONT_FAMILY.into(),
            font_size: size.into(),
            font_weight: weight.into(),
            color: DEFAULT_TEXT_COLOR.into(),
            text_align: TextAlign::Left,
        }
    }
}

// ─── Components & pages ──────────────────────────────────────────────────

/// One positioned, typed visual unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub style: BoxStyle,
    /// Only present for free-text types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Only present for free-text types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

impl Component {
    /// A component with default size and style at `(x, y)`.
    pub fn new(id: ComponentId, kind: ComponentType, x: f64, y: f64) -> Self {
        let content = kind.default_content().map(str::to_string);
        let text_style = kind.is_free_text().then(|| TextStyle::for_type(&kind));
        Self {
            id,
            kind,
            position: Position { x, y },
            size: DEFAULT_SIZE,
            style: BoxStyle::default(),
            content,
            text_style,
        }
    }

    /// Bounding box in page pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            (self.position.x, self.position.y),
            (self.size.width, self.size.height),
        )
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.position = Position {
            x: rect.x0,
            y: rect.y0,
        };
        self.size = Size {
            width: rect.width(),
            height: rect.height(),
        };
    }
}

/// A single report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: u32,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Page {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            components: Vec::new(),
        }
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// Components sorted back-to-front: by `zIndex`, ties by list order.
    pub fn paint_order(&self) -> Vec<&Component> {
        let mut ordered: Vec<&Component> = self.components.iter().collect();
        // `sort_by_key` is stable, so list order breaks ties.
        ordered.sort_by_key(|c| c.style.z_index);
        ordered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paper_size: PaperSize,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Default for TemplateMeta {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
        }
    }
}

/// The full multi-page layout document, independent of any record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub meta: TemplateMeta,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_exclude_static_and_free_text() {
        assert!(ComponentType::QrCode.is_record_field());
        assert!(ComponentType::Status.is_record_field());
        assert!(!ComponentType::Field.is_record_field());
        assert!(!ComponentType::Title.is_record_field());
        assert!(!ComponentType::Unknown("sparkline".into()).is_record_field());
    }

    #[test]
    fn component_type_names_roundtrip() {
        for kind in ComponentType::ALL {
            assert_eq!(ComponentType::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_type_is_preserved() {
        let kind = ComponentType::from_name("sparkline");
        assert_eq!(kind, ComponentType::Unknown("sparkline".into()));
        assert_eq!(kind.as_str(), "sparkline");
        assert!(!kind.is_known());
    }

    #[test]
    fn landscape_swaps_dimensions() {
        assert_eq!(
            PaperSize::A4.size_px(Orientation::Landscape),
            (A4_HEIGHT_PX, A4_WIDTH_PX)
        );
        assert_eq!(
            PaperSize::A4.size_mm(Orientation::Portrait),
            (A4_WIDTH_MM, A4_HEIGHT_MM)
        );
    }

    #[test]
    fn component_json_uses_camel_case() {
        let c = Component::new(ComponentId::intern("t1"), ComponentType::Text, 10.0, 20.0);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["style"]["zIndex"], 1);
        assert_eq!(json["textStyle"]["fontSize"], "14px");
        assert_eq!(json["content"], "Text");
    }

    #[test]
    fn non_text_component_omits_content() {
        let c = Component::new(ComponentId::intern("d1"), ComponentType::Date, 0.0, 0.0);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("textStyle").is_none());
    }

    #[test]
    fn paint_order_sorts_by_z_then_list_order() {
        let mut page = Page::new(1);
        let mut a = Component::new(ComponentId::intern("po_a"), ComponentType::Line, 0.0, 0.0);
        a.style.z_index = 3;
        let b = Component::new(ComponentId::intern("po_b"), ComponentType::Line, 0.0, 0.0);
        let c = Component::new(ComponentId::intern("po_c"), ComponentType::Line, 0.0, 0.0);
        page.components = vec![a, b, c];
        let ids: Vec<&str> = page.paint_order().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["po_b", "po_c", "po_a"]);
    }
}
