//! Scene → export plan.
//!
//! Walks every page in paint order and emits backend-neutral draw ops in
//! millimetres with a top-left origin. One plan page per scene page, each
//! closed by a `"Page i of N"` footer.

use crate::error::ExportError;
use rd_core::css;
use rd_core::model::{Component, ComponentType, Orientation};
use rd_core::record::Record;
use rd_core::render::render;
use rd_core::scene::Scene;
use rd_core::table::MeasurementTable;
use smallvec::{SmallVec, smallvec};

/// Pixel → millimetre scale for page geometry.
pub const PX_TO_MM: f64 = 0.26;
/// Pixel → point scale for font sizes.
pub const PX_TO_PT: f64 = 0.75;
/// Point → millimetre, for baseline offsets.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Vertical space reserved for a table's caption and header.
pub const TABLE_MARGIN_MM: f64 = 15.0;
/// Vertical distance between table rows.
pub const TABLE_LINE_PITCH_MM: f64 = 6.0;
pub const TABLE_CAPTION: &str = "Measurements";
pub const TABLE_COLUMNS: [&str; 3] = ["MP_ID", "Value", "Status"];

/// Font size for record fields and placeholders, in points.
pub const FIELD_FONT_PT: f64 = 10.0;
/// Font size for table text, in points.
pub const TABLE_FONT_PT: f64 = 9.0;
/// Font size for the page footer, in points.
pub const FOOTER_FONT_PT: f64 = 9.0;
/// Footer baseline distance from the bottom edge.
pub const FOOTER_OFFSET_MM: f64 = 10.0;

const DEFAULT_FONT_PX: f64 = 14.0;

/// A single drawing instruction in page millimetres (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `y`.
    Text {
        x: f64,
        y: f64,
        size_pt: f64,
        bold: bool,
        text: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Outlined, unfilled rectangle.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_pt: f64,
    },
    /// Page footer, centred near the bottom edge by the backend.
    Footer { text: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanPage {
    pub ops: Vec<DrawOp>,
}

/// Everything a backend needs to produce one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub title: String,
    pub orientation: Orientation,
    pub width_mm: f64,
    pub height_mm: f64,
    pub pages: Vec<PlanPage>,
}

impl ExportPlan {
    pub fn op_count(&self) -> usize {
        self.pages.iter().map(|p| p.ops.len()).sum()
    }
}

fn text(x: f64, y: f64, size_pt: f64, bold: bool, text: impl Into<String>) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size_pt,
        bold,
        text: text.into(),
    }
}

/// Rows that fit a table box of `height_mm`.
pub fn table_capacity(height_mm: f64) -> usize {
    let rows = ((height_mm - TABLE_MARGIN_MM) / TABLE_LINE_PITCH_MM).floor();
    if rows.is_finite() && rows > 0.0 {
        rows as usize
    } else {
        0
    }
}

fn table_ops(x: f64, y: f64, width: f64, height: f64, record: Option<&Record>) -> Vec<DrawOp> {
    let mut ops = vec![text(x, y + 5.0, TABLE_FONT_PT + 1.0, true, TABLE_CAPTION)];
    let measurements = record.map(|r| r.measurements.as_slice()).unwrap_or(&[]);
    let table = MeasurementTable::build(measurements);

    if let Some(message) = table.message() {
        ops.push(text(x, y + 11.0, TABLE_FONT_PT, false, message));
        return ops;
    }

    let column = width / TABLE_COLUMNS.len() as f64;
    for (i, header) in TABLE_COLUMNS.iter().enumerate() {
        ops.push(text(x + column * i as f64, y + 11.0, TABLE_FONT_PT, true, *header));
    }

    let capacity = table_capacity(height);
    if table.rows().len() > capacity {
        log::debug!(
            "export: table shows {capacity} of {} rows",
            table.rows().len()
        );
    }
    for (i, row) in table.rows().iter().take(capacity).enumerate() {
        let baseline = y + TABLE_MARGIN_MM + TABLE_LINE_PITCH_MM * (i as f64 + 1.0) - 2.0;
        let cells = [row.mp_id.as_str(), row.value.as_str(), row.status.as_str()];
        for (c, cell) in cells.into_iter().enumerate() {
            ops.push(text(x + column * c as f64, baseline, TABLE_FONT_PT, false, cell));
        }
    }
    ops
}

/// Draw ops for one component.
fn component_ops(c: &Component, record: Option<&Record>) -> SmallVec<[DrawOp; 2]> {
    let x = c.position.x * PX_TO_MM;
    let y = c.position.y * PX_TO_MM;
    let width = c.size.width * PX_TO_MM;
    let height = c.size.height * PX_TO_MM;

    match &c.kind {
        ComponentType::Text | ComponentType::Title => {
            let content = c.content.as_deref().unwrap_or_default().trim();
            if content.is_empty() {
                return SmallVec::new();
            }
            let (size_px, bold) = match &c.text_style {
                Some(style) => (
                    css::parse_length(&style.font_size).unwrap_or(DEFAULT_FONT_PX),
                    css::is_bold(&style.font_weight),
                ),
                None => (DEFAULT_FONT_PX, c.kind == ComponentType::Title),
            };
            let size_pt = size_px * PX_TO_PT;
            smallvec![text(x, y + size_pt * PT_TO_MM, size_pt, bold, content)]
        }
        ComponentType::Line => smallvec![DrawOp::Line {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y,
        }],
        ComponentType::Rectangle => smallvec![DrawOp::Rect {
            x,
            y,
            width,
            height,
            stroke_pt: css::border_width(&c.style.border).max(1.0) * PX_TO_PT,
        }],
        kind if kind.is_record_field() || *kind == ComponentType::Field => {
            let content = render(&c.kind, record).plain_text();
            smallvec![text(x, y + FIELD_FONT_PT * PT_TO_MM, FIELD_FONT_PT, false, content)]
        }
        ComponentType::Table => table_ops(x, y, width, height, record).into(),
        ComponentType::Unknown(_) => smallvec![text(
            x,
            y + FIELD_FONT_PT * PT_TO_MM,
            FIELD_FONT_PT,
            false,
            "[unknown]"
        )],
        other => smallvec![text(
            x,
            y + FIELD_FONT_PT * PT_TO_MM,
            FIELD_FONT_PT,
            false,
            format!("[{}]", other.as_str())
        )],
    }
}

/// Build the export plan for `scene` against the active record.
pub fn build_plan(scene: &Scene, record: Option<&Record>) -> Result<ExportPlan, ExportError> {
    if scene.pages.is_empty() {
        return Err(ExportError::EmptyTemplate);
    }
    let (width_mm, height_mm) = scene
        .meta
        .paper_size
        .size_mm(scene.meta.orientation);
    let total = scene.pages.len();

    let pages = scene
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let mut ops: Vec<DrawOp> = page
                .paint_order()
                .into_iter()
                .flat_map(|c| component_ops(c, record))
                .collect();
            ops.push(DrawOp::Footer {
                text: format!("Page {} of {total}", i + 1),
            });
            PlanPage { ops }
        })
        .collect();

    Ok(ExportPlan {
        title: scene.meta.name.clone(),
        orientation: scene.meta.orientation,
        width_mm,
        height_mm,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::model::TemplateMeta;
    use rd_core::record::Measurement;
    use serde_json::json;

    fn record(rows: usize) -> Record {
        Record {
            qr_code: Some("QR-1".into()),
            measurements: (0..rows)
                .map(|i| Measurement {
                    mp_id: json!(format!("MP{i}")),
                    value: json!(i),
                    status: json!("OK"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn texts(page: &PlanPage) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_plan_page_per_scene_page_with_footers() {
        let mut scene = Scene::new();
        scene.add_page();
        scene.add_page();
        let plan = build_plan(&scene, None).unwrap();
        assert_eq!(plan.pages.len(), 3);
        assert_eq!(
            plan.pages[1].ops.last(),
            Some(&DrawOp::Footer {
                text: "Page 2 of 3".into()
            })
        );
    }

    #[test]
    fn empty_scene_is_an_error() {
        let scene = Scene::empty(TemplateMeta::default());
        assert!(matches!(
            build_plan(&scene, None),
            Err(ExportError::EmptyTemplate)
        ));
    }

    #[test]
    fn text_scales_geometry_and_font() {
        let mut scene = Scene::new();
        scene.add_component(1, ComponentType::Title, 100.0, 200.0);
        let plan = build_plan(&scene, None).unwrap();
        let DrawOp::Text {
            x,
            size_pt,
            bold,
            text,
            ..
        } = &plan.pages[0].ops[0]
        else {
            panic!("expected text op");
        };
        assert!((x - 26.0).abs() < 1e-9);
        assert_eq!(*size_pt, 18.0);
        assert!(*bold);
        assert_eq!(text, "Title");
    }

    #[test]
    fn line_spans_scaled_width() {
        let mut scene = Scene::new();
        scene.add_component(1, ComponentType::Line, 100.0, 100.0);
        let plan = build_plan(&scene, None).unwrap();
        let DrawOp::Line { x1, y1, x2, y2 } = plan.pages[0].ops[0] else {
            panic!("expected line op");
        };
        assert!((x2 - x1 - 52.0).abs() < 1e-9);
        assert_eq!(y1, y2);
    }

    #[test]
    fn table_rows_are_capped_by_height() {
        let mut scene = Scene::new();
        let c = scene.add_component(1, ComponentType::Table, 0.0, 0.0).unwrap();
        // 150 px → 39 mm → floor((39 - 15) / 6) = 4 rows.
        scene.component_mut(c.id).unwrap().size.height = 150.0;
        let r = record(10);
        let plan = build_plan(&scene, Some(&r)).unwrap();
        let t = texts(&plan.pages[0]);
        assert_eq!(t[0], TABLE_CAPTION);
        assert_eq!(&t[1..4], &TABLE_COLUMNS);
        assert_eq!(t.len(), 4 + 4 * 3);
        assert!(t.contains(&"MP3"));
        assert!(!t.contains(&"MP4"));
    }

    #[test]
    fn table_capacity_never_negative() {
        assert_eq!(table_capacity(10.0), 0);
        assert_eq!(table_capacity(21.0), 1);
        assert_eq!(table_capacity(f64::NAN), 0);
    }

    #[test]
    fn placeholders_for_other_types() {
        let mut scene = Scene::new();
        scene.add_component(1, ComponentType::PieChart, 0.0, 0.0);
        let mut c = scene.add_component(1, ComponentType::Image, 0.0, 60.0).unwrap();
        c.kind = ComponentType::Unknown("<svg>".into());
        c.id = scene.fresh_id();
        scene.insert_component(1, c);
        let plan = build_plan(&scene, None).unwrap();
        let t = texts(&plan.pages[0]);
        assert!(t.contains(&"[pieChart]"));
        assert!(t.contains(&"[image]"));
        assert!(t.contains(&"[unknown]"));
    }

    #[test]
    fn fields_draw_rendered_text() {
        let mut scene = Scene::new();
        scene.add_component(1, ComponentType::QrCode, 0.0, 0.0);
        let r = record(0);
        let plan = build_plan(&scene, Some(&r)).unwrap();
        assert_eq!(texts(&plan.pages[0]), vec!["QR Code: QR-1"]);
    }

    #[test]
    fn landscape_swaps_page_size() {
        let mut scene = Scene::new();
        scene.meta.orientation = Orientation::Landscape;
        let plan = build_plan(&scene, None).unwrap();
        assert_eq!((plan.width_mm, plan.height_mm), (297.0, 210.0));
    }
}
