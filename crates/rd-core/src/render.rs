//! Component renderer: type + active record → visual content.
//!
//! Pure projection of the model. Record-bound types fall back to sample
//! literals when no record is active so the canvas still previews them.
//! Unknown types never have their name interpolated into markup.

use crate::model::{Component, ComponentType};
use crate::record::Record;
use crate::table::MeasurementTable;

/// Text shown for a component type this build does not know.
pub const UNKNOWN_PLACEHOLDER: &str = "Unsupported component";
/// Value shown when a record is active but the bound field is missing.
pub const MISSING_VALUE: &str = "N/A";

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// What a component shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Free or static text.
    Text(String),
    /// A record field with its caption, e.g. `Date: 2024-03-01`.
    Field { label: &'static str, value: String },
    /// Overall record status, coloured by OK/NOK.
    Status { value: String, ok: bool },
    /// Boxed placeholder for media and chart types.
    Placeholder(&'static str),
    Line,
    Rectangle,
    Table(MeasurementTable),
    Unknown,
}

impl Rendered {
    /// The plain-text form drawn by exporters.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Field { label, value } => format!("{label}: {value}"),
            Self::Status { value, .. } => format!("Status: {value}"),
            Self::Placeholder(text) => format!("[{text}]"),
            Self::Line | Self::Rectangle => String::new(),
            Self::Table(table) => table.message().unwrap_or_default().to_string(),
            Self::Unknown => UNKNOWN_PLACEHOLDER.to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Field { label, value } => format!(
                "<span class=\"rd-field-label\">{label}:</span> {}",
                escape_html(value)
            ),
            Self::Status { value, ok } => {
                let class = if *ok { "rd-status-ok" } else { "rd-status-nok" };
                format!(
                    "<span class=\"rd-field-label\">Status:</span> <span class=\"{class}\">{}</span>",
                    escape_html(value)
                )
            }
            Self::Placeholder(text) => format!("<div class=\"rd-placeholder\">{text}</div>"),
            Self::Line => "<hr class=\"rd-line\">".to_string(),
            Self::Rectangle => "<div class=\"rd-rectangle\"></div>".to_string(),
            Self::Table(table) => table.to_html(),
            Self::Unknown => format!("<div class=\"rd-placeholder\">{UNKNOWN_PLACEHOLDER}</div>"),
        }
    }
}

fn field(
    label: &'static str,
    record: Option<&Record>,
    get: impl Fn(&Record) -> Option<&String>,
    sample: &str,
) -> Rendered {
    let value = match record {
        Some(r) => get(r).map_or(MISSING_VALUE, String::as_str),
        None => sample,
    };
    Rendered::Field {
        label,
        value: value.to_string(),
    }
}

/// Render a component type against the active record.
pub fn render(kind: &ComponentType, record: Option<&Record>) -> Rendered {
    match kind {
        ComponentType::Text => Rendered::Text("Text".into()),
        ComponentType::Title => Rendered::Text("Title".into()),
        ComponentType::Image => Rendered::Placeholder("Image"),
        ComponentType::Line => Rendered::Line,
        ComponentType::Rectangle => Rendered::Rectangle,
        ComponentType::Date => field(
            "Date",
            record,
            |r| r.measurement_date.as_ref(),
            "YYYY-MM-DD",
        ),
        ComponentType::Time => field(
            "Time",
            record,
            |r| r.measurement_time.as_ref(),
            "HH:MM:SS",
        ),
        ComponentType::User => field("Inspector", record, |r| r.inspector.as_ref(), "Inspector"),
        ComponentType::SchemaName => field(
            "Schema",
            record,
            |r| r.schema_name.as_ref(),
            "Schema Name",
        ),
        ComponentType::SchemaVersion => field(
            "Version",
            record,
            |r| r.schema_version.as_ref(),
            "1.0",
        ),
        ComponentType::QrCode => field("QR Code", record, |r| r.qr_code.as_ref(), "QR-000000"),
        ComponentType::Status => match record {
            Some(r) => {
                let value = r.overall_status.as_deref().unwrap_or(MISSING_VALUE);
                Rendered::Status {
                    ok: value == "OK",
                    value: value.to_string(),
                }
            }
            None => Rendered::Status {
                value: "PENDING".into(),
                ok: false,
            },
        },
        ComponentType::Table => {
            let rows = record.map(|r| r.measurements.as_slice()).unwrap_or(&[]);
            Rendered::Table(MeasurementTable::build(rows))
        }
        ComponentType::Chart => Rendered::Placeholder("Chart"),
        ComponentType::Field => Rendered::Placeholder("Custom Field"),
        ComponentType::PageNumber => Rendered::Text("Page #".into()),
        ComponentType::BarChart => Rendered::Placeholder("Bar Chart"),
        ComponentType::PieChart => Rendered::Placeholder("Pie Chart"),
        ComponentType::Gauge => Rendered::Placeholder("Gauge"),
        ComponentType::Unknown(_) => Rendered::Unknown,
    }
}

/// Render a component, using stored content for free-text types.
pub fn render_component(component: &Component, record: Option<&Record>) -> Rendered {
    match (&component.kind, &component.content) {
        (kind, Some(content)) if kind.is_free_text() => Rendered::Text(content.clone()),
        (kind, _) => render(kind, record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ComponentId;

    fn record() -> Record {
        Record {
            qr_code: Some("QR-7".into()),
            measurement_date: Some("2024-03-01".into()),
            inspector: Some("<script>alert(1)</script>".into()),
            overall_status: Some("OK".into()),
            ..Default::default()
        }
    }

    #[test]
    fn record_fields_use_active_record() {
        let r = record();
        assert_eq!(
            render(&ComponentType::Date, Some(&r)).plain_text(),
            "Date: 2024-03-01"
        );
        assert_eq!(
            render(&ComponentType::QrCode, Some(&r)).plain_text(),
            "QR Code: QR-7"
        );
    }

    #[test]
    fn fields_fall_back_without_record() {
        assert_eq!(
            render(&ComponentType::Date, None).plain_text(),
            "Date: YYYY-MM-DD"
        );
        assert_eq!(
            render(&ComponentType::Status, None).plain_text(),
            "Status: PENDING"
        );
    }

    #[test]
    fn missing_field_on_active_record() {
        let r = record();
        assert_eq!(
            render(&ComponentType::Time, Some(&r)).plain_text(),
            "Time: N/A"
        );
    }

    #[test]
    fn record_text_is_escaped() {
        let r = record();
        let html = render(&ComponentType::User, Some(&r)).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_type_name_is_not_interpolated() {
        let kind = ComponentType::Unknown("<img src=x onerror=alert(1)>".into());
        let html = render(&kind, None).to_html();
        assert!(!html.contains("onerror"));
        assert!(html.contains(UNKNOWN_PLACEHOLDER));
    }

    #[test]
    fn status_ok_flag() {
        let r = record();
        assert_eq!(
            render(&ComponentType::Status, Some(&r)),
            Rendered::Status {
                value: "OK".into(),
                ok: true
            }
        );
    }

    #[test]
    fn table_without_record_is_no_data() {
        assert_eq!(
            render(&ComponentType::Table, None),
            Rendered::Table(MeasurementTable::NoData)
        );
    }

    #[test]
    fn free_text_uses_stored_content() {
        let mut c = Component::new(ComponentId::intern("rt1"), ComponentType::Title, 0.0, 0.0);
        c.content = Some("Inspection <Report>".into());
        let rendered = render_component(&c, None);
        assert_eq!(rendered.plain_text(), "Inspection <Report>");
        assert_eq!(rendered.to_html(), "Inspection &lt;Report&gt;");
    }

    #[test]
    fn every_known_type_renders() {
        for kind in ComponentType::ALL {
            assert_ne!(render(&kind, None), Rendered::Unknown, "{kind:?}");
        }
    }
}
