//! Measurement table: filtering, OK/NOK summary and HTML rendering.
//!
//! The same filtered view feeds the canvas preview and the PDF export, so
//! both always agree on which rows exist.

use crate::record::{Measurement, display_value};
use crate::render::escape_html;

pub const NO_DATA_MESSAGE: &str = "No measurement data available";
pub const NO_VALUES_MESSAGE: &str = "No measurements with values";

pub const HEADERS: [&str; 8] = [
    "MP_ID", "Name", "Value", "Unit", "Nominal", "Min", "Max", "Status",
];

const ROW_EVEN_BG: &str = "#ffffff";
const ROW_ODD_BG: &str = "#f5f5f5";
const OK_COLOR: &str = "#28a745";
const NOK_COLOR: &str = "#dc3545";

/// One surviving row, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub mp_id: String,
    pub name: String,
    pub value: String,
    pub unit: String,
    pub nominal: String,
    pub min: String,
    pub max: String,
    pub status: String,
    pub ok: bool,
}

impl TableRow {
    fn from_measurement(m: &Measurement) -> Self {
        Self {
            mp_id: display_value(&m.mp_id),
            name: display_value(&m.name),
            value: display_value(&m.value),
            unit: display_value(&m.unit),
            nominal: display_value(&m.nominal),
            min: display_value(&m.min),
            max: display_value(&m.max),
            status: display_value(&m.status),
            ok: m.is_ok(),
        }
    }

    /// ✓ for OK, ✗ for everything else.
    pub fn glyph(&self) -> char {
        if self.ok { '✓' } else { '✗' }
    }

    fn cells(&self) -> [&str; 7] {
        [
            &self.mp_id,
            &self.name,
            &self.value,
            &self.unit,
            &self.nominal,
            &self.min,
            &self.max,
        ]
    }
}

/// Result of filtering a record's measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementTable {
    /// The record carries no measurements at all.
    NoData,
    /// Measurements exist but none has a value.
    NoValues,
    Rows(Vec<TableRow>),
}

impl MeasurementTable {
    /// Drop rows whose `Value` is null, absent or `""`, keeping order.
    pub fn build(measurements: &[Measurement]) -> Self {
        if measurements.is_empty() {
            return Self::NoData;
        }
        let rows: Vec<TableRow> = measurements
            .iter()
            .filter(|m| m.has_value())
            .map(TableRow::from_measurement)
            .collect();
        if rows.is_empty() {
            Self::NoValues
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// `(total, ok, nok)` over the filtered rows.
    pub fn counts(&self) -> (usize, usize, usize) {
        let rows = self.rows();
        let ok = rows.iter().filter(|r| r.ok).count();
        (rows.len(), ok, rows.len() - ok)
    }

    /// Placeholder text for the empty states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_DATA_MESSAGE),
            Self::NoValues => Some(NO_VALUES_MESSAGE),
            Self::Rows(_) => None,
        }
    }

    pub fn footer(&self) -> String {
        let (total, ok, nok) = self.counts();
        format!("Total: {total} MPs | OK: {ok} | NOK: {nok}")
    }

    pub fn to_html(&self) -> String {
        if let Some(message) = self.message() {
            return format!("<div class=\"rd-table-empty\">{message}</div>");
        }

        let mut out = String::from("<table class=\"rd-table\"><thead><tr>");
        for header in HEADERS {
            out.push_str(&format!("<th>{header}</th>"));
        }
        out.push_str("</tr></thead><tbody>");

        for (i, row) in self.rows().iter().enumerate() {
            // Parity follows the filtered sequence.
            let bg = if i % 2 == 0 { ROW_EVEN_BG } else { ROW_ODD_BG };
            out.push_str(&format!("<tr style=\"background: {bg}\">"));
            for cell in row.cells() {
                out.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            let color = if row.ok { OK_COLOR } else { NOK_COLOR };
            out.push_str(&format!(
                "<td style=\"color: {color}\">{} {}</td></tr>",
                row.glyph(),
                escape_html(&row.status)
            ));
        }

        out.push_str(&format!(
            "</tbody><tfoot><tr><td colspan=\"{}\">{}</td></tr></tfoot></table>",
            HEADERS.len(),
            self.footer()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, value: serde_json::Value, status: &str) -> Measurement {
        Measurement {
            mp_id: json!(id),
            value,
            status: json!(status),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_is_no_data() {
        let table = MeasurementTable::build(&[]);
        assert_eq!(table, MeasurementTable::NoData);
        assert!(table.to_html().contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn all_filtered_is_no_values() {
        let table = MeasurementTable::build(&[
            row("MP1", json!(""), "OK"),
            row("MP2", serde_json::Value::Null, "OK"),
        ]);
        assert_eq!(table, MeasurementTable::NoValues);
        assert!(table.to_html().contains(NO_VALUES_MESSAGE));
    }

    #[test]
    fn empty_value_row_is_dropped() {
        let table = MeasurementTable::build(&[
            row("MP1", json!(1.5), "OK"),
            row("MP2", json!(""), "OK"),
            row("MP3", json!("2.0"), "NOK"),
        ]);
        let ids: Vec<&str> = table.rows().iter().map(|r| r.mp_id.as_str()).collect();
        assert_eq!(ids, vec!["MP1", "MP3"]);
        assert_eq!(table.counts(), (2, 1, 1));
        assert_eq!(table.footer(), "Total: 2 MPs | OK: 1 | NOK: 1");
    }

    #[test]
    fn zebra_follows_filtered_parity() {
        let table = MeasurementTable::build(&[
            row("MP1", json!(1), "OK"),
            row("MP2", json!(""), "OK"),
            row("MP3", json!(2), "OK"),
        ]);
        let html = table.to_html();
        assert_eq!(html.matches(ROW_EVEN_BG).count(), 1);
        assert_eq!(html.matches(ROW_ODD_BG).count(), 1);
    }

    #[test]
    fn lowercase_ok_counts_as_nok() {
        let table = MeasurementTable::build(&[row("MP1", json!(3), "ok")]);
        assert_eq!(table.counts(), (1, 0, 1));
        assert_eq!(table.rows()[0].glyph(), '✗');
    }

    #[test]
    fn cells_are_escaped() {
        let table = MeasurementTable::build(&[row("<b>MP</b>", json!(1), "OK")]);
        let html = table.to_html();
        assert!(html.contains("&lt;b&gt;MP&lt;/b&gt;"));
        assert!(!html.contains("<b>MP"));
    }
}
