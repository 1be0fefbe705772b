//! Measurement records and the record cursor.
//!
//! Records come from an external project file and are read-only here. The
//! editor only needs the ordered `records` list and a current index.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One measured point of a record. Keys keep the upstream spelling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "MP_ID", default)]
    pub mp_id: Value,
    #[serde(rename = "Name", default)]
    pub name: Value,
    #[serde(rename = "Value", default)]
    pub value: Value,
    #[serde(rename = "Unit", default)]
    pub unit: Value,
    #[serde(rename = "Nominal", default)]
    pub nominal: Value,
    #[serde(rename = "Min", default)]
    pub min: Value,
    #[serde(rename = "Max", default)]
    pub max: Value,
    #[serde(rename = "Status", default)]
    pub status: Value,
}

impl Measurement {
    /// A row counts only when `Value` is present and not an empty string.
    pub fn has_value(&self) -> bool {
        match &self.value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// `Status == "OK"`, exactly. Everything else is NOK.
    pub fn is_ok(&self) -> bool {
        matches!(&self.status, Value::String(s) if s == "OK")
    }
}

/// Display a loosely typed JSON cell the way a table shows it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// One measurement session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub measurement_date: Option<String>,
    #[serde(default)]
    pub measurement_time: Option<String>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub overall_status: Option<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// The record source as persisted under `currentProject`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub maps: Value,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Ordered records plus a current-index pointer kept inside `[0, len)`.
#[derive(Debug, Clone, Default)]
pub struct RecordCursor {
    records: Vec<Record>,
    current: usize,
}

impl RecordCursor {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            current: 0,
        }
    }

    /// Replace the records and reset the cursor to the first one.
    pub fn load(&mut self, records: Vec<Record>) {
        self.records = records;
        self.current = 0;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active record, or `None` before any project is loaded.
    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.current)
    }

    /// Move to `index`. Out-of-range indices are ignored with a warning.
    /// Returns whether the cursor moved.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            log::warn!(
                "record index {index} out of range (0..{}); keeping {}",
                self.records.len(),
                self.current
            );
            return false;
        }
        let moved = index != self.current;
        self.current = index;
        moved
    }

    pub fn next(&mut self) -> bool {
        self.set_current(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.set_current(index),
            None => false,
        }
    }

    /// Labels for the record dropdown: `"1: <qrCode>"`.
    pub fn labels(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let code = r.qr_code.as_deref().unwrap_or("—");
                format!("{}: {code}", i + 1)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                qr_code: Some(format!("QR-{i}")),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn set_current_out_of_range_is_ignored() {
        let mut cursor = RecordCursor::new(records(3));
        assert!(cursor.set_current(2));
        assert!(!cursor.set_current(3));
        assert!(!cursor.set_current(usize::MAX));
        assert_eq!(cursor.current_index(), 2);
    }

    #[test]
    fn prev_and_next_stop_at_bounds() {
        let mut cursor = RecordCursor::new(records(2));
        assert!(!cursor.prev());
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.current_index(), 1);
    }

    #[test]
    fn empty_cursor_has_no_current() {
        let mut cursor = RecordCursor::default();
        assert!(cursor.current().is_none());
        assert!(!cursor.set_current(0));
        assert_eq!(cursor.current_index(), 0);
    }

    #[test]
    fn labels_use_qr_code() {
        let cursor = RecordCursor::new(records(2));
        assert_eq!(cursor.labels(), vec!["1: QR-0", "2: QR-1"]);
    }

    #[test]
    fn measurement_value_presence() {
        let row = |v: Value| Measurement {
            value: v,
            ..Default::default()
        };
        assert!(!row(Value::Null).has_value());
        assert!(!row(json!("")).has_value());
        assert!(row(json!("0")).has_value());
        assert!(row(json!(0)).has_value());
    }

    #[test]
    fn status_ok_is_exact() {
        let row = |s: &str| Measurement {
            status: json!(s),
            ..Default::default()
        };
        assert!(row("OK").is_ok());
        assert!(!row("ok").is_ok());
        assert!(!row("NOK").is_ok());
        assert!(!Measurement::default().is_ok());
    }

    #[test]
    fn record_parses_upstream_keys() {
        let raw = json!({
            "qrCode": "A-17",
            "measurementDate": "2024-03-01",
            "inspector": "J. Doe",
            "measurements": [
                { "MP_ID": "MP1", "Name": "Bore", "Value": 12.02, "Unit": "mm", "Status": "OK" }
            ]
        });
        let record: Record = serde_json::from_value(raw).unwrap();
        assert_eq!(record.qr_code.as_deref(), Some("A-17"));
        assert_eq!(record.measurements.len(), 1);
        assert_eq!(display_value(&record.measurements[0].value), "12.02");
        assert!(record.measurement_time.is_none());
    }
}
