//! In-memory table of sensor records and the JSON loader

use std::{fmt, fs, path::Path};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::PreprocessError;

/// Ordered rows of JSON cells sharing one column list.
///
/// The column list is the union of record keys in first-seen order. A record
/// without a key gets a `Null` cell, so absent and `null` are both missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Batch {
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = vec![];
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Parse a JSON array of objects.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }
}

/// Read the whole input file and build a batch from it.
pub fn load_batch(path: impl AsRef<Path>) -> Result<Batch, PreprocessError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| PreprocessError::data_source(path, e))?;
    let batch = Batch::from_json_str(&json).map_err(|e| PreprocessError::data_source(path, e))?;

    info!(
        "Loaded {} samples with {} columns from {}",
        batch.len(),
        batch.columns().len(),
        path.display()
    );
    debug!("Columns: {:?}", batch.columns());
    Ok(batch)
}

/// Text of a cell as it appears in output: strings unquoted, `null` empty,
/// everything else as JSON.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Right-aligned text table with a leading row index.
pub(crate) fn render_table(
    f: &mut fmt::Formatter<'_>,
    header: &[String],
    rows: &[Vec<String>],
) -> fmt::Result {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:>w$}", "", w = index_width)?;
    for (h, w) in header.iter().zip(&widths) {
        write!(f, "  {:>w$}", h, w = *w)?;
    }
    for (i, row) in rows.iter().enumerate() {
        write!(f, "\n{:>w$}", i, w = index_width)?;
        for (cell, w) in row.iter().zip(&widths) {
            write!(f, "  {:>w$}", cell, w = *w)?;
        }
    }
    Ok(())
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| match v {
                        Value::Null => "NaN".to_string(),
                        other => cell_text(other),
                    })
                    .collect()
            })
            .collect();
        render_table(f, &self.columns, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_union_of_columns_in_first_seen_order() {
        let batch = Batch::from_json_str(
            r#"[{"timestamp": 1, "acc_x": 0.5}, {"acc_y": 2, "timestamp": 2}]"#,
        )
        .unwrap();

        assert_eq!(batch.columns(), ["timestamp", "acc_x", "acc_y"]);
        assert_eq!(batch.len(), 2);

        let acc_y: Vec<&Value> = batch.column("acc_y").unwrap().collect();
        assert_eq!(acc_y, vec![&Value::Null, &json!(2)]);
    }

    #[test]
    fn test_row_order_preserved() {
        let batch = Batch::from_json_str(
            r#"[{"timestamp": "c"}, {"timestamp": "a"}, {"timestamp": "b"}]"#,
        )
        .unwrap();
        let ts: Vec<String> = batch.column("timestamp").unwrap().map(cell_text).collect();
        assert_eq!(ts, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_array() {
        let batch = Batch::from_json_str("[]").unwrap();
        assert!(batch.is_empty());
        assert!(batch.columns().is_empty());
    }

    #[test]
    fn test_rejects_non_array_input() {
        assert!(Batch::from_json_str(r#"{"timestamp": 1}"#).is_err());
        assert!(Batch::from_json_str("[1, 2, 3]").is_err());
        assert!(Batch::from_json_str("[{\"timestamp\": 1}").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_batch(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PreprocessError::DataSource { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"not json at all").unwrap();

        let err = load_batch(&path).unwrap_err();
        assert!(matches!(err, PreprocessError::DataSource { .. }));
    }

    #[test]
    fn test_display_marks_missing_cells() {
        let batch = Batch::from_json_str(r#"[{"timestamp": 1, "acc_x": null}]"#).unwrap();
        let table = batch.to_string();
        assert!(table.contains("timestamp"));
        assert!(table.contains("NaN"));
    }
}
