use serde_json::{Map, Value};

#[derive(Debug)]
pub enum TableParseError {
    InvalidCsv(String),
    InvalidJson(String),
}

impl std::fmt::Display for TableParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableParseError::InvalidCsv(msg) => write!(f, "{}", msg),
            TableParseError::InvalidJson(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TableParseError {}

#[derive(Debug, PartialEq)]
pub enum DatasetError {
    Empty,
    TooFewColumns,
    DuplicateColumns,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Empty => write!(f, "Dataset is empty."),
            DatasetError::TooFewColumns => write!(f, "Dataset must have at least 2 columns."),
            DatasetError::DuplicateColumns => write!(f, "Column names must be unique."),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Normalizes a column name so the language model and the renderer always
/// see the same identifier: trimmed, spaces replaced with underscores,
/// lowercased. Total and idempotent.
pub fn sanitize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// An in-memory tabular dataset: ordered column names plus row-major cells.
/// Built fresh from uploaded bytes for every request and discarded when the
/// request completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Parses CSV bytes into a table, inferring integer/float/string cell
    /// types from the text. Empty cells become null.
    pub fn from_csv(content: &[u8]) -> Result<Self, TableParseError> {
        let mut reader = csv::ReaderBuilder::new().from_reader(content);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| TableParseError::InvalidCsv(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| TableParseError::InvalidCsv(e.to_string()))?;
            rows.push(record.iter().map(infer_scalar).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Parses JSON bytes as an array of objects. Column order follows first
    /// appearance across the objects; missing keys become null cells.
    pub fn from_json(content: &[u8]) -> Result<Self, TableParseError> {
        let value: Value = serde_json::from_slice(content)
            .map_err(|e| TableParseError::InvalidJson(e.to_string()))?;

        let records = value.as_array().ok_or_else(|| {
            TableParseError::InvalidJson("expected a JSON array of objects".to_string())
        })?;

        let mut columns: Vec<String> = Vec::new();
        let mut objects: Vec<&Map<String, Value>> = Vec::new();

        for record in records {
            let object = record.as_object().ok_or_else(|| {
                TableParseError::InvalidJson("expected a JSON array of objects".to_string())
            })?;

            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }

            objects.push(object);
        }

        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|column| object.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Checks minimum shape requirements. Must run after parsing and before
    /// any column-name mutation.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        if self.columns.len() < 2 {
            return Err(DatasetError::TooFewColumns);
        }

        for (i, name) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(name) {
                return Err(DatasetError::DuplicateColumns);
            }
        }

        Ok(())
    }

    /// Applies [`sanitize_column_name`] to every column, so downstream
    /// components only ever see canonical names.
    pub fn sanitize_columns(&mut self) {
        for column in &mut self.columns {
            *column = sanitize_column_name(column);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_values(&self, name: &str) -> Option<Vec<Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// A single row as a column-name to value map.
    pub fn row_object(&self, index: usize) -> Map<String, Value> {
        let mut object = Map::new();
        if let Some(row) = self.rows.get(index) {
            for (column, value) in self.columns.iter().zip(row.iter()) {
                object.insert(column.clone(), value.clone());
            }
        }
        object
    }

    /// Flat text dump of the whole table, used when composing the embedding
    /// description for a request.
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.columns.join(", ")];
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            lines.push(cells.join(", "));
        }
        lines.join("\n")
    }
}

fn infer_scalar(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }

    if let Ok(int) = cell.parse::<i64>() {
        return Value::from(int);
    }

    if let Ok(float) = cell.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    Value::from(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_csv_infers_cell_types() {
        let table = Table::from_csv(b"name,score,ratio\nalpha,3,0.5\nbeta,,1.25\n").unwrap();

        assert_eq!(table.columns(), &["name", "score", "ratio"]);
        assert_eq!(
            table.column_values("score").unwrap(),
            vec![json!(3), Value::Null]
        );
        assert_eq!(
            table.column_values("ratio").unwrap(),
            vec![json!(0.5), json!(1.25)]
        );
        assert_eq!(
            table.column_values("name").unwrap(),
            vec![json!("alpha"), json!("beta")]
        );
    }

    #[test]
    fn test_from_csv_rejects_ragged_rows() {
        let result = Table::from_csv(b"a,b\n1,2,3\n");
        assert!(matches!(result, Err(TableParseError::InvalidCsv(_))));
    }

    #[test]
    fn test_from_json_array_of_objects() {
        let table =
            Table::from_json(br#"[{"a": 1, "b": "x"}, {"b": "y", "c": true}]"#).unwrap();

        assert_eq!(table.columns(), &["a", "b", "c"]);
        assert_eq!(
            table.column_values("a").unwrap(),
            vec![json!(1), Value::Null]
        );
        assert_eq!(
            table.column_values("c").unwrap(),
            vec![Value::Null, json!(true)]
        );
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Table::from_json(br#"{"a": 1}"#).is_err());
        assert!(Table::from_json(b"[1, 2]").is_err());
        assert!(Table::from_json(b"not json").is_err());
    }

    #[test]
    fn test_validate_accepts_minimal_table() {
        let table = Table::from_csv(b"a,b\n1,2\n").unwrap();
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let table = Table::from_csv(b"a,b\n").unwrap();
        assert_eq!(table.validate(), Err(DatasetError::Empty));
    }

    #[test]
    fn test_validate_rejects_single_column() {
        let table = Table::from_csv(b"a\n1\n").unwrap();
        assert_eq!(table.validate(), Err(DatasetError::TooFewColumns));
    }

    #[test]
    fn test_validate_rejects_duplicate_columns() {
        let table = Table::from_csv(b"a,a\n1,2\n").unwrap();
        assert_eq!(table.validate(), Err(DatasetError::DuplicateColumns));
    }

    #[test]
    fn test_sanitize_column_name() {
        assert_eq!(sanitize_column_name(" Revenue Growth "), "revenue_growth");
        assert_eq!(sanitize_column_name(""), "");
        assert_eq!(sanitize_column_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [" Revenue Growth ", "A B C", "", "x", "  spaced  out  "] {
            let once = sanitize_column_name(input);
            assert_eq!(sanitize_column_name(&once), once);
        }
    }

    #[test]
    fn test_sanitize_columns_applies_to_all() {
        let mut table = Table::from_csv(b" First Name ,Last Name\na,b\n").unwrap();
        table.sanitize_columns();
        assert_eq!(table.columns(), &["first_name", "last_name"]);
    }

    #[test]
    fn test_row_object_maps_every_column() {
        let table = Table::from_csv(b"a,b\n1,2\n").unwrap();
        let row = table.row_object(0);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some(&json!(1)));
        assert_eq!(row.get("b"), Some(&json!(2)));
    }
}
