use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::entities::row::CellValue;
use crate::domain::entities::table::{ColumnType, TableColumn, TableSchema};

pub const MIN_COLUMNS: usize = 5;
pub const MAX_COLUMNS: usize = 15;
pub const MIN_RECORD_FIELDS: usize = 5;
pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Table name is required")]
    EmptyName,
    #[error("A table needs between 5 and 15 columns, got {0}")]
    ColumnCount(usize),
    #[error("Column {0} needs a label")]
    EmptyLabel(usize),
    #[error("Duplicate column id '{0}'")]
    DuplicateColumnId(String),
}

pub fn validate_new_table(name: &str, columns: &[TableColumn]) -> Result<(), SchemaError> {
    if name.trim().is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns.len()) {
        return Err(SchemaError::ColumnCount(columns.len()));
    }

    let mut seen = HashSet::new();
    for (idx, column) in columns.iter().enumerate() {
        if column.label.trim().is_empty() {
            return Err(SchemaError::EmptyLabel(idx + 1));
        }
        if !seen.insert(column.id.as_str()) {
            return Err(SchemaError::DuplicateColumnId(column.id.clone()));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field")]
    UnknownField,
    #[error("Field is required")]
    Required,
    #[error("Must be a number")]
    NotANumber,
    #[error("Date format: YYYY-MM-DD")]
    BadDate,
    #[error("Must be true or false")]
    NotABoolean,
    #[error("Max length 255 characters")]
    TooLong,
}

pub fn validate_field(schema: &TableSchema, column_id: &str, value: &str) -> Result<(), FieldError> {
    let column = schema.column(column_id).ok_or(FieldError::UnknownField)?;
    check_value(column.kind, value)
}

pub fn check_value(kind: ColumnType, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }

    match kind {
        ColumnType::Number => parse_number(value).map(|_| ()).ok_or(FieldError::NotANumber),
        ColumnType::Date => parse_date(value).map(|_| ()).ok_or(FieldError::BadDate),
        ColumnType::Boolean => parse_bool(value).map(|_| ()).ok_or(FieldError::NotABoolean),
        ColumnType::String if value.chars().count() > MAX_TEXT_LEN => Err(FieldError::TooLong),
        ColumnType::String => Ok(()),
    }
}

/// Converts an already validated form value into the scalar sent to the backend.
pub fn to_cell_value(kind: ColumnType, value: &str) -> CellValue {
    match kind {
        ColumnType::Number => parse_number(value)
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(value.to_string())),
        ColumnType::Boolean => parse_bool(value)
            .map(CellValue::Bool)
            .unwrap_or_else(|| CellValue::Text(value.to_string())),
        ColumnType::Date => CellValue::Text(value.trim().to_string()),
        ColumnType::String => CellValue::Text(value.to_string()),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

// Shape is checked by hand since chrono accepts unpadded fields.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::TableId;

    fn column(id: &str, label: &str, kind: ColumnType) -> TableColumn {
        TableColumn {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    fn sample_schema() -> TableSchema {
        TableSchema {
            id: TableId::from("t1"),
            name: "Sample".to_string(),
            columns: vec![
                column("1", "Name", ColumnType::String),
                column("2", "Age", ColumnType::Number),
                column("3", "Born", ColumnType::Date),
                column("4", "Active", ColumnType::Boolean),
            ],
        }
    }

    #[test]
    fn field_errors_use_form_messages() {
        let schema = sample_schema();

        let number = validate_field(&schema, "2", "abc").unwrap_err();
        let date = validate_field(&schema, "3", "2024-13-40").unwrap_err();
        let empty = validate_field(&schema, "1", "   ").unwrap_err();

        assert_eq!(number.to_string(), "Must be a number");
        assert_eq!(date.to_string(), "Date format: YYYY-MM-DD");
        assert_eq!(empty.to_string(), "Field is required");
        assert_eq!(
            validate_field(&schema, "9", "x").unwrap_err().to_string(),
            "Unknown field"
        );
    }

    #[test]
    fn required_check_runs_before_type_checks() {
        for kind in ColumnType::ALL {
            assert_eq!(check_value(kind, ""), Err(FieldError::Required));
        }
    }

    #[test]
    fn dates_need_padded_calendar_values() {
        assert!(check_value(ColumnType::Date, "2024-02-29").is_ok());
        assert_eq!(check_value(ColumnType::Date, "2023-02-29"), Err(FieldError::BadDate));
        assert_eq!(check_value(ColumnType::Date, "2024-2-09"), Err(FieldError::BadDate));
        assert_eq!(check_value(ColumnType::Date, "24-02-09"), Err(FieldError::BadDate));
    }

    #[test]
    fn numbers_and_text_limits() {
        assert!(check_value(ColumnType::Number, " 12.5 ").is_ok());
        assert!(check_value(ColumnType::Number, "-3e2").is_ok());
        assert_eq!(check_value(ColumnType::Number, "NaN"), Err(FieldError::NotANumber));
        assert_eq!(check_value(ColumnType::Number, "inf"), Err(FieldError::NotANumber));
        assert_eq!(check_value(ColumnType::Number, "-Infinity"), Err(FieldError::NotANumber));
        assert_eq!(check_value(ColumnType::Number, "1e400"), Err(FieldError::NotANumber));
        assert!(check_value(ColumnType::String, &"x".repeat(255)).is_ok());
        assert_eq!(
            check_value(ColumnType::String, &"x".repeat(256)).unwrap_err().to_string(),
            "Max length 255 characters"
        );
        assert_eq!(check_value(ColumnType::Boolean, "yes"), Err(FieldError::NotABoolean));
    }

    #[test]
    fn cell_values_follow_column_type() {
        assert_eq!(to_cell_value(ColumnType::Number, " 40 "), CellValue::Number(40.0));
        assert_eq!(to_cell_value(ColumnType::Boolean, "TRUE"), CellValue::Bool(true));
        assert_eq!(
            to_cell_value(ColumnType::Date, "2024-01-31"),
            CellValue::Text("2024-01-31".to_string())
        );
    }

    #[test]
    fn schema_column_count_is_bounded() {
        let four: Vec<_> = (1..=4)
            .map(|i| column(&i.to_string(), "c", ColumnType::String))
            .collect();
        let sixteen: Vec<_> = (1..=16)
            .map(|i| column(&i.to_string(), "c", ColumnType::String))
            .collect();
        let five: Vec<_> = (1..=5)
            .map(|i| column(&i.to_string(), "c", ColumnType::String))
            .collect();

        assert_eq!(validate_new_table("t", &four), Err(SchemaError::ColumnCount(4)));
        assert_eq!(validate_new_table("t", &sixteen), Err(SchemaError::ColumnCount(16)));
        assert_eq!(validate_new_table(" ", &five), Err(SchemaError::EmptyName));
        assert!(validate_new_table("t", &five).is_ok());
    }

    #[test]
    fn schema_rejects_blank_labels_and_duplicate_ids() {
        let mut columns: Vec<_> = (1..=5)
            .map(|i| column(&i.to_string(), "c", ColumnType::String))
            .collect();
        columns[2].label = String::new();
        assert_eq!(validate_new_table("t", &columns), Err(SchemaError::EmptyLabel(3)));

        columns[2].label = "c".to_string();
        columns[4].id = "1".to_string();
        assert_eq!(
            validate_new_table("t", &columns),
            Err(SchemaError::DuplicateColumnId("1".to_string()))
        );
    }
}
