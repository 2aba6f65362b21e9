use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::table::TableId;

/// Backend-assigned row identity. Mock REST servers hand out either strings or
/// integers, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowId(pub String);

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => RowId(text),
            RawId::Integer(value) => RowId(value.to_string()),
            RawId::Float(value) => RowId(value.to_string()),
        })
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId(value.to_string())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Cell text for the data table; missing and null cells render as `-`.
    pub fn display(value: Option<&CellValue>) -> String {
        match value {
            None | Some(CellValue::Null) => "-".to_string(),
            Some(CellValue::Bool(flag)) => flag.to_string(),
            Some(CellValue::Number(number)) => format_number(*number),
            Some(CellValue::Text(text)) => text.clone(),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub type RowValues = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(rename = "tableId", default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    #[serde(flatten)]
    pub values: RowValues,
}

impl Row {
    pub fn cell(&self, column_id: &str) -> String {
        CellValue::display(self.values.get(column_id))
    }
}
