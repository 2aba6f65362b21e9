use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl From<&str> for TableId {
    fn from(value: &str) -> Self {
        TableId(value.to_string())
    }
}

impl From<String> for TableId {
    fn from(value: String) -> Self {
        TableId(value)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [
        ColumnType::String,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::Boolean,
    ];

    /// Wire name, also used as the `<option>` value in forms.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Number => "Number",
            ColumnType::Date => "Date",
            ColumnType::Boolean => "Boolean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub id: TableId,
    pub name: String,
    pub columns: Vec<TableColumn>,
}

impl TableSchema {
    pub fn column(&self, column_id: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|column| column.id == column_id)
    }
}

/// A column as entered in the creation form, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDraft {
    pub label: String,
    pub kind: ColumnType,
}

/// Column ids are the 1-based positions of the columns in the form.
pub fn columns_from_drafts(drafts: &[ColumnDraft]) -> Vec<TableColumn> {
    drafts
        .iter()
        .enumerate()
        .map(|(idx, draft)| TableColumn {
            id: (idx + 1).to_string(),
            label: draft.label.trim().to_string(),
            kind: draft.kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_uses_lowercase_wire_names() {
        let column = TableColumn {
            id: "1".to_string(),
            label: "Age".to_string(),
            kind: ColumnType::Number,
        };

        let json = serde_json::to_value(&column).expect("column should serialize");

        assert_eq!(json["type"], "number");
        assert_eq!(ColumnType::parse("date"), Some(ColumnType::Date));
        assert_eq!(ColumnType::parse("Date"), None);
    }

    #[test]
    fn drafts_get_positional_ids() {
        let drafts = vec![
            ColumnDraft {
                label: " name ".to_string(),
                kind: ColumnType::String,
            },
            ColumnDraft {
                label: "born".to_string(),
                kind: ColumnType::Date,
            },
        ];

        let columns = columns_from_drafts(&drafts);

        assert_eq!(columns[0].id, "1");
        assert_eq!(columns[0].label, "name");
        assert_eq!(columns[1].id, "2");
        assert_eq!(columns[1].kind, ColumnType::Date);
    }
}
