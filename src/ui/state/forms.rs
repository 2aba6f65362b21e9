use crate::domain::entities::row::RowValues;
use crate::domain::entities::table::{
    columns_from_drafts, ColumnDraft, ColumnType, TableColumn, TableSchema,
};
use crate::domain::validation::{
    to_cell_value, validate_field, FieldError, MAX_COLUMNS, MIN_COLUMNS, MIN_RECORD_FIELDS,
};

/// Table creation form. Holds between 1 and 15 column rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDraft {
    pub name: String,
    pub columns: Vec<ColumnDraft>,
}

impl Default for TableDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            columns: vec![ColumnDraft::default()],
        }
    }
}

impl TableDraft {
    pub fn add_column(&mut self) {
        if self.columns.len() < MAX_COLUMNS {
            self.columns.push(ColumnDraft::default());
        }
    }

    pub fn remove_column(&mut self, idx: usize) {
        if self.columns.len() > 1 && idx < self.columns.len() {
            self.columns.remove(idx);
        }
    }

    pub fn set_label(&mut self, idx: usize, label: String) {
        if let Some(column) = self.columns.get_mut(idx) {
            column.label = label;
        }
    }

    pub fn set_kind(&mut self, idx: usize, kind: ColumnType) {
        if let Some(column) = self.columns.get_mut(idx) {
            column.kind = kind;
        }
    }

    pub fn can_add_column(&self) -> bool {
        self.columns.len() < MAX_COLUMNS
    }

    /// Only gates the button; the store validates the schema again.
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading
            && !self.name.trim().is_empty()
            && (MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns.len())
    }

    pub fn to_columns(&self) -> Vec<TableColumn> {
        columns_from_drafts(&self.columns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedField {
    pub column_id: String,
    pub value: String,
    pub error: Option<FieldError>,
}

/// State of the "Add record" modal: fields are picked one at a time and
/// validated against their column type before they join the record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordDraft {
    pub selected: Vec<SelectedField>,
    pub current_field: Option<String>,
    pub current_value: String,
    pub current_error: Option<FieldError>,
}

impl RecordDraft {
    pub fn field_cap(schema: &TableSchema) -> usize {
        schema.columns.len().min(MAX_COLUMNS)
    }

    pub fn available_fields(&self, schema: &TableSchema) -> Vec<TableColumn> {
        if self.selected.len() >= Self::field_cap(schema) {
            return Vec::new();
        }
        schema
            .columns
            .iter()
            .filter(|column| !self.is_selected(&column.id))
            .cloned()
            .collect()
    }

    fn is_selected(&self, column_id: &str) -> bool {
        self.selected.iter().any(|field| field.column_id == column_id)
    }

    pub fn select_field(&mut self, schema: &TableSchema, column_id: &str) {
        if column_id.is_empty() {
            self.current_field = None;
            self.current_error = None;
            return;
        }
        self.current_field = Some(column_id.to_string());
        self.current_error = validate_field(schema, column_id, &self.current_value).err();
    }

    pub fn set_value(&mut self, schema: &TableSchema, value: String) {
        self.current_value = value;
        if let Some(column_id) = &self.current_field {
            self.current_error = validate_field(schema, column_id, &self.current_value).err();
        }
    }

    pub fn can_add_field(&self) -> bool {
        self.current_field.is_some() && self.current_error.is_none()
    }

    /// Returns false and records the error when the current value is invalid.
    pub fn add_field(&mut self, schema: &TableSchema) -> bool {
        let Some(column_id) = self.current_field.clone() else {
            return false;
        };
        if self.is_selected(&column_id) || self.selected.len() >= Self::field_cap(schema) {
            return false;
        }
        if let Err(err) = validate_field(schema, &column_id, &self.current_value) {
            self.current_error = Some(err);
            return false;
        }

        self.selected.push(SelectedField {
            column_id,
            value: std::mem::take(&mut self.current_value),
            error: None,
        });
        self.current_field = None;
        self.current_error = None;
        true
    }

    pub fn remove_field(&mut self, column_id: &str) {
        self.selected.retain(|field| field.column_id != column_id);
    }

    pub fn missing_fields(&self) -> usize {
        MIN_RECORD_FIELDS.saturating_sub(self.selected.len())
    }

    pub fn has_errors(&self) -> bool {
        self.current_error.is_some() || self.selected.iter().any(|field| field.error.is_some())
    }

    pub fn can_submit(&self) -> bool {
        self.selected.len() >= MIN_RECORD_FIELDS && !self.has_errors()
    }

    /// Re-checks every selected field and builds the row payload. `None`
    /// blocks submission.
    pub fn prepare_submission(&mut self, schema: &TableSchema) -> Option<RowValues> {
        for field in &mut self.selected {
            field.error = validate_field(schema, &field.column_id, &field.value).err();
        }
        if !self.can_submit() {
            return None;
        }

        let values = self
            .selected
            .iter()
            .filter_map(|field| {
                let column = schema.column(&field.column_id)?;
                Some((field.column_id.clone(), to_cell_value(column.kind, &field.value)))
            })
            .collect();
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::row::CellValue;
    use crate::domain::entities::table::TableId;

    fn contacts() -> TableSchema {
        let columns = [
            ("Name", ColumnType::String),
            ("Email", ColumnType::String),
            ("Phone", ColumnType::String),
            ("Age", ColumnType::Number),
            ("Joined", ColumnType::Date),
            ("Active", ColumnType::Boolean),
        ]
        .into_iter()
        .map(|(label, kind)| ColumnDraft {
            label: label.to_string(),
            kind,
        })
        .collect::<Vec<_>>();

        TableSchema {
            id: TableId::from("contacts"),
            name: "Contacts".to_string(),
            columns: columns_from_drafts(&columns),
        }
    }

    fn add(draft: &mut RecordDraft, schema: &TableSchema, column_id: &str, value: &str) -> bool {
        draft.select_field(schema, column_id);
        draft.set_value(schema, value.to_string());
        draft.add_field(schema)
    }

    #[test]
    fn table_draft_keeps_between_one_and_fifteen_columns() {
        let mut draft = TableDraft::default();
        draft.remove_column(0);
        assert_eq!(draft.columns.len(), 1);

        for _ in 0..20 {
            draft.add_column();
        }
        assert_eq!(draft.columns.len(), MAX_COLUMNS);
        assert!(!draft.can_add_column());
    }

    #[test]
    fn table_draft_submit_needs_name_and_five_columns() {
        let mut draft = TableDraft::default();
        draft.name = "Contacts".to_string();
        assert!(!draft.can_submit(false));

        for _ in 0..4 {
            draft.add_column();
        }
        assert!(draft.can_submit(false));
        assert!(!draft.can_submit(true));

        draft.name = "  ".to_string();
        assert!(!draft.can_submit(false));
    }

    #[test]
    fn table_draft_edits_by_position() {
        let mut draft = TableDraft::default();
        draft.add_column();
        draft.set_label(1, "Age".to_string());
        draft.set_kind(1, ColumnType::Number);
        draft.set_label(7, "ignored".to_string());

        let columns = draft.to_columns();
        assert_eq!(columns[1].id, "2");
        assert_eq!(columns[1].label, "Age");
        assert_eq!(columns[1].kind, ColumnType::Number);
    }

    #[test]
    fn invalid_value_is_not_added() {
        let schema = contacts();
        let mut draft = RecordDraft::default();

        assert!(!add(&mut draft, &schema, "4", "abc"));
        assert_eq!(draft.current_error, Some(FieldError::NotANumber));
        assert!(draft.selected.is_empty());
        assert!(!draft.can_add_field());

        draft.set_value(&schema, "41".to_string());
        assert!(draft.can_add_field());
        assert!(draft.add_field(&schema));
        assert_eq!(draft.selected.len(), 1);
        assert_eq!(draft.current_field, None);
        assert_eq!(draft.current_value, "");
    }

    #[test]
    fn selected_fields_leave_the_picker() {
        let schema = contacts();
        let mut draft = RecordDraft::default();
        assert!(add(&mut draft, &schema, "1", "Ann"));

        let available: Vec<_> = draft
            .available_fields(&schema)
            .into_iter()
            .map(|column| column.id)
            .collect();
        assert_eq!(available, vec!["2", "3", "4", "5", "6"]);

        draft.remove_field("1");
        assert_eq!(draft.available_fields(&schema).len(), 6);
    }

    #[test]
    fn submission_is_blocked_below_five_fields() {
        let schema = contacts();
        let mut draft = RecordDraft::default();
        assert!(add(&mut draft, &schema, "1", "Ann"));
        assert!(add(&mut draft, &schema, "2", "ann@example.test"));
        assert!(add(&mut draft, &schema, "3", "555-0100"));
        assert!(add(&mut draft, &schema, "4", "41"));

        assert_eq!(draft.missing_fields(), 1);
        assert!(!draft.can_submit());
        assert_eq!(draft.prepare_submission(&schema), None);

        assert!(add(&mut draft, &schema, "5", "2024-01-31"));
        let values = draft
            .prepare_submission(&schema)
            .expect("five valid fields should submit");

        assert_eq!(draft.missing_fields(), 0);
        assert_eq!(values.len(), 5);
        assert_eq!(values.get("4"), Some(&CellValue::Number(41.0)));
        assert_eq!(
            values.get("5"),
            Some(&CellValue::Text("2024-01-31".to_string()))
        );
    }

    #[test]
    fn pending_error_blocks_submission() {
        let schema = contacts();
        let mut draft = RecordDraft::default();
        for (id, value) in [("1", "Ann"), ("2", "a@b.c"), ("3", "1"), ("4", "2"), ("6", "true")] {
            assert!(add(&mut draft, &schema, id, value));
        }
        assert!(draft.can_submit());

        draft.select_field(&schema, "5");
        draft.set_value(&schema, "2024-13-40".to_string());

        assert_eq!(draft.current_error, Some(FieldError::BadDate));
        assert!(!draft.can_submit());
        assert_eq!(draft.prepare_submission(&schema), None);
    }
}
