use std::collections::BTreeMap;

use crate::domain::entities::row::Row;
use crate::domain::entities::table::{TableId, TableSchema};
use crate::usecase::ports::gateway::RowPage;

pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Everything the UI renders. Only [`reduce`] produces new values of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationState {
    pub tables: Vec<TableSchema>,
    pub current_table: Option<TableSchema>,
    pub rows_by_table: BTreeMap<TableId, Vec<Row>>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    /// First-page row load in flight. Table-level actions also drive
    /// `is_loading`, so this is what keeps load-more closed meanwhile.
    pub is_loading_rows: bool,
    pub has_more: bool,
    /// Next page to request, 1-based.
    pub page: u32,
    pub page_size: u32,
    pub error: Option<String>,
    /// Bumped whenever the row view is reset. Row responses requested under an
    /// older epoch are dropped.
    pub load_epoch: u64,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ApplicationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            tables: Vec::new(),
            current_table: None,
            rows_by_table: BTreeMap::new(),
            is_loading: false,
            is_loading_more: false,
            is_loading_rows: false,
            has_more: true,
            page: 1,
            page_size: page_size.max(1),
            error: None,
            load_epoch: 0,
        }
    }

    pub fn rows(&self, table_id: &TableId) -> &[Row] {
        self.rows_by_table
            .get(table_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn current_rows(&self) -> &[Row] {
        match &self.current_table {
            Some(table) => self.rows(&table.id),
            None => &[],
        }
    }

    pub fn is_current(&self, table_id: &TableId) -> bool {
        self.current_table
            .as_ref()
            .is_some_and(|table| &table.id == table_id)
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading_more && !self.is_loading_rows && !self.is_loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    TablesRequested,
    TablesLoaded(Vec<TableSchema>),
    TableCreateRequested,
    TableCreated(TableSchema),
    TableDeleteRequested,
    TableDeleted(TableId),
    TableSelected(Option<TableSchema>),
    RowsRequested {
        load_more: bool,
    },
    RowsLoaded {
        table_id: TableId,
        epoch: u64,
        load_more: bool,
        page: RowPage,
    },
    RowsFailed {
        epoch: u64,
        load_more: bool,
        message: String,
    },
    RowAdded {
        table_id: TableId,
        row: Row,
    },
    PaginationReset,
    /// Failure of a table-level operation; ends the `is_loading` phase.
    Failed(String),
    /// Failure that does not own a loading flag (validation, row insert).
    ErrorRaised(String),
}

pub fn reduce(mut state: ApplicationState, action: StoreAction) -> ApplicationState {
    match action {
        StoreAction::TablesRequested
        | StoreAction::TableCreateRequested
        | StoreAction::TableDeleteRequested => {
            state.is_loading = true;
            state.error = None;
        }
        StoreAction::TablesLoaded(tables) => {
            state.tables = tables;
            state.is_loading = false;
        }
        StoreAction::TableCreated(table) => {
            state.rows_by_table.insert(table.id.clone(), Vec::new());
            state.current_table = Some(table.clone());
            state.tables.push(table);
            state.is_loading = false;
        }
        StoreAction::TableDeleted(table_id) => {
            state.tables.retain(|table| table.id != table_id);
            state.rows_by_table.remove(&table_id);
            if state.is_current(&table_id) {
                state.current_table = None;
                state = reset_row_view(state);
            }
            state.is_loading = false;
        }
        StoreAction::TableSelected(table) => {
            state.current_table = table;
            state = reset_row_view(state);
            state.is_loading = false;
            state.error = None;
        }
        StoreAction::RowsRequested { load_more: true } => {
            state.is_loading_more = true;
        }
        StoreAction::RowsRequested { load_more: false } => {
            state = reset_row_view(state);
            state.is_loading = true;
            state.is_loading_rows = true;
            state.error = None;
        }
        StoreAction::RowsLoaded {
            table_id,
            epoch,
            load_more,
            page,
        } => {
            if epoch != state.load_epoch {
                return state;
            }
            let fetched = page.data.len();
            let rows = state.rows_by_table.entry(table_id).or_default();
            if load_more {
                rows.extend(page.data);
            } else {
                *rows = page.data;
            }
            state.has_more = rows.len() < page.total;
            if fetched > 0 {
                state.page += 1;
            }
            state = finish_row_load(state, load_more);
        }
        StoreAction::RowsFailed {
            epoch,
            load_more,
            message,
        } => {
            if epoch != state.load_epoch {
                return state;
            }
            state.error = Some(message);
            state = finish_row_load(state, load_more);
        }
        StoreAction::RowAdded { table_id, row } => {
            if state.tables.iter().any(|table| table.id == table_id) {
                state.rows_by_table.entry(table_id).or_default().insert(0, row);
            }
        }
        StoreAction::PaginationReset => {
            state.page = 1;
            state.has_more = true;
        }
        StoreAction::Failed(message) => {
            state.error = Some(message);
            state.is_loading = false;
        }
        StoreAction::ErrorRaised(message) => {
            state.error = Some(message);
        }
    }
    state
}

fn reset_row_view(mut state: ApplicationState) -> ApplicationState {
    state.load_epoch += 1;
    state.page = 1;
    state.has_more = true;
    state.is_loading_more = false;
    state.is_loading_rows = false;
    state
}

fn finish_row_load(mut state: ApplicationState, load_more: bool) -> ApplicationState {
    if load_more {
        state.is_loading_more = false;
    } else {
        state.is_loading = false;
        state.is_loading_rows = false;
    }
    state
}
