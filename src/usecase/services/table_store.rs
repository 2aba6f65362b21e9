use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::row::{Row, RowValues};
use crate::domain::entities::table::{TableColumn, TableId, TableSchema};
use crate::domain::validation::{validate_new_table, SchemaError};
use crate::usecase::ports::gateway::{GatewayError, TableGateway};
use crate::usecase::state::{reduce, ApplicationState, StoreAction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Failed to load tables: {0}")]
    LoadTables(GatewayError),
    #[error("Invalid table: {0}")]
    InvalidTable(SchemaError),
    #[error("Failed to create table: {0}")]
    CreateTable(GatewayError),
    #[error("Failed to delete table: {0}")]
    DeleteTable(GatewayError),
    #[error("Failed to load table data: {0}")]
    LoadRows(GatewayError),
    #[error("Failed to add row: {0}")]
    AddRow(GatewayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&ApplicationState)>;

/// Owns the application state and is its only writer.
///
/// Every operation turns into one or more [`StoreAction`]s. Each action is
/// reduced in full before listeners see the resulting snapshot. Nothing is
/// fetched until [`TableStore::initialize`] is called.
pub struct TableStore {
    gateway: Rc<dyn TableGateway>,
    state: RefCell<ApplicationState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl TableStore {
    pub fn new(gateway: Rc<dyn TableGateway>, page_size: u32) -> Self {
        Self {
            gateway,
            state: RefCell::new(ApplicationState::new(page_size)),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> ApplicationState {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, read: impl FnOnce(&ApplicationState) -> R) -> R {
        read(&self.state.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&ApplicationState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn dispatch(&self, action: StoreAction) {
        {
            let mut state = self.state.borrow_mut();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action);
        }

        // Listeners may subscribe or dispatch again, so call them on a copy.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.load_tables().await
    }

    pub async fn load_tables(&self) -> Result<(), StoreError> {
        self.dispatch(StoreAction::TablesRequested);
        match self.gateway.list_tables().await {
            Ok(tables) => {
                info!(count = tables.len(), "loaded tables");
                self.dispatch(StoreAction::TablesLoaded(tables));
                Ok(())
            }
            Err(err) => Err(self.fail(StoreError::LoadTables(err))),
        }
    }

    /// Rejects schemas outside the column bounds before anything is sent.
    pub async fn create_new_table(
        &self,
        name: &str,
        columns: Vec<TableColumn>,
    ) -> Result<TableSchema, StoreError> {
        if let Err(err) = validate_new_table(name, &columns) {
            let err = StoreError::InvalidTable(err);
            warn!(%err, "rejected table schema");
            self.dispatch(StoreAction::ErrorRaised(err.to_string()));
            return Err(err);
        }

        let schema = TableSchema {
            id: TableId(chrono::Utc::now().timestamp_millis().to_string()),
            name: name.trim().to_string(),
            columns,
        };

        self.dispatch(StoreAction::TableCreateRequested);
        let created = match self.gateway.create_table(&schema).await {
            Ok(created) => created,
            Err(err) => return Err(self.fail(StoreError::CreateTable(err))),
        };
        info!(table_id = %created.id, name = %created.name, "created table");
        self.dispatch(StoreAction::TableCreated(created.clone()));

        // A failed first page is already recorded in `error`.
        let _ = self.load_table_data(&created.id, false).await;
        Ok(created)
    }

    pub async fn delete_table(&self, table_id: &TableId) -> Result<(), StoreError> {
        self.dispatch(StoreAction::TableDeleteRequested);
        match self.gateway.delete_table(table_id).await {
            Ok(()) => {
                info!(%table_id, "deleted table");
                self.dispatch(StoreAction::TableDeleted(table_id.clone()));
                Ok(())
            }
            Err(err) => Err(self.fail(StoreError::DeleteTable(err))),
        }
    }

    /// Loads the first page, or appends the next one when `load_more` is set.
    ///
    /// A second `load_more` while one is in flight, or after the last page,
    /// is a no-op.
    pub async fn load_table_data(
        &self,
        table_id: &TableId,
        load_more: bool,
    ) -> Result<(), StoreError> {
        if load_more && !self.with_state(ApplicationState::can_load_more) {
            debug!(%table_id, "skipping load more");
            return Ok(());
        }

        self.dispatch(StoreAction::RowsRequested { load_more });
        let (epoch, page, page_size) =
            self.with_state(|state| (state.load_epoch, state.page, state.page_size));
        debug!(%table_id, page, page_size, load_more, "loading rows");

        match self.gateway.list_rows(table_id, page, page_size).await {
            Ok(result) => {
                if self.is_stale(epoch) {
                    warn!(%table_id, page, "dropping rows for a stale view");
                }
                debug!(%table_id, fetched = result.data.len(), total = result.total, "loaded rows");
                self.dispatch(StoreAction::RowsLoaded {
                    table_id: table_id.clone(),
                    epoch,
                    load_more,
                    page: result,
                });
                Ok(())
            }
            Err(err) => {
                let err = StoreError::LoadRows(err);
                warn!(%table_id, %err, "row load failed");
                self.dispatch(StoreAction::RowsFailed {
                    epoch,
                    load_more,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub async fn add_data_row(
        &self,
        table_id: &TableId,
        values: RowValues,
    ) -> Result<Row, StoreError> {
        match self.gateway.add_row(table_id, &values).await {
            Ok(row) => {
                info!(%table_id, row_id = %row.id, "added row");
                self.dispatch(StoreAction::RowAdded {
                    table_id: table_id.clone(),
                    row: row.clone(),
                });
                Ok(row)
            }
            Err(err) => {
                let err = StoreError::AddRow(err);
                warn!(%table_id, %err, "row insert failed");
                self.dispatch(StoreAction::ErrorRaised(err.to_string()));
                Err(err)
            }
        }
    }

    /// Selecting a table resets pagination and loads its first page.
    pub async fn set_current_table(&self, table: Option<TableSchema>) -> Result<(), StoreError> {
        let table_id = table.as_ref().map(|table| table.id.clone());
        self.dispatch(StoreAction::TableSelected(table));
        match table_id {
            Some(table_id) => self.load_table_data(&table_id, false).await,
            None => Ok(()),
        }
    }

    pub fn reset_pagination(&self) {
        self.dispatch(StoreAction::PaginationReset);
    }

    fn is_stale(&self, epoch: u64) -> bool {
        self.with_state(|state| state.load_epoch != epoch)
    }

    fn fail(&self, err: StoreError) -> StoreError {
        warn!(%err, "store operation failed");
        self.dispatch(StoreAction::Failed(err.to_string()));
        err
    }
}
