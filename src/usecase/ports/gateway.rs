use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::row::{Row, RowValues};
use crate::domain::entities::table::{TableId, TableSchema};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// One page of rows plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowPage {
    pub data: Vec<Row>,
    pub total: usize,
}

/// Remote side of the store. Implementations surface every failure to the
/// caller and never retry.
///
/// Futures are not `Send`: the UI runs on a single thread and the browser
/// fetch futures cannot cross threads anyway.
#[async_trait(?Send)]
pub trait TableGateway {
    async fn list_tables(&self) -> Result<Vec<TableSchema>, GatewayError>;

    async fn create_table(&self, schema: &TableSchema) -> Result<TableSchema, GatewayError>;

    /// `page` is 1-based.
    async fn list_rows(
        &self,
        table_id: &TableId,
        page: u32,
        page_size: u32,
    ) -> Result<RowPage, GatewayError>;

    /// Deleting a table also deletes its rows.
    async fn delete_table(&self, table_id: &TableId) -> Result<(), GatewayError>;

    async fn add_row(&self, table_id: &TableId, values: &RowValues) -> Result<Row, GatewayError>;
}
