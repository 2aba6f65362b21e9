use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::row::{Row, RowValues};
use crate::domain::entities::table::{TableId, TableSchema};
use crate::infra::http::wire::{
    count_rows, parse_page, parse_total_header, rows_page_url, rows_url, table_url, tables_url,
    NewRowBody, TOTAL_COUNT_HEADER,
};
use crate::usecase::ports::gateway::{GatewayError, RowPage, TableGateway};

/// Where `list_rows` gets the collection size from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalCountMode {
    /// Envelope `items`, then the `X-Total-Count` header, then a second
    /// unpaginated request.
    #[default]
    Auto,
    /// Always count the unpaginated collection.
    FullCollection,
}

impl TotalCountMode {
    /// `None` means the count request is needed.
    pub fn resolve(self, envelope_items: Option<usize>, header: Option<usize>) -> Option<usize> {
        match self {
            TotalCountMode::Auto => envelope_items.or(header),
            TotalCountMode::FullCollection => None,
        }
    }
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
    total_count: TotalCountMode,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, total_count: TotalCountMode) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            total_count,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|err| GatewayError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        url: &str,
    ) -> Result<T, GatewayError> {
        response.json::<T>().await.map_err(|err| GatewayError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    async fn read_bytes(&self, response: Response, url: &str) -> Result<Vec<u8>, GatewayError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| GatewayError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })
    }

    async fn count_all_rows(&self) -> Result<usize, GatewayError> {
        let url = rows_url(&self.base_url);
        debug!(%url, "counting rows");
        let response = self.send(self.client.get(&url), &url).await?;
        let body = self.read_bytes(response, &url).await?;
        count_rows(&body).map_err(|err| decode_error(&url, err))
    }
}

fn decode_error(url: &str, err: serde_json::Error) -> GatewayError {
    GatewayError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait(?Send)]
impl TableGateway for HttpGateway {
    async fn list_tables(&self) -> Result<Vec<TableSchema>, GatewayError> {
        let url = tables_url(&self.base_url);
        debug!(%url, "listing tables");
        let response = self.send(self.client.get(&url), &url).await?;
        self.read_json(response, &url).await
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<TableSchema, GatewayError> {
        let url = tables_url(&self.base_url);
        debug!(%url, table_id = %schema.id, "creating table");
        let response = self.send(self.client.post(&url).json(schema), &url).await?;
        self.read_json(response, &url).await
    }

    // Rows are not filtered by table: only one schema exists at a time.
    async fn list_rows(
        &self,
        table_id: &TableId,
        page: u32,
        page_size: u32,
    ) -> Result<RowPage, GatewayError> {
        let url = rows_page_url(&self.base_url, page, page_size);
        debug!(%url, %table_id, "listing rows");
        let response = self.send(self.client.get(&url), &url).await?;
        let header_total = parse_total_header(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|value| value.to_str().ok()),
        );
        let body = self.read_bytes(response, &url).await?;
        let parsed = parse_page(&body).map_err(|err| decode_error(&url, err))?;

        let total = match self.total_count.resolve(parsed.items, header_total) {
            Some(total) => total,
            None => self.count_all_rows().await?,
        };

        Ok(RowPage {
            data: parsed.rows,
            total,
        })
    }

    async fn delete_table(&self, table_id: &TableId) -> Result<(), GatewayError> {
        let url = table_url(&self.base_url, table_id);
        debug!(%url, "deleting table");
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn add_row(&self, table_id: &TableId, values: &RowValues) -> Result<Row, GatewayError> {
        let url = rows_url(&self.base_url);
        debug!(%url, %table_id, fields = values.len(), "adding row");
        let body = NewRowBody { table_id, values };
        let response = self.send(self.client.post(&url).json(&body), &url).await?;
        self.read_json(response, &url).await
    }
}
