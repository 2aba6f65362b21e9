use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::domain::entities::row::{Row, RowValues};
use crate::domain::entities::table::TableId;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

pub fn tables_url(base_url: &str) -> String {
    format!("{}/tables", trim_base(base_url))
}

pub fn table_url(base_url: &str, table_id: &TableId) -> String {
    format!(
        "{}/tables/{}?_dependent=tableData",
        trim_base(base_url),
        table_id
    )
}

pub fn rows_url(base_url: &str) -> String {
    format!("{}/tableData", trim_base(base_url))
}

pub fn rows_page_url(base_url: &str, page: u32, page_size: u32) -> String {
    format!(
        "{}/tableData?_page={page}&_per_page={page_size}",
        trim_base(base_url)
    )
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

#[derive(Serialize)]
pub struct NewRowBody<'a> {
    #[serde(rename = "tableId")]
    pub table_id: &'a TableId,
    #[serde(flatten)]
    pub values: &'a RowValues,
}

/// A page body: either a bare array or a `{data, items?}` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage {
    pub rows: Vec<Row>,
    /// Collection size reported by the envelope, when present.
    pub items: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PagePayload {
    Rows(Vec<Row>),
    Envelope {
        data: EnvelopeData,
        #[serde(default)]
        items: Option<usize>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvelopeData {
    List(Vec<Row>),
    Keyed(BTreeMap<String, Row>),
}

pub fn parse_page(body: &[u8]) -> Result<ParsedPage, serde_json::Error> {
    Ok(match serde_json::from_slice(body)? {
        PagePayload::Rows(rows) => ParsedPage { rows, items: None },
        PagePayload::Envelope {
            data: EnvelopeData::List(rows),
            items,
        } => ParsedPage { rows, items },
        PagePayload::Envelope {
            data: EnvelopeData::Keyed(keyed),
            items,
        } => ParsedPage {
            rows: keyed_rows_in_order(keyed),
            items,
        },
    })
}

// Numeric keys sort by value so "10" lands after "9".
fn keyed_rows_in_order(keyed: BTreeMap<String, Row>) -> Vec<Row> {
    let mut entries: Vec<(String, Row)> = keyed.into_iter().collect();
    entries.sort_by_key(|(key, _)| (key.parse::<u64>().unwrap_or(u64::MAX), key.clone()));
    entries.into_iter().map(|(_, row)| row).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountPayload {
    Rows(Vec<IgnoredAny>),
    Envelope { data: Vec<IgnoredAny> },
}

/// Size of an unpaginated collection body.
pub fn count_rows(body: &[u8]) -> Result<usize, serde_json::Error> {
    Ok(match serde_json::from_slice(body)? {
        CountPayload::Rows(rows) => rows.len(),
        CountPayload::Envelope { data } => data.len(),
    })
}

pub fn parse_total_header(value: Option<&str>) -> Option<usize> {
    value.and_then(|raw| raw.trim().parse().ok())
}
