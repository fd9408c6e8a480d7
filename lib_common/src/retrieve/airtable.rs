use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::copy::record::CopyRecord;
use crate::copy::source::{CopySource, SourceError};
use crate::retrieve::http_client::ApiClient;

/// One page of a table listing. Airtable includes `offset` only when more
/// pages exist.
#[derive(Debug, Deserialize)]
struct RecordsPage {
    records: Vec<CopyRecord>,
    offset: Option<String>,
}

/// Fetches copy records from an Airtable base over its REST API, following
/// offset pagination until the table is exhausted.
pub struct AirtableSource {
    client: ApiClient,
    table_path: String,
}

impl AirtableSource {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://api.airtable.com/v0".
    /// * `base_id` - the base identifier (usually "app...").
    /// * `table` - the table name holding the copy records.
    /// * `api_key` - personal access token sent as a Bearer token.
    pub fn new(
        base_url: &str,
        base_id: &str,
        table: &str,
        api_key: String,
    ) -> anyhow::Result<Self> {
        // Url::join replaces the last path segment unless the base ends in '/'
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client: ApiClient::new(&base, Some(api_key))?,
            table_path: format!("{base_id}/{table}"),
        })
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordsPage, SourceError> {
        let query = offset.map(|o| vec![("offset", o.to_string())]);

        let response = self
            .client
            .request::<Value, ()>(Method::GET, &self.table_path, query.as_deref(), None, None)
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !response.success {
            return Err(SourceError::Status {
                status: response.status,
                body: response.error_body.unwrap_or_default(),
            });
        }

        let body = response
            .data
            .ok_or_else(|| SourceError::Decode("empty response body".into()))?;
        serde_json::from_value(body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CopySource for AirtableSource {
    async fn fetch_all(&self) -> Result<Vec<CopyRecord>, SourceError> {
        let mut all = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(offset.as_deref()).await?;
            all.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        log::debug!("Fetched {} copy records from the remote table", all.len());
        Ok(all)
    }
}
