//! PubMed source implementation using the E-utilities JSON API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

use crate::config::{Config, PubMedConfig};
use crate::models::{Author, RecordDetail, RecordId};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// Defaults for fields missing from a summary record
const UNKNOWN_UID: &str = "Unknown";
const UNKNOWN_TITLE: &str = "No title";
const UNKNOWN_PUBDATE: &str = "Unknown";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// PubMed research source
///
/// Uses NCBI E-utilities: `esearch` for the id list, then a single batched
/// `esummary` call for the record details.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    config: PubMedConfig,
}

impl PubMedSource {
    /// Create a new PubMed source against the public NCBI endpoints
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&Config::default())
    }

    /// Create a PubMed source from application configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::from_config(&config.http)?),
            config: config.pubmed.clone(),
        })
    }

    /// Create with a custom HTTP client (for testing)
    pub fn with_client(client: Arc<HttpClient>, config: PubMedConfig) -> Self {
        Self { client, config }
    }

    /// Parameters NCBI asks every E-utilities caller to send
    fn etiquette_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.clone()));
        }
        if let Some(tool) = &self.config.tool {
            params.push(("tool", tool.clone()));
        }
        if let Some(email) = &self.config.email {
            params.push(("email", email.clone()));
        }
        params
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, query: &str, max_results: usize) -> Result<Url, SourceError> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", max_results.to_string()),
        ];
        params.extend(self.etiquette_params());

        Ok(Url::parse_with_params(&self.config.esearch_url, &params)?)
    }

    /// Build E-utilities summary URL for a batch of PubMed IDs
    fn build_summary_url(&self, ids: &[RecordId]) -> Result<Url, SourceError> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", ids.join(",")),
            ("retmode", "json".to_string()),
        ];
        params.extend(self.etiquette_params());

        Ok(Url::parse_with_params(&self.config.esummary_url, &params)?)
    }

    /// GET a URL and return the body, mapping failures to transport errors
    async fn get_text(&self, url: Url, action: &str) -> Result<String, SourceError> {
        tracing::debug!(url = %url, "PubMed {}", action);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to {} PubMed: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "PubMed API returned status: {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }

    /// Parse E-utilities search response JSON
    fn parse_search_response(body: &str) -> Result<Vec<RecordId>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResponse {
            #[serde(default)]
            esearchresult: Option<ESearchResult>,
        }

        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(default)]
            idlist: Option<Vec<String>>,
        }

        let response: ESearchResponse = serde_json::from_str(body)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e)))?;

        Ok(response
            .esearchresult
            .and_then(|result| result.idlist)
            .unwrap_or_default())
    }

    /// Parse E-utilities summary response JSON
    ///
    /// `result` maps each uid to a record object, plus a `uids` array giving
    /// the requested order. Records come back in that order when it is present.
    /// Fields that are missing, null or of an unexpected type take their
    /// defaults, so one odd record never costs the rest of the batch.
    fn parse_summary_response(body: &str) -> Result<Vec<RecordDetail>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESummaryResponse {
            #[serde(default)]
            result: Option<Map<String, Value>>,
        }

        let response: ESummaryResponse = serde_json::from_str(body).map_err(|e| {
            SourceError::Parse(format!("Failed to parse PubMed summary JSON: {}", e))
        })?;

        let Some(result) = response.result else {
            return Ok(Vec::new());
        };

        let order: Vec<&str> = result
            .get("uids")
            .and_then(Value::as_array)
            .map(|uids| uids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut entries: Vec<(&String, &Map<String, Value>)> = result
            .iter()
            .filter_map(|(key, value)| match value.as_object() {
                Some(record) => Some((key, record)),
                None => {
                    if key.as_str() != "uids" {
                        tracing::warn!(key = %key, "Skipping non-record entry in PubMed summary");
                    }
                    None
                }
            })
            .collect();

        // Stable sort: entries missing from `uids` keep response order at the end
        entries.sort_by_key(|(key, _)| {
            order
                .iter()
                .position(|uid| *uid == key.as_str())
                .unwrap_or(usize::MAX)
        });

        Ok(entries
            .into_iter()
            .map(|(key, record)| parse_summary_record(key, record))
            .collect())
    }
}

/// Build one record from its summary object
fn parse_summary_record(key: &str, record: &Map<String, Value>) -> RecordDetail {
    let authors = match record.get("authors") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(authors)) => authors
            .iter()
            .filter_map(|author| match author.as_object() {
                Some(author) => Some(Author {
                    name: text_field(key, author, "name", UNKNOWN_AUTHOR),
                    affiliation: text_field(key, author, "affiliation", ""),
                    email: text_field(key, author, "email", ""),
                }),
                None => {
                    tracing::warn!(record = %key, "Ignoring non-object author in PubMed summary");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(record = %key, "Ignoring non-list authors in PubMed summary");
            Vec::new()
        }
    };

    RecordDetail::new(
        text_field(key, record, "uid", UNKNOWN_UID),
        text_field(key, record, "title", UNKNOWN_TITLE),
        text_field(key, record, "pubdate", UNKNOWN_PUBDATE),
    )
    .authors(authors)
}

/// Read a text field, falling back to `default` when it is absent or unusable
fn text_field(key: &str, object: &Map<String, Value>, field: &str, default: &str) -> String {
    match object.get(field) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => {
            tracing::warn!(
                record = %key,
                field,
                value = %other,
                "Ignoring non-text field in PubMed summary"
            );
            default.to_string()
        }
    }
}

#[async_trait]
impl Source for PubMedSource {
    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search_ids(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RecordId>, SourceError> {
        let url = self.build_search_url(query, max_results)?;
        let body = self.get_text(url, "search").await?;
        let ids = Self::parse_search_response(&body)?;

        tracing::debug!(count = ids.len(), "PubMed esearch returned ids");
        Ok(ids)
    }

    async fn fetch_summaries(&self, ids: &[RecordId]) -> Result<Vec<RecordDetail>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_summary_url(ids)?;
        let body = self.get_text(url, "fetch summaries from").await?;
        let records = Self::parse_summary_response(&body)?;

        tracing::debug!(count = records.len(), "PubMed esummary returned records");
        Ok(records)
    }
}
