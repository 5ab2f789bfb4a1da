//! Literature source abstraction.
//!
//! The pipeline talks to a [`Source`] rather than to PubMed directly, so the
//! search and summary stages can be swapped for [`MockSource`] in tests.
//!
//! - [`PubMedSource`]: NCBI E-utilities (`esearch` + `esummary`, JSON mode)
//! - [`MockSource`]: canned ids and records, with call recording

pub mod mock;
mod pubmed;

pub use mock::MockSource;
pub use pubmed::PubMedSource;

use crate::models::{RecordDetail, RecordId};
use async_trait::async_trait;

/// Interface for a searchable bibliographic database.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for record identifiers matching a free-text query.
    ///
    /// Identifiers come back in the source's relevance order, at most
    /// `max_results` of them.
    async fn search_ids(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RecordId>, SourceError>;

    /// Fetch summary details for a batch of identifiers in one request.
    async fn fetch_summaries(&self, ids: &[RecordId]) -> Result<Vec<RecordDetail>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Connection failure or unreadable response body
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the source
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters (e.g. a malformed endpoint URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    /// Whether this error came from the HTTP exchange itself
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Network(_) | SourceError::Api(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(SourceError::Network("connection refused".into()).is_transport());
        assert!(SourceError::Api("status 500".into()).is_transport());
        assert!(!SourceError::Parse("bad json".into()).is_transport());
        assert!(!SourceError::InvalidRequest("bad url".into()).is_transport());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SourceError = err.into();
        assert!(matches!(err, SourceError::Parse(msg) if msg.starts_with("JSON:")));
    }
}
