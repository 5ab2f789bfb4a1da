//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{Author, RecordDetail, RecordId};
use crate::sources::{Source, SourceError};

/// A mock source for testing that returns predefined responses.
///
/// Every call is recorded so tests can assert which stages ran.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Mutex<Vec<RecordId>>,
    records: Mutex<Vec<RecordDetail>>,
    search_failure: Mutex<Option<String>>,
    fetch_failure: Mutex<Option<String>>,
    search_calls: Mutex<Vec<(String, usize)>>,
    fetch_calls: Mutex<Vec<Vec<RecordId>>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ids returned by `search_ids`.
    pub fn set_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<RecordId>,
    {
        let mut guard = self.ids.lock().unwrap();
        *guard = ids.into_iter().map(Into::into).collect();
    }

    /// Set the records returned by `fetch_summaries`.
    pub fn set_records(&self, records: Vec<RecordDetail>) {
        let mut guard = self.records.lock().unwrap();
        *guard = records;
    }

    /// Make `search_ids` fail with a network error.
    pub fn fail_search(&self, message: impl Into<String>) {
        let mut guard = self.search_failure.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Make `fetch_summaries` fail with a network error.
    pub fn fail_fetch(&self, message: impl Into<String>) {
        let mut guard = self.fetch_failure.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Queries passed to `search_ids`, with their result caps.
    pub fn search_calls(&self) -> Vec<(String, usize)> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Id batches passed to `fetch_summaries`.
    pub fn fetch_calls(&self) -> Vec<Vec<RecordId>> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_ids(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RecordId>, SourceError> {
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        if let Some(message) = self.search_failure.lock().unwrap().clone() {
            return Err(SourceError::Network(message));
        }

        let ids = self.ids.lock().unwrap();
        Ok(ids.iter().take(max_results).cloned().collect())
    }

    async fn fetch_summaries(&self, ids: &[RecordId]) -> Result<Vec<RecordDetail>, SourceError> {
        self.fetch_calls.lock().unwrap().push(ids.to_vec());

        if let Some(message) = self.fetch_failure.lock().unwrap().clone() {
            return Err(SourceError::Network(message));
        }

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|record| ids.contains(&record.uid))
            .cloned()
            .collect())
    }
}

/// Helper function to create a mock record with one author for testing.
pub fn make_record(uid: &str, author: &str, affiliation: &str, email: &str) -> RecordDetail {
    RecordDetail::new(uid, format!("Paper {}", uid), "2024 Jan").author(
        Author::new(author)
            .affiliation(affiliation)
            .email(email),
    )
}
