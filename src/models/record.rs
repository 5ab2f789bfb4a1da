//! Bibliographic record model as returned by the summary endpoint.

use serde::{Deserialize, Serialize};

/// PubMed identifier (PMID) as returned by esearch.
///
/// Kept as an opaque string; PubMed never promises these stay numeric.
pub type RecordId = String;

/// An author entry of a [`RecordDetail`].
///
/// Absent affiliation or email is represented as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,

    /// Affiliation free text (empty when absent)
    pub affiliation: String,

    /// Contact email (empty when absent)
    pub email: String,
}

impl Author {
    /// Create an author with no affiliation or email
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: String::new(),
            email: String::new(),
        }
    }

    /// Set affiliation
    pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    /// Set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Whether an email was supplied
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// One bibliographic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetail {
    /// PubMed identifier
    pub uid: RecordId,

    /// Article title
    pub title: String,

    /// Publication date as printed by PubMed (e.g. "2023 Jan 15", "2021 Spring")
    pub pubdate: String,

    /// Authors in byline order
    pub authors: Vec<Author>,
}

impl RecordDetail {
    /// Create a record with no authors
    pub fn new(
        uid: impl Into<RecordId>,
        title: impl Into<String>,
        pubdate: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            pubdate: pubdate.into(),
            authors: Vec::new(),
        }
    }

    /// Append an author
    pub fn author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Replace the author list
    pub fn authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }
}
