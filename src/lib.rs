//! # PubMed Affiliations
//!
//! Search PubMed and report papers that have at least one author affiliated
//! with a non-academic (commercial) organization.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (RecordDetail, Author, ReportRow)
//! - [`sources`]: Search and summary clients behind the [`Source`] trait
//! - [`filter`]: Academic / non-academic affiliation classification
//! - [`report`]: CSV and stdout report output
//! - [`pipeline`]: The search -> fetch -> filter run
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod config;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use filter::AffiliationFilter;
pub use models::{RecordDetail, ReportRow};
pub use sources::{PubMedSource, Source};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
