//! Core data models for PubMed records and report rows.

mod record;
mod report;

pub use record::{Author, RecordDetail, RecordId};
pub use report::{ReportRow, EMAIL_NOT_AVAILABLE};
