//! Report row model.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Placeholder for a row whose record had no author email.
pub const EMAIL_NOT_AVAILABLE: &str = "N/A";

/// One output row: a record with at least one non-academic author.
///
/// Field order is the column order of the CSV report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: RecordId,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    /// Non-academic author names joined with ", "
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    /// Affiliations of those authors, same order, joined with ", "
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    /// Last non-empty author email of the record, or [`EMAIL_NOT_AVAILABLE`]
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl ReportRow {
    /// Column headers in output order
    pub const HEADERS: [&'static str; 6] = [
        "PubmedID",
        "Title",
        "Publication Date",
        "Non-academic Author(s)",
        "Company Affiliation(s)",
        "Corresponding Author Email",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            pubmed_id: "123".to_string(),
            title: "Title".to_string(),
            publication_date: "2024".to_string(),
            non_academic_authors: "Doe J".to_string(),
            company_affiliations: "Acme Biotech Inc.".to_string(),
            corresponding_email: EMAIL_NOT_AVAILABLE.to_string(),
        }
    }

    #[test]
    fn test_serialized_keys_match_headers() {
        let value = serde_json::to_value(sample_row()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), ReportRow::HEADERS.len());
        for header in ReportRow::HEADERS {
            assert!(object.contains_key(header), "missing {}", header);
        }
    }
}
