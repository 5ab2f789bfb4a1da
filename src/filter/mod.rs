//! Affiliation filtering: keep records that have at least one author from a
//! non-academic organization.

use crate::config::FilterConfig;
use crate::models::{RecordDetail, ReportRow, EMAIL_NOT_AVAILABLE};

/// Separator used when joining author names and affiliations into one cell
pub const LIST_SEPARATOR: &str = ", ";

/// How an author's affiliation was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationKind {
    /// Matches one of the academic keywords
    Academic,
    /// Non-empty and matches none of the academic keywords
    NonAcademic,
    /// No affiliation given; counts towards neither side
    Unknown,
}

/// Classifies affiliations by case-insensitive keyword matching.
#[derive(Debug, Clone)]
pub struct AffiliationFilter {
    /// Lowercased keywords
    keywords: Vec<String>,
}

impl Default for AffiliationFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl AffiliationFilter {
    /// Create a filter from a keyword list
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Create a filter from configuration
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(&config.academic_keywords)
    }

    /// Keywords in use, lowercased
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Classify a single affiliation string.
    ///
    /// Keywords match as substrings, so "lab" also matches "Laboratories".
    pub fn classify(&self, affiliation: &str) -> AffiliationKind {
        if affiliation.is_empty() {
            return AffiliationKind::Unknown;
        }

        let lowered = affiliation.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            AffiliationKind::Academic
        } else {
            AffiliationKind::NonAcademic
        }
    }

    /// Build the report row for one record, if it has a non-academic author
    pub fn report_row(&self, record: &RecordDetail) -> Option<ReportRow> {
        let mut names = Vec::new();
        let mut affiliations = Vec::new();
        let mut email = None;

        for author in &record.authors {
            if self.classify(&author.affiliation) == AffiliationKind::NonAcademic {
                names.push(author.name.as_str());
                affiliations.push(author.affiliation.as_str());
            }

            // Last non-empty email wins, whatever the author's affiliation
            if author.has_email() {
                email = Some(author.email.as_str());
            }
        }

        if names.is_empty() {
            return None;
        }

        Some(ReportRow {
            pubmed_id: record.uid.clone(),
            title: record.title.clone(),
            publication_date: record.pubdate.clone(),
            non_academic_authors: names.join(LIST_SEPARATOR),
            company_affiliations: affiliations.join(LIST_SEPARATOR),
            corresponding_email: email.unwrap_or(EMAIL_NOT_AVAILABLE).to_string(),
        })
    }

    /// Keep records with at least one non-academic author, one row each, in input order
    pub fn filter_non_academic(&self, records: &[RecordDetail]) -> Vec<ReportRow> {
        let rows: Vec<ReportRow> = records
            .iter()
            .filter_map(|record| self.report_row(record))
            .collect();

        tracing::debug!(
            records = records.len(),
            kept = rows.len(),
            "Filtered records for non-academic authors"
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn record(uid: &str, authors: Vec<Author>) -> RecordDetail {
        RecordDetail::new(uid, format!("Title {}", uid), "2024").authors(authors)
    }

    #[test]
    fn test_classify() {
        let filter = AffiliationFilter::default();

        assert_eq!(filter.classify(""), AffiliationKind::Unknown);
        assert_eq!(
            filter.classify("Stanford University"),
            AffiliationKind::Academic
        );
        assert_eq!(
            filter.classify("MASSACHUSETTS GENERAL HOSPITAL"),
            AffiliationKind::Academic
        );
        assert_eq!(
            filter.classify("Cold Spring Harbor Laboratory"),
            AffiliationKind::Academic
        );
        assert_eq!(filter.classify("Pfizer Inc."), AffiliationKind::NonAcademic);
        assert_eq!(
            filter.classify("Acme Biotech Inc."),
            AffiliationKind::NonAcademic
        );
    }

    #[test]
    fn test_custom_keywords_are_normalized() {
        let filter = AffiliationFilter::new([" School ", "", "CLINIC"]);

        assert_eq!(filter.keywords(), &["school", "clinic"]);
        assert_eq!(
            filter.classify("Harvard Medical School"),
            AffiliationKind::Academic
        );
        // "university" is no longer a keyword
        assert_eq!(
            filter.classify("Stanford University"),
            AffiliationKind::NonAcademic
        );
    }

    #[test]
    fn test_single_company_author() {
        let filter = AffiliationFilter::default();
        let records = vec![record(
            "7",
            vec![Author::new("Doe J")
                .affiliation("Acme Biotech Inc.")
                .email("x@acme.com")],
        )];

        let rows = filter.filter_non_academic(&records);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pubmed_id, "7");
        assert_eq!(rows[0].non_academic_authors, "Doe J");
        assert_eq!(rows[0].company_affiliations, "Acme Biotech Inc.");
        assert_eq!(rows[0].corresponding_email, "x@acme.com");
    }

    #[test]
    fn test_record_without_authors_is_dropped() {
        let filter = AffiliationFilter::default();
        assert!(filter
            .filter_non_academic(&[record("1", vec![])])
            .is_empty());
    }

    #[test]
    fn test_all_academic_record_is_dropped() {
        let filter = AffiliationFilter::default();
        let records = vec![record(
            "1",
            vec![
                Author::new("A").affiliation("UNIVERSITY of Oxford"),
                Author::new("B").affiliation("Imperial College London"),
                Author::new("C").affiliation("Broad Institute"),
                Author::new("D").affiliation("Jackson Lab"),
                Author::new("E").affiliation("Mayo Clinic Hospital"),
            ],
        )];

        assert!(filter.filter_non_academic(&records).is_empty());
    }

    #[test]
    fn test_empty_affiliations_are_neutral() {
        let filter = AffiliationFilter::default();

        // Only empty affiliations: no row
        let only_empty = record("1", vec![Author::new("A"), Author::new("B").email("b@x.com")]);
        assert!(filter.report_row(&only_empty).is_none());

        // Empty affiliation next to a company author: excluded from the lists
        let mixed = record(
            "2",
            vec![Author::new("A"), Author::new("B").affiliation("Genentech")],
        );
        let row = filter.report_row(&mixed).unwrap();
        assert_eq!(row.non_academic_authors, "B");
        assert_eq!(row.company_affiliations, "Genentech");
    }

    #[test]
    fn test_authors_and_affiliations_stay_aligned() {
        let filter = AffiliationFilter::default();
        let records = vec![record(
            "3",
            vec![
                Author::new("Alpha").affiliation("Novartis AG"),
                Author::new("Beta").affiliation("Harvard University"),
                Author::new("Gamma"),
                Author::new("Delta").affiliation("Roche Diagnostics GmbH"),
            ],
        )];

        let rows = filter.filter_non_academic(&records);
        let names: Vec<_> = rows[0].non_academic_authors.split(LIST_SEPARATOR).collect();
        let affiliations: Vec<_> = rows[0].company_affiliations.split(LIST_SEPARATOR).collect();

        assert_eq!(names.len(), affiliations.len());
        assert_eq!(names, vec!["Alpha", "Delta"]);
        assert_eq!(affiliations, vec!["Novartis AG", "Roche Diagnostics GmbH"]);
    }

    #[test]
    fn test_last_nonempty_email_wins_across_all_authors() {
        let filter = AffiliationFilter::default();
        let records = vec![record(
            "4",
            vec![
                Author::new("A").affiliation("Pfizer Inc.").email("a@pfizer.com"),
                Author::new("B")
                    .affiliation("Yale University")
                    .email("b@yale.edu"),
                Author::new("C").affiliation("Merck & Co."),
            ],
        )];

        let rows = filter.filter_non_academic(&records);
        // B is academic but still supplies the last email
        assert_eq!(rows[0].corresponding_email, "b@yale.edu");
    }

    #[test]
    fn test_missing_email_uses_placeholder() {
        let filter = AffiliationFilter::default();
        let records = vec![record("5", vec![Author::new("A").affiliation("Pfizer Inc.")])];

        let rows = filter.filter_non_academic(&records);
        assert_eq!(rows[0].corresponding_email, EMAIL_NOT_AVAILABLE);
    }

    #[test]
    fn test_preserves_input_order() {
        let filter = AffiliationFilter::default();
        let records = vec![
            record("b", vec![Author::new("X").affiliation("Bayer AG")]),
            record("a", vec![Author::new("Y").affiliation("MIT University")]),
            record("c", vec![Author::new("Z").affiliation("Sanofi")]),
        ];

        let ids: Vec<_> = filter
            .filter_non_academic(&records)
            .into_iter()
            .map(|row| row.pubmed_id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
