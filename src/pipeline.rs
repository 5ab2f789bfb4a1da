//! The search -> fetch -> filter pipeline.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::filter::AffiliationFilter;
use crate::models::ReportRow;
use crate::report::{ReportError, ReportOutcome, ReportWriter};
use crate::sources::{PubMedSource, Source, SourceError};

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Search failed: {0}")]
    Search(#[source] SourceError),

    #[error("Fetching record details failed: {0}")]
    Fetch(#[source] SourceError),
}

impl PipelineError {
    /// The underlying source error
    pub fn source_error(&self) -> &SourceError {
        match self {
            PipelineError::Search(e) | PipelineError::Fetch(e) => e,
        }
    }
}

/// Errors from a whole invocation, from client setup to the written report
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("Failed to set up PubMed client: {0}")]
    Client(#[source] SourceError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Identifiers returned by the search stage
    pub ids_found: usize,
    /// Records returned by the detail stage
    pub records_fetched: usize,
    /// Rows kept by the affiliation filter, in record order
    pub rows: Vec<ReportRow>,
}

/// Run search, detail fetch and affiliation filtering for one query.
///
/// Each stage finishes before the next starts; the first error aborts the run.
pub async fn run(
    source: &dyn Source,
    filter: &AffiliationFilter,
    query: &str,
    max_results: usize,
) -> Result<PipelineReport, PipelineError> {
    let ids = source
        .search_ids(query, max_results)
        .await
        .map_err(PipelineError::Search)?;
    tracing::info!(source = source.name(), count = ids.len(), "Search complete");

    let records = source
        .fetch_summaries(&ids)
        .await
        .map_err(PipelineError::Fetch)?;
    tracing::debug!(count = records.len(), "Fetched record details");

    let rows = filter.filter_non_academic(&records);

    Ok(PipelineReport {
        ids_found: ids.len(),
        records_fetched: records.len(),
        rows,
    })
}

/// Query PubMed with `config` and write the report.
///
/// The report goes to `destination` as CSV, or to `out` when no destination
/// is given. Notices are written to `out` too. Nothing is written when a
/// pipeline stage fails.
pub async fn execute<W: Write>(
    config: &Config,
    query: &str,
    destination: Option<&Path>,
    writer: &ReportWriter,
    out: &mut W,
) -> Result<ReportOutcome, ExecuteError> {
    let source = PubMedSource::from_config(config).map_err(ExecuteError::Client)?;
    let filter = AffiliationFilter::from_config(&config.filter);

    let report = run(&source, &filter, query, config.search.max_results).await?;
    tracing::info!(
        ids = report.ids_found,
        records = report.records_fetched,
        rows = report.rows.len(),
        "Filtering complete"
    );

    Ok(writer.write_report_to(&report.rows, destination, out)?)
}
