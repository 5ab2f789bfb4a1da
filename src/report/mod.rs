//! Report output: CSV file or a dump to stdout.

use comfy_table::{Attribute, Cell, Table};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::ReportRow;

/// How rows are printed when no output file is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdoutFormat {
    /// Rust debug representation of the row list
    #[default]
    Debug,
    /// Pretty-printed JSON array
    Json,
    /// Human-readable table
    Table,
}

/// What the writer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No rows; nothing written
    Empty,
    /// Rows written as CSV to this path
    Saved(PathBuf),
    /// Rows printed to the output stream
    Printed,
}

/// Report output errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write to output: {0}")]
    Stdout(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes filtered rows to a CSV file or an output stream
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    format: StdoutFormat,
}

impl ReportWriter {
    /// Create a writer that prints with the given format when no file is given
    pub fn new(format: StdoutFormat) -> Self {
        Self { format }
    }

    /// Write the report, printing notices and dumps to `out`
    pub fn write_report_to<W: Write>(
        &self,
        rows: &[ReportRow],
        destination: Option<&Path>,
        out: &mut W,
    ) -> Result<ReportOutcome, ReportError> {
        if rows.is_empty() {
            writeln!(out, "No results to save.")?;
            return Ok(ReportOutcome::Empty);
        }

        match destination {
            Some(path) => {
                write_csv(rows, path)?;
                tracing::debug!(rows = rows.len(), path = %path.display(), "Wrote CSV report");
                writeln!(out, "Results saved to {}", path.display())?;
                Ok(ReportOutcome::Saved(path.to_path_buf()))
            }
            None => {
                match self.format {
                    StdoutFormat::Debug => writeln!(out, "{:#?}", rows)?,
                    StdoutFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?,
                    StdoutFormat::Table => writeln!(out, "{}", render_table(rows))?,
                }
                Ok(ReportOutcome::Printed)
            }
        }
    }
}

/// Write rows as CSV to a file, truncating any existing file
pub fn write_csv(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let file_error = |source: csv::Error| ReportError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let writer = csv::Writer::from_path(path).map_err(file_error)?;
    write_csv_to(rows, writer).map_err(file_error)
}

/// Write rows as CSV (header plus one line per row) to any writer
pub fn write_csv_to<W: Write>(
    rows: &[ReportRow],
    mut writer: csv::Writer<W>,
) -> Result<(), csv::Error> {
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render rows as a table
pub fn render_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(ReportRow::HEADERS.to_vec());

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.pubmed_id),
            Cell::new(&row.title).add_attribute(Attribute::Bold),
            Cell::new(&row.publication_date),
            Cell::new(&row.non_academic_authors),
            Cell::new(&row.company_affiliations),
            Cell::new(&row.corresponding_email),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(id: &str, title: &str) -> ReportRow {
        ReportRow {
            pubmed_id: id.to_string(),
            title: title.to_string(),
            publication_date: "2024 Jan".to_string(),
            non_academic_authors: "Doe J, Roe R".to_string(),
            company_affiliations: "Pfizer Inc., New York, NY, Genentech".to_string(),
            corresponding_email: "j@pfizer.com".to_string(),
        }
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<ReportRow>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        let rows = reader.deserialize().map(Result::unwrap).collect();
        (headers, rows)
    }

    #[test]
    fn test_empty_rows_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut out = Vec::new();

        let outcome = ReportWriter::default()
            .write_report_to(&[], Some(&path), &mut out)
            .unwrap();

        assert_eq!(outcome, ReportOutcome::Empty);
        assert_eq!(String::from_utf8(out).unwrap(), "No results to save.\n");
        assert!(!path.exists());
    }

    #[test]
    fn test_csv_roundtrip_with_quoting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            row("1", "Plain title"),
            row("2", "Commas, \"quotes\" and\na newline"),
            row("3", "Ünïcödé title"),
        ];
        let mut out = Vec::new();

        let outcome = ReportWriter::default()
            .write_report_to(&rows, Some(&path), &mut out)
            .unwrap();

        assert_eq!(outcome, ReportOutcome::Saved(path.clone()));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Results saved to {}\n", path.display())
        );

        let (headers, parsed) = read_rows(&path);
        assert_eq!(headers, ReportRow::HEADERS.to_vec());
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_csv_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let stale = "stale content that is longer than the report\n".repeat(100);
        std::fs::write(&path, stale).unwrap();

        write_csv(&[row("1", "Fresh")], &path).unwrap();

        let (_, parsed) = read_rows(&path);
        assert_eq!(parsed, vec![row("1", "Fresh")]);
    }

    #[test]
    fn test_csv_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");

        let err = write_csv(&[row("1", "t")], &path).unwrap_err();
        match err {
            ReportError::FileWrite { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("Expected FileWrite, got {:?}", other),
        }
    }

    #[test]
    fn test_stdout_debug_dump() {
        let rows = vec![row("1", "Title")];
        let mut out = Vec::new();

        let outcome = ReportWriter::new(StdoutFormat::Debug)
            .write_report_to(&rows, None, &mut out)
            .unwrap();

        assert_eq!(outcome, ReportOutcome::Printed);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{:#?}\n", rows));
    }

    #[test]
    fn test_stdout_json_dump() {
        let rows = vec![row("1", "Title")];
        let mut out = Vec::new();

        ReportWriter::new(StdoutFormat::Json)
            .write_report_to(&rows, None, &mut out)
            .unwrap();

        let parsed: Vec<ReportRow> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_stdout_table() {
        let rows = vec![row("12345", "Table title")];
        let mut out = Vec::new();

        ReportWriter::new(StdoutFormat::Table)
            .write_report_to(&rows, None, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PubmedID"));
        assert!(text.contains("12345"));
        assert!(text.contains("Table title"));
    }
}
