use chrono::NaiveDate;
use sitelog_types::{LogEntry, Project};
use std::fmt;
use std::path::Path;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during export
#[derive(Debug)]
pub enum Error {
    /// Export requested with zero log entries
    EmptyInput,

    /// IO operation failed while writing the document
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "No log entries to export"),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::EmptyInput => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Fixed header row; normative for any consumer parsing the document
pub const CSV_HEADER: &str =
    "Date,Time,Project,Contact Type,Contact Person,Description,Priority,Follow-up,Follow-up Date";

/// Sentinel project label in export rows (shorter than the grouping one,
/// matching the documents the original tool produced)
const UNKNOWN: &str = "Unknown";

/// Render log entries as a CSV document, joining project names from the
/// given slice.
///
/// Project, Contact Person and Description are always quoted, with embedded
/// double-quotes doubled; literal commas in project names are replaced with
/// semicolons before quoting. Follow-up renders as `Yes`/`No`, a missing
/// follow-up date as the empty string. Output is deterministic for a given
/// input ordering.
pub fn to_csv(logs: &[LogEntry], projects: &[Project]) -> Result<String> {
    if logs.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut lines = Vec::with_capacity(logs.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for log in logs {
        let project_name = projects
            .iter()
            .find(|p| p.id == log.project_id)
            .map(|p| p.name.replace(',', ";"))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let row = [
            log.date.to_string(),
            log.time.clone(),
            quote(&project_name),
            log.contact_type.to_string(),
            quote(&log.contact_person),
            quote(&log.description),
            log.priority.to_string(),
            if log.follow_up { "Yes" } else { "No" }.to_string(),
            log.follow_up_date.map(|d| d.to_string()).unwrap_or_default(),
        ];
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

/// Write the CSV document to a file
pub fn write_csv(path: &Path, logs: &[LogEntry], projects: &[Project]) -> Result<()> {
    std::fs::write(path, to_csv(logs, projects)?)?;
    Ok(())
}

/// Download/save name the UI offers for an export made on `date`
pub fn suggested_filename(date: NaiveDate) -> String {
    format!("construction_logs_{}.csv", date)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
