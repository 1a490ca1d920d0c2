//! Per-date attendance export.
//!
//! Writes `attendance_export_<date>.csv` with a `StudentID,Name,Status`
//! header and one row per roster student. Students without a record for the
//! date get an empty status.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::model::format_date;
use crate::register::SnapshotRow;
use crate::storage::format::join_lines;
use crate::storage::write_atomic;

/// Header line of an export file.
pub const EXPORT_HEADER: &str = "StudentID,Name,Status";

/// File name of the export for `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("attendance_export_{}.csv", format_date(date))
}

/// Render snapshot rows as export file content.
#[must_use]
pub fn render_export(rows: &[SnapshotRow]) -> String {
    let body = rows.iter().map(|row| {
        let status = row
            .status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        format!("{},{},{}", row.student_id, row.name, status)
    });
    join_lines(std::iter::once(EXPORT_HEADER.to_string()).chain(body))
}

/// Write the export for `date` into `dir` and return the file path.
///
/// # Errors
///
/// Returns an error if the file cannot be written. An existing export for
/// the same date is left as it was.
pub fn write_export(dir: &Path, date: NaiveDate, rows: &[SnapshotRow]) -> Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    write_atomic(&path, &render_export(rows))?;
    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}
