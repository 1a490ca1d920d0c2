//! Core record types: students, attendance records, and their keys.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used on disk and at the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A student on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    /// User-assigned id, unique within the roster.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Student {
    /// Create a student from already-validated parts.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Whether a student attended on a given date.
///
/// Tokens other than present/absent survive a load/save cycle as `Other`
/// and never count as present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Written as `P`.
    Present,
    /// Written as `A`.
    Absent,
    /// Unrecognized token, kept verbatim.
    Other(String),
}

impl AttendanceStatus {
    /// Parse a status token. Matching is case-insensitive.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("p") || token.eq_ignore_ascii_case("present") {
            Self::Present
        } else if token.eq_ignore_ascii_case("a") || token.eq_ignore_ascii_case("absent") {
            Self::Absent
        } else {
            Self::Other(token.to_string())
        }
    }

    /// Whether this status counts toward attendance.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "P"),
            Self::Absent => write!(f, "A"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// The natural key of an attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttendanceKey {
    /// Calendar date.
    pub date: NaiveDate,
    /// Student the record belongs to.
    pub student_id: String,
}

/// One (date, student, status) fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Calendar date.
    pub date: NaiveDate,
    /// Student the record belongs to.
    pub student_id: String,
    /// Present, absent, or an unrecognized token.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(date: NaiveDate, student_id: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            date,
            student_id: student_id.into(),
            status,
        }
    }

    /// The composite key identifying this record.
    #[must_use]
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey {
            date: self.date,
            student_id: self.student_id.clone(),
        }
    }
}

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date shape pattern is valid"))
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Input is trimmed. Both the shape and the calendar are checked, so
/// `2025-1-1` and `2025-02-30` are rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when the input is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidDate {
        input: input.to_string(),
    };
    if !date_shape().is_match(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

/// Format a date the way it is written on disk.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
