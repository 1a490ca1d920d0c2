//! Line format for the roster and attendance files.
//!
//! Roster lines are `id,name`. Attendance lines are `date,id,status`. Fields
//! are comma-joined with no quoting. Splitting is bounded, so a roster name
//! keeps any commas after the first separator.

use crate::model::{format_date, parse_date, AttendanceRecord, AttendanceStatus, Student};

/// Why a line was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Fewer fields than the format requires.
    MissingFields {
        /// Fields required.
        expected: usize,
        /// Fields found.
        found: usize,
    },
    /// A required field was empty after trimming.
    EmptyField(&'static str),
    /// The date column did not parse.
    BadDate(String),
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::EmptyField(field) => write!(f, "empty {field}"),
            Self::BadDate(raw) => write!(f, "bad date '{raw}'"),
        }
    }
}

/// Decode one roster line.
///
/// # Errors
///
/// Returns a [`LineError`] if the line lacks a name or either field is empty.
pub fn decode_student(line: &str) -> Result<Student, LineError> {
    let parts: Vec<&str> = line.splitn(2, ',').collect();
    if parts.len() < 2 {
        return Err(LineError::MissingFields {
            expected: 2,
            found: parts.len(),
        });
    }
    let id = parts[0].trim();
    let name = parts[1].trim();
    if id.is_empty() {
        return Err(LineError::EmptyField("id"));
    }
    if name.is_empty() {
        return Err(LineError::EmptyField("name"));
    }
    Ok(Student::new(id, name))
}

/// Encode one roster line, without the trailing newline.
#[must_use]
pub fn encode_student(student: &Student) -> String {
    format!("{},{}", student.id, student.name)
}

/// Decode one attendance line.
///
/// # Errors
///
/// Returns a [`LineError`] for missing fields, an empty id or status, or a
/// malformed date.
pub fn decode_record(line: &str) -> Result<AttendanceRecord, LineError> {
    let parts: Vec<&str> = line.splitn(3, ',').collect();
    if parts.len() < 3 {
        return Err(LineError::MissingFields {
            expected: 3,
            found: parts.len(),
        });
    }
    let date = parse_date(parts[0]).map_err(|_| LineError::BadDate(parts[0].trim().to_string()))?;
    let student_id = parts[1].trim();
    if student_id.is_empty() {
        return Err(LineError::EmptyField("student id"));
    }
    let status = parts[2].trim();
    if status.is_empty() {
        return Err(LineError::EmptyField("status"));
    }
    Ok(AttendanceRecord::new(
        date,
        student_id,
        AttendanceStatus::parse(status),
    ))
}

/// Encode one attendance line, without the trailing newline.
#[must_use]
pub fn encode_record(record: &AttendanceRecord) -> String {
    format!(
        "{},{},{}",
        format_date(record.date),
        record.student_id,
        record.status
    )
}

/// Join encoded lines into file content, one `\n`-terminated line each.
pub fn join_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
