//! Attendance percentages.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::AttendanceRecord;

/// Present and total record counts for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceTally {
    /// Records marked present.
    pub present: usize,
    /// All records for the student.
    pub total: usize,
}

impl AttendanceTally {
    /// Count the records for `student_id`.
    #[must_use]
    pub fn for_student(records: &[AttendanceRecord], student_id: &str) -> Self {
        records
            .iter()
            .filter(|r| r.student_id == student_id)
            .fold(Self::default(), |mut tally, r| {
                tally.total += 1;
                if r.status.is_present() {
                    tally.present += 1;
                }
                tally
            })
    }

    /// Present share as a percentage, or zero with no records.
    #[must_use]
    pub fn percentage(&self) -> Percentage {
        if self.total == 0 {
            return Percentage::ZERO;
        }
        #[allow(clippy::cast_precision_loss)]
        let raw = self.present as f64 * 100.0 / self.total as f64;
        Percentage::rounded(raw)
    }
}

/// A percentage rounded to two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Round `value` half away from zero to two decimals.
    #[must_use]
    pub fn rounded(value: f64) -> Self {
        Self((value * 100.0).round() / 100.0)
    }

    /// The rounded value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Attendance percentage for `student_id` across every recorded date.
#[must_use]
pub fn attendance_percentage(records: &[AttendanceRecord], student_id: &str) -> Percentage {
    AttendanceTally::for_student(records, student_id).percentage()
}
