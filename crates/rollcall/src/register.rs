//! The attendance register.
//!
//! [`Register`] holds the roster and attendance log in memory on top of a
//! [`RecordStore`]. Every operation takes plain values and returns a result;
//! there is no global state and no UI coupling.
//!
//! Persistence follows the desktop workflow it replaces: adding a student
//! only changes memory until [`Register::save_all`], while removing a
//! student and marking attendance write through immediately. A failed
//! write-through rolls memory back, so callers never see a half-applied
//! change.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::export;
use crate::merge::merge_attendance;
use crate::model::{AttendanceRecord, AttendanceStatus, Student};
use crate::stats::{attendance_percentage, AttendanceTally, Percentage};
use crate::storage::RecordStore;

/// One roster student's status on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRow {
    /// Student id.
    pub student_id: String,
    /// Student name.
    pub name: String,
    /// Recorded status, or `None` if nothing was recorded that day.
    pub status: Option<AttendanceStatus>,
}

/// A roster entry with its attendance summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    /// Student id.
    pub student_id: String,
    /// Student name.
    pub name: String,
    /// Present and total counts.
    pub tally: AttendanceTally,
    /// Rounded attendance percentage.
    pub percentage: Percentage,
}

/// What a student removal took with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalSummary {
    /// The removed student.
    pub student: Student,
    /// Attendance records deleted by the cascade.
    pub records_removed: usize,
}

/// In-memory roster and attendance log backed by a [`RecordStore`].
#[derive(Debug)]
pub struct Register {
    store: RecordStore,
    students: Vec<Student>,
    attendance: Vec<AttendanceRecord>,
}

impl Register {
    /// Open a register and load both files.
    #[must_use]
    pub fn open(store: RecordStore) -> Self {
        let mut register = Self {
            store,
            students: Vec::new(),
            attendance: Vec::new(),
        };
        register.load_all();
        register
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The current roster, in insertion order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Every attendance record, in file order.
    #[must_use]
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Look up a student by id.
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Replace memory with what is on disk.
    pub fn load_all(&mut self) {
        self.students = self.store.load_students();
        self.attendance = self.store.load_attendance();
        debug!(
            "Register loaded: {} students, {} records",
            self.students.len(),
            self.attendance.len()
        );
    }

    /// Write the roster, then the attendance log.
    ///
    /// # Errors
    ///
    /// Returns the first write failure. Files already written stay written.
    pub fn save_all(&self) -> Result<()> {
        self.store.save_students(&self.students)?;
        self.store.save_attendance(&self.attendance)?;
        info!(
            "Saved {} students and {} attendance records",
            self.students.len(),
            self.attendance.len()
        );
        Ok(())
    }

    /// Add a student to the roster. Not persisted until [`Register::save_all`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] for a blank id or name,
    /// [`Error::InvalidField`] if either contains a comma or line break, and
    /// [`Error::DuplicateStudent`] if the id is taken. The roster is
    /// unchanged on error.
    pub fn add_student(&mut self, id: &str, name: &str) -> Result<&Student> {
        let id = required_field("id", id)?;
        let name = required_field("name", name)?;

        if self.student(id).is_some() {
            return Err(Error::DuplicateStudent { id: id.to_string() });
        }

        self.students.push(Student::new(id, name));
        info!("Added student {id}");
        let added = self
            .students
            .last()
            .ok_or_else(|| Error::internal("roster empty after push"))?;
        Ok(added)
    }

    /// Remove a student and every attendance record for them, then persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] for an unknown id, or the write
    /// error if persisting fails. On any error, memory is as it was before
    /// the call.
    pub fn remove_student(&mut self, id: &str) -> Result<RemovalSummary> {
        let id = id.trim();
        let position = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::StudentNotFound { id: id.to_string() })?;

        let previous_students = self.students.clone();
        let previous_attendance = self.attendance.clone();

        let student = self.students.remove(position);
        let before = self.attendance.len();
        self.attendance.retain(|r| r.student_id != id);
        let records_removed = before - self.attendance.len();

        if let Err(err) = self.store.save_students(&self.students) {
            self.students = previous_students;
            self.attendance = previous_attendance;
            return Err(err);
        }
        if let Err(err) = self.store.save_attendance(&self.attendance) {
            if let Err(restore) = self.store.save_students(&previous_students) {
                warn!("Could not restore roster after failed removal: {restore}");
            }
            self.students = previous_students;
            self.attendance = previous_attendance;
            return Err(err);
        }

        info!("Removed student {id} and {records_removed} attendance records");
        Ok(RemovalSummary {
            student,
            records_removed,
        })
    }

    /// Set `status` for each of `student_ids` on `date`, then persist.
    ///
    /// Existing records for the same date and student are overwritten; new
    /// ones are appended. Returns how many records the batch touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] for an empty batch,
    /// [`Error::StudentNotFound`] if any id is not on the roster, or the
    /// write error if persisting fails. On any error, memory is unchanged.
    pub fn mark_attendance<S: AsRef<str>>(
        &mut self,
        date: NaiveDate,
        student_ids: &[S],
        status: AttendanceStatus,
    ) -> Result<usize> {
        if student_ids.is_empty() {
            return Err(Error::NoSelection {
                action: "marking attendance",
            });
        }

        let mut seen = HashSet::new();
        let mut edits = Vec::with_capacity(student_ids.len());
        for id in student_ids {
            let id = id.as_ref().trim();
            if self.student(id).is_none() {
                return Err(Error::StudentNotFound { id: id.to_string() });
            }
            if seen.insert(id) {
                edits.push((id.to_string(), status.clone()));
            }
        }

        let merged = merge_attendance(&self.attendance, date, &edits);
        self.store.save_attendance(&merged)?;
        self.attendance = merged;

        info!("Marked {} students {status} on {date}", edits.len());
        Ok(edits.len())
    }

    /// Attendance percentage for one student across all dates.
    #[must_use]
    pub fn percentage_for(&self, student_id: &str) -> Percentage {
        attendance_percentage(&self.attendance, student_id.trim())
    }

    /// Every roster student with their status on `date`, in roster order.
    #[must_use]
    pub fn attendance_snapshot(&self, date: NaiveDate) -> Vec<SnapshotRow> {
        let by_student: HashMap<&str, &AttendanceStatus> = self
            .attendance
            .iter()
            .filter(|r| r.date == date)
            .map(|r| (r.student_id.as_str(), &r.status))
            .collect();

        self.students
            .iter()
            .map(|s| SnapshotRow {
                student_id: s.id.clone(),
                name: s.name.clone(),
                status: by_student.get(s.id.as_str()).map(|&st| st.clone()),
            })
            .collect()
    }

    /// Write `attendance_export_<date>.csv` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the write error; an earlier export for the date is kept.
    pub fn export_snapshot(&self, date: NaiveDate, dir: &Path) -> Result<PathBuf> {
        export::write_export(dir, date, &self.attendance_snapshot(date))
    }

    /// Every roster student with their attendance summary.
    #[must_use]
    pub fn roster_summary(&self) -> Vec<RosterRow> {
        self.students
            .iter()
            .map(|s| {
                let tally = AttendanceTally::for_student(&self.attendance, &s.id);
                RosterRow {
                    student_id: s.id.clone(),
                    name: s.name.clone(),
                    tally,
                    percentage: tally.percentage(),
                }
            })
            .collect()
    }

    /// Distinct dates with at least one record, ascending.
    #[must_use]
    pub fn recorded_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.attendance.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

fn required_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::EmptyField { field });
    }
    if value.contains([',', '\n', '\r']) {
        return Err(Error::invalid_field(
            field,
            "must not contain commas or line breaks",
        ));
    }
    Ok(value)
}
