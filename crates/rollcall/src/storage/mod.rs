//! Flat-file record store.
//!
//! Two files back the register: the roster and the attendance log. Loads
//! never fail; a missing or unreadable file reads as empty. Saves replace
//! the whole file by writing a sibling temp file and renaming it over the
//! target, so a failed save leaves the previous content in place.

pub mod format;
pub mod seed;

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::merge::merge_records;
use crate::model::{AttendanceRecord, Student};

pub use seed::SeedOutcome;

/// Reads and writes the roster and attendance files.
#[derive(Debug, Clone)]
pub struct RecordStore {
    roster_path: PathBuf,
    attendance_path: PathBuf,
}

impl RecordStore {
    /// Create a store over the given roster and attendance files.
    ///
    /// Nothing is touched on disk until a load, save, or seed.
    #[must_use]
    pub fn new(roster_path: impl Into<PathBuf>, attendance_path: impl Into<PathBuf>) -> Self {
        Self {
            roster_path: roster_path.into(),
            attendance_path: attendance_path.into(),
        }
    }

    /// Path to the roster file.
    #[must_use]
    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    /// Path to the attendance file.
    #[must_use]
    pub fn attendance_path(&self) -> &Path {
        &self.attendance_path
    }

    /// Load the roster. Malformed lines and repeated ids are skipped; the
    /// first entry for an id is kept.
    #[must_use]
    pub fn load_students(&self) -> Vec<Student> {
        let Some(content) = read_or_empty(&self.roster_path) else {
            return Vec::new();
        };
        let decoded = decode_lines(&self.roster_path, &content, format::decode_student);

        let mut seen = HashSet::with_capacity(decoded.len());
        let mut students = Vec::with_capacity(decoded.len());
        for student in decoded {
            if seen.contains(&student.id) {
                warn!(
                    "Skipping repeated student id {} in {}",
                    student.id,
                    self.roster_path.display()
                );
                continue;
            }
            seen.insert(student.id.clone());
            students.push(student);
        }
        debug!(
            "Loaded {} students from {}",
            students.len(),
            self.roster_path.display()
        );
        students
    }

    /// Replace the roster file with `students`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn save_students(&self, students: &[Student]) -> Result<()> {
        let content = format::join_lines(students.iter().map(format::encode_student));
        write_atomic(&self.roster_path, &content)?;
        debug!(
            "Saved {} students to {}",
            students.len(),
            self.roster_path.display()
        );
        Ok(())
    }

    /// Load every attendance record. Malformed lines are skipped.
    ///
    /// Repeated `(date, student)` keys collapse to one record at the first
    /// position, holding the status from the last line.
    #[must_use]
    pub fn load_attendance(&self) -> Vec<AttendanceRecord> {
        let Some(content) = read_or_empty(&self.attendance_path) else {
            return Vec::new();
        };
        let decoded = decode_lines(&self.attendance_path, &content, format::decode_record);
        let records = merge_records(&decoded, &[]);
        if records.len() < decoded.len() {
            warn!(
                "Collapsed {} repeated attendance lines in {}",
                decoded.len() - records.len(),
                self.attendance_path.display()
            );
        }
        debug!(
            "Loaded {} attendance records from {}",
            records.len(),
            self.attendance_path.display()
        );
        records
    }

    /// Replace the attendance file with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn save_attendance(&self, records: &[AttendanceRecord]) -> Result<()> {
        let content = format::join_lines(records.iter().map(format::encode_record));
        write_atomic(&self.attendance_path, &content)?;
        debug!(
            "Saved {} attendance records to {}",
            records.len(),
            self.attendance_path.display()
        );
        Ok(())
    }

    /// Load the attendance records for a single date, in file order.
    #[must_use]
    pub fn attendance_for_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.load_attendance()
            .into_iter()
            .filter(|r| r.date == date)
            .collect()
    }

    /// Write the seed roster and seed attendance for whichever files are absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed file cannot be written. Callers treat this
    /// as a startup failure.
    pub fn seed_if_missing(&self) -> Result<SeedOutcome> {
        let mut outcome = SeedOutcome::default();

        if !self.roster_path.exists() {
            write_atomic(&self.roster_path, &seed::roster_content())?;
            info!("Seeded roster at {}", self.roster_path.display());
            outcome.roster_written = true;
        }

        if !self.attendance_path.exists() {
            write_atomic(&self.attendance_path, &seed::attendance_content())?;
            info!("Seeded attendance at {}", self.attendance_path.display());
            outcome.attendance_written = true;
        }

        Ok(outcome)
    }
}

/// Read a file to a string, treating any failure as "no data yet".
fn read_or_empty(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            None
        }
        Err(err) => {
            warn!("Could not read {}: {err}; treating as empty", path.display());
            None
        }
    }
}

fn decode_lines<T, F>(path: &Path, content: &str, decode: F) -> Vec<T>
where
    F: Fn(&str) -> std::result::Result<T, format::LineError>,
{
    let mut out = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Ok(item) => out.push(item),
            Err(err) => warn!("Skipping {}:{}: {err}", path.display(), idx + 1),
        }
    }
    out
}

/// Replace `path` with `content` via a sibling temp file and a rename.
///
/// Creates missing parent directories. On failure the temp file is removed
/// and the previous file is left as it was.
///
/// # Errors
///
/// Returns [`Error::DirectoryCreate`] or [`Error::FileWrite`].
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp = temp_path_for(path);
    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });
    let result = written.and_then(|()| fs::rename(&tmp, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::file_write(path, source));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceStatus;
    use tempfile::TempDir;

    fn create_test_store(dir: &TempDir) -> RecordStore {
        RecordStore::new(
            dir.path().join("students.csv"),
            dir.path().join("attendance.csv"),
        )
    }

    fn date(s: &str) -> NaiveDate {
        crate::model::parse_date(s).unwrap()
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        assert!(store.load_students().is_empty());
        assert!(store.load_attendance().is_empty());
        assert!(store.attendance_for_date(date("2025-01-01")).is_empty());
    }

    #[test]
    fn test_save_and_load_students() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        let students = vec![Student::new("S001", "Alice"), Student::new("S002", "Bob")];

        store.save_students(&students).unwrap();
        assert_eq!(store.load_students(), students);
        assert_eq!(
            fs::read_to_string(store.roster_path()).unwrap(),
            "S001,Alice\nS002,Bob\n"
        );
    }

    #[test]
    fn test_save_and_load_attendance() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        let records = vec![
            AttendanceRecord::new(date("2025-01-01"), "S001", AttendanceStatus::Present),
            AttendanceRecord::new(date("2025-01-02"), "S001", AttendanceStatus::Absent),
        ];

        store.save_attendance(&records).unwrap();
        assert_eq!(store.load_attendance(), records);
    }

    #[test]
    fn test_attendance_for_date_filters() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        store
            .save_attendance(&[
                AttendanceRecord::new(date("2025-01-01"), "S001", AttendanceStatus::Present),
                AttendanceRecord::new(date("2025-01-02"), "S001", AttendanceStatus::Absent),
                AttendanceRecord::new(date("2025-01-01"), "S002", AttendanceStatus::Absent),
            ])
            .unwrap();

        let day = store.attendance_for_date(date("2025-01-01"));
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|r| r.date == date("2025-01-01")));
    }

    #[test]
    fn test_load_skips_blank_and_malformed_lines() {
        crate::logging::init_test_logging();
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        fs::write(
            store.attendance_path(),
            "2025-01-01,S001,P\n\n   \nnot-a-date,S002,P\n2025-01-01,S003\n2025-01-01,S004,a\n",
        )
        .unwrap();

        let records = store.load_attendance();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].student_id, "S004");
        assert_eq!(records[1].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_load_students_skips_repeated_ids() {
        crate::logging::init_test_logging();
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        fs::write(store.roster_path(), "S001,Alice\nS002,Bob\nS001,Alicia\n").unwrap();

        assert_eq!(
            store.load_students(),
            vec![Student::new("S001", "Alice"), Student::new("S002", "Bob")]
        );
    }

    #[test]
    fn test_load_attendance_collapses_repeated_keys() {
        crate::logging::init_test_logging();
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        fs::write(
            store.attendance_path(),
            "2025-01-01,S001,P\n2025-01-01,S002,A\n2025-01-01,S001,A\n",
        )
        .unwrap();

        assert_eq!(
            store.load_attendance(),
            vec![
                AttendanceRecord::new(date("2025-01-01"), "S001", AttendanceStatus::Absent),
                AttendanceRecord::new(date("2025-01-01"), "S002", AttendanceStatus::Absent),
            ]
        );
    }

    #[test]
    fn test_unreadable_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        // A directory where the roster file should be cannot be read as text.
        let roster = dir.path().join("students.csv");
        fs::create_dir(&roster).unwrap();
        let store = RecordStore::new(roster, dir.path().join("attendance.csv"));

        assert!(store.load_students().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        store
            .save_students(&[Student::new("S001", "Alice")])
            .unwrap();

        // Block the temp path with a directory so the write fails.
        fs::create_dir(dir.path().join("students.csv.tmp")).unwrap();
        let err = store
            .save_students(&[Student::new("S002", "Bob")])
            .unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));

        assert_eq!(store.load_students(), vec![Student::new("S001", "Alice")]);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(
            dir.path().join("nested/data/students.csv"),
            dir.path().join("nested/data/attendance.csv"),
        );

        store.save_students(&[Student::new("S001", "Alice")]).unwrap();
        assert!(store.roster_path().exists());
    }

    #[test]
    fn test_seed_if_missing_writes_both_files_once() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        let outcome = store.seed_if_missing().unwrap();
        assert!(outcome.roster_written);
        assert!(outcome.attendance_written);
        assert_eq!(store.load_students().len(), 10);
        assert_eq!(store.load_attendance().len(), 30);

        store.save_students(&[Student::new("S001", "Alice")]).unwrap();
        let outcome = store.seed_if_missing().unwrap();
        assert!(!outcome.any());
        assert_eq!(store.load_students().len(), 1);
    }

    #[test]
    fn test_seed_only_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);
        store.save_attendance(&[]).unwrap();

        let outcome = store.seed_if_missing().unwrap();
        assert!(outcome.roster_written);
        assert!(!outcome.attendance_written);
        assert!(store.load_attendance().is_empty());
    }

    #[test]
    fn test_temp_path_for() {
        let tmp = temp_path_for(Path::new("/data/students.csv"));
        assert_eq!(tmp, PathBuf::from("/data/students.csv.tmp"));
    }
}
