//! First-run seed data.
//!
//! A fresh data directory gets a ten-student roster and three days of
//! attendance so the register is usable straight away.

/// Roster written when the roster file does not exist.
pub const SEED_STUDENTS: &[(&str, &str)] = &[
    ("S001", "Rahul Sharma"),
    ("S002", "Neha Patil"),
    ("S003", "Amit Verma"),
    ("S004", "Priya Singh"),
    ("S005", "Arjun Mehta"),
    ("S006", "Simran Kaur"),
    ("S007", "Rohan Deshmukh"),
    ("S008", "Sneha Kulkarni"),
    ("S009", "Vikram Joshi"),
    ("S010", "Ananya Gupta"),
];

/// Seed days and their statuses, indexed like [`SEED_STUDENTS`].
pub const SEED_DAYS: &[(&str, [char; 10])] = &[
    (
        "2025-01-01",
        ['P', 'A', 'P', 'P', 'A', 'P', 'P', 'A', 'P', 'P'],
    ),
    (
        "2025-01-02",
        ['A', 'P', 'P', 'P', 'P', 'P', 'A', 'P', 'P', 'P'],
    ),
    (
        "2025-01-03",
        ['P', 'P', 'A', 'P', 'A', 'P', 'P', 'P', 'A', 'P'],
    ),
];

/// Roster file content for a first run.
#[must_use]
pub fn roster_content() -> String {
    SEED_STUDENTS
        .iter()
        .map(|(id, name)| format!("{id},{name}\n"))
        .collect()
}

/// Attendance file content for a first run.
#[must_use]
pub fn attendance_content() -> String {
    let mut out = String::new();
    for (date, statuses) in SEED_DAYS {
        for ((id, _), status) in SEED_STUDENTS.iter().zip(statuses.iter()) {
            out.push_str(&format!("{date},{id},{status}\n"));
        }
    }
    out
}

/// What a seeding pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// The roster file was created.
    pub roster_written: bool,
    /// The attendance file was created.
    pub attendance_written: bool,
}

impl SeedOutcome {
    /// Whether anything was written.
    #[must_use]
    pub fn any(&self) -> bool {
        self.roster_written || self.attendance_written
    }
}
