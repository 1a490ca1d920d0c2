//! `rollcall` - student roster and daily attendance register
//!
//! This library keeps a roster of students and a per-date present/absent log
//! in two flat files, and provides the merge, percentage, and export logic
//! on top of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod merge;
pub mod model;
pub mod register;
pub mod stats;
pub mod storage;

pub use auth::{Authenticator, Session, StaticCredentials};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use merge::{merge_attendance, merge_records};
pub use model::{parse_date, AttendanceKey, AttendanceRecord, AttendanceStatus, Student};
pub use register::{Register, RemovalSummary, RosterRow, SnapshotRow};
pub use stats::{attendance_percentage, AttendanceTally, Percentage};
pub use storage::{RecordStore, SeedOutcome};
