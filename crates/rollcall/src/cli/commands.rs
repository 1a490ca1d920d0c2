//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::AttendanceStatus;

/// Roster commands.
#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List students with their attendance percentage
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a student and save the roster
    Add {
        /// Unique student id
        id: String,
        /// Student name
        name: String,
    },

    /// Remove a student and all of their attendance records
    Remove {
        /// Id of the student to remove
        id: String,
    },
}

/// Mark command arguments.
#[derive(Debug, Args)]
pub struct MarkCommand {
    /// Date to mark (YYYY-MM-DD)
    pub date: String,

    /// Status to record
    #[arg(short, long, value_enum)]
    pub status: StatusArg,

    /// Students to mark
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Date to show (YYYY-MM-DD)
    pub date: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Percentage command arguments.
#[derive(Debug, Args)]
pub struct PercentageCommand {
    /// Student id
    pub id: String,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Date to export (YYYY-MM-DD)
    pub date: String,

    /// Output directory (defaults to the configured export dir)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(short, long, env = "ROLLCALL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Attendance status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Present (P)
    Present,
    /// Absent (A)
    Absent,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Present => Self::Present,
            StatusArg::Absent => Self::Absent,
        }
    }
}
