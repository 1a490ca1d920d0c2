//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure for the `rollcall` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExportCommand, LoginCommand, MarkCommand, PercentageCommand, ShowCommand,
    StatusArg, StatusCommand, StudentsCommand,
};

use crate::logging::Verbosity;

/// rollcall - Keep a class roster and daily attendance
///
/// Stores students and present/absent marks in two plain text files and
/// reports per-student attendance percentages.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the roster
    #[command(subcommand)]
    Students(StudentsCommand),

    /// Mark students present or absent on a date
    Mark(MarkCommand),

    /// Show every student's status on a date
    Show(ShowCommand),

    /// Show a student's attendance percentage
    Percentage(PercentageCommand),

    /// Export a date's attendance to CSV
    Export(ExportCommand),

    /// Check login credentials
    Login(LoginCommand),

    /// Show data file locations and counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rollcall");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["rollcall", "-q", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["rollcall", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_parse_students_add() {
        let cli = Cli::try_parse_from(["rollcall", "students", "add", "S011", "Kiran Rao"]).unwrap();
        match cli.command {
            Command::Students(StudentsCommand::Add { id, name }) => {
                assert_eq!(id, "S011");
                assert_eq!(name, "Kiran Rao");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mark() {
        let cli = Cli::try_parse_from([
            "rollcall",
            "mark",
            "2025-01-02",
            "--status",
            "absent",
            "S001",
            "S002",
        ])
        .unwrap();
        match cli.command {
            Command::Mark(cmd) => {
                assert_eq!(cmd.date, "2025-01-02");
                assert_eq!(cmd.status, StatusArg::Absent);
                assert_eq!(cmd.ids, vec!["S001", "S002"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mark_requires_ids() {
        let result = Cli::try_parse_from(["rollcall", "mark", "2025-01-02", "-s", "present"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_export_with_dir() {
        let cli =
            Cli::try_parse_from(["rollcall", "export", "2025-01-02", "--dir", "/tmp/out"]).unwrap();
        match cli.command {
            Command::Export(cmd) => assert_eq!(cmd.dir, Some(PathBuf::from("/tmp/out"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["rollcall", "-c", "/custom/config.toml", "students", "list"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["rollcall", "login", "-u", "admin", "-p", "12345"]).unwrap();
        assert!(matches!(cli.command, Command::Login(_)));
    }
}
