//! `rollcall` - CLI for the attendance register
//!
//! Each invocation loads the roster and attendance files, runs one command,
//! and writes back whatever the command changed.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;

use rollcall::cli::{
    Cli, Command, ConfigCommand, ExportCommand, LoginCommand, MarkCommand, ShowCommand,
    StudentsCommand,
};
use rollcall::{init_logging, parse_date, Authenticator, Config, Register, StaticCredentials};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Students(cmd) => handle_students(&config, cmd),
        Command::Mark(cmd) => handle_mark(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Percentage(cmd) => {
            let register = open_register(&config)?;
            let id = cmd.id.trim();
            let Some(student) = register.student(id) else {
                anyhow::bail!("no student with id '{id}'");
            };
            println!(
                "{} {}: {}%",
                student.id,
                student.name,
                register.percentage_for(id)
            );
            Ok(())
        }
        Command::Export(cmd) => handle_export(&config, &cmd),
        Command::Login(cmd) => handle_login(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Seed missing data files if enabled, then load the register.
fn open_register(config: &Config) -> anyhow::Result<Register> {
    let store = config.record_store();
    if config.storage.seed {
        store
            .seed_if_missing()
            .with_context(|| format!("seeding data in {}", config.data_dir().display()))?;
    }
    Ok(Register::open(store))
}

fn handle_students(config: &Config, cmd: StudentsCommand) -> anyhow::Result<()> {
    let mut register = open_register(config)?;
    match cmd {
        StudentsCommand::List { json } => {
            let rows = register.roster_summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<10} {:<24} {:>8}", "ID", "Name", "Attend%");
                for row in rows {
                    println!(
                        "{:<10} {:<24} {:>8}",
                        row.student_id,
                        row.name,
                        row.percentage.to_string()
                    );
                }
            }
        }
        StudentsCommand::Add { id, name } => {
            let added = register.add_student(&id, &name)?.clone();
            register.save_all().context("saving roster")?;
            println!("Added {} {}", added.id, added.name);
        }
        StudentsCommand::Remove { id } => {
            let summary = register.remove_student(&id)?;
            println!(
                "Removed {} {} and {} attendance records",
                summary.student.id, summary.student.name, summary.records_removed
            );
        }
    }
    Ok(())
}

fn handle_mark(config: &Config, cmd: &MarkCommand) -> anyhow::Result<()> {
    let date = parse_date(&cmd.date)?;
    let mut register = open_register(config)?;
    let count = register
        .mark_attendance(date, cmd.ids.as_slice(), cmd.status.into())
        .context("saving attendance")?;
    println!("Marked {count} students {:?} on {date}", cmd.status);
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let date = parse_date(&cmd.date)?;
    let register = open_register(config)?;
    let rows = register.attendance_snapshot(date);
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Attendance for {date}");
    println!("{:<10} {:<24} {:<6}", "ID", "Name", "Status");
    for row in rows {
        let status = row
            .status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{:<10} {:<24} {:<6}", row.student_id, row.name, status);
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let date = parse_date(&cmd.date)?;
    let register = open_register(config)?;
    let dir = cmd.dir.clone().unwrap_or_else(|| config.export_dir());
    let path = register
        .export_snapshot(date, &dir)
        .context("exporting attendance")?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn handle_login(config: &Config, cmd: &LoginCommand) -> anyhow::Result<()> {
    let auth = StaticCredentials::from(&config.auth);
    let session = auth.authenticate(&cmd.username, &cmd.password)?;
    println!("Login successful. Logged in as {}", session.username);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let register = open_register(config)?;
    let store = register.store();
    let dates = register.recorded_dates();

    if json {
        let status = serde_json::json!({
            "roster_path": store.roster_path(),
            "attendance_path": store.attendance_path(),
            "students": register.students().len(),
            "attendance_records": register.attendance().len(),
            "first_date": dates.first().map(ToString::to_string),
            "last_date": dates.last().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollcall status");
        println!("---------------");
        println!("Roster:        {}", store.roster_path().display());
        println!("Attendance:    {}", store.attendance_path().display());
        println!("Students:      {}", register.students().len());
        println!("Records:       {}", register.attendance().len());
        match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => println!("Dates:         {first} .. {last}"),
            _ => println!("Dates:         none"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut value = serde_json::to_value(config)?;
                value["auth"]["password"] = serde_json::Value::from("********");
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data dir:       {}", config.data_dir().display());
                println!("  Roster file:    {}", config.storage.roster);
                println!("  Attendance:     {}", config.storage.attendance);
                println!("  Seed on start:  {}", config.storage.seed);
                println!();
                println!("[Export]");
                println!("  Directory:      {}", display_dir(&config.export_dir()));
                println!();
                println!("[Auth]");
                println!("  Username:       {}", config.auth.username);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn display_dir(path: &Path) -> String {
    if path == Path::new(".") {
        "(current directory)".to_string()
    } else {
        path.display().to_string()
    }
}
