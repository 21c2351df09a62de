//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddTableCommand, AddUserCommand, AvailableCommand, BookCommand, CancelCommand,
    CompletionsCommand, EditReservationCommand, InitCommand, ReservationsCommand,
    ShowDataDirCommand, ShowReservationCommand, TablesCommand, UpdateTableCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tablebook::config::OutputFormat;
use tablebook::{Role, UserId};

/// Command-line tool for restaurant table reservations.
#[derive(Parser)]
#[command(name = "tablebook")]
#[command(version, about = "Book restaurant tables by day and time slot", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLEBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "TABLEBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// User id of the caller
    #[arg(long, value_name = "ID", global = true, env = "TABLEBOOK_USER")]
    pub user: Option<UserId>,

    /// Role the caller acts in (customer or admin)
    #[arg(
        long,
        value_name = "ROLE",
        global = true,
        env = "TABLEBOOK_ROLE",
        default_value = "customer"
    )]
    pub role: Role,

    /// Output format (table, json, csv, tsv)
    #[arg(
        long,
        value_name = "FORMAT",
        global = true,
        env = "TABLEBOOK_OUTPUT_FORMAT",
        value_parser = parse_output_format
    )]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value)
        .ok_or_else(|| format!("unknown format '{value}' (expected table, json, csv or tsv)"))
}

/// Whether the raw command line, or `env_format` failing that, asks for JSON.
///
/// Used to report a command line clap rejected, when no [`Cli`] exists.
pub fn wants_json<I, S>(args: I, env_format: Option<&str>) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let mut requested: Option<String> = None;
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if arg == "--" {
            break;
        }
        if arg == "--format" {
            requested = args.next().map(|value| value.as_ref().to_string());
        } else if let Some(value) = arg.strip_prefix("--format=") {
            requested = Some(value.to_string());
        }
    }

    requested
        .as_deref()
        .or(env_format)
        .and_then(OutputFormat::parse)
        == Some(OutputFormat::Json)
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// List tables free for a party at a day and slot
    Available(AvailableCommand),

    /// Book a table
    Book(BookCommand),

    /// List reservations (your own, or all with --all / --date as admin)
    Reservations(ReservationsCommand),

    /// Show one reservation
    ShowReservation(ShowReservationCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Change a reservation's day, slot, party size or status (admin)
    EditReservation(EditReservationCommand),

    /// List tables (admin)
    Tables(TablesCommand),

    /// Register a table (admin)
    AddTable(AddTableCommand),

    /// Change a table's capacity or active flag (admin)
    UpdateTable(UpdateTableCommand),

    /// Add a user to the directory
    AddUser(AddUserCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Show the resolved data directory
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
