//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation system.
//! It provides commands for finding free tables, booking and cancelling
//! reservations, and administering tables and users.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use tablebook::config::environment::OUTPUT_FORMAT_ENV;
use tablebook::config::OutputFormat;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; help and version go to stdout and exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if !e.use_stderr() {
                let _ = e.print();
                std::process::exit(0);
            }
            let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
            let env_format = std::env::var(OUTPUT_FORMAT_ENV).ok();
            if cli::wants_json(args, env_format.as_deref()) {
                report_error(true, &CliError::InvalidArguments(usage_message(&e)));
            } else {
                let _ = e.print();
            }
            std::process::exit(4);
        }
    };

    // Route library log records to stderr based on verbosity
    if let Err(e) = tablebook::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        user: cli.user,
        role: cli.role,
        format: cli.format,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Available(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Reservations(cmd) => cmd.execute(&global),
        cli::Command::ShowReservation(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::EditReservation(cmd) => cmd.execute(&global),
        cli::Command::Tables(cmd) => cmd.execute(&global),
        cli::Command::AddTable(cmd) => cmd.execute(&global),
        cli::Command::UpdateTable(cmd) => cmd.execute(&global),
        cli::Command::AddUser(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            report_error(global.format == Some(OutputFormat::Json), &e);
            std::process::exit(e.exit_code());
        }
    }
}

/// JSON callers get a failure envelope on stdout; everyone else a line on stderr.
fn report_error(json: bool, e: &CliError) {
    if json {
        let body = serde_json::json!({
            "success": false,
            "message": e.to_string(),
            "status": e.status(),
        });
        if output::print_json(&body).is_ok() {
            return;
        }
    }
    eprintln!("Error: {e}");
}

/// First line of a clap error, without its `error: ` prefix.
fn usage_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
