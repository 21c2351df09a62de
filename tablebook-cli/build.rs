//! Build script for tablebook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("tablebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book restaurant tables by day and time slot")
        .long_about(
            "Command-line tool for restaurant table availability, bookings and floor administration",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("TABLEBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("TABLEBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("TABLEBOOK_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("User id of the caller")
                .value_name("ID")
                .global(true)
                .env("TABLEBOOK_USER"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role the caller acts in (customer or admin)")
                .value_name("ROLE")
                .global(true)
                .default_value("customer")
                .env("TABLEBOOK_ROLE"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (table, json, csv, tsv)")
                .value_name("FORMAT")
                .global(true)
                .env("TABLEBOOK_OUTPUT_FORMAT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database, optionally seeding tables and a config file"),
            Command::new("available")
                .about("List tables free for a party at a day and slot")
                .long_about("Show active tables that seat the party and are not booked"),
            Command::new("book")
                .about("Book a table")
                .long_about("Reserve a table for the caller at a day and time slot"),
            Command::new("reservations")
                .about("List reservations")
                .long_about("List the caller's reservations, or all or one day's as admin"),
            Command::new("show-reservation")
                .about("Show one reservation")
                .long_about("Show a reservation to its owner or an admin"),
            Command::new("cancel")
                .about("Cancel a reservation")
                .long_about("Cancel a reservation, freeing its table for the slot"),
            Command::new("edit-reservation")
                .about("Change a reservation (admin)")
                .long_about("Change a reservation's day, slot, party size or status"),
            Command::new("tables")
                .about("List tables (admin)")
                .long_about("List every table, or only the active ones"),
            Command::new("add-table")
                .about("Register a table (admin)")
                .long_about("Register a table with a unique number and a capacity"),
            Command::new("update-table")
                .about("Change a table (admin)")
                .long_about("Change a table's capacity or whether it can be booked"),
            Command::new("add-user")
                .about("Add a user to the directory")
                .long_about("Add a customer or admin; the first user needs no caller"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a tablebook configuration file for errors"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the tablebook data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("tablebook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
