//! Rendering records as a table, JSON envelope, CSV or TSV.
//!
//! Listings and single records share one renderer. JSON output is always
//! the `{success, count?, message?, data?, status}` envelope; the other
//! formats print a header row followed by one row per record.

use std::io::Write;

use serde::Serialize;
use tablebook::config::OutputFormat;
use tablebook::response::Response;
use tablebook::service::Outcome;
use tablebook::{ExecutionResult, ReservationDetails, Table, User};

use crate::error::CliError;
use crate::utils::format_timestamp;

/// A record that can be laid out in columns.
pub trait Columns {
    /// Column headers for CSV/TSV output, lowercase.
    const HEADERS: &'static [&'static str];

    /// One cell per header; empty for a missing value.
    fn cells(&self) -> Vec<String>;
}

impl Columns for Table {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "table_number",
        "capacity",
        "active",
        "created_at",
        "updated_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.table_number.to_string(),
            self.capacity.to_string(),
            self.is_active.to_string(),
            format_timestamp(self.created_at),
            format_timestamp(self.updated_at),
        ]
    }
}

impl Columns for ReservationDetails {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "time_slot",
        "table_number",
        "guests",
        "status",
        "user",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        let r = &self.reservation;
        vec![
            r.id.to_string(),
            r.date.to_string(),
            r.time_slot.to_string(),
            self.table.table_number.to_string(),
            r.number_of_guests.to_string(),
            r.status.to_string(),
            self.user
                .as_ref()
                .map_or_else(|| r.user_id.to_string(), |u| u.email.clone()),
            format_timestamp(r.created_at),
        ]
    }
}

impl Columns for User {
    const HEADERS: &'static [&'static str] = &["id", "name", "email", "role", "created_at"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            format_timestamp(self.created_at),
        ]
    }
}

/// Prints a list, with its count in JSON output.
pub fn print_list<T: Columns + Serialize>(
    format: OutputFormat,
    items: Vec<T>,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&Response::list(items)),
        OutputFormat::Table => format_as_table(&items),
        OutputFormat::Csv => format_as_delimited(&items, b','),
        OutputFormat::Tsv => format_as_delimited(&items, b'\t'),
    }
}

/// Prints one record wrapped in `response`.
///
/// The message goes to stderr for the non-JSON formats so that piped
/// CSV and TSV stay clean.
pub fn print_record<T: Columns + Serialize>(
    format: OutputFormat,
    response: Response<T>,
    quiet: bool,
) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(&response);
    }

    if let (Some(message), false) = (&response.message, quiet) {
        eprintln!("{message}");
    }
    let rows: Vec<T> = response.data.into_iter().collect();
    match format {
        OutputFormat::Csv => format_as_delimited(&rows, b','),
        OutputFormat::Tsv => format_as_delimited(&rows, b'\t'),
        _ => format_as_table(&rows),
    }
}

/// Prints a mutating request's result: the stored record, or the plan of a dry run.
pub fn print_outcome<T: Columns + Serialize>(
    format: OutputFormat,
    quiet: bool,
    outcome: Outcome<T>,
    respond: impl FnOnce(T) -> Response<T>,
) -> Result<(), CliError> {
    if outcome.execution.dry_run {
        return print_dry_run(format, &outcome.execution);
    }
    match outcome.record {
        Some(record) => print_record(format, respond(record), quiet),
        None => Ok(()),
    }
}

/// Reports what a dry run would have done.
pub fn print_dry_run(format: OutputFormat, execution: &ExecutionResult) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        let response = Response::ok(&execution.actions_taken)
            .with_message("Dry run: no changes were made");
        return print_json(&response);
    }

    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in execution.actions_taken.iter().enumerate() {
        eprintln!("  {}. {action}", i + 1);
    }
    if !execution.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &execution.warnings {
            eprintln!("  - {warning}");
        }
    }
    Ok(())
}

/// Prints any serializable value as pretty JSON followed by a newline.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

/// Writes pretty JSON and a trailing newline.
pub fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut out, value).map_err(json_error)?;
    writeln!(out)?;
    Ok(())
}

/// Format records as a human-readable table.
fn format_as_table<T: Columns>(items: &[T]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_table(&mut handle, items)
}

/// Writes a tab-aligned table with an uppercase header.
pub fn write_table<W: Write, T: Columns>(mut out: W, items: &[T]) -> Result<(), CliError> {
    let header_line = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for item in items {
        let cells: Vec<String> = item
            .cells()
            .into_iter()
            .map(|c| if c.is_empty() { "-".to_string() } else { c })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}

/// Format records as delimited output (CSV or TSV).
fn format_as_delimited<T: Columns>(items: &[T], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    write_delimited(stdout.lock(), items, delimiter)
}

/// Writes a header row and one row per record.
pub fn write_delimited<W: Write, T: Columns>(
    out: W,
    items: &[T],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(T::HEADERS).map_err(csv_error)?;
    for item in items {
        writer.write_record(item.cells()).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
