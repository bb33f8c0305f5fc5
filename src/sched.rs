use log::{debug, info};

use snafu::{prelude::*, Snafu};

use std::io::Write;

use snow_scheduling::table::{RowSource, SourceLocator, Table, TableError};
use snow_scheduling::*;

pub mod config_reader;
pub mod io_csv;
pub mod io_xlsx;

use crate::sched::config_reader::AppConfig;

#[derive(Debug, Snafu)]
pub enum SchedError {
    #[snafu(display("Error reading configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Unknown provider '{provider}', expected 'xlsx' or 'csv'"))]
    UnknownProvider { provider: String },
    #[snafu(display("Configuration Error: {source}"))]
    Refresh { source: TableError },
    #[snafu(display("{source}"))]
    Selection { source: SchedulingError },
    #[snafu(display("Error reading the day from the standard input"))]
    ReadingDay { source: std::io::Error },
}

pub type SchedResult<T> = Result<T, SchedError>;

/// Splits a locator into its three identifiers, failing the way a
/// refresh on an unconfigured table does. Adapters call this first.
pub(crate) fn locator_parts(locator: &SourceLocator) -> Result<(&str, &str, &str), TableError> {
    match (&locator.credential, &locator.container, &locator.sub_table) {
        (Some(credential), Some(container), Some(sub_table)) => {
            Ok((credential, container, sub_table))
        }
        _ => Err(TableError::MissingSourceIds),
    }
}

/// Resolves the service-account key file backing the source exports.
/// The key must exist and be valid JSON.
pub(crate) fn check_credential(path: &str) -> Result<(), TableError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_| TableError::CredentialNotFound(path.to_string()))?;
    serde_json::from_str::<serde_json::Value>(&contents)
        .map_err(|_| TableError::CredentialNotFound(path.to_string()))?;
    Ok(())
}

fn make_source(provider: &str) -> SchedResult<Box<dyn RowSource>> {
    match provider {
        "xlsx" => Ok(Box::new(io_xlsx::XlsxSource)),
        "csv" => Ok(Box::new(io_csv::CsvSource)),
        p => UnknownProviderSnafu { provider: p }.fail(),
    }
}

/// Trims the day argument and folds it to the canonical casing:
/// `" monday "` becomes `"Monday"`. Only the command-line argument is
/// folded; day tokens inside the responses are matched as-is.
pub fn canonicalize_day(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn prompt_day() -> SchedResult<String> {
    print!("Day To List: ");
    std::io::stdout().flush().context(ReadingDaySnafu {})?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context(ReadingDaySnafu {})?;
    Ok(line)
}

fn print_sorted(names: &std::collections::HashSet<String>) {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();
    for name in sorted {
        println!("{}", name);
    }
}

/// Loads both tables, reconciles them, and prints the team for the day.
///
/// Returns the process exit code: 0 on success, 1 when reconciliation
/// findings stop the run. Everything else surfaces as an error, which
/// the caller maps to exit code 2.
pub fn run(config: AppConfig, day_arg: Option<String>, verbose: bool) -> SchedResult<i32> {
    info!("config: {:?}", config);
    let source = make_source(&config.provider)?;

    let responses: Table<ResponseRow> = Table::new(SourceLocator::new(
        &config.api_key_path,
        &config.workbook_path,
        &config.worksheets.responses,
    ))
    .refresh(source.as_ref())
    .context(RefreshSnafu {})?;

    let records: Table<RecordRow> = Table::new(SourceLocator::new(
        &config.api_key_path,
        &config.workbook_path,
        &config.worksheets.records,
    ))
    .refresh(source.as_ref())
    .context(RefreshSnafu {})?;

    debug!(
        "run: {:?} responses, {:?} records",
        responses.rows().len(),
        records.rows().len()
    );

    // Findings are printed but are not errors; the non-zero exit status
    // is this command's policy.
    let mut findings = false;

    let missing = find_missing(responses.rows(), records.rows());
    if !missing.is_empty() {
        println!("Users Who Do Not Exist In The Records:\n");
        print_sorted(&missing);
        println!();
        findings = true;
    }

    let duplicated = find_duplicates(responses.rows());
    if !duplicated.is_empty() {
        println!("Duplicates Found:\n");
        print_sorted(&duplicated);
        println!();
        findings = true;
    }

    if findings {
        return Ok(1);
    }

    let day = match day_arg {
        Some(d) => canonicalize_day(&d),
        None => canonicalize_day(&prompt_day()?),
    };

    let roster = run_availability(
        responses.rows(),
        records.rows(),
        &day,
        &TeamRules::DEFAULT_RULES,
    )
    .context(SelectionSnafu {})?;

    if verbose {
        println!("DEBUG DATA:");
        for entry in roster.pool.iter() {
            println!("{}", entry);
        }
        println!();
    }

    for member in roster.team.iter() {
        println!("{}", member);
    }
    Ok(0)
}
