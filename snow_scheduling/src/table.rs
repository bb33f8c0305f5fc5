//! The table abstraction: typed snapshots of rows pulled from an
//! external tabular source.
//!
//! A [`Table`] is a value. Refreshing never mutates in place: it
//! produces a new table from the same locator, so a failed refresh
//! cannot corrupt the snapshot a caller already holds.

use log::debug;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

use crate::config::{Experience, Position, RecordRow, ResponseRow};

/// A single cell as delivered by a source adapter.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RawValue {
    Str(String),
    Num(i64),
    /// A sequence of tokens, for sources that already deliver lists.
    Seq(Vec<String>),
}

/// One row of named fields, before normalization.
pub type RawRow = HashMap<String, RawValue>;

/// Identifies where a table lives at its source: a credential
/// reference, a container (workbook, directory, ...) and a sub-table
/// (worksheet, file, ...) within it.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SourceLocator {
    pub credential: Option<String>,
    pub container: Option<String>,
    pub sub_table: Option<String>,
}

impl SourceLocator {
    pub fn new(credential: &str, container: &str, sub_table: &str) -> SourceLocator {
        SourceLocator {
            credential: Some(credential.to_string()),
            container: Some(container.to_string()),
            sub_table: Some(sub_table.to_string()),
        }
    }
}

/// Errors surfaced while refreshing a table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableError {
    /// One of the source identifiers was not configured.
    MissingSourceIds,
    /// The credential reference could not be resolved.
    CredentialNotFound(String),
    /// The named container does not exist at the source.
    ContainerNotFound(String),
    /// The named sub-table does not exist within the container.
    SubTableNotFound(String),
    /// The container exists but could not be read.
    UnreadableSource(String),
    /// A row did not fit the requested shape.
    MalformedRow { lineno: usize, message: String },
}

impl Error for TableError {}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::MissingSourceIds => {
                write!(f, "Credential, container and sub-table must all be provided")
            }
            TableError::CredentialNotFound(path) => {
                write!(f, "Credential file '{}' not found", path)
            }
            TableError::ContainerNotFound(name) => write!(f, "Container '{}' not found", name),
            TableError::SubTableNotFound(name) => write!(f, "Sub-table '{}' not found", name),
            TableError::UnreadableSource(msg) => write!(f, "Source could not be read: {}", msg),
            TableError::MalformedRow { lineno, message } => {
                write!(f, "Malformed row {}: {}", lineno, message)
            }
        }
    }
}

/// The source adapter contract. Given a fully specified locator,
/// return the raw rows of the sub-table or fail.
pub trait RowSource {
    fn fetch(&self, locator: &SourceLocator) -> Result<Vec<RawRow>, TableError>;
}

/// A row shape that can be normalized from a raw row.
pub trait TableRow: Sized {
    fn from_raw(raw: &RawRow, lineno: usize) -> Result<Self, TableError>;
}

fn get_str(raw: &RawRow, field: &str, lineno: usize) -> Result<String, TableError> {
    match raw.get(field) {
        Some(RawValue::Str(s)) => Ok(s.clone()),
        Some(RawValue::Num(n)) => Ok(n.to_string()),
        Some(RawValue::Seq(_)) => Err(TableError::MalformedRow {
            lineno,
            message: format!("field '{}' holds a sequence, expected text", field),
        }),
        None => Err(TableError::MalformedRow {
            lineno,
            message: format!("missing field '{}'", field),
        }),
    }
}

fn get_count(raw: &RawRow, field: &str, lineno: usize) -> Result<u64, TableError> {
    let malformed = |message: String| TableError::MalformedRow { lineno, message };
    match raw.get(field) {
        Some(RawValue::Num(n)) if *n >= 0 => Ok(*n as u64),
        Some(RawValue::Num(n)) => {
            Err(malformed(format!("field '{}' is negative: {}", field, n)))
        }
        Some(RawValue::Str(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(format!("field '{}' is not a count: '{}'", field, s))),
        _ => Err(malformed(format!("missing numeric field '{}'", field))),
    }
}

impl TableRow for ResponseRow {
    /// Normalizes one response: trims the name, splits the day list
    /// into trimmed tokens. The day tokens keep their casing. Any
    /// other field, including the `Replacement` acknowledgment
    /// checkbox, is dropped here.
    fn from_raw(raw: &RawRow, lineno: usize) -> Result<ResponseRow, TableError> {
        let name = get_str(raw, "Name", lineno)?.trim().to_string();
        let days: Vec<String> = match raw.get("Days") {
            Some(RawValue::Str(s)) => s.split(',').map(|d| d.trim().to_string()).collect(),
            Some(RawValue::Seq(tokens)) => {
                tokens.iter().map(|d| d.trim().to_string()).collect()
            }
            _ => {
                return Err(TableError::MalformedRow {
                    lineno,
                    message: "missing field 'Days'".to_string(),
                });
            }
        };
        Ok(ResponseRow { name, days })
    }
}

impl TableRow for RecordRow {
    /// Normalizes one record. Only the name is trimmed; the
    /// categorical fields are taken as-is.
    fn from_raw(raw: &RawRow, lineno: usize) -> Result<RecordRow, TableError> {
        let name = get_str(raw, "Name", lineno)?.trim().to_string();
        let completed = get_count(raw, "Completed", lineno)?;
        let experience = Experience::parse(&get_str(raw, "Experience", lineno)?);
        let position = Position::parse(&get_str(raw, "Position", lineno)?);
        Ok(RecordRow {
            name,
            completed,
            experience,
            position,
        })
    }
}

/// An immutable snapshot of typed rows plus the locator it came from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table<R> {
    locator: SourceLocator,
    rows: Vec<R>,
}

impl<R: TableRow + Clone> Table<R> {
    /// An empty table pointing at the given source location.
    pub fn new(locator: SourceLocator) -> Table<R> {
        Table {
            locator,
            rows: Vec::new(),
        }
    }

    /// A table pre-seeded with rows, with no source attached. Used for
    /// in-memory data, mostly in tests.
    pub fn seeded(rows: Vec<R>) -> Table<R> {
        Table {
            locator: SourceLocator::default(),
            rows,
        }
    }

    /// The current snapshot, empty if never refreshed.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Fetches the sub-table from the source, normalizes every row,
    /// and returns the result as a new table value. `self` is left
    /// untouched, so callers keep a usable snapshot on failure.
    ///
    /// Fails with [`TableError::MissingSourceIds`] when any of the
    /// three source identifiers is unset.
    pub fn refresh(&self, source: &dyn RowSource) -> Result<Table<R>, TableError> {
        if self.locator.credential.is_none()
            || self.locator.container.is_none()
            || self.locator.sub_table.is_none()
        {
            return Err(TableError::MissingSourceIds);
        }
        let raw_rows = source.fetch(&self.locator)?;
        debug!(
            "refresh: {:?} rows fetched for sub-table {:?}",
            raw_rows.len(),
            self.locator.sub_table
        );
        let mut rows: Vec<R> = Vec::with_capacity(raw_rows.len());
        for (idx, raw) in raw_rows.iter().enumerate() {
            rows.push(R::from_raw(raw, idx + 1)?);
        }
        Ok(Table {
            locator: self.locator.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_duplicates, run_availability, TeamRules};

    struct FixedSource {
        rows: Vec<RawRow>,
    }

    impl RowSource for FixedSource {
        fn fetch(&self, locator: &SourceLocator) -> Result<Vec<RawRow>, TableError> {
            match locator.sub_table.as_deref() {
                Some("Responses") => Ok(self.rows.clone()),
                Some(other) => Err(TableError::SubTableNotFound(other.to_string())),
                None => Err(TableError::MissingSourceIds),
            }
        }
    }

    fn raw_response(name: &str, days: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("Name".to_string(), RawValue::Str(name.to_string()));
        row.insert("Days".to_string(), RawValue::Str(days.to_string()));
        row.insert("Replacement".to_string(), RawValue::Str("No".to_string()));
        row
    }

    #[test]
    fn refresh_requires_all_identifiers() {
        let source = FixedSource { rows: vec![] };
        let locator = SourceLocator {
            credential: Some("key.json".to_string()),
            container: Some("Snow Data".to_string()),
            sub_table: None,
        };
        let table: Table<ResponseRow> = Table::new(locator);
        assert_eq!(table.refresh(&source), Err(TableError::MissingSourceIds));
        // The receiver is unchanged.
        assert!(table.rows().is_empty());
    }

    #[test]
    fn refresh_normalizes_names_and_days() {
        let source = FixedSource {
            rows: vec![
                raw_response("  Leader Alice  ", " monday , Wednesday , friday "),
                raw_response("Varsity Bob", "Tuesday, thursday "),
                raw_response("Novice Carol", "saturday , SUNDAY"),
            ],
        };
        let table: Table<ResponseRow> =
            Table::new(SourceLocator::new("key.json", "Snow Data", "Responses"));
        let refreshed = table.refresh(&source).unwrap();
        let rows = refreshed.rows();
        assert_eq!(rows[0].name, "Leader Alice");
        assert_eq!(rows[0].days, vec!["monday", "Wednesday", "friday"]);
        assert_eq!(rows[1].days, vec!["Tuesday", "thursday"]);
        assert_eq!(rows[2].days, vec!["saturday", "SUNDAY"]);
        // The original snapshot is still empty: refresh built a new value.
        assert!(table.rows().is_empty());
    }

    #[test]
    fn refresh_drops_the_replacement_field() {
        let source = FixedSource {
            rows: vec![raw_response("Bob", "Monday")],
        };
        let table: Table<ResponseRow> =
            Table::new(SourceLocator::new("key.json", "Snow Data", "Responses"));
        let refreshed = table.refresh(&source).unwrap();
        assert_eq!(
            refreshed.rows(),
            &[ResponseRow {
                name: "Bob".to_string(),
                days: vec!["Monday".to_string()],
            }]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = ResponseRow::from_raw(&raw_response("  Dan ", " Monday ,Tuesday"), 1).unwrap();
        let mut again_raw = RawRow::new();
        again_raw.insert("Name".to_string(), RawValue::Str(once.name.clone()));
        again_raw.insert("Days".to_string(), RawValue::Seq(once.days.clone()));
        let twice = ResponseRow::from_raw(&again_raw, 1).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_sub_table_is_reported() {
        let source = FixedSource { rows: vec![] };
        let table: Table<ResponseRow> =
            Table::new(SourceLocator::new("key.json", "Snow Data", "Missing"));
        assert_eq!(
            table.refresh(&source),
            Err(TableError::SubTableNotFound("Missing".to_string()))
        );
    }

    #[test]
    fn record_rows_parse_counts_and_categories() {
        let mut raw = RawRow::new();
        raw.insert("Name".to_string(), RawValue::Str(" Alice ".to_string()));
        raw.insert("Completed".to_string(), RawValue::Num(5));
        raw.insert("Experience".to_string(), RawValue::Str("Varsity".to_string()));
        raw.insert("Position".to_string(), RawValue::Str("Leader".to_string()));
        let row = RecordRow::from_raw(&raw, 1).unwrap();
        assert_eq!(row.name, "Alice");
        assert_eq!(row.completed, 5);
        assert_eq!(row.experience, Experience::Varsity);
        assert_eq!(row.position, Position::Leader);

        // Sources that deliver text cells are accepted as well.
        raw.insert("Completed".to_string(), RawValue::Str("7".to_string()));
        raw.insert("Position".to_string(), RawValue::Str("Coach".to_string()));
        let row = RecordRow::from_raw(&raw, 1).unwrap();
        assert_eq!(row.completed, 7);
        assert_eq!(row.position, Position::Other("Coach".to_string()));
    }

    #[test]
    fn seeded_tables_hold_the_injected_rows() {
        let responses: Table<ResponseRow> = Table::seeded(vec![
            ResponseRow {
                name: "Leader Alice".to_string(),
                days: vec!["Monday".to_string()],
            },
            ResponseRow {
                name: "Varsity Bob".to_string(),
                days: vec!["Monday".to_string()],
            },
            ResponseRow {
                name: "varsity bob".to_string(),
                days: vec!["Tuesday".to_string()],
            },
        ]);
        assert_eq!(responses.rows().len(), 3);
        assert_eq!(responses.rows()[0].name, "Leader Alice");

        // A seeded table feeds reconciliation and selection like a
        // refreshed one.
        let dups = find_duplicates(responses.rows());
        assert_eq!(dups.len(), 1);
        assert!(dups.contains("varsity bob"));

        let records: Table<RecordRow> = Table::seeded(vec![
            RecordRow {
                name: "Leader Alice".to_string(),
                completed: 5,
                experience: Experience::Varsity,
                position: Position::Leader,
            },
            RecordRow {
                name: "Varsity Bob".to_string(),
                completed: 2,
                experience: Experience::Varsity,
                position: Position::Member,
            },
        ]);
        let roster = run_availability(
            responses.rows(),
            records.rows(),
            "Monday",
            &TeamRules::DEFAULT_RULES,
        )
        .unwrap();
        assert_eq!(roster.team, vec!["Leader Alice", "Varsity Bob"]);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let mut raw = RawRow::new();
        raw.insert("Name".to_string(), RawValue::Str("Alice".to_string()));
        raw.insert("Completed".to_string(), RawValue::Num(-2));
        raw.insert("Experience".to_string(), RawValue::Str("Novice".to_string()));
        raw.insert("Position".to_string(), RawValue::Str("Member".to_string()));
        match RecordRow::from_raw(&raw, 3) {
            Err(TableError::MalformedRow { lineno: 3, .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
