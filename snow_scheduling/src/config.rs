// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The seven canonical weekday names, in week order.
///
/// A target day must match one of these exactly. Day tokens inside a
/// response keep whatever casing the respondent typed, so a lowercase
/// token will not match its canonical spelling. This mirrors the rules
/// as collected and is a known rough edge of the data, not of the code.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One availability response: who is available on which days.
///
/// `days` holds trimmed tokens with the casing as received from the
/// source. The source also carries a `Replacement` acknowledgment
/// checkbox; it is dropped during normalization and never reaches this
/// struct.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRow {
    pub name: String,
    pub days: Vec<String>,
}

/// The experience tier recorded for a person.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Experience {
    Varsity,
    Novice,
    /// Any other label found in the records.
    Other(String),
}

impl Experience {
    pub fn parse(s: &str) -> Experience {
        match s {
            "Varsity" => Experience::Varsity,
            "Novice" => Experience::Novice,
            other => Experience::Other(other.to_string()),
        }
    }
}

impl Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Experience::Varsity => write!(f, "Varsity"),
            Experience::Novice => write!(f, "Novice"),
            Experience::Other(s) => write!(f, "{}", s),
        }
    }
}

/// The role recorded for a person.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Position {
    Leader,
    Member,
    /// Any other label found in the records.
    Other(String),
}

impl Position {
    pub fn parse(s: &str) -> Position {
        match s {
            "Leader" => Position::Leader,
            "Member" => Position::Member,
            other => Position::Other(other.to_string()),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Leader => write!(f, "Leader"),
            Position::Member => write!(f, "Member"),
            Position::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One historical participation record.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RecordRow {
    pub name: String,
    /// Number of removals this person has already completed.
    pub completed: u64,
    pub experience: Experience,
    pub position: Position,
}

// ******** Output data structures *********

/// One entry of the availability pool: a respondent available on the
/// requested day, joined with their record. The name keeps the casing
/// of the response, not of the record.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PoolEntry {
    pub name: String,
    pub completed: u64,
    pub experience: Experience,
    pub position: Position,
}

impl Display for PoolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: completed {}, {}, {}",
            self.name, self.completed, self.experience, self.position
        )
    }
}

/// The outcome of a day's selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DayRoster {
    /// Everyone available on the day, sorted ascending by `completed`.
    /// Kept for diagnostics.
    pub pool: Vec<PoolEntry>,
    /// The chosen names, leader first.
    pub team: Vec<String>,
}

/// Errors that prevent the selection from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SchedulingError {
    /// The requested day is not one of the seven weekday names.
    InvalidDay(String),
    /// No one with the Leader position is available on the day.
    NoLeaderAvailable(String),
}

impl Error for SchedulingError {}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::InvalidDay(day) => {
                write!(f, "Invalid day: {}. Must be a day of the week.", day)
            }
            SchedulingError::NoLeaderAvailable(day) => {
                write!(f, "No leader available for {}", day)
            }
        }
    }
}

// ********* Selection rules **********

/// The staffing caps applied when building a team.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TeamRules {
    /// Total team size, leader included.
    pub team_size: usize,
    /// How many non-Varsity people may join a team.
    pub max_novices: usize,
}

impl TeamRules {
    pub const DEFAULT_RULES: TeamRules = TeamRules {
        team_size: 6,
        max_novices: 3,
    };
}
