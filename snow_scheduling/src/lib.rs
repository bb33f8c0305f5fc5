mod config;
pub mod manual;
pub mod table;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

// Name matching is case-insensitive everywhere; the original casing is
// preserved in every output.
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Finds respondents who answered more than once.
///
/// Scans the responses in order, tracking seen names case-insensitively.
/// Every second-or-later occurrence lands in the result, spelled the way
/// that later occurrence was spelled. For `["Dan", "dan"]` the result is
/// `{"dan"}`.
pub fn find_duplicates(responses: &[ResponseRow]) -> HashSet<String> {
    let mut people: HashSet<String> = HashSet::new();
    let mut duplicated: HashSet<String> = HashSet::new();

    for response in responses.iter() {
        let folded = fold_name(&response.name);
        if people.contains(&folded) {
            duplicated.insert(response.name.clone());
        } else {
            people.insert(folded);
        }
    }
    debug!("find_duplicates: {:?} duplicated names", duplicated.len());
    duplicated
}

/// Finds respondents with no entry in the records.
///
/// The comparison is case-insensitive; the result keeps the respondents'
/// casing. The check is asymmetric: people who are on record but did not
/// respond are not reported.
pub fn find_missing(responses: &[ResponseRow], records: &[RecordRow]) -> HashSet<String> {
    let lookup: HashSet<String> = records.iter().map(|r| fold_name(&r.name)).collect();

    let mut missing: HashSet<String> = HashSet::new();
    for response in responses.iter() {
        if !lookup.contains(&fold_name(&response.name)) {
            missing.insert(response.name.clone());
        }
    }
    debug!("find_missing: {:?} missing names", missing.len());
    missing
}

/// Computes the availability pool and the selected team for one day.
///
/// The pool is every respondent whose day list contains `day` (exact
/// string match, see [`WEEKDAYS`]) and who resolves to a record, sorted
/// ascending by completed removals. The sort is stable: equal counts
/// keep their response order, so people with fewer removals and earlier
/// answers are preferred.
///
/// The team is built greedily over the sorted pool:
/// 1. the first entry with the Leader position joins; without one the
///    whole selection fails with [`SchedulingError::NoLeaderAvailable`];
/// 2. a second scan from the start skips every Leader entry, takes
///    Varsity entries freely and other ("novice") entries while fewer
///    than `rules.max_novices` have joined, and stops at
///    `rules.team_size`.
///
/// Respondents without a record are silently excluded from the pool;
/// flagging them is [`find_missing`]'s job.
pub fn run_availability(
    responses: &[ResponseRow],
    records: &[RecordRow],
    day: &str,
    rules: &TeamRules,
) -> Result<DayRoster, SchedulingError> {
    if !WEEKDAYS.contains(&day) {
        return Err(SchedulingError::InvalidDay(day.to_string()));
    }

    info!(
        "run_availability: {:?} responses, {:?} records, day {:?}",
        responses.len(),
        records.len(),
        day
    );

    let lookup: HashMap<String, &RecordRow> = records
        .iter()
        .map(|record| (fold_name(&record.name), record))
        .collect();

    let mut pool: Vec<PoolEntry> = Vec::new();
    for response in responses.iter() {
        if !response.days.iter().any(|d| d == day) {
            continue;
        }
        if let Some(record) = lookup.get(&fold_name(&response.name)) {
            pool.push(PoolEntry {
                name: response.name.clone(),
                completed: record.completed,
                experience: record.experience.clone(),
                position: record.position.clone(),
            });
        }
    }

    // Stable: ties keep their response order.
    pool.sort_by_key(|entry| entry.completed);
    debug!("run_availability: pool: {:?}", pool);

    let leader = pool
        .iter()
        .find(|entry| entry.position == Position::Leader)
        .ok_or_else(|| SchedulingError::NoLeaderAvailable(day.to_string()))?;

    let mut team: Vec<String> = vec![leader.name.clone()];
    let mut novices: usize = 0;

    for entry in pool.iter() {
        if team.len() >= rules.team_size {
            break;
        }
        if entry.position == Position::Leader {
            continue;
        }
        if entry.experience == Experience::Varsity {
            team.push(entry.name.clone());
        } else if novices < rules.max_novices {
            team.push(entry.name.clone());
            novices += 1;
        }
    }

    info!("run_availability: team for {}: {:?}", day, team);
    Ok(DayRoster { pool, team })
}
