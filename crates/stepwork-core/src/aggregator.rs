//! Progress aggregator
//!
//! Program-level metrics derived from a user's record set. Every function
//! takes the current instant as a parameter; an empty record set is a normal
//! input, not an error.

use crate::record::{ProgressRecord, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use stepwork_catalog::{Stage, StageNumber};

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Program-level metrics shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub current_stage: StageNumber,
    pub completed_count: usize,
    pub total_days: u64,
    pub current_stage_days: u64,
}

impl ProgressSummary {
    /// All twelve stages carry a completion date
    #[inline]
    #[must_use]
    pub fn program_complete(&self) -> bool {
        self.completed_count == StageNumber::COUNT
    }
}

/// Derive every summary metric at `now`
#[must_use]
pub fn derive_progress_summary(records: &[ProgressRecord], now: DateTime<Utc>) -> ProgressSummary {
    let current = current_stage(records);
    ProgressSummary {
        current_stage: current,
        completed_count: completed_count(records),
        total_days: total_days(records, now),
        current_stage_days: current_stage_days(records, current, now),
    }
}

/// Highest in-progress stage, else the stage after the highest completed one
#[must_use]
pub fn current_stage(records: &[ProgressRecord]) -> StageNumber {
    if let Some(in_progress) = records
        .iter()
        .filter(|record| record.is_in_progress())
        .map(|record| record.stage_number)
        .max()
    {
        return in_progress;
    }
    records
        .iter()
        .filter(|record| record.is_completed())
        .map(|record| record.stage_number)
        .max()
        .map_or(StageNumber::FIRST, StageNumber::next_saturating)
}

/// Distinct stages with a completion date
#[must_use]
pub fn completed_count(records: &[ProgressRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.is_completed())
        .map(|record| record.stage_number)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Days since stage 1 was assigned, 0 when it never was
#[must_use]
pub fn total_days(records: &[ProgressRecord], now: DateTime<Utc>) -> u64 {
    records
        .iter()
        .find(|record| record.stage_number == StageNumber::FIRST)
        .and_then(|record| record.assignment_date)
        .map_or(0, |assigned| days_between(assigned, now))
}

/// Days since `stage` was assigned, counting only its uncompleted record
#[must_use]
pub fn current_stage_days(
    records: &[ProgressRecord],
    stage: StageNumber,
    now: DateTime<Utc>,
) -> u64 {
    records
        .iter()
        .find(|record| record.stage_number == stage && !record.is_completed())
        .and_then(|record| record.assignment_date)
        .map_or(0, |assigned| days_between(assigned, now))
}

/// Calendar days between two instants, rounded up, direction ignored
#[must_use]
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from)
        .num_milliseconds()
        .unsigned_abs()
        .div_ceil(MILLIS_PER_DAY)
}

/// Navigation status of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Current,
    Locked,
}

/// Status of `stage` given the derived current stage
#[must_use]
pub fn stage_status(
    records: &[ProgressRecord],
    stage: StageNumber,
    current: StageNumber,
) -> StageStatus {
    let record = records.iter().find(|record| record.stage_number == stage);
    match record {
        Some(record) if record.is_completed() => StageStatus::Completed,
        Some(record) if record.is_assigned() => StageStatus::Current,
        _ if stage == current => StageStatus::Current,
        _ => StageStatus::Locked,
    }
}

/// Sponsors reach every stage; sponsees only completed or current ones
#[inline]
#[must_use]
pub fn is_accessible(role: Role, status: StageStatus) -> bool {
    role.is_sponsor() || matches!(status, StageStatus::Completed | StageStatus::Current)
}

/// One row of the stage navigation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOverview {
    pub stage: StageNumber,
    pub title: &'static str,
    pub status: StageStatus,
    pub accessible: bool,
    pub fill_percentage: u8,
}

/// Overview of all twelve stages for a role
#[must_use]
pub fn stage_overview(records: &[ProgressRecord], role: Role) -> Vec<StageOverview> {
    let current = current_stage(records);
    stepwork_catalog::stages()
        .map(|stage: &Stage| {
            let status = stage_status(records, stage.number, current);
            let fill_percentage = records
                .iter()
                .find(|record| record.stage_number == stage.number)
                .map_or(0, |record| record.data.fill_percentage());
            StageOverview {
                stage: stage.number,
                title: stage.title,
                status,
                accessible: is_accessible(role, status),
                fill_percentage,
            }
        })
        .collect()
}

/// Day count split into a display value and unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub value: String,
    /// Empty when the value already carries compound units
    pub unit: &'static str,
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// Compact display of a day count (`1y 2m`, `3m 4d`, `2w 1d`, `5 days`)
#[must_use]
pub fn format_days(days: u64) -> DayCount {
    let compound = |value: String| DayCount { value, unit: "" };
    let plain = |value: u64, one: &'static str, many: &'static str| DayCount {
        value: value.to_string(),
        unit: if value == 1 { one } else { many },
    };

    if days >= 365 {
        let years = days / 365;
        let months = (days % 365) / 30;
        return if months > 0 {
            compound(format!("{years}y {months}m"))
        } else {
            plain(years, "year", "years")
        };
    }
    if days >= 30 {
        let months = days / 30;
        let rest = days % 30;
        return if rest > 0 {
            compound(format!("{months}m {rest}d"))
        } else {
            plain(months, "month", "months")
        };
    }
    if days >= 7 {
        let weeks = days / 7;
        let rest = days % 7;
        return if rest > 0 {
            compound(format!("{weeks}w {rest}d"))
        } else {
            plain(weeks, "week", "weeks")
        };
    }
    plain(days, "day", "days")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn record(
        stage: u8,
        assigned: Option<DateTime<Utc>>,
        completed: Option<DateTime<Utc>>,
    ) -> ProgressRecord {
        let stage = StageNumber::new(stage).unwrap();
        let mut record = ProgressRecord::new("u".into(), stage, at(2025, 1, 1));
        record.assignment_date = assigned;
        record.completion_date = completed;
        record
    }

    #[test]
    fn days_round_up() {
        let start = at(2025, 10, 1);
        assert_eq!(days_between(start, start), 0);
        assert_eq!(days_between(start, start + Duration::milliseconds(1)), 1);
        assert_eq!(days_between(start, start + Duration::days(2)), 2);
        assert_eq!(days_between(start + Duration::hours(25), start), 2);
    }

    #[test]
    fn higher_in_progress_stage_wins() {
        let records = [
            record(3, Some(at(2025, 1, 1)), None),
            record(5, Some(at(2025, 2, 1)), None),
        ];
        assert_eq!(current_stage(&records).get(), 5);
    }

    #[test]
    fn after_last_completed() {
        let records = [
            record(1, Some(at(2025, 1, 1)), Some(at(2025, 1, 5))),
            record(2, Some(at(2025, 1, 6)), Some(at(2025, 1, 9))),
        ];
        assert_eq!(current_stage(&records).get(), 3);
    }

    #[test]
    fn saturates_at_twelve() {
        let records: Vec<_> = (1..=12)
            .map(|n| record(n, Some(at(2025, 1, 1)), Some(at(2025, 2, 1))))
            .collect();
        let summary = derive_progress_summary(&records, at(2025, 3, 1));
        assert_eq!(summary.current_stage, StageNumber::LAST);
        assert!(summary.program_complete());
    }

    #[test]
    fn completed_count_is_distinct() {
        let done = Some(at(2025, 1, 2));
        let records = [record(1, None, done), record(1, None, done), record(2, None, done)];
        assert_eq!(completed_count(&records), 2);
    }

    #[test]
    fn unassigned_records_do_not_count_days() {
        let records = [record(1, None, None)];
        assert_eq!(total_days(&records, at(2025, 5, 1)), 0);
        assert_eq!(current_stage_days(&records, StageNumber::FIRST, at(2025, 5, 1)), 0);
    }

    #[test]
    fn status_and_access() {
        let records = [
            record(1, Some(at(2025, 1, 1)), Some(at(2025, 1, 5))),
            record(2, Some(at(2025, 1, 6)), None),
        ];
        let current = current_stage(&records);
        let stage = |n| StageNumber::new(n).unwrap();
        assert_eq!(stage_status(&records, stage(1), current), StageStatus::Completed);
        assert_eq!(stage_status(&records, stage(2), current), StageStatus::Current);
        assert_eq!(stage_status(&records, stage(3), current), StageStatus::Locked);
        assert!(!is_accessible(Role::Sponsee, StageStatus::Locked));
        assert!(is_accessible(Role::Sponsor, StageStatus::Locked));

        let overview = stage_overview(&records, Role::Sponsee);
        assert_eq!(overview.len(), 12);
        assert_eq!(overview.iter().filter(|row| row.accessible).count(), 2);
    }

    #[test]
    fn day_formatting() {
        assert_eq!(format_days(0).to_string(), "0 days");
        assert_eq!(format_days(1).to_string(), "1 day");
        assert_eq!(format_days(7).to_string(), "1 week");
        assert_eq!(format_days(9).to_string(), "1w 2d");
        assert_eq!(format_days(60).to_string(), "2 months");
        assert_eq!(format_days(45).to_string(), "1m 15d");
        assert_eq!(format_days(365).to_string(), "1 year");
        assert_eq!(format_days(430).to_string(), "1y 2m");
        assert_eq!(format_days(740).to_string(), "2 years");
    }
}
