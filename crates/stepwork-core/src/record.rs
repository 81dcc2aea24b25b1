//! Users, roles and persisted progress records

use crate::field_data::FieldData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwork_catalog::StageNumber;

/// Identifier issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Guide role; bypasses stage passwords
    Sponsor,
    /// Working the program; gated per stage
    #[default]
    Sponsee,
}

impl Role {
    #[inline]
    #[must_use]
    pub const fn is_sponsor(self) -> bool {
        matches!(self, Self::Sponsor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sponsor => write!(f, "sponsor"),
            Self::Sponsee => write!(f, "sponsee"),
        }
    }
}

/// Document id of the record for one user and stage
#[must_use]
pub fn record_id(user: &UserId, stage: StageNumber) -> String {
    format!("{user}_step{stage}")
}

/// Per-(user, stage) progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub id: String,
    pub user_id: UserId,
    #[serde(alias = "stepNumber")]
    pub stage_number: StageNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<u8>,
    #[serde(default)]
    pub assignment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: FieldData,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

impl ProgressRecord {
    /// Empty record, as created lazily on first write
    #[must_use]
    pub fn new(user: UserId, stage: StageNumber, now: DateTime<Utc>) -> Self {
        Self {
            id: record_id(&user, stage),
            user_id: user,
            stage_number: stage,
            part_number: None,
            assignment_date: None,
            completion_date: None,
            data: FieldData::new(),
            last_updated: now,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.assignment_date.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion_date.is_some()
    }

    /// Assigned and not yet completed
    #[inline]
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.is_assigned() && !self.is_completed()
    }

    /// Apply a date patch; absent fields keep their stored value
    pub fn apply_dates(&mut self, dates: StageDates) {
        if let Some(assigned) = dates.assigned {
            self.assignment_date = Some(assigned);
        }
        if let Some(completed) = dates.completed {
            self.completion_date = Some(completed);
        }
    }
}

/// Date patch for `set_dates`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDates {
    pub assigned: Option<DateTime<Utc>>,
    pub completed: Option<DateTime<Utc>>,
}

impl StageDates {
    #[must_use]
    pub fn assigned(at: DateTime<Utc>) -> Self {
        Self {
            assigned: Some(at),
            completed: None,
        }
    }

    #[must_use]
    pub fn completed(at: DateTime<Utc>) -> Self {
        Self {
            assigned: None,
            completed: Some(at),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn record_id_format() {
        let user = UserId::from("demo-user-123");
        let stage = StageNumber::new(4).unwrap();
        assert_eq!(record_id(&user, stage), "demo-user-123_step4");
    }

    #[test]
    fn accepts_step_number_alias() {
        let record: ProgressRecord = serde_json::from_value(json!({
            "id": "u_step2",
            "userId": "u",
            "stepNumber": 2,
            "assignmentDate": "2025-10-16T00:00:00Z",
            "data": {"admit": "yes"}
        }))
        .unwrap();
        assert_eq!(record.stage_number.get(), 2);
        assert!(record.is_in_progress());
        assert_eq!(record.data.text("admit"), "yes");
    }

    #[test]
    fn rejects_out_of_range_stage() {
        let result: Result<ProgressRecord, _> = serde_json::from_value(json!({
            "id": "u_step13",
            "userId": "u",
            "stageNumber": 13
        }));
        assert!(result.is_err());
    }

    #[test]
    fn date_patch_keeps_absent_fields() {
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap();
        let mut record = ProgressRecord::new("u".into(), StageNumber::FIRST, at);
        record.apply_dates(StageDates::assigned(at));
        record.apply_dates(StageDates::completed(later));
        assert_eq!(record.assignment_date, Some(at));
        assert_eq!(record.completion_date, Some(later));
        assert!(!record.is_in_progress());
    }

    #[test]
    fn role_defaults_to_sponsee() {
        assert_eq!(Role::default(), Role::Sponsee);
        assert_eq!(serde_json::to_value(Role::Sponsor).unwrap(), json!("sponsor"));
    }
}
