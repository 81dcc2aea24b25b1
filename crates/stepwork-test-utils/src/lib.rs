//! Testing utilities for the Stepwork workspace
//!
//! Shared fixtures: fully answered field data, record builders, the demo
//! progress set and a store wrapper that fails on demand.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use stepwork_catalog::{DerivedField, ListItemKind, SectionBody, Stage, StageNumber};
use stepwork_core::field_data::{HAS_EXPORTED, RESENTMENTS, STEP_UNLOCKED};
use stepwork_core::{
    FieldData, MemoryStore, ProgressRecord, ProgressStore, RecordFeed, StageDates, StoreError,
    UserId,
};

pub const DEMO_USER: &str = "demo-user-123";

pub fn stage_number(n: u8) -> StageNumber {
    StageNumber::new(n).unwrap()
}

/// Midnight UTC on a calendar date
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn filled_entries(key: &str) -> Value {
    json!([{ "id": format!("{key}_1"), "content": format!("{key} entry") }])
}

/// Field data satisfying every requirement of a stage, without the export flag
pub fn complete_field_data(stage: &Stage) -> FieldData {
    let mut data = FieldData::new();
    for placed in stage.sections() {
        let key = placed.key();
        let all_rows = |rows: &[stepwork_catalog::ChecklistRow]| {
            Value::Object(
                rows.iter()
                    .map(|row| (row.key.to_string(), Value::Bool(true)))
                    .collect(),
            )
        };
        match placed.section.body {
            SectionBody::Definitions(prompts) => {
                for prompt in prompts {
                    data.insert(prompt.key, json!(format!("{} answer", prompt.key)));
                }
            }
            SectionBody::Reading(rows) => {
                data.insert(key.field(DerivedField::Checklist), all_rows(rows));
                data.insert(key.field(DerivedField::Completed), json!(true));
            }
            SectionBody::Writing(items) => {
                for item in items {
                    let value = if item.count.is_some() {
                        filled_entries(item.key)
                    } else {
                        json!(format!("{} answer", item.key))
                    };
                    data.insert(item.key, value);
                }
            }
            SectionBody::List(items) => {
                for item in items {
                    match item.kind() {
                        ListItemKind::Answer(_) => {
                            data.insert(item.key, json!(format!("{} answer", item.key)));
                        }
                        ListItemKind::Entries(_) => {
                            data.insert(item.key, filled_entries(item.key));
                        }
                        ListItemKind::Note => {}
                    }
                }
            }
            SectionBody::Checklist { rows, .. } => {
                data.insert(key.field(DerivedField::Checklist), all_rows(rows));
            }
            SectionBody::Prayer(rows) => {
                data.insert(key.field(DerivedField::Completed), json!(true));
                if !rows.is_empty() {
                    data.insert(key.field(DerivedField::Checklist), all_rows(rows));
                }
            }
            SectionBody::Resentment(_) => {
                data.insert(
                    RESENTMENTS,
                    json!([{
                        "id": "resentment_fixture",
                        "resentfulAt": "Boss",
                        "theCause": "Passed over for promotion",
                        "affectsMy": { "selfEsteem": true, "pocketbook": true }
                    }]),
                );
            }
        }
    }
    data
}

/// Complete field data with the export and unlock flags set
pub fn exported_field_data(stage: &Stage) -> FieldData {
    let mut data = complete_field_data(stage);
    data.insert(HAS_EXPORTED, json!(true));
    data.insert(STEP_UNLOCKED, json!(true));
    data
}

/// Builder for progress records
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: ProgressRecord,
}

impl RecordBuilder {
    pub fn new(user: &str, stage: u8) -> Self {
        Self {
            record: ProgressRecord::new(user.into(), stage_number(stage), date(2025, 1, 1)),
        }
    }

    pub fn assigned(mut self, at: DateTime<Utc>) -> Self {
        self.record.assignment_date = Some(at);
        self
    }

    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.record.completion_date = Some(at);
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.record.data.insert(key, value);
        self
    }

    pub fn data(mut self, data: FieldData) -> Self {
        self.record.data = data;
        self
    }

    pub fn build(self) -> ProgressRecord {
        self.record
    }
}

/// Demo progress: stages 1-3 completed, stage 4 in progress
pub fn demo_progress(user: &str) -> Vec<ProgressRecord> {
    vec![
        RecordBuilder::new(user, 1)
            .assigned(date(2025, 10, 1))
            .completed(date(2025, 10, 15))
            .field("admit", json!("To acknowledge the truth about my drinking"))
            .field("powerless", json!("Unable to stop once I started"))
            .field("unmanageable", json!("My life was out of control"))
            .build(),
        RecordBuilder::new(user, 2)
            .assigned(date(2025, 10, 16))
            .completed(date(2025, 11, 1))
            .build(),
        RecordBuilder::new(user, 3)
            .assigned(date(2025, 11, 2))
            .completed(date(2025, 11, 20))
            .build(),
        RecordBuilder::new(user, 4)
            .assigned(date(2025, 11, 21))
            .field("launched", json!("Started my inventory"))
            .field("moral", json!("Principles of right conduct"))
            .build(),
    ]
}

/// Memory store seeded with the demo progress set
pub fn demo_store() -> MemoryStore {
    MemoryStore::with_records(demo_progress(DEMO_USER))
}

/// Store wrapper whose writes or reads fail while switched on
#[derive(Debug, Default)]
pub struct FlakyStore<S = MemoryStore> {
    inner: S,
    fail_writes: AtomicBool,
    unavailable: AtomicBool,
    write_attempts: AtomicUsize,
}

impl<S: ProgressStore> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            unavailable: AtomicBool::new(false),
            write_attempts: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail reads as well as writes
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".into()));
        }
        Ok(())
    }

    fn check_write(&self, key: &str) -> Result<(), StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<S: ProgressStore> ProgressStore for FlakyStore<S> {
    async fn get(
        &self,
        user: &UserId,
        stage: StageNumber,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        self.check_read()?;
        self.inner.get(user, stage).await
    }

    async fn set_field(
        &self,
        user: &UserId,
        stage: StageNumber,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.inner.set_field(user, stage, key, value).await
    }

    async fn set_dates(
        &self,
        user: &UserId,
        stage: StageNumber,
        dates: StageDates,
    ) -> Result<(), StoreError> {
        self.check_write("dates")?;
        self.inner.set_dates(user, stage, dates).await
    }

    async fn all(&self, user: &UserId) -> Result<Vec<ProgressRecord>, StoreError> {
        self.check_read()?;
        self.inner.all(user).await
    }

    fn subscribe_all(&self, user: &UserId) -> Result<RecordFeed, StoreError> {
        self.check_read()?;
        self.inner.subscribe_all(user)
    }
}
