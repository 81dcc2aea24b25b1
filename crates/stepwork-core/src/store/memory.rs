//! In-memory progress store

use super::{ProgressStore, RecordFeed};
use crate::error::StoreError;
use crate::record::{ProgressRecord, StageDates, UserId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use stepwork_catalog::StageNumber;
use tokio::sync::watch;

type UserRecords = BTreeMap<StageNumber, ProgressRecord>;

/// Process-local store with live subscriptions
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<UserId, UserRecords>,
    feeds: DashMap<UserId, watch::Sender<Vec<ProgressRecord>>>,
}

impl MemoryStore {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing records
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = ProgressRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert_record(record);
        }
        store
    }

    /// Replace a whole record
    pub fn insert_record(&self, record: ProgressRecord) {
        let user = record.user_id.clone();
        self.mutate(&user, record.stage_number, |stored| *stored = record);
    }

    /// Number of records held for a user
    #[must_use]
    pub fn record_count(&self, user: &UserId) -> usize {
        self.records.get(user).map_or(0, |records| records.len())
    }

    fn snapshot(&self, user: &UserId) -> Vec<ProgressRecord> {
        self.records
            .get(user)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Apply a change and publish the resulting snapshot
    ///
    /// The feed is written while the user's records are still locked, so
    /// concurrent writers publish in the order their changes were applied.
    fn mutate(&self, user: &UserId, stage: StageNumber, apply: impl FnOnce(&mut ProgressRecord)) {
        let mut records = self.records.entry(user.clone()).or_default();
        let record = records
            .entry(stage)
            .or_insert_with(|| ProgressRecord::new(user.clone(), stage, Utc::now()));
        apply(record);
        if let Some(feed) = self.feeds.get(user) {
            feed.send_replace(records.values().cloned().collect());
        }
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get(
        &self,
        user: &UserId,
        stage: StageNumber,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self
            .records
            .get(user)
            .and_then(|records| records.get(&stage).cloned()))
    }

    async fn set_field(
        &self,
        user: &UserId,
        stage: StageNumber,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        self.mutate(user, stage, |record| {
            record.data.insert(key, value);
            record.last_updated = Utc::now();
        });
        Ok(())
    }

    async fn set_dates(
        &self,
        user: &UserId,
        stage: StageNumber,
        dates: StageDates,
    ) -> Result<(), StoreError> {
        self.mutate(user, stage, |record| {
            record.apply_dates(dates);
            record.last_updated = Utc::now();
        });
        Ok(())
    }

    async fn all(&self, user: &UserId) -> Result<Vec<ProgressRecord>, StoreError> {
        Ok(self.snapshot(user))
    }

    fn subscribe_all(&self, user: &UserId) -> Result<RecordFeed, StoreError> {
        let snapshot = self.snapshot(user);
        let feed = self
            .feeds
            .entry(user.clone())
            .or_insert_with(|| watch::channel(snapshot).0);
        Ok(RecordFeed::new(feed.subscribe()))
    }
}
