//! Progress store port
//!
//! The workbook only talks to persistence through [`ProgressStore`]. The
//! in-memory adapter lives in [`memory`]; a document-database adapter would
//! implement the same trait.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::record::{ProgressRecord, StageDates, UserId};
use async_trait::async_trait;
use serde_json::Value;
use stepwork_catalog::StageNumber;
use tokio::sync::watch;

/// Per-(user, stage) record persistence
#[async_trait]
pub trait ProgressStore: Send + Sync + 'static {
    /// Point read; `None` when the record was never written
    async fn get(
        &self,
        user: &UserId,
        stage: StageNumber,
    ) -> Result<Option<ProgressRecord>, StoreError>;

    /// Merge one field into the record, creating the record if needed
    async fn set_field(
        &self,
        user: &UserId,
        stage: StageNumber,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    /// Apply a date patch, creating the record if needed
    async fn set_dates(
        &self,
        user: &UserId,
        stage: StageNumber,
        dates: StageDates,
    ) -> Result<(), StoreError>;

    /// Every record of a user, ordered by stage number
    async fn all(&self, user: &UserId) -> Result<Vec<ProgressRecord>, StoreError>;

    /// Live feed of a user's records; dropping the feed unsubscribes
    fn subscribe_all(&self, user: &UserId) -> Result<RecordFeed, StoreError>;
}

/// Subscription to a user's record set
#[derive(Debug)]
pub struct RecordFeed {
    receiver: watch::Receiver<Vec<ProgressRecord>>,
}

impl RecordFeed {
    #[must_use]
    pub fn new(receiver: watch::Receiver<Vec<ProgressRecord>>) -> Self {
        Self { receiver }
    }

    /// Latest snapshot
    #[must_use]
    pub fn current(&self) -> Vec<ProgressRecord> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot; `None` once the store is gone
    pub async fn changed(&mut self) -> Option<Vec<ProgressRecord>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
