//! Workbook service
//!
//! Orchestrates the catalog, the store port and the identity port:
//! - Dashboard metrics and navigation
//! - Stage sessions with gated, write-through editing
//! - Role elevation through the shared phrase

use crate::access::{self, GateOutcome, PasswordGate};
use crate::aggregator::{self, DayCount, ProgressSummary, StageOverview};
use crate::config::WorkbookConfig;
use crate::contract::{self, RequiredInput};
use crate::entries::{self, ListEntry, ListEntryField, ResentmentEdit, ResentmentEntry};
use crate::error::{AccessError, EntryError, WorkbookError};
use crate::evaluator::{self, CompletionReport};
use crate::export::ExportDocument;
use crate::field_data::{FieldData, HAS_EXPORTED, RESENTMENTS, STEP_UNLOCKED};
use crate::identity::IdentityProvider;
use crate::record::{ProgressRecord, Role, StageDates, UserId};
use crate::state_machine::{self, StageState};
use crate::store::{ProgressStore, RecordFeed};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use stepwork_catalog::{encouragement, DerivedField, PlacedSection, Stage, StageNumber};

/// Outcome of a field write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveStatus {
    /// Store acknowledged every pending write
    Saved,
    /// Some writes failed; they stay pending and go out with the next write
    Failed { pending: usize },
}

impl SaveStatus {
    #[inline]
    #[must_use]
    pub fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: UserId,
    pub role: Role,
    pub summary: ProgressSummary,
    pub total_days_display: DayCount,
    pub current_stage_days_display: DayCount,
    pub stages: Vec<StageOverview>,
    pub encouragement: &'static str,
    pub stage_encouragement: &'static str,
}

/// Workbook service over a store and an identity provider
#[derive(Debug)]
pub struct Workbook<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
    config: Arc<WorkbookConfig>,
}

impl<S, I> Clone for Workbook<S, I> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            identity: Arc::clone(&self.identity),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: ProgressStore, I: IdentityProvider> Workbook<S, I> {
    #[must_use]
    pub fn new(store: Arc<S>, identity: Arc<I>, config: WorkbookConfig) -> Self {
        Self {
            store,
            identity,
            config: Arc::new(config),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkbookConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn require_user(&self) -> Result<UserId, WorkbookError> {
        self.identity.current_user().ok_or(WorkbookError::NotSignedIn)
    }

    /// Records of the signed-in user; store failures read as no progress
    pub async fn records(&self) -> Result<Vec<ProgressRecord>, WorkbookError> {
        let user = self.require_user()?;
        Ok(self.records_for(&user).await)
    }

    async fn records_for(&self, user: &UserId) -> Vec<ProgressRecord> {
        match self.store.all(user).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(user = %user, "Progress unavailable, showing none: {}", err);
                Vec::new()
            }
        }
    }

    /// Role of the signed-in user
    pub async fn role(&self) -> Result<Role, WorkbookError> {
        let user = self.require_user()?;
        Ok(self.identity.role(&user).await?)
    }

    /// Dashboard at `now`
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard, WorkbookError> {
        let user = self.require_user()?;
        let role = self.identity.role(&user).await?;
        let records = self.records_for(&user).await;
        let summary = aggregator::derive_progress_summary(&records, now);
        tracing::debug!(
            user = %user,
            current = %summary.current_stage,
            completed = summary.completed_count,
            "Dashboard derived"
        );

        Ok(Dashboard {
            stages: aggregator::stage_overview(&records, role),
            total_days_display: aggregator::format_days(summary.total_days),
            current_stage_days_display: aggregator::format_days(summary.current_stage_days),
            encouragement: encouragement::for_day(summary.total_days),
            stage_encouragement: encouragement::for_stage(summary.current_stage),
            user,
            role,
            summary,
        })
    }

    /// Upgrade the signed-in user to sponsor with the shared phrase
    pub async fn elevate_role(&self, phrase: &str) -> Result<Role, WorkbookError> {
        let user = self.require_user()?;
        if !access::words_match(&self.config.elevation_phrase, phrase) {
            tracing::info!(user = %user, "Role elevation rejected");
            return Err(AccessError::IncorrectPhrase.into());
        }
        self.identity.set_role(&user, Role::Sponsor).await?;
        tracing::info!(user = %user, "Role elevated to sponsor");
        Ok(Role::Sponsor)
    }

    /// Live feed of the signed-in user's records
    pub fn subscribe(&self) -> Result<RecordFeed, WorkbookError> {
        let user = self.require_user()?;
        Ok(self.store.subscribe_all(&user)?)
    }

    /// Open a stage for viewing and editing
    pub async fn open_stage(&self, number: u8) -> Result<StageSession<S>, WorkbookError> {
        let user = self.require_user()?;
        let stage = stepwork_catalog::stage(number)?;
        let role = self.identity.role(&user).await?;
        let record = match self.store.get(&user, stage.number).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(stage = number, "Stage record unavailable, starting empty: {}", err);
                None
            }
        };
        let (data, dates) = record.map_or_else(
            || (FieldData::new(), StageDates::default()),
            |record| {
                let dates = StageDates {
                    assigned: record.assignment_date,
                    completed: record.completion_date,
                };
                (record.data, dates)
            },
        );
        tracing::info!(stage = number, role = %role, "Stage opened");

        Ok(StageSession {
            gate: PasswordGate::new(stage.number, &self.config),
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            pending: Arc::new(Mutex::new(BTreeMap::new())),
            user,
            stage,
            role,
            data,
            dates,
        })
    }
}

/// One user's open stage
///
/// Edits land in memory first and are then written through the store in a
/// spawned task, so dropping the caller mid-write does not abandon the write.
#[derive(Debug)]
pub struct StageSession<S> {
    store: Arc<S>,
    config: Arc<WorkbookConfig>,
    pending: Arc<Mutex<BTreeMap<String, Value>>>,
    gate: PasswordGate,
    user: UserId,
    stage: &'static Stage,
    role: Role,
    data: FieldData,
    dates: StageDates,
}

impl<S: ProgressStore> StageSession<S> {
    #[inline]
    #[must_use]
    pub fn stage(&self) -> &'static Stage {
        self.stage
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// In-memory field data, including writes still pending
    #[inline]
    #[must_use]
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn dates(&self) -> StageDates {
        self.dates
    }

    /// Writes the store has not acknowledged yet
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.lock().len()
    }

    /// Evaluate against the latest in-memory snapshot
    #[must_use]
    pub fn evaluate(&self) -> CompletionReport {
        evaluator::evaluate_stored(self.stage, &self.data)
    }

    #[must_use]
    pub fn state(&self) -> StageState {
        state_machine::derive_state(
            self.role,
            self.data.is_unlocked(),
            self.dates.completed.is_some(),
            self.evaluate().complete,
        )
    }

    /// Required inputs of one section of this stage
    pub fn section_requirements(
        &self,
        section_id: &str,
    ) -> Result<Vec<RequiredInput>, WorkbookError> {
        let placed = self.section(section_id)?;
        Ok(contract::required_inputs(&placed, &self.data))
    }

    /// Password hint once enough attempts have failed
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        self.gate.hint()
    }

    /// Try the stage password; acceptance is persisted
    pub async fn try_unlock(&mut self, candidate: &str) -> GateOutcome {
        if self.role.is_sponsor() || self.data.is_unlocked() {
            return GateOutcome::Unlocked;
        }
        let outcome = self.gate.attempt(candidate);
        match &outcome {
            GateOutcome::Unlocked => {
                tracing::info!(stage = %self.stage.number, "Stage unlocked");
                let status = self.write(vec![(STEP_UNLOCKED.to_string(), Value::Bool(true))]).await;
                if !status.is_saved() {
                    tracing::warn!(stage = %self.stage.number, "Unlock not yet persisted");
                }
            }
            GateOutcome::Rejected { attempts, .. } => {
                tracing::info!(stage = %self.stage.number, attempts, "Stage password rejected");
            }
        }
        outcome
    }

    /// Write one field
    pub async fn set_field(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        Ok(self.write(vec![(key.into(), value)]).await)
    }

    /// Tick or untick one checklist row of a section
    pub async fn set_checklist_row(
        &mut self,
        section_id: &str,
        row: &str,
        checked: bool,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let key = self.section(section_id)?.key();
        let value = self.data.checklist_with(&key, row, checked);
        let writes = self.derived_writes(&key, DerivedField::Checklist, value);
        Ok(self.write(writes).await)
    }

    /// Set the section-level completion confirmation
    pub async fn confirm_section(
        &mut self,
        section_id: &str,
        confirmed: bool,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let key = self.section(section_id)?.key();
        let writes = self.derived_writes(&key, DerivedField::Completed, Value::Bool(confirmed));
        Ok(self.write(writes).await)
    }

    /// Entries of a list item, materializing `count` empty ones on first use
    pub async fn ensure_list(
        &mut self,
        key: &str,
        count: u16,
    ) -> Result<(Vec<ListEntry>, SaveStatus), WorkbookError> {
        let existing = self.data.list_entries(key);
        if !existing.is_empty() {
            return Ok((existing, SaveStatus::Saved));
        }
        self.ensure_editable()?;
        let entries = entries::materialize(key, count);
        let status = self.write_list(key, &entries).await;
        Ok((entries, status))
    }

    pub async fn add_list_entry(&mut self, key: &str) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let mut list = self.data.list_entries(key);
        entries::add_entry(&mut list, key);
        Ok(self.write_list(key, &list).await)
    }

    pub async fn update_list_entry(
        &mut self,
        key: &str,
        index: usize,
        field: ListEntryField,
        text: impl Into<String>,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let mut list = self.data.list_entries(key);
        entries::update_entry(&mut list, key, index, field, text);
        Ok(self.write_list(key, &list).await)
    }

    pub async fn remove_list_entry(
        &mut self,
        key: &str,
        index: usize,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let mut list = self.data.list_entries(key);
        entries::remove_entry(&mut list, index)?;
        Ok(self.write_list(key, &list).await)
    }

    /// Resentment rows, creating one empty row when there are none
    pub async fn ensure_resentment_entry(
        &mut self,
    ) -> Result<(Vec<ResentmentEntry>, SaveStatus), WorkbookError> {
        let existing = self.data.resentments();
        if !existing.is_empty() {
            return Ok((existing, SaveStatus::Saved));
        }
        self.ensure_editable()?;
        let rows = vec![ResentmentEntry::new()];
        let status = self.write_list(RESENTMENTS, &rows).await;
        Ok((rows, status))
    }

    /// Append an empty resentment row, returning its id
    pub async fn add_resentment(&mut self) -> Result<(String, SaveStatus), WorkbookError> {
        self.ensure_editable()?;
        let mut rows = self.data.resentments();
        let entry = ResentmentEntry::new();
        let id = entry.id.clone();
        rows.push(entry);
        let status = self.write_list(RESENTMENTS, &rows).await;
        Ok((id, status))
    }

    pub async fn update_resentment(
        &mut self,
        id: &str,
        edit: ResentmentEdit,
    ) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let mut rows = self.data.resentments();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| EntryError::NotFound(id.to_string()))?;
        row.apply(edit);
        Ok(self.write_list(RESENTMENTS, &rows).await)
    }

    pub async fn remove_resentment(&mut self, id: &str) -> Result<SaveStatus, WorkbookError> {
        self.ensure_editable()?;
        let mut rows = self.data.resentments();
        entries::remove_resentment(&mut rows, id)?;
        Ok(self.write_list(RESENTMENTS, &rows).await)
    }

    /// Record when the stage was assigned
    pub async fn set_assignment_date(&mut self, at: DateTime<Utc>) -> Result<(), WorkbookError> {
        let dates = StageDates::assigned(at);
        self.store.set_dates(&self.user, self.stage.number, dates).await?;
        self.dates.assigned = Some(at);
        tracing::info!(stage = %self.stage.number, "Assignment date set");
        Ok(())
    }

    /// Note that an artifact was exported
    pub async fn record_export(&mut self) -> SaveStatus {
        tracing::info!(stage = %self.stage.number, "Export recorded");
        self.write(vec![(HAS_EXPORTED.to_string(), Value::Bool(true))]).await
    }

    /// Content tree for the external renderer
    #[must_use]
    pub fn export_document(&self, generated_at: DateTime<Utc>) -> ExportDocument {
        ExportDocument::build(self.stage, &self.data, self.dates, generated_at)
    }

    /// Mark the stage complete at `now`
    ///
    /// Refused with the outstanding list unless the stage is completable, and
    /// with `UnsavedChanges` while earlier edits cannot be flushed.
    pub async fn complete(&mut self, now: DateTime<Utc>) -> Result<(), WorkbookError> {
        self.ensure_editable()?;
        let report = self.evaluate();
        let state = self.state();
        if state == StageState::UnlockedIncomplete {
            tracing::info!(
                stage = %self.stage.number,
                missing = report.missing.len(),
                "Completion blocked"
            );
            return Err(WorkbookError::CompletionBlocked {
                stage: self.stage.number,
                missing: report.missing,
            });
        }
        state_machine::validate_transition(state, StageState::Completed)?;

        // The completion date must never reach the store ahead of the answers
        if let SaveStatus::Failed { pending } = self.write(Vec::new()).await {
            tracing::warn!(stage = %self.stage.number, pending, "Completion deferred");
            return Err(WorkbookError::UnsavedChanges {
                stage: self.stage.number,
                pending,
            });
        }

        self.store
            .set_dates(&self.user, self.stage.number, StageDates::completed(now))
            .await?;
        self.dates.completed = Some(now);
        tracing::info!(stage = %self.stage.number, "Stage completed");
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), WorkbookError> {
        if self.state() == StageState::Locked {
            return Err(AccessError::StageLocked(self.stage.number).into());
        }
        Ok(())
    }

    fn section(&self, section_id: &str) -> Result<PlacedSection, WorkbookError> {
        self.stage
            .sections()
            .find(|placed| placed.section.id == section_id)
            .ok_or_else(|| EntryError::NotFound(section_id.to_string()).into())
    }

    fn derived_writes(
        &self,
        key: &stepwork_catalog::SectionKey,
        field: DerivedField,
        value: Value,
    ) -> Vec<(String, Value)> {
        let mut writes = vec![(key.field(field), value.clone())];
        if self.config.write_legacy_keys {
            writes.push((key.legacy_field(field), value));
        }
        writes
    }

    async fn write_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> SaveStatus {
        match serde_json::to_value(items) {
            Ok(value) => self.write(vec![(key.to_string(), value)]).await,
            Err(err) => {
                tracing::warn!(stage = %self.stage.number, key, "Entries not encodable: {}", err);
                SaveStatus::Failed {
                    pending: self.pending_writes(),
                }
            }
        }
    }

    /// Apply writes in memory, then flush them with everything still pending
    async fn write(&mut self, writes: Vec<(String, Value)>) -> SaveStatus {
        let batch = {
            let mut pending = self.pending.lock();
            for (key, value) in writes {
                self.data.insert(key.clone(), value.clone());
                pending.insert(key, value);
            }
            pending.clone()
        };

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let user = self.user.clone();
        let stage = self.stage.number;
        let flush = tokio::spawn(async move { flush(store, pending, user, stage, batch).await });

        match flush.await {
            Ok(0) => SaveStatus::Saved,
            Ok(pending) => SaveStatus::Failed { pending },
            Err(err) => {
                tracing::warn!(stage = %stage, "Write task aborted: {}", err);
                SaveStatus::Failed {
                    pending: self.pending_writes(),
                }
            }
        }
    }
}

/// Send a batch; acknowledged keys leave the pending set unless rewritten since
async fn flush<S: ProgressStore>(
    store: Arc<S>,
    pending: Arc<Mutex<BTreeMap<String, Value>>>,
    user: UserId,
    stage: StageNumber,
    batch: BTreeMap<String, Value>,
) -> usize {
    let results = join_all(batch.into_iter().map(|(key, value)| {
        let store = &store;
        let user = &user;
        async move {
            let result = store.set_field(user, stage, &key, value.clone()).await;
            (key, value, result)
        }
    }))
    .await;

    let mut pending = pending.lock();
    for (key, value, result) in results {
        match result {
            Ok(()) => {
                tracing::debug!(stage = %stage, key = %key, "Field saved");
                if pending.get(&key) == Some(&value) {
                    pending.remove(&key);
                }
            }
            Err(err) => {
                tracing::warn!(stage = %stage, key = %key, "Save failed: {}", err);
            }
        }
    }
    if !pending.is_empty() {
        tracing::warn!(stage = %stage, pending = pending.len(), "Writes pending");
    }
    pending.len()
}
