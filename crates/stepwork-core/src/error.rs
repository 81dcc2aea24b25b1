//! Error types for Stepwork Core
//!
//! Provides error handling for:
//! - Progress store failures
//! - Identity provider failures
//! - Access and role elevation refusals
//! - Illegal stage transitions
//! - Configuration problems
//!
//! Nothing here is fatal: every variant is recoverable at the UI boundary.

use stepwork_catalog::{CatalogError, StageNumber};

/// Main workbook error type
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    /// Stage number outside the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persistence layer failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Identity provider failed
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Access refused
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Stage state machine refused a transition
    #[error("state machine error: {0}")]
    StateMachine(#[from] StateMachineError),

    /// No user is signed in
    #[error("no user signed in")]
    NotSignedIn,

    /// Stage cannot be completed yet
    #[error("stage {stage} is not complete: {} item(s) outstanding", .missing.len())]
    CompletionBlocked {
        stage: StageNumber,
        missing: Vec<String>,
    },

    /// Earlier edits are still unacknowledged by the store
    #[error("stage {stage} has {pending} unsaved change(s)")]
    UnsavedChanges { stage: StageNumber, pending: usize },

    /// Entry edit refused
    #[error("entry error: {0}")]
    Entry(#[from] EntryError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WorkbookError {
    /// Check if the caller should show a not-found state
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }

    /// Check if retrying the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_retryable(),
            Self::Identity(err) => err.is_retryable(),
            Self::UnsavedChanges { .. } => true,
            _ => false,
        }
    }
}

/// Progress store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store not initialized or not reachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Write was not acknowledged
    #[error("write failed for {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    /// Persisted record could not be decoded
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Transport failures are worth retrying; decode failures are not
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::WriteFailed { .. })
    }
}

/// Identity provider errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No profile exists for the user
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// Provider not reachable
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

impl IdentityError {
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Access gate refusals that are not plain mismatches
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Sponsor role requested without the shared phrase
    #[error("sponsor access code required")]
    ElevationRequired,

    /// Shared phrase did not match
    #[error("incorrect access code")]
    IncorrectPhrase,

    /// Stage edit view reached while still locked
    #[error("stage {0} is locked")]
    StageLocked(StageNumber),
}

/// List and resentment entry edit errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// Removal would leave the list empty
    #[error("at least one entry must remain")]
    LastEntry,

    /// No entry at the index or with the id
    #[error("entry not found: {0}")]
    NotFound(String),
}

/// Stage state machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    #[error("illegal transition")]
    IllegalTransition,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Value out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// File could not be read
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML for the config shape
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
