//! Stepwork Core - stage-completion engine
//!
//! Tracks per-stage answers and derives everything the workbook gates on:
//! - Completion evaluation across heterogeneous section types
//! - Program-level progress metrics
//! - Stage passwords and sponsor elevation
//! - Export content trees
//!
//! # Example
//!
//! ```rust
//! use stepwork_core::{evaluate_completion, FieldData};
//!
//! let stage = stepwork_catalog::stage(2).unwrap();
//! let report = evaluate_completion(stage, &FieldData::new(), false);
//! assert!(!report.complete);
//! assert_eq!(report.missing[0], "Export step to PDF");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod access;
pub mod aggregator;
pub mod config;
pub mod contract;
pub mod entries;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod field_data;
pub mod identity;
pub mod record;
pub mod state_machine;
pub mod store;
pub mod workbook;

// Re-exports for convenience
pub use access::{
    check_elevation_phrase, password_hint, resolve_signup_role, verify_stage_password,
    GateOutcome, PasswordGate,
};
pub use aggregator::{
    derive_progress_summary, format_days, is_accessible, stage_overview, DayCount,
    ProgressSummary, StageOverview, StageStatus,
};
pub use config::WorkbookConfig;
pub use contract::{required_inputs, RequiredInput};
pub use entries::{
    AffectedDomains, Domain, ListEntry, ListEntryField, ResentmentEdit, ResentmentEntry,
};
pub use error::{
    AccessError, ConfigError, EntryError, IdentityError, StateMachineError, StoreError,
    WorkbookError,
};
pub use evaluator::{evaluate_completion, CompletionReport, EXPORT_REQUIRED};
pub use export::ExportDocument;
pub use field_data::FieldData;
pub use identity::{IdentityProvider, MemoryIdentity};
pub use record::{ProgressRecord, Role, StageDates, UserId};
pub use state_machine::StageState;
pub use store::{MemoryStore, ProgressStore, RecordFeed};
pub use workbook::{Dashboard, SaveStatus, StageSession, Workbook};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the workbook
    pub use crate::{
        evaluate_completion, derive_progress_summary, FieldData, MemoryIdentity, MemoryStore,
        ProgressRecord, ProgressStore, Role, StageState, UserId, Workbook, WorkbookConfig,
        WorkbookError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
