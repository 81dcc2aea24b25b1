//! Completion evaluator
//!
//! Pure function of (stage, field data, export flag). Gaps are collected in
//! catalog order without short-circuiting so the caller can show them all.

use crate::contract;
use crate::field_data::FieldData;
use serde::Serialize;
use stepwork_catalog::Stage;

/// Listed first whenever no artifact has been exported
pub const EXPORT_REQUIRED: &str = "Export step to PDF";

/// Outcome of evaluating one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub complete: bool,
    pub missing: Vec<String>,
}

impl CompletionReport {
    fn from_missing(missing: Vec<String>) -> Self {
        Self {
            complete: missing.is_empty(),
            missing,
        }
    }
}

/// Evaluate a stage against its field data
#[must_use]
pub fn evaluate_completion(
    stage: &Stage,
    data: &FieldData,
    has_exported: bool,
) -> CompletionReport {
    let mut missing = Vec::new();
    if !has_exported {
        missing.push(EXPORT_REQUIRED.to_string());
    }
    missing.extend(outstanding_sections(stage, data));
    CompletionReport::from_missing(missing)
}

/// Evaluate using the `hasExported` flag stored in the field data
#[must_use]
pub fn evaluate_stored(stage: &Stage, data: &FieldData) -> CompletionReport {
    evaluate_completion(stage, data, data.has_exported())
}

/// Section gaps only, ignoring the export precondition
#[must_use]
pub fn outstanding_sections(stage: &Stage, data: &FieldData) -> Vec<String> {
    stage
        .sections()
        .flat_map(|placed| contract::outstanding(&placed, data))
        .collect()
}
