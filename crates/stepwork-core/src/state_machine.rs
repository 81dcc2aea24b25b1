//! Per-stage state machine

use crate::error::StateMachineError;
use crate::record::Role;
use serde::Serialize;

/// Lifecycle of one stage from the sponsee's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageState {
    /// Password not yet accepted
    Locked,
    /// Reachable, with outstanding requirements
    UnlockedIncomplete,
    /// Every requirement met and exported
    Completable,
    /// Completion date recorded
    Completed,
}

impl StageState {
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// State implied by the stored flags and the latest evaluation
///
/// Sponsors never see `Locked`.
#[must_use]
pub fn derive_state(
    role: Role,
    unlocked: bool,
    completed: bool,
    requirements_met: bool,
) -> StageState {
    if completed {
        StageState::Completed
    } else if !role.is_sponsor() && !unlocked {
        StageState::Locked
    } else if requirements_met {
        StageState::Completable
    } else {
        StageState::UnlockedIncomplete
    }
}

pub fn validate_transition(from: StageState, to: StageState) -> Result<(), StateMachineError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition)
    }
}

#[must_use]
pub fn allowed_transitions(from: StageState) -> Vec<StageState> {
    use StageState::{Completable, Completed, Locked, UnlockedIncomplete};
    match from {
        Locked => vec![UnlockedIncomplete],
        UnlockedIncomplete => vec![Completable],
        Completable => vec![UnlockedIncomplete, Completed],
        Completed => vec![],
    }
}
