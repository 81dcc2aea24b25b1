//! Per-stage access words
//!
//! Sponsors hand these to sponsees when a stage is ready to be worked.

use crate::model::StageNumber;

/// One word per stage, indexed by `stage - 1`
pub static STAGE_PASSWORDS: [&str; 12] = [
    "honest",
    "hope",
    "faith",
    "courage",
    "truth",
    "prepare",
    "asking",
    "accountable",
    "healing",
    "watchful",
    "conscious",
    "carry",
];

/// Access word for a stage
#[inline]
#[must_use]
pub fn password_for(stage: StageNumber) -> &'static str {
    STAGE_PASSWORDS[usize::from(stage.get()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stage_has_a_word() {
        for stage in StageNumber::all() {
            assert!(!password_for(stage).is_empty());
        }
        assert_eq!(password_for(StageNumber::new(4).unwrap()), "courage");
    }
}
