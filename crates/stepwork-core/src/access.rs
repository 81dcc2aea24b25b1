//! Access gate
//!
//! Two independent checks: the per-stage password that sponsees enter to
//! reach a stage's edit view, and the shared phrase that upgrades an account
//! to the sponsor role. Mismatches are ordinary negative results.

use crate::config::{WorkbookConfig, DEFAULT_ELEVATION_PHRASE};
use crate::error::AccessError;
use crate::record::Role;
use serde::Serialize;
use stepwork_catalog::{password_for, StageNumber};

/// Trimmed, case-insensitive comparison
#[must_use]
pub fn words_match(expected: &str, candidate: &str) -> bool {
    candidate.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Check a candidate against the static password of a stage
///
/// Unknown stage numbers never match.
#[must_use]
pub fn verify_stage_password(stage: u8, candidate: &str) -> bool {
    StageNumber::new(stage).is_ok_and(|number| words_match(password_for(number), candidate))
}

/// Hint for a stage's static password, empty for unknown stages
#[must_use]
pub fn password_hint(stage: u8) -> String {
    StageNumber::new(stage).map_or_else(|_| String::new(), |number| hint_for(password_for(number)))
}

/// `Starts with "X"` for the first character of a word
#[must_use]
pub fn hint_for(word: &str) -> String {
    word.chars().next().map_or_else(String::new, |first| {
        format!("Starts with \"{}\"", first.to_uppercase())
    })
}

/// Check a candidate against the default elevation phrase
#[must_use]
pub fn check_elevation_phrase(candidate: &str) -> bool {
    words_match(DEFAULT_ELEVATION_PHRASE, candidate)
}

/// Role granted at sign-up
///
/// The sponsor role requires the configured phrase; sponsees need nothing.
pub fn resolve_signup_role(
    config: &WorkbookConfig,
    requested: Role,
    phrase: Option<&str>,
) -> Result<Role, AccessError> {
    match (requested, phrase) {
        (Role::Sponsee, _) => Ok(Role::Sponsee),
        (Role::Sponsor, None) => Err(AccessError::ElevationRequired),
        (Role::Sponsor, Some(phrase)) if words_match(&config.elevation_phrase, phrase) => {
            Ok(Role::Sponsor)
        }
        (Role::Sponsor, Some(_)) => Err(AccessError::IncorrectPhrase),
    }
}

/// Result of one password attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum GateOutcome {
    Unlocked,
    Rejected {
        attempts: u32,
        hint: Option<String>,
    },
}

impl GateOutcome {
    #[inline]
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

/// Password prompt state for one stage
#[derive(Debug, Clone)]
pub struct PasswordGate {
    stage: StageNumber,
    password: String,
    hint_after: u32,
    failed: u32,
}

impl PasswordGate {
    /// Gate using the password and hint threshold in effect in `config`
    #[must_use]
    pub fn new(stage: StageNumber, config: &WorkbookConfig) -> Self {
        Self {
            stage,
            password: config.password(stage).to_string(),
            hint_after: config.hint_after_attempts,
            failed: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> StageNumber {
        self.stage
    }

    #[inline]
    #[must_use]
    pub fn failed_attempts(&self) -> u32 {
        self.failed
    }

    /// Hint, once enough attempts have failed
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        (self.failed >= self.hint_after).then(|| hint_for(&self.password))
    }

    /// Check a candidate, counting failures
    pub fn attempt(&mut self, candidate: &str) -> GateOutcome {
        if words_match(&self.password, candidate) {
            return GateOutcome::Unlocked;
        }
        self.failed = self.failed.saturating_add(1);
        GateOutcome::Rejected {
            attempts: self.failed,
            hint: self.hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_case_insensitive_and_trimmed() {
        assert!(verify_stage_password(4, "COURAGE"));
        assert!(verify_stage_password(4, "  courage \n"));
        assert!(!verify_stage_password(4, "courag"));
        assert!(!verify_stage_password(13, "courage"));
    }

    #[test]
    fn hint_is_first_letter_uppercased() {
        assert_eq!(password_hint(4), "Starts with \"C\"");
        assert_eq!(password_hint(0), "");
    }

    #[test]
    fn hint_appears_on_third_failure() {
        let mut gate = PasswordGate::new(StageNumber::new(1).unwrap(), &WorkbookConfig::new());
        assert_eq!(
            gate.attempt("wrong"),
            GateOutcome::Rejected { attempts: 1, hint: None }
        );
        assert!(!gate.attempt("wrong").is_unlocked());
        assert_eq!(
            gate.attempt("wrong"),
            GateOutcome::Rejected {
                attempts: 3,
                hint: Some("Starts with \"H\"".into())
            }
        );
        assert!(gate.attempt("Honest").is_unlocked());
    }

    #[test]
    fn gate_uses_configured_override() {
        let stage = StageNumber::new(2).unwrap();
        let config = WorkbookConfig::new()
            .with_password(stage, "renewal")
            .with_hint_after_attempts(1);
        let mut gate = PasswordGate::new(stage, &config);
        assert_eq!(
            gate.attempt("hope"),
            GateOutcome::Rejected {
                attempts: 1,
                hint: Some("Starts with \"R\"".into())
            }
        );
        assert!(gate.attempt("RENEWAL").is_unlocked());
    }

    #[test]
    fn elevation_phrase() {
        assert!(check_elevation_phrase("FreelyGiven"));
        assert!(check_elevation_phrase(" freelygiven "));
        assert!(!check_elevation_phrase("freely given"));
    }

    #[test]
    fn signup_role_resolution() {
        let config = WorkbookConfig::new();
        assert_eq!(resolve_signup_role(&config, Role::Sponsee, None), Ok(Role::Sponsee));
        assert_eq!(
            resolve_signup_role(&config, Role::Sponsor, None),
            Err(AccessError::ElevationRequired)
        );
        assert_eq!(
            resolve_signup_role(&config, Role::Sponsor, Some("nope")),
            Err(AccessError::IncorrectPhrase)
        );
        assert_eq!(
            resolve_signup_role(&config, Role::Sponsor, Some("FREELYGIVEN")),
            Ok(Role::Sponsor)
        );
    }
}
