//! Workbook configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use stepwork_catalog::{password_for, StageNumber};

/// Phrase that upgrades a sponsee to the sponsor role
pub const DEFAULT_ELEVATION_PHRASE: &str = "freelygiven";

/// Runtime configuration for the workbook service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    /// Failed password attempts before the hint is shown
    pub hint_after_attempts: u32,
    /// Shared phrase for sponsor elevation
    pub elevation_phrase: String,
    /// Per-stage password overrides, keyed by stage number (`"4" = "word"`)
    pub passwords: BTreeMap<String, String>,
    /// Also write derived section keys under their legacy names
    pub write_legacy_keys: bool,
}

impl WorkbookConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_hint_after_attempts(mut self, attempts: u32) -> Self {
        self.hint_after_attempts = attempts;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_elevation_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.elevation_phrase = phrase.into();
        self
    }

    /// Override the password of one stage
    #[must_use]
    pub fn with_password(mut self, stage: StageNumber, word: impl Into<String>) -> Self {
        self.passwords.insert(stage.to_string(), word.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_legacy_keys(mut self, enabled: bool) -> Self {
        self.write_legacy_keys = enabled;
        self
    }

    /// Password in effect for a stage
    #[must_use]
    pub fn password(&self, stage: StageNumber) -> &str {
        self.passwords
            .get(&stage.to_string())
            .map_or_else(|| password_for(stage), String::as_str)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hint_after_attempts == 0 {
            return Err(ConfigError::Invalid(
                "hint_after_attempts must be at least 1".into(),
            ));
        }
        if self.elevation_phrase.trim().is_empty() {
            return Err(ConfigError::Invalid("elevation_phrase is empty".into()));
        }
        for (stage, word) in &self.passwords {
            let known = stage
                .parse::<u8>()
                .ok()
                .and_then(|n| StageNumber::new(n).ok())
                .is_some();
            if !known {
                return Err(ConfigError::Invalid(format!(
                    "password override for unknown stage {stage}"
                )));
            }
            if word.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "password override for stage {stage} is empty"
                )));
            }
        }
        Ok(())
    }
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            hint_after_attempts: 3,
            elevation_phrase: DEFAULT_ELEVATION_PHRASE.to_string(),
            passwords: BTreeMap::new(),
            write_legacy_keys: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(n: u8) -> StageNumber {
        StageNumber::new(n).unwrap()
    }

    #[test]
    fn defaults() {
        let config = WorkbookConfig::new();
        assert_eq!(config.hint_after_attempts, 3);
        assert_eq!(config.elevation_phrase, "freelygiven");
        assert!(!config.write_legacy_keys);
        assert_eq!(config.password(stage(4)), "courage");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn override_replaces_one_stage() {
        let config = WorkbookConfig::new().with_password(stage(2), "renewal");
        assert_eq!(config.password(stage(2)), "renewal");
        assert_eq!(config.password(stage(3)), "faith");
    }

    #[test]
    fn parses_partial_toml() {
        let config = WorkbookConfig::from_toml_str(
            r#"
            hint_after_attempts = 5
            write_legacy_keys = true

            [passwords]
            1 = "open"
            "#,
        )
        .unwrap();
        assert_eq!(config.hint_after_attempts, 5);
        assert!(config.write_legacy_keys);
        assert_eq!(config.elevation_phrase, DEFAULT_ELEVATION_PHRASE);
        assert_eq!(config.password(stage(1)), "open");
    }

    #[test]
    fn rejects_zero_attempts() {
        let err = WorkbookConfig::from_toml_str("hint_after_attempts = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_stage_override() {
        let config = WorkbookConfig {
            passwords: BTreeMap::from([("13".to_string(), "x".to_string())]),
            ..WorkbookConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_phrase() {
        assert!(WorkbookConfig::new()
            .with_elevation_phrase("  ")
            .validate()
            .is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(matches!(
            WorkbookConfig::from_toml_str("hint_after_attempts = \"three\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
