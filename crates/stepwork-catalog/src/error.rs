//! Error types for catalog lookups

/// Catalog lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Stage number outside the program
    #[error("stage {0} not found (expected 1-12)")]
    StageNotFound(u32),
}

impl CatalogError {
    /// Every catalog error is a not-found state the caller can show
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StageNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_stage() {
        let err = CatalogError::StageNotFound(13);
        assert!(err.to_string().contains("13"));
        assert!(err.is_not_found());
    }
}
