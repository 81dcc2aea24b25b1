//! Stepwork Catalog
//!
//! Immutable definition of the 12-stage workbook. Each stage holds parts or a
//! flat list of sections; each section is a typed block of input items.
//!
//! # Example
//!
//! ```rust
//! use stepwork_catalog::{stage, SectionType};
//!
//! let four = stage(4).unwrap();
//! assert_eq!(four.title, "Moral Inventory");
//! assert!(four
//!     .sections()
//!     .any(|placed| placed.section.section_type() == SectionType::Resentment));
//! assert!(stage(13).is_err());
//! ```

#![allow(missing_docs)]

pub mod encouragement;
pub mod error;
pub mod model;
pub mod passwords;
pub mod prayers;
pub mod stages;

pub use error::CatalogError;
pub use model::{
    ChecklistRow, ChecklistStyle, DerivedField, InventoryColumn, ListItem, ListItemKind, Part,
    PlacedSection, Prompt, Resource, Section, SectionBody, SectionKey, SectionType, Stage,
    StageLayout, StageNumber, WritingItem,
};
pub use passwords::password_for;
pub use stages::STAGES;

/// Stage definition for a validated number
#[inline]
#[must_use]
pub fn stage_by_number(number: StageNumber) -> &'static Stage {
    &STAGES[usize::from(number.get()) - 1]
}

/// Stage definition for a raw number, `StageNotFound` outside 1-12
pub fn stage(number: u8) -> Result<&'static Stage, CatalogError> {
    StageNumber::new(number).map(stage_by_number)
}

/// All stages in program order
pub fn stages() -> impl Iterator<Item = &'static Stage> {
    STAGES.iter()
}

/// `Step {n}: {title}`, or `Step {n}` for numbers outside the catalog
#[must_use]
pub fn stage_title(number: u8) -> String {
    match stage(number) {
        Ok(found) => found.heading(),
        Err(_) => format!("Step {number}"),
    }
}

/// Locate a section by its stable identifier
#[must_use]
pub fn find_section(id: &str) -> Option<PlacedSection> {
    stages()
        .flat_map(Stage::sections)
        .find(|placed| placed.section.id == id)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
