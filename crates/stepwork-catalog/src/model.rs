//! Catalog model
//!
//! Stages are pure static data. A stage holds either parts or a flat list of
//! sections, and every section is a tagged union whose variant carries the
//! item shape for that section type.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default label for the date sub-field of a list entry
pub const DEFAULT_DATE_LABEL: &str = "Date (if known)";

/// Default label for the ripple-effects sub-field of a list entry
pub const DEFAULT_RIPPLE_EFFECTS_LABEL: &str = "Ripple Effects";

/// Stage number, always within `1..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StageNumber(u8);

impl StageNumber {
    /// First stage of the program
    pub const FIRST: Self = Self(1);
    /// Last stage of the program
    pub const LAST: Self = Self(12);
    /// Number of stages in the program
    pub const COUNT: usize = 12;

    /// Validate a raw stage number
    #[inline]
    pub fn new(number: u8) -> Result<Self, CatalogError> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(CatalogError::StageNotFound(u32::from(number)))
        }
    }

    /// Construct from catalog data known to be in range
    pub(crate) const fn from_catalog(number: u8) -> Self {
        Self(number)
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Following stage, saturating at the last one
    #[inline]
    #[must_use]
    pub fn next_saturating(self) -> Self {
        Self((self.0 + 1).min(Self::LAST.0))
    }

    /// All stage numbers in program order
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }
}

impl TryFrom<u8> for StageNumber {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u32> for StageNumber {
    type Error = CatalogError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| CatalogError::StageNotFound(value))
            .and_then(Self::new)
    }
}

impl From<StageNumber> for u8 {
    fn from(value: StageNumber) -> Self {
        value.0
    }
}

impl fmt::Display for StageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the 12 sequential program units
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub number: StageNumber,
    pub title: &'static str,
    /// Epigraph quote shown under the title
    pub quote: &'static str,
    /// Prayer text displayed with this stage's prayer work, if any
    pub prayer: Option<&'static str>,
    pub layout: StageLayout,
}

impl Stage {
    /// Parts of this stage (empty for flat stages)
    #[must_use]
    pub fn parts(&self) -> &'static [Part] {
        match self.layout {
            StageLayout::Parts(parts) => parts,
            StageLayout::Sections(_) => &[],
        }
    }

    /// Every section in catalog order, tagged with its part number
    pub fn sections(&self) -> impl Iterator<Item = PlacedSection> + '_ {
        let (parts, flat): (&'static [Part], &'static [Section]) = match self.layout {
            StageLayout::Parts(parts) => (parts, &[]),
            StageLayout::Sections(sections) => (&[], sections),
        };
        let in_parts = parts.iter().flat_map(move |part| {
            part.sections.iter().map(move |section| PlacedSection {
                stage: self.number,
                part: Some(part.part_number),
                section,
            })
        });
        let top_level = flat.iter().map(move |section| PlacedSection {
            stage: self.number,
            part: None,
            section,
        });
        in_parts.chain(top_level)
    }

    /// Heading used in titles and navigation
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Step {}: {}", self.number, self.title)
    }
}

/// Body of a stage: parts or flat sections, never both
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageLayout {
    Parts(&'static [Part]),
    Sections(&'static [Section]),
}

/// Sequenced subdivision within a stage
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub part_number: u8,
    pub title: Option<&'static str>,
    /// Advisory only; assignment dates are tracked per stage
    pub has_assignment_date: bool,
    pub sections: &'static [Section],
}

/// External resource link attached to a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub url: &'static str,
    pub label: &'static str,
}

/// Typed block of inputs within a part or stage
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable identifier, unique across the catalog
    pub id: &'static str,
    pub title: &'static str,
    pub instruction: Option<&'static str>,
    pub resource: Option<Resource>,
    pub body: SectionBody,
}

impl Section {
    /// Type tag of the body
    #[inline]
    #[must_use]
    pub fn section_type(&self) -> SectionType {
        self.body.section_type()
    }
}

/// Section content, one variant per section type
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "camelCase")]
pub enum SectionBody {
    /// Every prompt needs a text answer
    Definitions(&'static [Prompt]),
    /// Rows to tick, plus a completion confirmation
    Reading(&'static [ChecklistRow]),
    /// Free-text answers or repeated entries
    Writing(&'static [WritingItem]),
    /// Answers, repeated entries and display-only notes
    List(&'static [ListItem]),
    /// Rows that must all be ticked
    Checklist {
        style: ChecklistStyle,
        rows: &'static [ChecklistRow],
    },
    /// Completion confirmation, plus optional rows to tick
    Prayer(&'static [ChecklistRow]),
    /// The grievance-inventory grid
    Resentment(&'static [InventoryColumn]),
}

impl SectionBody {
    /// Type tag for this body
    #[must_use]
    pub fn section_type(&self) -> SectionType {
        match self {
            Self::Definitions(_) => SectionType::Definitions,
            Self::Reading(_) => SectionType::Reading,
            Self::Writing(_) => SectionType::Writing,
            Self::List(_) => SectionType::List,
            Self::Checklist {
                style: ChecklistStyle::Checklist,
                ..
            } => SectionType::Checklist,
            Self::Checklist {
                style: ChecklistStyle::Todo,
                ..
            } => SectionType::Todo,
            Self::Prayer(_) => SectionType::Prayer,
            Self::Resentment(_) => SectionType::Resentment,
        }
    }

    /// Number of items defined for the body
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Definitions(items) => items.len(),
            Self::Reading(rows) | Self::Prayer(rows) | Self::Checklist { rows, .. } => rows.len(),
            Self::Writing(items) => items.len(),
            Self::List(items) => items.len(),
            Self::Resentment(columns) => columns.len(),
        }
    }
}

/// Two spellings of the same checklist section type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStyle {
    Checklist,
    Todo,
}

/// Closed set of section type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Definitions,
    Reading,
    Writing,
    List,
    Checklist,
    Todo,
    Prayer,
    Resentment,
}

impl SectionType {
    /// Lowercase tag, as used in legacy field keys
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Definitions => "definitions",
            Self::Reading => "reading",
            Self::Writing => "writing",
            Self::List => "list",
            Self::Checklist => "checklist",
            Self::Todo => "todo",
            Self::Prayer => "prayer",
            Self::Resentment => "resentment",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Free-text prompt keyed into field data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub key: &'static str,
    pub prompt: &'static str,
}

impl Prompt {
    #[must_use]
    pub const fn new(key: &'static str, prompt: &'static str) -> Self {
        Self { key, prompt }
    }
}

/// Display-only row that the user ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistRow {
    pub key: &'static str,
    pub text: &'static str,
}

impl ChecklistRow {
    #[must_use]
    pub const fn new(key: &'static str, text: &'static str) -> Self {
        Self { key, text }
    }
}

/// Item of a writing section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingItem {
    pub key: &'static str,
    pub prompt: Option<&'static str>,
    pub text: Option<&'static str>,
    /// Number of list entries to offer; `None` means a single text answer
    pub count: Option<u16>,
    pub sub_items: &'static [&'static str],
}

impl WritingItem {
    /// Single text answer
    #[must_use]
    pub const fn answer(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt: Some(prompt),
            text: None,
            count: None,
            sub_items: &[],
        }
    }

    /// Repeated list entries
    #[must_use]
    pub const fn repeated(key: &'static str, prompt: &'static str, count: u16) -> Self {
        Self {
            key,
            prompt: Some(prompt),
            text: None,
            count: Some(count),
            sub_items: &[],
        }
    }

    /// Text answer introduced by a template instead of a prompt
    #[must_use]
    pub const fn templated(key: &'static str, text: &'static str) -> Self {
        Self {
            key,
            prompt: None,
            text: Some(text),
            count: None,
            sub_items: &[],
        }
    }

    #[must_use]
    pub const fn with_sub_items(self, sub_items: &'static [&'static str]) -> Self {
        Self { sub_items, ..self }
    }

    /// Label used when reporting this item
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.prompt.unwrap_or(self.key)
    }
}

/// What a list item asks of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItemKind {
    /// Free-text answer
    Answer(&'static str),
    /// Repeated entries
    Entries(u16),
    /// Display-only guidance
    Note,
}

/// Item of a list section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub key: &'static str,
    pub prompt: Option<&'static str>,
    pub text: Option<&'static str>,
    pub count: Option<u16>,
    pub has_date: bool,
    pub has_ripple_effects: bool,
    pub date_label: Option<&'static str>,
    pub ripple_effects_label: Option<&'static str>,
}

impl ListItem {
    const EMPTY: Self = Self {
        key: "",
        prompt: None,
        text: None,
        count: None,
        has_date: false,
        has_ripple_effects: false,
        date_label: None,
        ripple_effects_label: None,
    };

    /// Free-text answer
    #[must_use]
    pub const fn answer(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt: Some(prompt),
            ..Self::EMPTY
        }
    }

    /// Repeated entries
    #[must_use]
    pub const fn entries(key: &'static str, count: u16) -> Self {
        Self {
            key,
            count: Some(count),
            ..Self::EMPTY
        }
    }

    /// Display-only guidance
    #[must_use]
    pub const fn note(key: &'static str, text: &'static str) -> Self {
        Self {
            key,
            text: Some(text),
            ..Self::EMPTY
        }
    }

    #[must_use]
    pub const fn with_prompt(self, prompt: &'static str) -> Self {
        Self {
            prompt: Some(prompt),
            ..self
        }
    }

    #[must_use]
    pub const fn with_date(self) -> Self {
        Self {
            has_date: true,
            ..self
        }
    }

    #[must_use]
    pub const fn with_ripple_effects(self) -> Self {
        Self {
            has_ripple_effects: true,
            ..self
        }
    }

    #[must_use]
    pub const fn with_ripple_effects_label(self, label: &'static str) -> Self {
        Self {
            has_ripple_effects: true,
            ripple_effects_label: Some(label),
            ..self
        }
    }

    /// Requirement shape; a prompt takes precedence over a count
    #[must_use]
    pub fn kind(&self) -> ListItemKind {
        match (self.prompt, self.count) {
            (Some(prompt), _) => ListItemKind::Answer(prompt),
            (None, Some(count)) => ListItemKind::Entries(count),
            (None, None) => ListItemKind::Note,
        }
    }

    #[must_use]
    pub fn date_label(&self) -> &'static str {
        self.date_label.unwrap_or(DEFAULT_DATE_LABEL)
    }

    #[must_use]
    pub fn ripple_effects_label(&self) -> &'static str {
        self.ripple_effects_label
            .unwrap_or(DEFAULT_RIPPLE_EFFECTS_LABEL)
    }
}

/// Column guidance for the resentment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryColumn {
    pub key: &'static str,
    pub prompt: &'static str,
    pub text: Option<&'static str>,
    pub checklist_options: &'static [&'static str],
    pub sub_items: &'static [&'static str],
}

impl InventoryColumn {
    #[must_use]
    pub const fn new(key: &'static str, prompt: &'static str, text: &'static str) -> Self {
        Self {
            key,
            prompt,
            text: Some(text),
            checklist_options: &[],
            sub_items: &[],
        }
    }

    #[must_use]
    pub const fn prompt_only(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            text: None,
            checklist_options: &[],
            sub_items: &[],
        }
    }

    #[must_use]
    pub const fn with_options(self, checklist_options: &'static [&'static str]) -> Self {
        Self {
            checklist_options,
            ..self
        }
    }

    #[must_use]
    pub const fn with_sub_items(self, sub_items: &'static [&'static str]) -> Self {
        Self { sub_items, ..self }
    }
}

/// Section together with where it sits in its stage
#[derive(Debug, Clone, Copy)]
pub struct PlacedSection {
    pub stage: StageNumber,
    pub part: Option<u8>,
    pub section: &'static Section,
}

impl PlacedSection {
    /// Key used to namespace derived field keys for this section
    #[must_use]
    pub fn key(&self) -> SectionKey {
        let legacy = match self.part {
            Some(part) => format!(
                "{}_{}_part{}",
                self.section.section_type().tag(),
                self.section.title,
                part
            ),
            None => format!("{}_{}", self.section.section_type().tag(), self.section.title),
        };
        SectionKey {
            stable: self.section.id.to_string(),
            legacy,
        }
    }
}

/// Field derived from a section rather than from one of its items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedField {
    /// Map of item key to ticked flag
    Checklist,
    /// Section-level completion confirmation
    Completed,
}

impl DerivedField {
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Checklist => "checklist",
            Self::Completed => "completed",
        }
    }
}

/// Stable section identifier plus the legacy `type_title[_partN]` key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    stable: String,
    legacy: String,
}

impl SectionKey {
    #[inline]
    #[must_use]
    pub fn stable(&self) -> &str {
        &self.stable
    }

    #[inline]
    #[must_use]
    pub fn legacy(&self) -> &str {
        &self.legacy
    }

    /// Field-data key written for a derived field
    #[must_use]
    pub fn field(&self, field: DerivedField) -> String {
        format!("{}_{}", self.stable, field.suffix())
    }

    /// Field-data key older records used for a derived field
    #[must_use]
    pub fn legacy_field(&self, field: DerivedField) -> String {
        format!("{}_{}", self.legacy, field.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_number_bounds() {
        assert!(StageNumber::new(0).is_err());
        assert!(StageNumber::new(13).is_err());
        assert_eq!(StageNumber::new(12).unwrap(), StageNumber::LAST);
        assert_eq!(StageNumber::all().count(), StageNumber::COUNT);
    }

    #[test]
    fn stage_number_saturates() {
        assert_eq!(StageNumber::LAST.next_saturating(), StageNumber::LAST);
        assert_eq!(StageNumber::FIRST.next_saturating().get(), 2);
    }

    #[test]
    fn stage_number_rejects_large_u32() {
        assert!(matches!(
            StageNumber::try_from(300u32),
            Err(CatalogError::StageNotFound(300))
        ));
    }

    #[test]
    fn list_item_prompt_wins_over_count() {
        let item = ListItem::entries("amends", 10).with_prompt("List people");
        assert_eq!(item.kind(), ListItemKind::Answer("List people"));
        assert_eq!(ListItem::entries("x", 5).kind(), ListItemKind::Entries(5));
        assert_eq!(ListItem::note("y", "note").kind(), ListItemKind::Note);
    }

    #[test]
    fn list_item_labels_default() {
        let item = ListItem::entries("x", 1);
        assert_eq!(item.date_label(), DEFAULT_DATE_LABEL);
        let labelled = item.with_ripple_effects_label("Specific Harm Committed");
        assert!(labelled.has_ripple_effects);
        assert_eq!(labelled.ripple_effects_label(), "Specific Harm Committed");
    }

    #[test]
    fn writing_label_falls_back_to_key() {
        assert_eq!(WritingItem::templated("script", "Script ...").label(), "script");
        assert_eq!(WritingItem::answer("hp", "Write").label(), "Write");
    }
}
