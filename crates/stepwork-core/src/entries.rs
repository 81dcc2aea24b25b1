//! Entry shapes stored inside field data
//!
//! Generic list sections store a list of [`ListEntry`]; the resentment grid
//! stores a list of [`ResentmentEntry`]. Both lists keep at least one entry
//! once any exist.

use crate::error::EntryError;
use serde::{Deserialize, Serialize};

/// Entry of a repeated list item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEntry {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ripple_effects: Option<String>,
}

impl ListEntry {
    /// Empty entry with the positional id `{key}_{position}`
    #[must_use]
    pub fn empty(key: &str, position: usize) -> Self {
        Self {
            id: format!("{key}_{position}"),
            ..Self::default()
        }
    }

    /// Content is non-empty after trimming
    #[inline]
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Editable sub-field of a list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEntryField {
    Content,
    Date,
    RippleEffects,
}

/// `count` empty entries for a list that has none yet
#[must_use]
pub fn materialize(key: &str, count: u16) -> Vec<ListEntry> {
    (1..=usize::from(count))
        .map(|position| ListEntry::empty(key, position))
        .collect()
}

/// Append an empty entry
pub fn add_entry(entries: &mut Vec<ListEntry>, key: &str) {
    let position = entries.len() + 1;
    entries.push(ListEntry::empty(key, position));
}

/// Set one sub-field, filling in entries up to `index` when missing
pub fn update_entry(
    entries: &mut Vec<ListEntry>,
    key: &str,
    index: usize,
    field: ListEntryField,
    text: impl Into<String>,
) {
    while entries.len() <= index {
        let position = entries.len() + 1;
        entries.push(ListEntry::empty(key, position));
    }
    let entry = &mut entries[index];
    let text = text.into();
    match field {
        ListEntryField::Content => entry.content = text,
        ListEntryField::Date => entry.date = Some(text),
        ListEntryField::RippleEffects => entry.ripple_effects = Some(text),
    }
}

/// Remove the entry at `index`, refusing to empty the list
pub fn remove_entry(entries: &mut Vec<ListEntry>, index: usize) -> Result<ListEntry, EntryError> {
    if entries.len() <= 1 {
        return Err(EntryError::LastEntry);
    }
    if index >= entries.len() {
        return Err(EntryError::NotFound(format!("index {index}")));
    }
    Ok(entries.remove(index))
}

/// Life domains a resentment can affect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    SelfEsteem,
    Pocketbook,
    Ambition,
    PersonalRelations,
    SexualRelations,
    Security,
}

impl Domain {
    /// All six domains in grid order
    pub const ALL: [Self; 6] = [
        Self::SelfEsteem,
        Self::Pocketbook,
        Self::Ambition,
        Self::PersonalRelations,
        Self::SexualRelations,
        Self::Security,
    ];

    /// Column heading for the domain
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfEsteem => "Self-esteem",
            Self::Pocketbook => "Pocketbook",
            Self::Ambition => "Ambition (things I want)",
            Self::PersonalRelations => "Personal relationships",
            Self::SexualRelations => "Sexual relationships",
            Self::Security => "Security (things I need)",
        }
    }
}

/// Fixed six-key map of affected domains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffectedDomains {
    pub self_esteem: bool,
    pub pocketbook: bool,
    pub ambition: bool,
    pub personal_relations: bool,
    pub sexual_relations: bool,
    pub security: bool,
}

impl AffectedDomains {
    #[must_use]
    pub fn get(&self, domain: Domain) -> bool {
        match domain {
            Domain::SelfEsteem => self.self_esteem,
            Domain::Pocketbook => self.pocketbook,
            Domain::Ambition => self.ambition,
            Domain::PersonalRelations => self.personal_relations,
            Domain::SexualRelations => self.sexual_relations,
            Domain::Security => self.security,
        }
    }

    pub fn set(&mut self, domain: Domain, affected: bool) {
        let slot = match domain {
            Domain::SelfEsteem => &mut self.self_esteem,
            Domain::Pocketbook => &mut self.pocketbook,
            Domain::Ambition => &mut self.ambition,
            Domain::PersonalRelations => &mut self.personal_relations,
            Domain::SexualRelations => &mut self.sexual_relations,
            Domain::Security => &mut self.security,
        };
        *slot = affected;
    }

    /// Domains currently marked
    pub fn marked(&self) -> impl Iterator<Item = Domain> + '_ {
        Domain::ALL.into_iter().filter(|domain| self.get(*domain))
    }
}

/// One row of the resentment grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResentmentEntry {
    pub id: String,
    pub resentful_at: String,
    pub the_cause: String,
    pub affects_my: AffectedDomains,
    pub my_part: String,
    pub my_fears: String,
    pub sex_review: String,
}

impl ResentmentEntry {
    /// Empty row with a fresh unique id
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: format!("resentment_{}", uuid::Uuid::new_v4().simple()),
            ..Self::default()
        }
    }

    /// Both required columns are non-empty after trimming
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.resentful_at.trim().is_empty() && !self.the_cause.trim().is_empty()
    }

    /// Apply a single-column edit
    pub fn apply(&mut self, edit: ResentmentEdit) {
        match edit {
            ResentmentEdit::ResentfulAt(text) => self.resentful_at = text,
            ResentmentEdit::TheCause(text) => self.the_cause = text,
            ResentmentEdit::Affects(domain, affected) => self.affects_my.set(domain, affected),
            ResentmentEdit::MyPart(text) => self.my_part = text,
            ResentmentEdit::MyFears(text) => self.my_fears = text,
            ResentmentEdit::SexReview(text) => self.sex_review = text,
        }
    }
}

/// Field-by-field mutation of a resentment row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResentmentEdit {
    ResentfulAt(String),
    TheCause(String),
    Affects(Domain, bool),
    MyPart(String),
    MyFears(String),
    SexReview(String),
}

/// Remove the row with `id`, refusing to empty the grid
pub fn remove_resentment(
    entries: &mut Vec<ResentmentEntry>,
    id: &str,
) -> Result<ResentmentEntry, EntryError> {
    if entries.len() <= 1 {
        return Err(EntryError::LastEntry);
    }
    let index = entries
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| EntryError::NotFound(id.to_string()))?;
    Ok(entries.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn materialize_assigns_positional_ids() {
        let entries = materialize("powerless_examples", 3);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            ["powerless_examples_1", "powerless_examples_2", "powerless_examples_3"]
        );
        assert!(entries.iter().all(|e| !e.is_filled()));
    }

    #[test]
    fn update_fills_gaps() {
        let mut entries = Vec::new();
        update_entry(&mut entries, "k", 2, ListEntryField::Content, "third");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].id, "k_3");
        assert!(entries[2].is_filled());

        update_entry(&mut entries, "k", 0, ListEntryField::Date, "Summer 2019");
        assert_eq!(entries[0].date.as_deref(), Some("Summer 2019"));
    }

    #[test]
    fn last_list_entry_cannot_be_removed() {
        let mut entries = materialize("k", 2);
        assert!(remove_entry(&mut entries, 1).is_ok());
        assert_eq!(remove_entry(&mut entries, 0), Err(EntryError::LastEntry));
    }

    #[test]
    fn remove_out_of_range_is_not_found() {
        let mut entries = materialize("k", 2);
        assert!(matches!(
            remove_entry(&mut entries, 5),
            Err(EntryError::NotFound(_))
        ));
    }

    #[test]
    fn whitespace_content_is_not_filled() {
        let entry = ListEntry {
            content: "   \n".into(),
            ..ListEntry::default()
        };
        assert!(!entry.is_filled());
    }

    #[test]
    fn resentment_needs_both_required_columns() {
        let mut entry = ResentmentEntry::new();
        entry.apply(ResentmentEdit::ResentfulAt("Boss".into()));
        assert!(!entry.is_complete());
        entry.apply(ResentmentEdit::TheCause("Passed over".into()));
        assert!(entry.is_complete());
    }

    #[test]
    fn resentment_ids_are_unique() {
        assert_ne!(ResentmentEntry::new().id, ResentmentEntry::new().id);
    }

    #[test]
    fn resentment_uses_camel_case_keys() {
        let mut entry = ResentmentEntry::new();
        entry.apply(ResentmentEdit::Affects(Domain::Pocketbook, true));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["affectsMy"]["pocketbook"], json!(true));
        assert_eq!(value["affectsMy"]["selfEsteem"], json!(false));
        assert!(value.get("resentfulAt").is_some());
        assert_eq!(entry.affects_my.marked().collect::<Vec<_>>(), [Domain::Pocketbook]);
    }

    #[test]
    fn last_resentment_cannot_be_removed() {
        let mut entries = vec![ResentmentEntry::new(), ResentmentEntry::new()];
        let id = entries[0].id.clone();
        assert!(remove_resentment(&mut entries, &id).is_ok());
        let remaining = entries[0].id.clone();
        assert_eq!(
            remove_resentment(&mut entries, &remaining),
            Err(EntryError::LastEntry)
        );
    }
}
