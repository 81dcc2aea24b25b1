//! Section renderer contract
//!
//! One pure function per section type maps a section definition and the
//! current field data to the checklist of inputs it requires. The edit view,
//! the export tree and the completion evaluator all read this one list, so
//! they cannot disagree on what is filled in.

use crate::field_data::FieldData;
use serde::Serialize;
use stepwork_catalog::{
    ChecklistRow, DerivedField, ListItemKind, PlacedSection, SectionBody, SectionKey,
};

/// One required input of a section and whether it is satisfied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredInput {
    /// Human-readable `{section title}: {requirement}`
    pub description: String,
    /// Field-data key the user edits to satisfy it
    pub field: String,
    pub satisfied: bool,
}

/// Required inputs of a section, in item order
#[must_use]
pub fn required_inputs(placed: &PlacedSection, data: &FieldData) -> Vec<RequiredInput> {
    let section = placed.section;
    let key = placed.key();
    let title = section.title;
    let require = |label: &str, field: String, satisfied: bool| RequiredInput {
        description: format!("{title}: {label}"),
        field,
        satisfied,
    };

    match section.body {
        SectionBody::Definitions(prompts) => prompts
            .iter()
            .map(|item| {
                let label = if item.prompt.is_empty() { item.key } else { item.prompt };
                require(label, item.key.to_string(), data.has_text(item.key))
            })
            .collect(),
        SectionBody::Reading(rows) => vec![
            require(
                "Check all reading items",
                key.field(DerivedField::Checklist),
                all_checked(data, &key, rows),
            ),
            require(
                "Confirm reading completion",
                key.field(DerivedField::Completed),
                data.section_confirmed(&key),
            ),
        ],
        SectionBody::Writing(items) => items
            .iter()
            .map(|item| {
                let satisfied = if item.count.is_some() {
                    data.has_filled_entry(item.key)
                } else {
                    data.has_text(item.key)
                };
                require(item.label(), item.key.to_string(), satisfied)
            })
            .collect(),
        SectionBody::List(items) => items
            .iter()
            .filter_map(|item| match item.kind() {
                ListItemKind::Answer(prompt) => Some(require(
                    prompt,
                    item.key.to_string(),
                    data.has_text(item.key),
                )),
                ListItemKind::Entries(_) => Some(require(
                    "Fill in list items",
                    item.key.to_string(),
                    data.has_filled_entry(item.key),
                )),
                ListItemKind::Note => None,
            })
            .collect(),
        SectionBody::Checklist { rows, .. } => vec![require(
            "Complete all items",
            key.field(DerivedField::Checklist),
            all_checked(data, &key, rows),
        )],
        SectionBody::Prayer(rows) => {
            let mut inputs = vec![require(
                "Confirm prayer completion",
                key.field(DerivedField::Completed),
                data.section_confirmed(&key),
            )];
            if !rows.is_empty() {
                inputs.push(require(
                    "Complete all prayer items",
                    key.field(DerivedField::Checklist),
                    all_checked(data, &key, rows),
                ));
            }
            inputs
        }
        SectionBody::Resentment(_) => {
            let entries = data.resentments();
            let field = crate::field_data::RESENTMENTS.to_string();
            if entries.is_empty() {
                vec![require("Add at least one resentment entry", field, false)]
            } else {
                vec![require(
                    "Complete at least one entry (Resentful At + Cause)",
                    field,
                    entries.iter().any(crate::entries::ResentmentEntry::is_complete),
                )]
            }
        }
    }
}

/// Descriptions of the unsatisfied inputs of a section
#[must_use]
pub fn outstanding(placed: &PlacedSection, data: &FieldData) -> Vec<String> {
    required_inputs(placed, data)
        .into_iter()
        .filter(|input| !input.satisfied)
        .map(|input| input.description)
        .collect()
}

fn all_checked(data: &FieldData, key: &SectionKey, rows: &[ChecklistRow]) -> bool {
    rows.iter().all(|row| data.row_checked(key, row.key))
}
