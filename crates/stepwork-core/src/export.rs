//! Export content tree
//!
//! A serializable document handed to an external renderer. Empty answers get
//! a blank placeholder so the printed page leaves room to write by hand.

use crate::contract;
use crate::entries::ListEntry;
use crate::field_data::FieldData;
use crate::record::StageDates;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stepwork_catalog::{
    ChecklistRow, ListItemKind, PlacedSection, SectionBody, SectionKey, SectionType, Stage,
    StageLayout,
};

/// Placeholder printed for an empty answer
pub const BLANK: &str = "_________________________________";
/// Placeholder printed for an empty entry date
pub const BLANK_DATE: &str = "___/___/___";
/// Footer text of every document
pub const FOOTER: &str = "12-Step Recovery Workbook";
/// Column headings of the resentment grid
pub const RESENTMENT_HEADINGS: [&str; 6] =
    ["Resentment", "Cause", "Affects", "My Part", "Fear", "Sex/Harm"];

const DATE_FORMAT: &str = "%B %-d, %Y";

/// Printable document for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub document_title: String,
    pub heading: String,
    pub assignment: String,
    pub completion: String,
    pub quote: &'static str,
    pub prayer: Option<&'static str>,
    pub parts: Vec<ExportPart>,
    pub footer: &'static str,
    pub generated_on: String,
}

/// Group of sections; flat stages have one part without a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPart {
    pub part_number: Option<u8>,
    pub heading: Option<String>,
    pub sections: Vec<ExportSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    pub id: &'static str,
    pub section_type: SectionType,
    pub title: &'static str,
    pub instruction: Option<&'static str>,
    pub blocks: Vec<ExportBlock>,
    /// Requirements still unmet, as the edit view reports them
    pub outstanding: Vec<String>,
}

/// Printable unit of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportBlock {
    Answer {
        label: &'static str,
        text: String,
    },
    Entries {
        label: &'static str,
        entries: Vec<ExportEntry>,
    },
    Note {
        text: &'static str,
    },
    Checklist {
        rows: Vec<ExportRow>,
    },
    Confirmation {
        label: &'static str,
        checked: bool,
    },
    Resentments {
        headings: [&'static str; 6],
        rows: Vec<ExportResentment>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub content: String,
    /// Present only for items that record a date
    pub date: Option<String>,
    /// Present only for items that record ripple effects
    pub ripple_effects: Option<ExportAnswerLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportAnswerLine {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub text: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResentment {
    pub resentful_at: String,
    pub the_cause: String,
    pub affects: Vec<&'static str>,
    pub my_part: String,
    pub my_fears: String,
    pub sex_review: String,
}

impl ExportDocument {
    /// Build the content tree of a stage
    #[must_use]
    pub fn build(
        stage: &Stage,
        data: &FieldData,
        dates: StageDates,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let parts = match stage.layout {
            StageLayout::Parts(parts) => parts
                .iter()
                .map(|part| ExportPart {
                    part_number: Some(part.part_number),
                    heading: Some(
                        part.title
                            .map_or_else(|| format!("Part {}", part.part_number), str::to_string),
                    ),
                    sections: stage
                        .sections()
                        .filter(|placed| placed.part == Some(part.part_number))
                        .map(|placed| export_section(&placed, data))
                        .collect(),
                })
                .collect(),
            StageLayout::Sections(_) => vec![ExportPart {
                part_number: None,
                heading: None,
                sections: stage
                    .sections()
                    .map(|placed| export_section(&placed, data))
                    .collect(),
            }],
        };

        Self {
            document_title: format!("Step {} - {} - Recovery Workbook", stage.number, stage.title),
            heading: stage.heading(),
            assignment: dates
                .assigned
                .map_or_else(|| "Not set".to_string(), format_date),
            completion: dates
                .completed
                .map_or_else(|| "In Progress".to_string(), format_date),
            quote: stage.quote,
            prayer: stage.prayer,
            parts,
            footer: FOOTER,
            generated_on: format_date(generated_at),
        }
    }

    /// Sections in document order
    pub fn sections(&self) -> impl Iterator<Item = &ExportSection> {
        self.parts.iter().flat_map(|part| part.sections.iter())
    }

    /// Every section's requirements are met
    #[must_use]
    pub fn is_filled_in(&self) -> bool {
        self.sections().all(|section| section.outstanding.is_empty())
    }
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

fn answer(data: &FieldData, key: &str) -> String {
    let text = data.text(key);
    if text.trim().is_empty() {
        BLANK.to_string()
    } else {
        text.to_string()
    }
}

fn or_blank(text: &str, blank: &str) -> String {
    if text.trim().is_empty() {
        blank.to_string()
    } else {
        text.to_string()
    }
}

fn padded(entries: Vec<ListEntry>, count: u16) -> Vec<ListEntry> {
    let mut entries = entries;
    let target = usize::from(count).max(entries.len());
    entries.resize_with(target, ListEntry::default);
    entries
}

fn checklist(data: &FieldData, key: &SectionKey, rows: &'static [ChecklistRow]) -> ExportBlock {
    ExportBlock::Checklist {
        rows: rows
            .iter()
            .map(|row| ExportRow {
                text: row.text,
                checked: data.row_checked(key, row.key),
            })
            .collect(),
    }
}

fn confirmation(data: &FieldData, key: &SectionKey) -> ExportBlock {
    ExportBlock::Confirmation {
        label: "Section Completed",
        checked: data.section_confirmed(key),
    }
}

fn export_section(placed: &PlacedSection, data: &FieldData) -> ExportSection {
    let section = placed.section;
    let key = placed.key();
    let blocks = match section.body {
        SectionBody::Definitions(prompts) => prompts
            .iter()
            .map(|item| ExportBlock::Answer {
                label: if item.prompt.is_empty() { item.key } else { item.prompt },
                text: answer(data, item.key),
            })
            .collect(),
        SectionBody::Writing(items) => items
            .iter()
            .map(|item| match item.count {
                Some(count) => ExportBlock::Entries {
                    label: item.label(),
                    entries: padded(data.list_entries(item.key), count)
                        .into_iter()
                        .map(|entry| ExportEntry {
                            content: or_blank(&entry.content, BLANK),
                            date: None,
                            ripple_effects: None,
                        })
                        .collect(),
                },
                None => ExportBlock::Answer {
                    label: item.label(),
                    text: answer(data, item.key),
                },
            })
            .collect(),
        SectionBody::List(items) => items
            .iter()
            .map(|item| match item.kind() {
                ListItemKind::Answer(prompt) => ExportBlock::Answer {
                    label: prompt,
                    text: answer(data, item.key),
                },
                ListItemKind::Entries(count) => ExportBlock::Entries {
                    label: section.title,
                    entries: padded(data.list_entries(item.key), count)
                        .into_iter()
                        .map(|entry| ExportEntry {
                            content: or_blank(&entry.content, BLANK),
                            date: item.has_date.then(|| {
                                or_blank(entry.date.as_deref().unwrap_or_default(), BLANK_DATE)
                            }),
                            ripple_effects: item.has_ripple_effects.then(|| ExportAnswerLine {
                                label: item.ripple_effects_label(),
                                text: or_blank(
                                    entry.ripple_effects.as_deref().unwrap_or_default(),
                                    BLANK,
                                ),
                            }),
                        })
                        .collect(),
                },
                ListItemKind::Note => ExportBlock::Note {
                    text: item.text.unwrap_or(item.key),
                },
            })
            .collect(),
        SectionBody::Reading(rows) => vec![checklist(data, &key, rows), confirmation(data, &key)],
        SectionBody::Checklist { rows, .. } => vec![checklist(data, &key, rows)],
        SectionBody::Prayer(rows) => {
            let mut blocks = Vec::with_capacity(2);
            if !rows.is_empty() {
                blocks.push(checklist(data, &key, rows));
            }
            blocks.push(confirmation(data, &key));
            blocks
        }
        SectionBody::Resentment(_) => vec![ExportBlock::Resentments {
            headings: RESENTMENT_HEADINGS,
            rows: data
                .resentments()
                .into_iter()
                .map(|entry| ExportResentment {
                    affects: entry.affects_my.marked().map(|domain| domain.label()).collect(),
                    resentful_at: entry.resentful_at,
                    the_cause: entry.the_cause,
                    my_part: entry.my_part,
                    my_fears: entry.my_fears,
                    sex_review: entry.sex_review,
                })
                .collect(),
        }],
    };

    ExportSection {
        id: section.id,
        section_type: section.section_type(),
        title: section.title,
        instruction: section.instruction,
        blocks,
        outstanding: contract::outstanding(placed, data),
    }
}
