use std::collections::HashSet;
use proptest::prelude::*;
use stepwork_catalog::{
    find_section, stage, stage_title, stages, DerivedField, SectionBody, SectionType, StageLayout,
    StageNumber,
};

#[test]
fn twelve_stages_in_order() {
    let numbers: Vec<u8> = stages().map(|s| s.number.get()).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
}

#[test]
fn every_stage_has_sections() {
    for s in stages() {
        assert!(s.sections().count() > 0, "stage {} is empty", s.number);
        if let StageLayout::Parts(parts) = s.layout {
            let numbers: Vec<u8> = parts.iter().map(|p| p.part_number).collect();
            let mut sorted = numbers.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(numbers, sorted, "parts of stage {} out of order", s.number);
        }
    }
}

#[test]
fn section_ids_are_unique() {
    let mut seen = HashSet::new();
    for placed in stages().flat_map(|s| s.sections()) {
        assert!(seen.insert(placed.section.id), "duplicate id {}", placed.section.id);
    }
}

#[test]
fn legacy_keys_follow_type_title_part() {
    let placed = find_section("s1-p1-reading").unwrap();
    let key = placed.key();
    assert_eq!(key.legacy(), "reading_Read With Intent and Purpose_part1");
    assert_eq!(
        key.legacy_field(DerivedField::Checklist),
        "reading_Read With Intent and Purpose_part1_checklist"
    );
    assert_eq!(key.field(DerivedField::Completed), "s1-p1-reading_completed");

    let flat = find_section("s3-p1-todo").unwrap().key();
    assert_eq!(flat.legacy(), "todo_To Do_part1");

    let prayer = find_section("s4-prayer").unwrap().key();
    assert_eq!(prayer.legacy(), "prayer_Prayer");
}

#[test]
fn stage_four_has_resentment_grid() {
    let four = stage(4).unwrap();
    let grid = four
        .sections()
        .find(|p| p.section.section_type() == SectionType::Resentment)
        .unwrap();
    match grid.section.body {
        SectionBody::Resentment(columns) => assert_eq!(columns.len(), 7),
        _ => panic!("expected resentment body"),
    }
}

#[test]
fn prayers_attached_to_three_and_seven() {
    for s in stages() {
        let expected = matches!(s.number.get(), 3 | 7);
        assert_eq!(s.prayer.is_some(), expected, "stage {}", s.number);
    }
}

#[test]
fn lookup_outside_range_is_not_found() {
    assert!(stage(0).unwrap_err().is_not_found());
    assert!(stage(13).is_err());
    assert_eq!(stage_title(2), "Step 2: Higher Power");
    assert_eq!(stage_title(40), "Step 40");
}

#[test]
fn catalog_serializes_to_json() {
    let value = serde_json::to_value(stage(1).unwrap()).unwrap();
    assert_eq!(value["number"], 1);
    assert_eq!(value["title"], "Powerlessness");
    assert!(value["layout"]["parts"].is_array());
}

#[test]
fn stage_number_deserializes_with_validation() {
    let ok: StageNumber = serde_json::from_str("5").unwrap();
    assert_eq!(ok.get(), 5);
    assert!(serde_json::from_str::<StageNumber>("13").is_err());
}

proptest! {
    #[test]
    fn prop_lookup_matches_range(number in any::<u8>()) {
        prop_assert_eq!(stage(number).is_ok(), (1..=12).contains(&number));
        prop_assert_eq!(StageNumber::new(number).is_ok(), stage(number).is_ok());
    }

    #[test]
    fn prop_titles_always_start_with_step(number in any::<u8>()) {
        let title = stage_title(number);
        let prefix = format!("Step {number}");
        prop_assert!(title.starts_with(&prefix));
    }
}
