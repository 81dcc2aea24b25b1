use proptest::prelude::*;
use serde_json::json;
use stepwork_catalog::{stage, stages, StageNumber};
use stepwork_core::evaluator::{evaluate_completion, evaluate_stored, EXPORT_REQUIRED};
use stepwork_core::FieldData;
use stepwork_test_utils::{complete_field_data, exported_field_data};

#[test]
fn test_complete_data_completes_every_stage() {
    for stage in stages() {
        let report = evaluate_completion(stage, &complete_field_data(stage), true);
        assert!(
            report.complete,
            "stage {} still missing {:?}",
            stage.number, report.missing
        );
        assert!(report.missing.is_empty());
    }
}

#[test]
fn test_empty_data_lists_export_first() {
    for stage in stages() {
        let report = evaluate_completion(stage, &FieldData::new(), false);
        assert!(!report.complete);
        assert_eq!(report.missing.first().map(String::as_str), Some(EXPORT_REQUIRED));
    }
}

#[test]
fn test_complete_data_without_export_only_misses_export() {
    let four = stage(4).unwrap();
    let report = evaluate_completion(four, &complete_field_data(four), false);
    assert_eq!(report.missing, [EXPORT_REQUIRED]);
}

#[test]
fn test_stored_export_flag() {
    let seven = stage(7).unwrap();
    assert!(evaluate_stored(seven, &exported_field_data(seven)).complete);
}

#[test]
fn test_resentment_without_entries() {
    let four = stage(4).unwrap();
    let mut data = complete_field_data(four);
    data.remove("resentments");
    let report = evaluate_completion(four, &data, true);
    assert!(report
        .missing
        .iter()
        .any(|gap| gap.ends_with("Add at least one resentment entry")));
}

#[test]
fn test_resentment_needs_cause() {
    let four = stage(4).unwrap();
    let mut data = complete_field_data(four);
    data.insert(
        "resentments",
        json!([{"id": "resentment_1", "resentfulAt": "Boss", "theCause": ""}]),
    );
    let report = evaluate_completion(four, &data, true);
    assert!(!report.complete);
    assert_eq!(report.missing.len(), 1);
    assert!(report.missing[0].contains("Resentful At + Cause"));
}

#[test]
fn test_gaps_follow_catalog_order() {
    let one = stage(1).unwrap();
    let report = evaluate_completion(one, &FieldData::new(), true);
    assert!(report.missing[0].starts_with("Definitions: "));
    assert!(report
        .missing
        .last()
        .is_some_and(|gap| gap.starts_with("Examples of Unmanageability")));
}

#[test]
fn test_malformed_values_are_gaps_not_errors() {
    let two = stage(2).unwrap();
    let mut data = complete_field_data(two);
    for key in data.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>() {
        data.insert(key, json!(17));
    }
    let report = evaluate_completion(two, &data, true);
    assert!(!report.complete);
}

fn stage_strategy() -> impl Strategy<Value = StageNumber> {
    (1u8..=12).prop_map(|n| StageNumber::new(n).unwrap())
}

proptest! {
    #[test]
    fn prop_evaluation_is_idempotent(
        number in stage_strategy(),
        exported in any::<bool>(),
        drop_mask in proptest::collection::vec(any::<bool>(), 0..40),
    ) {
        let stage = stepwork_catalog::stage_by_number(number);
        let mut data = complete_field_data(stage);
        let keys: Vec<String> = data.iter().map(|(key, _)| key.clone()).collect();
        for (key, drop) in keys.iter().zip(drop_mask) {
            if drop {
                data.remove(key);
            }
        }

        let first = evaluate_completion(stage, &data, exported);
        let second = evaluate_completion(stage, &data, exported);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.complete, first.missing.is_empty());
        prop_assert_eq!(
            first.missing.iter().any(|gap| gap == EXPORT_REQUIRED),
            !exported
        );
    }

    #[test]
    fn prop_removing_answers_never_completes(
        number in stage_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let stage = stepwork_catalog::stage_by_number(number);
        let mut data = complete_field_data(stage);
        let keys: Vec<String> = data.iter().map(|(key, _)| key.clone()).collect();
        prop_assume!(!keys.is_empty());
        data.remove(pick.get(&keys).as_str());
        prop_assert!(!evaluate_completion(stage, &data, true).complete);
    }
}
