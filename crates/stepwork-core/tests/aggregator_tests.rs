use chrono::Duration;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stepwork_catalog::StageNumber;
use stepwork_core::aggregator::{
    current_stage, current_stage_days, derive_progress_summary, stage_overview, total_days,
    ProgressSummary, StageStatus,
};
use stepwork_core::Role;
use stepwork_test_utils::{date, demo_progress, RecordBuilder, DEMO_USER};

#[test]
fn test_empty_record_set() {
    let summary = derive_progress_summary(&[], date(2025, 12, 1));
    assert_eq!(
        summary,
        ProgressSummary {
            current_stage: StageNumber::FIRST,
            completed_count: 0,
            total_days: 0,
            current_stage_days: 0,
        }
    );
    assert!(!summary.program_complete());
}

#[test]
fn test_second_stage_in_progress() {
    let records = vec![
        RecordBuilder::new("u", 1)
            .assigned(date(2025, 10, 1))
            .completed(date(2025, 10, 15))
            .build(),
        RecordBuilder::new("u", 2).assigned(date(2025, 10, 16)).build(),
    ];
    let now = date(2025, 10, 26);
    assert_eq!(current_stage(&records).get(), 2);
    assert_eq!(current_stage_days(&records, StageNumber::new(2).unwrap(), now), 10);
    assert_eq!(total_days(&records, now), 25);
}

#[test]
fn test_demo_progress_summary() {
    let records = demo_progress(DEMO_USER);
    let now = date(2025, 12, 1) + Duration::hours(12);
    let summary = derive_progress_summary(&records, now);
    assert_eq!(summary.current_stage.get(), 4);
    assert_eq!(summary.completed_count, 3);
    assert_eq!(summary.total_days, 62);
    assert_eq!(summary.current_stage_days, 11);
}

#[test]
fn test_completed_stage_has_no_current_days() {
    let records = demo_progress(DEMO_USER);
    assert_eq!(
        current_stage_days(&records, StageNumber::new(2).unwrap(), date(2025, 12, 1)),
        0
    );
}

#[test]
fn test_overview_of_demo_progress() {
    let records = demo_progress(DEMO_USER);
    let overview = stage_overview(&records, Role::Sponsee);
    let statuses: Vec<StageStatus> = overview.iter().take(5).map(|row| row.status).collect();
    assert_eq!(
        statuses,
        [
            StageStatus::Completed,
            StageStatus::Completed,
            StageStatus::Completed,
            StageStatus::Current,
            StageStatus::Locked,
        ]
    );
    assert_eq!(overview[0].fill_percentage, 100);
    assert_eq!(overview[1].fill_percentage, 0);
    assert!(!overview[4].accessible);
}

#[test]
fn test_sponsor_reaches_every_stage() {
    for records in [Vec::new(), demo_progress(DEMO_USER)] {
        assert!(stage_overview(&records, Role::Sponsor)
            .iter()
            .all(|row| row.accessible));
    }
}

fn record_strategy() -> impl Strategy<Value = (u8, Option<i64>, Option<i64>)> {
    (1u8..=12, proptest::option::of(0i64..400), proptest::option::of(0i64..400))
}

proptest! {
    #[test]
    fn prop_summary_invariants(
        raw in proptest::collection::vec(record_strategy(), 0..20),
        now_offset in 0i64..800,
    ) {
        let origin = date(2025, 1, 1);
        let records: Vec<_> = raw
            .iter()
            .map(|(stage, assigned, completed)| {
                let mut builder = RecordBuilder::new("u", *stage);
                if let Some(days) = assigned {
                    builder = builder.assigned(origin + Duration::days(*days));
                }
                if let Some(days) = completed {
                    builder = builder.completed(origin + Duration::days(*days));
                }
                builder.build()
            })
            .collect();
        let now = origin + Duration::days(now_offset);

        let summary = derive_progress_summary(&records, now);
        prop_assert!(summary.completed_count <= 12);
        prop_assert_eq!(summary, derive_progress_summary(&records, now));

        let in_progress = records
            .iter()
            .filter(|record| record.is_in_progress())
            .map(|record| record.stage_number)
            .max();
        if let Some(highest) = in_progress {
            prop_assert_eq!(summary.current_stage, highest);
        }
        if records.is_empty() {
            prop_assert_eq!(summary.current_stage, StageNumber::FIRST);
        }
    }
}
