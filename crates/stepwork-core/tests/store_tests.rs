use pretty_assertions::assert_eq;
use serde_json::json;
use stepwork_core::record::StageDates;
use stepwork_core::{MemoryStore, ProgressStore, UserId};
use stepwork_test_utils::{date, demo_store, stage_number, DEMO_USER};
use tokio_test::assert_ok;

#[tokio::test]
async fn test_field_write_leaves_other_keys() {
    let store = demo_store();
    let user = UserId::from(DEMO_USER);
    assert_ok!(
        store
            .set_field(&user, stage_number(1), "admit", json!("Rewritten"))
            .await
    );

    let record = store.get(&user, stage_number(1)).await.unwrap().unwrap();
    assert_eq!(record.data.text("admit"), "Rewritten");
    assert_eq!(record.data.text("powerless"), "Unable to stop once I started");
    assert_eq!(record.assignment_date, Some(date(2025, 10, 1)));
    assert_eq!(record.completion_date, Some(date(2025, 10, 15)));
}

#[tokio::test]
async fn test_date_patch_keeps_unset_dates() {
    let store = demo_store();
    let user = UserId::from(DEMO_USER);
    assert_ok!(
        store
            .set_dates(&user, stage_number(4), StageDates::completed(date(2025, 12, 1)))
            .await
    );

    let record = store.get(&user, stage_number(4)).await.unwrap().unwrap();
    assert_eq!(record.assignment_date, Some(date(2025, 11, 21)));
    assert_eq!(record.completion_date, Some(date(2025, 12, 1)));
    assert_eq!(record.data.text("launched"), "Started my inventory");
}

#[tokio::test]
async fn test_dropped_feed_does_not_block_writes() {
    let store = MemoryStore::new();
    let user = UserId::from("u");
    let feed = store.subscribe_all(&user).unwrap();
    drop(feed);

    assert_ok!(store.set_field(&user, stage_number(3), "k", json!(1)).await);
    assert_eq!(store.record_count(&user), 1);

    // A fresh subscription starts from the current snapshot
    let feed = store.subscribe_all(&user).unwrap();
    assert_eq!(feed.current().len(), 1);
}

#[tokio::test]
async fn test_feeds_are_per_user() {
    let store = demo_store();
    let mut other = store.subscribe_all(&"someone-else".into()).unwrap();
    store
        .set_field(&DEMO_USER.into(), stage_number(5), "k", json!(true))
        .await
        .unwrap();
    assert!(other.current().is_empty());
    assert!(tokio::time::timeout(std::time::Duration::from_millis(20), other.changed())
        .await
        .is_err());
}

#[tokio::test]
async fn test_records_serialize_with_camel_case_keys() {
    let store = demo_store();
    let records = store.all(&DEMO_USER.into()).await.unwrap();
    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["id"], json!("demo-user-123_step1"));
    assert_eq!(value["userId"], json!(DEMO_USER));
    assert_eq!(value["stageNumber"], json!(1));
    assert!(value["assignmentDate"].is_string());
}
