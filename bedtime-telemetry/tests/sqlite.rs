use bedtime_core::{ChildInfo, Language, Rating, StoryRequest};
use bedtime_telemetry::{NewUsageRecord, RecordId, SqliteUsageStore, TelemetryError, UsageStore};

async fn store() -> SqliteUsageStore {
    SqliteUsageStore::builder("sqlite::memory:")
        .max_connections(1)
        .build()
        .await
        .expect("sqlite usage store should build")
}

fn request() -> StoryRequest {
    StoryRequest::new(vec![ChildInfo::new("Mia", 6)], "teddy bear", "kindness", Language::English)
        .unwrap()
}

#[tokio::test]
async fn insert_then_fetch_round_trip() {
    let store = store().await;
    let id = store
        .insert(&NewUsageRecord::generated(&request(), "gpt-4o", 2.5))
        .await
        .unwrap();

    let stored = store.fetch(&id).await.unwrap().expect("row should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.ages, "6");
    assert_eq!(stored.num_children, 1);
    assert_eq!(stored.generation_time, 2.5);
    assert_eq!(stored.rating, None);
    assert_eq!(stored.moderated_inputs, None);
}

#[tokio::test]
async fn ids_are_distinct_per_insert() {
    let store = store().await;
    let record = NewUsageRecord::generated(&request(), "gpt-4o", 1.0);
    let first = store.insert(&record).await.unwrap();
    let second = store.insert(&record).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn rating_is_set_and_overwritten() {
    let store = store().await;
    let id = store
        .insert(&NewUsageRecord::generated(&request(), "gpt-4o", 1.0))
        .await
        .unwrap();

    store.set_rating(&id, Rating::new(4).unwrap()).await.unwrap();
    store.set_rating(&id, Rating::new(4).unwrap()).await.unwrap();
    assert_eq!(store.fetch(&id).await.unwrap().unwrap().rating, Some(4));

    store.set_rating(&id, Rating::new(2).unwrap()).await.unwrap();
    assert_eq!(store.fetch(&id).await.unwrap().unwrap().rating, Some(2));
}

#[tokio::test]
async fn rating_unknown_row_is_not_found() {
    let store = store().await;
    let err = store
        .set_rating(&RecordId::new("999"), Rating::new(3).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, TelemetryError::NotFound(_)));

    let err = store
        .set_rating(&RecordId::new("not-a-number"), Rating::new(3).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, TelemetryError::NotFound(_)));
}

#[tokio::test]
async fn moderated_row_stores_payload() {
    let store = store().await;
    let id = store
        .insert(&NewUsageRecord::moderated(&request(), "gpt-4o").unwrap())
        .await
        .unwrap();

    let stored = store.fetch(&id).await.unwrap().unwrap();
    assert_eq!(stored.values_to_teach, "MODERATED: kindness");
    assert_eq!(stored.generation_time, 0.0);
    let payload = stored.moderated_inputs_json().unwrap();
    assert_eq!(payload["children"][0]["name"], "Mia");
    assert_eq!(payload["activities_and_toys"], "teddy bear");
}
