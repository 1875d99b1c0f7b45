use std::time::Duration;

use bedtime::llm::{Dispatcher, OpenAiClient};
use bedtime::telemetry::{RecordId, RestUsageStore, SqliteUsageStore, TelemetryRecorder};
use bedtime::{
    ChildInfo, Language, ProviderChoice, ProviderSelection, Rating, StoryError, StoryRequest,
    StoryService,
};
use bedtime_core::SENTINEL;
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;

fn openai_dispatcher(server: &MockServer) -> Dispatcher {
    let client = OpenAiClient::with_base_url(
        SecretString::new("test-key".to_string()),
        Duration::from_secs(5),
        &server.url(""),
    )
    .unwrap();
    Dispatcher::new().with_client(client)
}

fn reply_with(server: &MockServer, content: String) {
    server.mock(move |when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": content}, "finish_reason": "stop"}]
        }));
    });
}

async fn sqlite_store() -> SqliteUsageStore {
    SqliteUsageStore::builder("sqlite::memory:")
        .build()
        .await
        .unwrap()
}

fn mia_request() -> StoryRequest {
    StoryRequest::new(
        vec![ChildInfo::new("Mia", 6)],
        "teddy bear",
        "kindness",
        Language::English,
    )
    .unwrap()
}

#[tokio::test]
async fn story_is_generated_recorded_and_rated() {
    let server = MockServer::start();
    let prompt_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Mia, 6 years old")
            .body_contains("teddy bear")
            .body_contains("kindness")
            .body_contains("6.0")
            .body_contains("simple with easy-to-understand concepts");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Mia and her teddy bear..."}}]
        }));
    });

    let store = sqlite_store().await;
    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    )
    .with_recorder(TelemetryRecorder::new(store.clone()));

    let outcome = service.generate(mia_request()).await.unwrap();
    prompt_mock.assert();
    assert_eq!(outcome.story, "Mia and her teddy bear...");
    assert_eq!(outcome.provider, ProviderChoice::OpenAi);
    assert!(outcome.elapsed_seconds >= 0.0);

    let id = outcome.record_id.expect("usage row should be recorded");
    service.rate(Some(&id), Rating::new(4).unwrap()).await;

    let row = store.fetch(&id).await.unwrap().unwrap();
    assert_eq!(row.selected_model, "gpt-4o");
    assert_eq!(row.selected_language, "English");
    assert_eq!(row.ages, "6");
    assert_eq!(row.values_to_teach, "kindness");
    assert_eq!(row.rating, Some(4));
    assert!(row.moderated_inputs.is_none());
}

#[tokio::test]
async fn moderated_reply_is_withheld_and_audited() {
    let server = MockServer::start();
    reply_with(&server, format!("{SENTINEL} inappropriate language"));

    let store = sqlite_store().await;
    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    )
    .with_recorder(TelemetryRecorder::new(store.clone()));

    let err = service.generate(mia_request()).await.unwrap_err();
    assert_eq!(
        err,
        StoryError::ModeratedContent {
            explanation: "inappropriate language".to_string()
        }
    );

    let row = store
        .fetch(&RecordId::new("1"))
        .await
        .unwrap()
        .expect("moderated attempt should be recorded");
    assert_eq!(row.values_to_teach, "MODERATED: kindness");
    assert_eq!(row.generation_time, 0.0);
    let payload = row.moderated_inputs_json().unwrap();
    assert_eq!(payload["children"][0]["name"], "Mia");
    assert_eq!(payload["children"][0]["age"], 6);
    assert_eq!(payload["activities_and_toys"], "teddy bear");
}

#[tokio::test]
async fn provider_failure_is_generic_and_unrecorded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("upstream exploded");
    });

    let store = sqlite_store().await;
    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    )
    .with_recorder(TelemetryRecorder::new(store.clone()));

    let err = service.generate(mia_request()).await.unwrap_err();
    assert_eq!(err, StoryError::GenerationFailed);
    assert!(store.fetch(&RecordId::new("1")).await.unwrap().is_none());
}

#[tokio::test]
async fn unconfigured_selection_is_unsupported() {
    let server = MockServer::start();
    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::Google),
    );

    let err = service.generate(mia_request()).await.unwrap_err();
    assert!(matches!(err, StoryError::UnsupportedProvider(_)));
}

#[tokio::test]
async fn story_is_delivered_without_telemetry() {
    let server = MockServer::start();
    reply_with(&server, "A calm story.".to_string());

    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    );

    let outcome = service.generate(mia_request()).await.unwrap();
    assert_eq!(outcome.story, "A calm story.");
    assert_eq!(outcome.record_id, None);
    service.rate(None, Rating::new(3).unwrap()).await;
}

#[tokio::test]
async fn multi_child_prompt_uses_mean_age_tier() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("7.0 years old")
            .body_contains("simple with easy-to-understand concepts");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Two friends..."}}]
        }));
    });

    let service = StoryService::new(
        openai_dispatcher(&server),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    );
    let request = StoryRequest::new(
        vec![ChildInfo::new("Mia", 3), ChildInfo::new("Ada", 11)],
        "",
        "",
        Language::Spanish,
    )
    .unwrap();

    service.generate(request).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn hung_datastore_does_not_hold_back_the_story() {
    let provider = MockServer::start();
    reply_with(&provider, "A story".to_string());

    let datastore = MockServer::start();
    datastore.mock(|when, then| {
        when.method(POST).path("/rest/v1/usage_stats");
        then.status(201)
            .delay(Duration::from_secs(30))
            .json_body(json!([{"id": 1}]));
    });
    let store = RestUsageStore::new(
        datastore.base_url(),
        SecretString::new("service-key".to_string()),
        Duration::from_secs(1),
    )
    .unwrap();

    let service = StoryService::new(
        openai_dispatcher(&provider),
        ProviderSelection::pinned(ProviderChoice::OpenAi),
    )
    .with_recorder(TelemetryRecorder::new(store));

    let outcome = tokio::time::timeout(Duration::from_secs(8), service.generate(mia_request()))
        .await
        .expect("story delivery must not wait on the datastore")
        .unwrap();

    assert_eq!(outcome.story, "A story");
    assert_eq!(outcome.record_id, None);
}
