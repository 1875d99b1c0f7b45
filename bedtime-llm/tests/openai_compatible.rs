use std::time::Duration;

use bedtime_llm::{CompletionRequest, GroqClient, LlmError, OpenAiClient};
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;

fn key() -> SecretString {
    SecretString::new("test-key".to_string())
}

#[tokio::test]
async fn openai_sends_shared_sampling_settings() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .json_body(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Tell a story"}],
                "max_tokens": 1000,
                "temperature": 0.7,
                "n": 1
            }));
        then.status(200).json_body(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Once upon a time"},
                "finish_reason": "stop"
            }]
        }));
    });

    let client =
        OpenAiClient::with_base_url(key(), Duration::from_secs(5), &server.url("")).unwrap();
    let text = client
        .complete(&CompletionRequest::new("Tell a story"))
        .await
        .unwrap();

    assert_eq!(text, "Once upon a time");
    mock.assert();
}

#[tokio::test]
async fn groq_uses_its_own_default_model() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .json_body_partial(r#"{"model": "llama-3.1-70b-versatile"}"#);
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Hello"}, "finish_reason": "stop"}]
        }));
    });

    let base_url = server.url("/openai");
    let client = GroqClient::with_base_url(key(), Duration::from_secs(5), &base_url).unwrap();
    let text = client.complete(&CompletionRequest::new("hi")).await.unwrap();

    assert_eq!(text, "Hello");
    mock.assert();
}

#[tokio::test]
async fn api_errors_carry_status_and_provider_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(429)
            .json_body(json!({"error": {"message": "Rate limit reached", "type": "requests"}}));
    });

    let client =
        OpenAiClient::with_base_url(key(), Duration::from_secs(5), &server.url("")).unwrap();
    let err = client
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_are_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let client =
        OpenAiClient::with_base_url(key(), Duration::from_secs(5), &server.url("")).unwrap();
    let err = client
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Malformed(_)));
}

#[test]
fn invalid_base_url_is_a_config_error() {
    let result = OpenAiClient::with_base_url(key(), Duration::from_secs(5), "not a url");
    assert!(matches!(result, Err(LlmError::Config(_))));
}
