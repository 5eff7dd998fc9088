//! Exercises the Gemini backend against a mocked HTTP endpoint.

use std::time::Duration;

use huquq_llm::{
    FailureKind, GeminiSettings, GenerationRequest, LLMClient, LLMClientConfig, LLMError,
    LLMProvider, OutputContract, RetryConfig,
};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-test:generateContent";

fn client_for(server: &MockServer, config: LLMClientConfig) -> LLMClient {
    let settings = GeminiSettings {
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        api_base: server.uri(),
    };
    LLMClient::new(LLMProvider::Gemini(settings), Some(config))
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
}

fn topic_contract() -> OutputContract {
    OutputContract::new(
        "topic",
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "minLength": 1 },
                "content": { "type": "string", "minLength": 1 }
            },
            "required": ["title", "content"]
        }),
    )
}

#[derive(Debug, Deserialize, PartialEq)]
struct Topic {
    title: String,
    content: String,
}

#[tokio::test]
async fn free_text_is_returned_verbatim() {
    let server = MockServer::start().await;
    let markdown = "## نقاط البحث\n\n1. أولاً\n2. ثانياً\n";

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "اكتب" }] }]
        })))
        .respond_with(text_response(markdown))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let text = client
        .generate_text(&GenerationRequest::new("guidance", "اكتب"))
        .await
        .unwrap();

    assert_eq!(text, markdown);
}

#[tokio::test]
async fn free_text_request_carries_no_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(|request: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            if body.get("generationConfig").is_some() {
                ResponseTemplate::new(400)
            } else {
                text_response("ok")
            }
        })
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let text = client
        .generate_text(&GenerationRequest::new("analysis", "نص"))
        .await
        .unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn structured_request_declares_contract_and_parses_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "required": ["title", "content"]
                }
            }
        })))
        .respond_with(text_response(r#"{"title": "T", "content": "C"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let request = GenerationRequest::new("topic", "propose").with_contract(topic_contract());
    let topic: Topic = client.generate_structured(&request).await.unwrap();

    assert_eq!(
        topic,
        Topic {
            title: "T".to_string(),
            content: "C".to_string()
        }
    );
}

#[tokio::test]
async fn structured_answer_missing_a_field_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response(r#"{"title": "T"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let request = GenerationRequest::new("topic", "propose").with_contract(topic_contract());
    let err = client.generate_structured::<Topic>(&request).await.unwrap_err();

    assert_eq!(err.failure_kind(), FailureKind::MalformedOutput);
}

#[tokio::test]
async fn server_error_is_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let err = client
        .generate_text(&GenerationRequest::new("guidance", "x"))
        .await
        .unwrap_err();

    match err {
        LLMError::Status { status, ref body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.failure_kind(), FailureKind::Transport);
}

#[tokio::test]
async fn empty_candidates_yield_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server, LLMClientConfig::default());
    let text = client
        .generate_text(&GenerationRequest::new("guidance", "x"))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn slow_backend_hits_the_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response("late").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = LLMClientConfig {
        timeout: Duration::from_millis(100),
        retry_config: RetryConfig::default(),
    };
    let client = client_for(&server, config);
    let err = client
        .generate_text(&GenerationRequest::new("guidance", "x"))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), FailureKind::Timeout);
}

#[tokio::test]
async fn configured_retries_recover_from_throttling() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response("after retry"))
        .expect(1)
        .mount(&server)
        .await;

    let config = LLMClientConfig {
        timeout: Duration::from_secs(5),
        retry_config: RetryConfig {
            max_retries: 1,
            base_delay: Duration::from_millis(5),
        },
    };
    let client = client_for(&server, config);
    let text = client
        .generate_text(&GenerationRequest::new("guidance", "x"))
        .await
        .unwrap();

    assert_eq!(text, "after retry");
}
