// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Completion-provider wire tests against mocked HTTP endpoints.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luotain::ai::provider::{CompletionProvider, OllamaProvider, OpenAiProvider};

#[tokio::test]
async fn openai_provider_returns_message_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gpt-4" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  {\"target\": \"10.0.0.5\"}  " } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new("test-key".to_string(), None, Some(server.uri())).unwrap();

    let reply = provider
        .complete("You are an assistant.", "Extract the target.")
        .await
        .unwrap();

    // Replies come back trimmed.
    assert_eq!(reply, r#"{"target": "10.0.0.5"}"#);
}

#[tokio::test]
async fn openai_provider_sends_both_roles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "system prompt" },
                { "role": "user", "content": "user prompt" },
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": "ok" } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("k".to_string(), None, Some(server.uri())).unwrap();
    let reply = provider.complete("system prompt", "user prompt").await.unwrap();
    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn openai_provider_surfaces_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached" }
        })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("k".to_string(), None, Some(server.uri())).unwrap();
    let err = provider.complete("s", "u").await.unwrap_err();

    let message = format!("{}", err);
    assert!(message.contains("429"), "unexpected error: {}", message);
    assert!(message.contains("Rate limit reached"));
}

#[tokio::test]
async fn openai_provider_rejects_shapeless_responses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("k".to_string(), None, Some(server.uri())).unwrap();
    let err = provider.complete("s", "u").await.unwrap_err();
    assert!(format!("{}", err).contains("Missing message content"));
}

#[tokio::test]
async fn ollama_provider_uses_chat_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "model": "llama3.1:8b", "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "tcp_syn_scan" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(None, Some(server.uri())).unwrap();
    let reply = provider.complete("pick a command", "scan the host").await.unwrap();
    assert_eq!(reply, "tcp_syn_scan");
}

#[tokio::test]
async fn ollama_provider_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(None, Some(server.uri())).unwrap();
    let err = provider.complete("s", "u").await.unwrap_err();

    let message = format!("{}", err);
    assert!(message.contains("500"));
    assert!(message.contains("model not loaded"));
}
