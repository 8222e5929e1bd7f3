//! Upstream provider contracts exercised against a mock HTTP server

use httpmock::prelude::*;
use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

use translation_gateway::{
    ChatCompletionTranslator, GatewayConfig, GeminiTranslator, ProviderFailure, ProviderRole,
    TextTranslator, TranslationError, TranslationGateway, TranslationRequest,
};

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
const CHAT_PATH: &str = "/v1/chat/completions";

fn gemini_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn chat_body(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

/// Serves one request with a 200 whose body ends before its declared length
fn spawn_truncating_server() -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        stream
            .set_read_timeout(Some(Duration::from_millis(500)))
            .expect("set stream timeout");

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
            if request_complete(&request) {
                break;
            }
        }

        let response = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"choices\": [";
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush response");
    });

    (format!("http://{}", addr), handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

fn config_for(server: &MockServer) -> GatewayConfig {
    GatewayConfig {
        gemini_api_key: "gemini-key".to_string(),
        gemini_endpoint: server.url("/v1beta"),
        chat_api_token: "chat-token".to_string(),
        chat_endpoint: server.url("/v1"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_gemini_sends_prompt_and_key() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GEMINI_PATH)
                .header("x-goog-api-key", "gemini-key")
                .body_contains("Translate the following text to French.")
                .body_contains("Hello");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(gemini_body("Bonjour"));
        })
        .await;

    let translator = GeminiTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let text = assert_ok!(translator.translate("Hello", "French").await);
    assert_eq!(text, "Bonjour");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_non_success_status() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(429).body("quota exhausted");
        })
        .await;

    let translator = GeminiTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert_eq!(
        err,
        ProviderFailure::Api {
            status: 429,
            message: "quota exhausted".to_string()
        }
    );
}

#[tokio::test]
async fn test_gemini_malformed_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .body("not valid json");
        })
        .await;

    let translator = GeminiTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert!(matches!(err, ProviderFailure::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_chat_sends_system_and_user_messages() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .header("authorization", "Bearer chat-token")
                .body_contains(r#""model":"gpt-4o""#)
                .body_contains(r#""role":"system""#)
                .body_contains(r#""role":"user""#)
                .body_contains(r#""content":"Hello""#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(chat_body("Bonjour"));
        })
        .await;

    let translator =
        ChatCompletionTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let text = assert_ok!(translator.translate("Hello", "French").await);
    assert_eq!(text, "Bonjour");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_missing_choices() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "choices": [] }));
        })
        .await;

    let translator =
        ChatCompletionTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert!(matches!(err, ProviderFailure::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_truncated_success_body_is_a_network_failure() {
    let (base_url, handle) = spawn_truncating_server();

    let translator = ChatCompletionTranslator::new(
        reqwest::Client::new(),
        "chat-token",
        format!("{}/v1", base_url),
        "gpt-4o",
    );

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert!(
        matches!(err, ProviderFailure::Network { .. }),
        "unexpected failure: {err:?}"
    );
    handle.join().expect("join truncating server");
}

#[tokio::test]
async fn test_chat_malformed_success_body_is_invalid_response() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .body("{\"choices\": [");
        })
        .await;

    let translator =
        ChatCompletionTranslator::from_config(reqwest::Client::new(), &config_for(&server));

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert!(matches!(err, ProviderFailure::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_chat_missing_token_skips_network() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200).json_body(chat_body("Bonjour"));
        })
        .await;

    let config = GatewayConfig {
        chat_api_token: String::new(),
        ..config_for(&server)
    };
    let translator = ChatCompletionTranslator::from_config(reqwest::Client::new(), &config);

    let err = assert_err!(translator.translate("Hello", "French").await);
    assert!(matches!(err, ProviderFailure::MissingCredential { .. }));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_gateway_falls_back_over_http() {
    let server = MockServer::start_async().await;

    let gemini = server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(503).body("overloaded");
        })
        .await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(chat_body("Bonjour"));
        })
        .await;

    let gateway = assert_ok!(TranslationGateway::from_config(&config_for(&server)));
    let result = assert_ok!(
        gateway
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
    );

    assert_eq!(result.provider, ProviderRole::Fallback);
    assert_eq!(result.translated_text, "Bonjour");
    gemini.assert_async().await;
    chat.assert_async().await;
}

#[tokio::test]
async fn test_gateway_missing_primary_key_falls_back() {
    let server = MockServer::start_async().await;

    let gemini = server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200).json_body(gemini_body("Bonjour"));
        })
        .await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(chat_body("Salut"));
        })
        .await;

    let config = GatewayConfig {
        gemini_api_key: String::new(),
        ..config_for(&server)
    };
    let gateway = assert_ok!(TranslationGateway::from_config(&config));
    let result = assert_ok!(
        gateway
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
    );

    assert_eq!(result.provider, ProviderRole::Fallback);
    assert_eq!(result.translated_text, "Salut");
    assert_eq!(gemini.hits_async().await, 0);
    chat.assert_async().await;
}

#[tokio::test]
async fn test_gateway_both_providers_down() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(401).body("invalid token");
        })
        .await;

    let gateway = assert_ok!(TranslationGateway::from_config(&config_for(&server)));
    let err = assert_err!(
        gateway
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
    );

    assert_eq!(err.to_string(), "Failed to translate text");
    match err {
        TranslationError::ProviderError { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].provider, "gemini");
            assert_eq!(
                attempts[1].error,
                ProviderFailure::Api {
                    status: 401,
                    message: "invalid token".to_string()
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
