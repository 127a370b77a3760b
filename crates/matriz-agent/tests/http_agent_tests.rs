use std::time::Duration;

use httpmock::prelude::*;
use matriz_agent::{Agent, AgentError, GenerationConfig, HttpAgent, HttpConfig};
use serde_json::json;

fn agent_for(server: &MockServer) -> HttpAgent {
    HttpAgent::new(
        HttpConfig::default()
            .with_base_url(server.base_url())
            .with_api_key("test-key"),
    )
}

#[tokio::test]
async fn test_generate_returns_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "model": "gpt-4o-mini",
                "choices": [
                    { "message": { "role": "assistant", "content": "  La pregunta es clara.  " } }
                ]
            }));
        })
        .await;

    let output = agent_for(&server)
        .generate("Evalúa la pregunta", &GenerationConfig::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(output.text, "La pregunta es clara.");
    assert_eq!(output.model.as_deref(), Some("gpt-4o-mini"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).body(r#"{"error":{"message":"Incorrect API key"}}"#);
        })
        .await;

    let err = agent_for(&server)
        .generate("hola", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::AuthenticationFailed(401)));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("overloaded");
        })
        .await;

    let err = agent_for(&server)
        .generate("hola", &GenerationConfig::default())
        .await
        .unwrap_err();
    match err {
        AgentError::Http { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let err = agent_for(&server)
        .generate("hola", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "choices": [] }));
        })
        .await;

    let config = GenerationConfig::default().with_timeout(Duration::from_millis(200));
    let err = agent_for(&server).generate("hola", &config).await.unwrap_err();
    assert!(matches!(err, AgentError::Timeout(_)));
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let agent = HttpAgent::new(HttpConfig::default().with_base_url(server.base_url()));
    assert!(!agent.is_available().await);
    let err = agent
        .generate("hola", &GenerationConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MissingApiKey(ref var) if var == "OPENAI_API_KEY"));
    mock.assert_hits_async(0).await;
}
