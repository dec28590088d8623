use lessonflow_llm::{ChatClient, ChatOptions, ChatRequest, Message, OpenAIClient, OpenAIConfig};
use mockito::Matcher;

const COMPLETION: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1700000000,
    "model": "gpt-4o-mini",
    "choices": [
        {
            "index": 0,
            "message": {"role": "assistant", "content": "Plants turn light into sugar."},
            "finish_reason": "stop"
        }
    ],
    "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
}"#;

fn client_for(server: &mockito::ServerGuard) -> OpenAIClient {
    OpenAIClient::new(OpenAIConfig::new("test-key").with_base_url(server.url())).unwrap()
}

#[tokio::test]
async fn test_chat_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJsonString(
            r#"{"model": "gpt-4o-mini", "messages": [{"role": "user", "content": "Explain photosynthesis"}]}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .chat(ChatRequest::new("gpt-4o-mini", vec![Message::human("Explain photosynthesis")]))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.text(), "Plants turn light into sugar.");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 12);
    assert_eq!(usage.output_tokens, 7);
    assert_eq!(usage.total_tokens, 19);
}

#[tokio::test]
async fn test_chat_sends_options() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJsonString(
            r#"{"temperature": 0.5, "max_tokens": 256}"#.to_string(),
        ))
        .with_status(200)
        .with_body(COMPLETION)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = ChatRequest::prompt("gpt-4o-mini", "Hi")
        .with_options(ChatOptions::new().temperature(0.5).max_tokens(256));
    client.chat(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_api_error_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::prompt("gpt-4o-mini", "Hi"))
        .await
        .unwrap_err()
        .to_string();

    assert!(err.contains("429"), "unexpected error: {err}");
    assert!(err.contains("Rate limit reached"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_chat_without_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"id": "x", "model": "gpt-4o-mini", "choices": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.chat(ChatRequest::prompt("gpt-4o-mini", "Hi")).await;

    assert!(result.is_err());
}
