use mockito::Matcher;
use serde_json::json;
use stoic_llm::{ChatClient, ChatRequest, Content, GeminiClient, Part, Role};

fn request(parts: Vec<Part>) -> ChatRequest {
    ChatRequest::new(
        "gemini-2.5-flash",
        vec![
            Content::text(Role::User, "persona"),
            Content::text(Role::Model, "ack"),
            Content::user(parts),
        ],
    )
}

#[tokio::test]
async fn test_chat_posts_contents_and_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "persona" }] },
                { "role": "model", "parts": [{ "text": "ack" }] },
                { "role": "user", "parts": [{ "text": "Apa itu dikotomi kendali?" }] }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "Fokus pada yang bisa dikendalikan." }] },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiClient::new("test-key").unwrap().with_base_url(server.url());
    let response = client
        .chat(request(vec![Part::text("Apa itu dikotomi kendali?")]))
        .await
        .unwrap();

    assert_eq!(response.text, "Fokus pada yang bisa dikendalikan.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .with_status(400)
        .with_body("API key not valid")
        .create_async()
        .await;

    let client = GeminiClient::new("bad-key").unwrap().with_base_url(server.url());
    let err = client
        .chat(request(vec![Part::text("Halo")]))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Gemini API error (400"));
    assert!(message.contains("API key not valid"));
}

#[tokio::test]
async fn test_missing_key_fails_without_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GeminiClient::new("").unwrap().with_base_url(server.url());
    let err = client
        .chat(request(vec![Part::text("Halo")]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Google AI API key is not configured");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_turn_is_rejected() {
    let client = GeminiClient::new("test-key").unwrap();
    let err = client.chat(request(vec![])).await.unwrap_err();
    assert_eq!(err.to_string(), "Request contains no input parts");
}
