use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use stoic_api::{build_router, config::Config, prompt, state::AppState};
use stoic_llm::{ChatClient, ChatRequest, ChatResponse, ClientFactory, GeminiConfig, Part, ProviderConfig, Role};

const CONFIG: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 0

    [cors]
    enabled = true
    origins = ["*"]

    [llm]
    model = "gemini-2.5-flash"

    [logging]
    level = "debug"
    format = "pretty"
"#;

/// Records every upstream call and answers with a fixed outcome
struct FakeClient {
    calls: Mutex<Vec<ChatRequest>>,
    outcome: Result<String, String>,
}

impl FakeClient {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(text.to_string()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        })
    }

    fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for FakeClient {
    async fn chat(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        self.calls.lock().unwrap().push(request);
        match &self.outcome {
            Ok(text) => Ok(ChatResponse {
                text: text.clone(),
                finish_reason: Some("STOP".to_string()),
                usage: None,
                raw: Value::Null,
            }),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

/// Answers only after `delay`
struct SlowClient {
    delay: Duration,
}

#[async_trait]
impl ChatClient for SlowClient {
    async fn chat(&self, _request: ChatRequest) -> anyhow::Result<ChatResponse> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse {
            text: "terlambat".to_string(),
            finish_reason: Some("STOP".to_string()),
            usage: None,
            raw: Value::Null,
        })
    }
}

fn config() -> Config {
    toml::from_str(CONFIG).unwrap()
}

fn app(client: Arc<FakeClient>) -> Router {
    build_router(Arc::new(AppState::new(config(), client)))
}

async fn post_chat(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_text_message_is_forwarded_with_seed() {
    let client = FakeClient::replying("Fokuslah pada apa yang bisa Anda kendalikan.");
    let (status, body) = post_chat(
        app(client.clone()),
        json!({ "message": "Apa itu dikotomi kendali?" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "text": "Fokuslah pada apa yang bisa Anda kendalikan.", "success": true })
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    let request = &calls[0];
    assert_eq!(request.model, "gemini-2.5-flash");
    assert_eq!(request.contents.len(), 3);
    assert_eq!(request.contents[0].joined_text(), prompt::PERSONA_PROMPT);
    assert_eq!(request.contents[1].role, Role::Model);
    assert_eq!(
        request.contents[2].parts,
        vec![Part::text("Apa itu dikotomi kendali?")]
    );
}

#[tokio::test]
async fn test_image_only_message_sends_inline_data() {
    let client = FakeClient::replying("Gambar yang tenang.");
    let (status, _) = post_chat(
        app(client.clone()),
        json!({ "message": "", "image": "data:image/png;base64,AAAA" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = client.calls();
    assert_eq!(
        calls[0].contents[2].parts,
        vec![Part::inline_data("image/png", "AAAA")]
    );
}

#[tokio::test]
async fn test_upstream_failure_returns_500_with_details() {
    let client = FakeClient::failing("forced failure");
    let (status, body) = post_chat(
        app(client.clone()),
        json!({ "message": "Halo" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "message": "Error processing request.", "details": "forced failure" })
    );
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn test_malformed_image_fails_before_upstream_call() {
    let client = FakeClient::replying("unused");
    let (status, body) = post_chat(
        app(client.clone()),
        json!({ "message": "Halo", "image": "not-a-data-uri" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error processing request.");
    assert_eq!(body["details"], "Image is not a data URI");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_unparsable_body_is_a_500() {
    let client = FakeClient::replying("unused");
    let (status, body) = post_chat(app(client.clone()), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error processing request.");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_health_reports_missing_key() {
    let response = app(FakeClient::replying("unused"))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["llm"], "missing_api_key");
}

#[tokio::test]
async fn test_missing_key_is_500_at_call_time() {
    let config = config();
    assert!(!config.has_api_key());
    let client = ClientFactory::create_client(config.provider_config()).unwrap();
    let app = build_router(Arc::new(AppState::new(config, client)));

    let (status, body) = post_chat(app, json!({ "message": "Halo" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "message": "Error processing request.",
            "details": "Google AI API key is not configured"
        })
    );
}

#[tokio::test]
async fn test_transport_failure_details_name_the_cause() {
    let provider = ProviderConfig::gemini(
        GeminiConfig::new("test-key").with_base_url("http://127.0.0.1:1"),
    );
    let client = ClientFactory::create_client(provider).unwrap();
    let app = build_router(Arc::new(AppState::new(config(), client)));

    let (status, body) = post_chat(app, json!({ "message": "Halo" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let details = body["details"].as_str().unwrap();
    assert!(details.starts_with("Failed to send request: "), "{}", details);
    assert!(details.contains("error sending request"), "{}", details);
}

#[tokio::test(start_paused = true)]
async fn test_slow_upstream_times_out_as_500() {
    let mut config = config();
    config.server.request_timeout_secs = 1;
    let client = Arc::new(SlowClient {
        delay: Duration::from_secs(2),
    });
    let app = build_router(Arc::new(AppState::new(config, client)));

    let (status, body) = post_chat(app, json!({ "message": "Halo" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "message": "Error processing request.",
            "details": "Request timed out after 1s"
        })
    );
}
