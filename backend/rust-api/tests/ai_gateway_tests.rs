//! GeminiProvider and AiGateway against a local stand-in for the
//! `generateContent` endpoint.

use ai_quiz_api::{
    config::AiConfig,
    services::ai::{
        AiGateway, CompletionProvider, FeedbackInput, FeedbackStrategy, GeminiProvider,
        GenerationSettings, ProviderError, QuestionSource,
    },
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TEST_KEY: &str = "AIzaTestKey";

#[derive(Clone)]
enum Reply {
    Text(String),
    Status(StatusCode),
    Garbage,
    Slow(Duration),
}

#[derive(Clone)]
struct FakeGemini {
    reply: Reply,
    seen: Arc<Mutex<Vec<(HashMap<String, String>, Value)>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    fake.seen.lock().unwrap().push((query, body));

    match fake.reply {
        Reply::Text(text) => Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .into_response(),
        Reply::Status(status) => (status, "upstream exploded").into_response(),
        Reply::Garbage => "not json at all".into_response(),
        Reply::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "candidates": [] })).into_response()
        }
    }
}

async fn spawn_fake(reply: Reply) -> (String, FakeGemini) {
    let fake = FakeGemini {
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1beta/models/gemini-test/generate", post(generate_content))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (
        format!("http://{}/v1beta/models/gemini-test/generate", addr),
        fake,
    )
}

fn provider(base_url: &str, timeout_secs: u64) -> GeminiProvider {
    GeminiProvider::new(&AiConfig {
        api_key: Some(TEST_KEY.to_string()),
        base_url: base_url.to_string(),
        timeout_secs,
        mock_delay_ms: 0,
    })
    .unwrap()
}

#[tokio::test]
async fn test_gemini_request_shape_and_reply() {
    let (url, fake) = spawn_fake(Reply::Text("Hello from the model".to_string())).await;
    let provider = provider(&url, 5);

    let text = provider
        .complete("Say hello", GenerationSettings::FEEDBACK)
        .await
        .unwrap();
    assert_eq!(text, "Hello from the model");

    let seen = fake.seen.lock().unwrap();
    let (query, body) = &seen[0];
    assert_eq!(query.get("key").map(String::as_str), Some(TEST_KEY));
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hello");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 600);
    assert!(body["generationConfig"]["temperature"].as_f64().unwrap() > 0.79);
}

#[tokio::test]
async fn test_gemini_error_status() {
    let (url, _) = spawn_fake(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let err = provider(&url, 5)
        .complete("prompt", GenerationSettings::QUESTIONS)
        .await
        .unwrap_err();
    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_malformed_body() {
    let (url, _) = spawn_fake(Reply::Garbage).await;

    let err = provider(&url, 5)
        .complete("prompt", GenerationSettings::QUESTIONS)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Malformed(_)));
}

#[tokio::test]
async fn test_gemini_timeout_is_transport_error() {
    let (url, _) = spawn_fake(Reply::Slow(Duration::from_secs(3))).await;

    let err = provider(&url, 1)
        .complete("prompt", GenerationSettings::QUESTIONS)
        .await
        .unwrap_err();
    match err {
        ProviderError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unusable_keys_never_call_out() {
    for key in [None, Some("mock-key"), Some("sk-something")] {
        let provider = GeminiProvider::new(&AiConfig {
            api_key: key.map(str::to_string),
            ..AiConfig::default()
        })
        .unwrap();
        assert!(!provider.is_configured());

        let err = provider
            .complete("prompt", GenerationSettings::QUESTIONS)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured));
    }
}

#[tokio::test]
async fn test_gateway_questions_from_fake_gemini() {
    let questions: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "question": format!("Q{}?", i),
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 3
            })
        })
        .collect();
    let reply = format!("```json\n{}\n```", json!({ "questions": questions }));
    let (url, _) = spawn_fake(Reply::Text(reply)).await;

    let gateway = AiGateway::new(Arc::new(provider(&url, 5)));
    let generated = gateway.generate_questions("Chess", 5).await.unwrap();

    assert_eq!(generated.source, QuestionSource::Provider);
    assert_eq!(generated.questions.len(), 5);
    assert!(generated.questions.iter().all(|q| q.correct_answer == 3));
}

#[tokio::test]
async fn test_gateway_falls_back_on_upstream_error() {
    let (url, _) = spawn_fake(Reply::Status(StatusCode::TOO_MANY_REQUESTS)).await;
    let gateway = AiGateway::new(Arc::new(provider(&url, 5)));

    let generated = gateway.generate_questions("History", 5).await.unwrap();
    assert_eq!(generated.source, QuestionSource::QuestionBank);
    assert_eq!(generated.questions.len(), 5);

    let feedback = gateway
        .generate_feedback(&FeedbackInput::new("History", 2, 5, None))
        .await;
    assert_eq!(feedback.strategy, FeedbackStrategy::GenericTemplate);
    assert!(feedback.text.contains("2/5 (40%)"));
}

#[tokio::test]
async fn test_gateway_bank_too_short_fails() {
    let (url, _) = spawn_fake(Reply::Garbage).await;
    let gateway = AiGateway::new(Arc::new(provider(&url, 5)));

    assert!(gateway.generate_questions("Science", 50).await.is_err());
}
