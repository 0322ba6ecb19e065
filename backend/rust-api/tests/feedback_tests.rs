mod common;

use ai_quiz_api::services::ai::ProviderError;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

use common::{get, post, ScriptedProvider};

fn science_results() -> Value {
    let correct = [2, 0, 3, 2, 2];
    let user = [2, 0, 3, 1, 0];
    let results: Vec<Value> = (0..5)
        .map(|i| {
            json!({
                "questionIndex": i,
                "question": format!("Science question {}?", i + 1),
                "options": ["A", "B", "C", "D"],
                "correctAnswer": correct[i],
                "userAnswer": user[i],
                "isCorrect": correct[i] == user[i]
            })
        })
        .collect();
    Value::Array(results)
}

#[tokio::test]
async fn test_detailed_template_without_provider() {
    let app = common::create_test_app().await;

    let (status, json) = post(
        &app,
        "/api/ai/feedback",
        json!({
            "topic": "Science",
            "score": 3,
            "totalQuestions": 5,
            "results": science_results()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["score"], 3);
    assert_eq!(json["totalQuestions"], 5);
    assert_eq!(json["percentage"], 60);
    assert_eq!(json["topic"], "Science");

    let feedback = json["feedback"].as_str().unwrap();
    assert!(feedback.contains("3/5"));
    assert!(feedback.contains("Areas to review"));
    assert!(feedback.contains("Science question 4?"));
}

#[tokio::test]
async fn test_generic_template_without_results() {
    let app = common::create_test_app().await;

    let (status, json) = post(
        &app,
        "/api/ai/feedback",
        json!({ "topic": "History", "score": 4, "totalQuestions": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["percentage"], 80);
    assert!(json["feedback"].as_str().unwrap().contains("Outstanding"));
}

#[tokio::test]
async fn test_provider_feedback_used_when_available() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(
        "  Nice work on photosynthesis!  ".to_string(),
    )]));
    let test_app = common::create_test_app_with_provider(provider.clone()).await;

    let (status, json) = post(
        &test_app.router,
        "/api/ai/feedback",
        json!({
            "topic": "Science",
            "score": 3,
            "totalQuestions": 5,
            "results": science_results()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["feedback"], "Nice work on photosynthesis!");
    assert_eq!(provider.calls(), 1);
    assert!(provider.prompts()[0].contains("Science question 4?"));
}

#[tokio::test]
async fn test_provider_failure_falls_back_to_detailed_template() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::Status {
        status: 503,
        body: "overloaded".to_string(),
    })]));
    let test_app = common::create_test_app_with_provider(provider.clone()).await;

    let (status, json) = post(
        &test_app.router,
        "/api/ai/feedback",
        json!({
            "topic": "Science",
            "score": 3,
            "totalQuestions": 5,
            "results": science_results()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["feedback"].as_str().unwrap().contains("3/5"));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_summary_provider_failure_falls_back_to_generic() {
    let provider = Arc::new(ScriptedProvider::failing());
    let test_app = common::create_test_app_with_provider(provider.clone()).await;

    let (status, json) = post(
        &test_app.router,
        "/api/ai/feedback",
        json!({ "topic": "History", "score": 1, "totalQuestions": 5, "results": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["feedback"]
        .as_str()
        .unwrap()
        .contains("every expert was once a beginner"));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_feedback_validation() {
    let app = common::create_test_app().await;

    let (status, json) = post(&app, "/api/ai/feedback", json!({ "topic": "Science" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Topic, score, and totalQuestions are required");

    let (status, json) = post(
        &app,
        "/api/ai/feedback",
        json!({ "topic": "Science", "score": 6, "totalQuestions": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Score must be between 0 and totalQuestions");

    let (status, _) = post(
        &app,
        "/api/ai/feedback",
        json!({ "topic": "Science", "score": -1, "totalQuestions": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/ai/feedback",
        json!({ "topic": "Science", "score": 0, "totalQuestions": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_health() {
    let app = common::create_test_app().await;

    let (status, json) = get(&app, "/api/ai/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "AI service is running");
    assert_eq!(json["providerConfigured"], false);
    assert_eq!(json["providerTimeoutSecs"], 30);
    assert_eq!(json["features"].as_array().unwrap().len(), 3);
}
