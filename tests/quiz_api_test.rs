use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use learnlog_backend::services::question_service::NewQuestion;
use learnlog_backend::AppState;

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("ADMIN_USERNAME", "admin");
    env::set_var("ADMIN_PASSWORD", "admin_pw");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("ADMIN_RPS", "100");
    env::set_var("SESSION_TTL_MINUTES", "30");
    env::set_var("TOKEN_EXPIRY_HOURS", "1");
    let _ = learnlog_backend::config::init_config();
}

fn public_app(state: AppState) -> Router {
    learnlog_backend::routes::public_router().with_state(state)
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn seed_two_questions(state: &AppState) {
    for (text, correct) in [("first question", 1), ("second question", 1)] {
        state
            .question_service
            .create(NewQuestion {
                question: text.to_string(),
                options: vec!["option a".into(), "option b".into()],
                correct_answer_index: correct,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn quiz_session_flow_end_to_end() {
    init_test_config();
    let state = AppState::new().expect("state");
    seed_two_questions(&state).await;
    let app = public_app(state.clone());

    let resp = post_json(&app, "/api/quiz/sessions", json!({"userName": "alice"})).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["totalQuestions"], 2);
    assert_eq!(body["currentIndex"], 0);
    assert!(body["question"]["correctAnswerIndex"].is_null());

    // Advancing before answering is refused and the session stays put.
    let resp = post_json(
        &app,
        &format!("/api/quiz/sessions/{}/advance", token),
        json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/quiz/sessions/{}/answer", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({"optionIndex": 1}).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["selectedOptionIndex"], 1);

    // Out-of-range answers bounce off the current question.
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/quiz/sessions/{}/answer", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({"optionIndex": 5}).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_json(
        &app,
        &format!("/api/quiz/sessions/{}/advance", token),
        json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["currentIndex"], 1);

    // Step back, then forward again; the recorded answer survives.
    let resp = post_json(&app, &format!("/api/quiz/sessions/{}/back", token), json!({})).await;
    let body = body_json(resp).await;
    assert_eq!(body["currentIndex"], 0);
    assert_eq!(body["selectedOptionIndex"], 1);
    post_json(
        &app,
        &format!("/api/quiz/sessions/{}/advance", token),
        json!({}),
    )
    .await;

    // Wrong answer on the last question, then finish.
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/quiz/sessions/{}/answer", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({"optionIndex": 0}).to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap();

    let resp = post_json(
        &app,
        &format!("/api/quiz/sessions/{}/advance", token),
        json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["finished"], true);
    assert_eq!(body["results"]["correctCount"], 1);
    assert_eq!(body["results"]["wrongCount"], 1);
    assert_eq!(body["results"]["percentage"], 50);
    assert_eq!(body["results"]["missedQuestionIds"], json!([2]));

    // Finished sessions refuse further advances, and exactly one attempt
    // landed in the log.
    let resp = post_json(
        &app,
        &format!("/api/quiz/sessions/{}/advance", token),
        json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.attempt_service.count().await, 1);
    let attempt = &state.attempt_service.list().await[0];
    assert_eq!(attempt.user_name, "alice");
    assert_eq!(attempt.missed_question_ids, vec![2]);
}

#[tokio::test]
async fn unknown_session_tokens_get_404() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = public_app(state);

    let req = Request::builder()
        .method("GET")
        .uri("/api/quiz/sessions/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_attempt_submission_lands_in_the_log() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = public_app(state.clone());

    let resp = post_json(
        &app,
        "/api/quiz-attempts",
        json!({
            "userName": "bob",
            "correctAnswers": 3,
            "wrongAnswers": 1,
            "durationSeconds": 42,
            "missedQuestionIds": [4]
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["userName"], "bob");

    // Anonymous summaries fall back to the guest identity.
    let resp = post_json(
        &app,
        "/api/quiz-attempts",
        json!({
            "correctAnswers": 1,
            "wrongAnswers": 3,
            "durationSeconds": 30
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["userName"], "Guest");

    let log = state.attempt_service.list().await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].id, 2);
    assert_eq!(log[1].id, 1);
}

#[tokio::test]
async fn quiz_session_requires_questions() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = public_app(state);

    let resp = post_json(&app, "/api/quiz/sessions", json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
