use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

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

fn app_with_auth(state: AppState) -> Router {
    learnlog_backend::routes::public_router()
        .merge(
            learnlog_backend::routes::admin_router().layer(axum::middleware::from_fn(
                learnlog_backend::middleware::auth::require_admin,
            )),
        )
        .with_state(state)
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn login(app: &Router) -> String {
    let resp = request(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "admin", "password": "admin_pw"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = app_with_auth(state);

    let resp = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "", "password": ""})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_surface_requires_a_token() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = app_with_auth(state);

    let resp = request(&app, "GET", "/api/admin/questions", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = request(
        &app,
        "GET",
        "/api/admin/questions",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn question_crud_assigns_and_never_reuses_ids() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = app_with_auth(state);
    let token = login(&app).await;

    let payload = |text: &str| {
        json!({
            "question": text,
            "options": ["a", "b", "c", "d"],
            "correctAnswerIndex": 0
        })
    };

    let resp = request(
        &app,
        "POST",
        "/api/admin/questions",
        Some(&token),
        Some(payload("one")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["id"], 1);

    let resp = request(
        &app,
        "POST",
        "/api/admin/questions",
        Some(&token),
        Some(payload("two")),
    )
    .await;
    assert_eq!(body_json(resp).await["id"], 2);

    let resp = request(&app, "DELETE", "/api/admin/questions/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = request(
        &app,
        "POST",
        "/api/admin/questions",
        Some(&token),
        Some(payload("three")),
    )
    .await;
    assert_eq!(body_json(resp).await["id"], 3);

    // Partial update merges; absent ids are a quiet no-op.
    let resp = request(
        &app,
        "PATCH",
        "/api/admin/questions/2",
        Some(&token),
        Some(json!({"question": "two, revised"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["question"], "two, revised");
    assert_eq!(body["options"], json!(["a", "b", "c", "d"]));

    let resp = request(
        &app,
        "PATCH",
        "/api/admin/questions/999",
        Some(&token),
        Some(json!({"question": "ghost"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["updated"], false);

    // Malformed creations are rejected before any mutation.
    let resp = request(
        &app,
        "POST",
        "/api/admin/questions",
        Some(&token),
        Some(json!({
            "question": "broken",
            "options": ["only one"],
            "correctAnswerIndex": 0
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn flashcard_crud_flow() {
    init_test_config();
    let state = AppState::new().expect("state");
    let app = app_with_auth(state);
    let token = login(&app).await;

    let resp = request(
        &app,
        "POST",
        "/api/admin/flashcards",
        Some(&token),
        Some(json!({"question": "q", "answer": "a"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["id"], 1);

    let resp = request(
        &app,
        "PATCH",
        "/api/admin/flashcards/1",
        Some(&token),
        Some(json!({"answer": "a better answer"})),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["question"], "q");
    assert_eq!(body["answer"], "a better answer");

    let resp = request(&app, "DELETE", "/api/admin/flashcards/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    // Deleting again stays a no-op.
    let resp = request(&app, "DELETE", "/api/admin/flashcards/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn stats_reflect_attempts_and_content() {
    init_test_config();
    let state = AppState::new().expect("state");
    state.seed_demo_data().await.expect("seed");
    let app = app_with_auth(state.clone());
    let token = login(&app).await;

    // Two legacy submissions feed the analytics.
    for (correct, wrong, missed) in [(3u32, 1u32, vec![2i64]), (1, 3, vec![2, 3, 4])] {
        let resp = request(
            &app,
            "POST",
            "/api/quiz-attempts",
            None,
            Some(json!({
                "userName": "dana",
                "correctAnswers": correct,
                "wrongAnswers": wrong,
                "durationSeconds": 25,
                "missedQuestionIds": missed
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = request(&app, "GET", "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["totalAttempts"], 2);
    assert_eq!(body["averageScore"], 50.0);
    assert_eq!(body["totalQuestions"], 4);
    // Question 2 was missed twice and leads the chart.
    assert_eq!(body["mostMissed"][0]["questionId"], 2);
    assert_eq!(body["mostMissed"][0]["missed"], 2);
    assert_eq!(body["recentAttempts"][0]["missedQuestionIds"], json!([2, 3, 4]));

    let resp = request(&app, "GET", "/api/stats/overview", Some(&token), None).await;
    let body = body_json(resp).await;
    assert_eq!(body["totalUsers"], 1);
    assert_eq!(body["totalQuestions"], 4);
    assert_eq!(body["totalFlashcards"], 4);
    assert_eq!(body["totalQuizAttempts"], 2);
    assert!(body["totalFlashcardViews"].is_u64());
}
