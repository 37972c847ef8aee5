//! API integration tests against the in-process router

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tourist_safety::{
    config::AppConfig, create_router, repository::Repository, services::Services, AppState,
};

async fn seeded_app(config: AppConfig) -> Router {
    let services = Services::new(Repository::new(), config.auth.clone());
    services.seed().await.expect("seed failed");
    create_router(AppState::new(config, services))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = seeded_app(AppConfig::default()).await;
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_login_demo_accounts() {
    let app = seeded_app(AppConfig::default()).await;
    for (email, role) in [
        ("tourist@test.com", "tourist"),
        ("police@test.com", "police"),
        ("tourism@test.com", "tourism"),
    ] {
        let token = login(&app, email, role).await;
        let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], email);
        assert_eq!(body["role"], role);
    }
}

#[tokio::test]
async fn test_login_wrong_role_or_password() {
    let app = seeded_app(AppConfig::default()).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "police@test.com", "password": "password123", "role": "tourism" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "police@test.com", "password": "nope", "role": "police" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Incorrect email or password");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = seeded_app(AppConfig::default()).await;
    let (status, _) = send(&app, Method::GET, "/api/v1/police/alerts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/police/alerts", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_enforcement() {
    let app = seeded_app(AppConfig::default()).await;
    let tourist = login(&app, "tourist@test.com", "tourist").await;

    let (status, _) = send(&app, Method::GET, "/api/v1/police/alerts", Some(&tourist), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        send(&app, Method::GET, "/api/v1/tourism/statistics", Some(&tourist), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_permissive_policy_admits_any_role() {
    let mut config = AppConfig::default();
    config.auth.enforce_roles = false;
    let app = seeded_app(config).await;
    let tourist = login(&app, "tourist@test.com", "tourist").await;

    let (status, body) =
        send(&app, Method::GET, "/api/v1/police/alerts", Some(&tourist), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_alert_lifecycle() {
    let app = seeded_app(AppConfig::default()).await;
    let police = login(&app, "police@test.com", "police").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/police/alerts?status=active",
        Some(&police),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["alert-1"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/police/alerts/alert-1",
        Some(&police),
        Some(json!({ "status": "resolved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "resolved");
    assert!(body["resolvedAt"].is_string());
    assert!(body["acknowledgedAt"].is_string());

    // No way back from resolved
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/police/alerts/alert-1",
        Some(&police),
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/police/alerts/alert-404",
        Some(&police),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_panic_reaches_police() {
    let app = seeded_app(AppConfig::default()).await;
    let tourist = login(&app, "tourist@test.com", "tourist").await;
    let police = login(&app, "police@test.com", "police").await;

    let (status, body) = send(&app, Method::POST, "/api/v1/tourist/panic", Some(&tourist), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Panic alert sent successfully");
    let alert_id = body["alert_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/police/alerts/{}", alert_id),
        Some(&police),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "panic");
    assert_eq!(body["priority"], "critical");
    assert_eq!(body["status"], "active");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/police/alerts/{}/assign", alert_id),
        Some(&police),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alert"]["status"], "acknowledged");
}

#[tokio::test]
async fn test_tourism_statistics() {
    let app = seeded_app(AppConfig::default()).await;
    let tourism = login(&app, "tourism@test.com", "tourism").await;

    let (status, body) =
        send(&app, Method::GET, "/api/v1/tourism/statistics", Some(&tourism), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalTourists"], 3);
    assert_eq!(body["incidents"], 2);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/tourism/activities/recent?limit=2",
        Some(&tourism),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/tourism/tourists/tourist-2/kyc",
        Some(&tourism),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = seeded_app(AppConfig::default()).await;
    let signup = json!({
        "email": "new@test.com",
        "name": "New Tourist",
        "role": "tourist",
        "password": "longenough"
    });

    let (status, body) =
        send(&app, Method::POST, "/api/v1/auth/signup", None, Some(signup.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["profileComplete"], false);

    let (status, _) = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(signup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
