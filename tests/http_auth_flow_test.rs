/// HTTP-level tests for the full register → login → me flow, run against the
/// router with the in-memory store (no database, no network).
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use roster_auth::routes::api_router;
use roster_auth::security::jwt::{TokenService, TOKEN_VALIDITY_MINUTES};
use roster_auth::{AppState, MemoryUserStore, User};

const SECRET: &str = "integration-test-secret";
const ISSUER: &str = "roster-auth-tests";
const AUDIENCE: &str = "roster-clients";

fn test_app() -> (Router, Arc<TokenService>) {
    let tokens = Arc::new(TokenService::new(SECRET, ISSUER, AUDIENCE));
    let state = AppState::new(Arc::new(MemoryUserStore::new()), tokens.clone());
    (api_router(state), tokens)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("request should build")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn ana_payload() -> Value {
    json!({
        "username": "ana",
        "phone_number": 555000111i64,
        "email": "ana@x.com",
        "password": "p1"
    })
}

async fn register_ana(app: &Router) {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/auth/register", ana_payload()))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);
}

async fn login_ana(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "username": "ana", "password": "p1" }),
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["access_token"]
        .as_str()
        .expect("login body should carry a token")
        .to_string()
}

#[tokio::test]
async fn test_register_login_whoami_flow() {
    let (app, _) = test_app();

    // Register → 200 with no body
    register_ana(&app).await;

    // Login → bearer token with two dot separators
    let token = login_ana(&app).await;
    assert_eq!(token.matches('.').count(), 2);

    // WhoAmI with that token → the ana record as embedded at issuance
    let response = app
        .clone()
        .oneshot(bearer_request("/api/v1/auth/me", &token))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["username"], "ana");
    assert_eq!(me["phone_number"], 555000111i64);
    assert_eq!(me["email"], "ana@x.com");
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    let (app, _) = test_app();
    register_ana(&app).await;

    // Same phone, different username and email
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "username": "bea",
                "phone_number": 555000111i64,
                "email": "bea@x.com",
                "password": "p2"
            }),
        ))
        .await
        .expect("request should run");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["fields"], json!(["phone"]));
}

#[tokio::test]
async fn test_register_missing_fields_rejected() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "username": "",
                "phone_number": 555000111i64,
                "email": "not-an-email",
                "password": "p1"
            }),
        ))
        .await
        .expect("request should run");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_share_a_response() {
    let (app, _) = test_app();
    register_ana(&app).await;

    let unknown = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "username": "zoe", "password": "p1" }),
        ))
        .await
        .expect("request should run");
    let wrong = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "username": "ana", "password": "wrong" }),
        ))
        .await
        .expect("request should run");

    // Unknown username and wrong password must be indistinguishable
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
}

#[tokio::test]
async fn test_expired_token_rejected_on_whoami() {
    let (app, tokens) = test_app();
    register_ana(&app).await;

    // Fetch the live record, then simulate a token minted past the window
    let token = login_ana(&app).await;
    let me = app
        .clone()
        .oneshot(bearer_request("/api/v1/auth/me", &token))
        .await
        .expect("request should run");
    let user: User = serde_json::from_value(body_json(me).await).expect("record should parse");

    let stale_issue = Utc::now() - Duration::minutes(TOKEN_VALIDITY_MINUTES + 1);
    let expired = tokens
        .issue_at(&user, stale_issue)
        .expect("issuing should succeed");

    let response = app
        .clone()
        .oneshot(bearer_request("/api/v1/auth/me", &expired))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_whoami_requires_bearer_token() {
    let (app, _) = test_app();

    // No Authorization header
    let missing = app
        .clone()
        .oneshot(get_request("/api/v1/auth/me"))
        .await
        .expect("request should run");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/me")
                .header(header::AUTHORIZATION, "Basic YW5hOnAx")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let garbage = app
        .clone()
        .oneshot(bearer_request("/api/v1/auth/me", "not.a.token"))
        .await
        .expect("request should run");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_existence_probes() {
    let (app, _) = test_app();
    register_ana(&app).await;

    for (uri, expected) in [
        ("/api/v1/users/exists/username/ana", true),
        ("/api/v1/users/exists/username/zoe", false),
        ("/api/v1/users/exists/phone/555000111", true),
        ("/api/v1/users/exists/phone/123", false),
        ("/api/v1/users/exists/email/ana@x.com", true),
        ("/api/v1/users/exists/email/zoe@x.com", false),
    ] {
        let response = app
            .clone()
            .oneshot(get_request(uri))
            .await
            .expect("request should run");
        assert_eq!(response.status(), StatusCode::OK, "probe {}", uri);
        assert_eq!(body_json(response).await, json!(expected), "probe {}", uri);
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = test_app();

    for uri in ["/health", "/readiness"] {
        let response = app
            .clone()
            .oneshot(get_request(uri))
            .await
            .expect("request should run");
        assert_eq!(response.status(), StatusCode::OK, "endpoint {}", uri);
    }
}
