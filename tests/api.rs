use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use axum_taskboard::{
    router,
    services::{ManualClock, StaticCredentials, TokenService},
    AppState,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

struct TestApp {
    app: Router,
    state: AppState,
    clock: Arc<ManualClock>,
}

impl TestApp {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let tokens = TokenService::new(SECRET, Duration::minutes(30), clock.clone());
        let credentials = StaticCredentials::new(HashMap::from([(
            "admin".to_string(),
            "password123".to_string(),
        )]));
        let state = AppState::new(tokens, credentials, clock.clone());
        let app = router(state.clone(), 1024 * 1024);
        Self { app, state, clock }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap();
        self.send(request).await
    }

    async fn token(&self) -> String {
        let (status, body) = self.login("admin", "password123").await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn call(
        &self,
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
        self.send(request).await
    }
}

#[tokio::test]
async fn root_is_public() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn login_issues_bearer_token() {
    let app = TestApp::new();
    let (status, body) = app.login("admin", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    assert_eq!(app.state.tokens.verify(token).unwrap().sub, "admin");
}

#[tokio::test]
async fn bad_credentials_are_rejected_with_challenge() {
    let app = TestApp::new();
    for (username, password) in [("admin", "wrong"), ("ghost", "password123")] {
        let response = app
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/token")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={}&password={}", username, password)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    let (_, body) = app.login("admin", "wrong").await;
    assert_eq!(body, json!({ "detail": "Incorrect username or password" }));
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn token_expires_after_ttl() {
    let app = TestApp::new();
    let token = app.token().await;

    app.clock.advance(Duration::minutes(29));
    let (status, _) = app.call(Method::GET, "/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    app.clock.advance(Duration::minutes(1));
    let (status, body) = app.call(Method::GET, "/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token has expired");
}

#[tokio::test]
async fn protected_routes_require_a_token_before_touching_stores() {
    let app = TestApp::new();
    let routes = [
        (Method::POST, "/users", Some(json!({"username": "alice", "email": "a@example.com", "password": "password1"}))),
        (Method::GET, "/users", None),
        (Method::GET, "/users/1", None),
        (Method::POST, "/tasks", Some(json!({"title": "Buy milk"}))),
        (Method::GET, "/tasks", None),
        (Method::GET, "/tasks/1", None),
        (Method::PUT, "/tasks/1", Some(json!({"title": "Buy bread"}))),
        (Method::PATCH, "/tasks/1/complete", None),
        (Method::DELETE, "/tasks/1", None),
    ];

    for (method, uri, body) in routes {
        let (status, response) = app.call(method.clone(), uri, None, body.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["detail"], "Not authenticated");

        let (status, response) = app.call(method.clone(), uri, Some("garbage"), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["detail"], "Invalid token");
    }

    assert!(app.state.users.is_empty());
    assert!(app.state.tasks.is_empty());
}

#[tokio::test]
async fn user_delete_checks_header_presence_only() {
    let app = TestApp::new();
    let token = app.token().await;
    let (status, _) = app
        .call(
            Method::POST,
            "/users",
            Some(&token),
            Some(json!({"username": "alice", "email": "a@example.com", "password": "password1"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.call(Method::DELETE, "/users/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.state.users.len(), 1);

    // An unverifiable token still gets through on this route.
    let (status, body) = app.call(Method::DELETE, "/users/1", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.call(Method::DELETE, "/users/1", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn user_lifecycle_and_email_conflict() {
    let app = TestApp::new();
    let token = app.token().await;
    let alice = json!({"username": "alice", "email": "a@example.com", "password": "password1"});

    let (status, created) = app.call(Method::POST, "/users", Some(&token), Some(alice.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["is_active"], true);
    assert!(created.get("password").is_none());

    let (status, body) = app.call(Method::POST, "/users", Some(&token), Some(alice)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User with this email already exists");
    assert_eq!(app.state.users.len(), 1);

    let (status, fetched) = app.call(Method::GET, "/users/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = app.call(Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    let (status, _) = app.call(Method::GET, "/users/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_user_payload_is_rejected() {
    let app = TestApp::new();
    let token = app.token().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            Some(&token),
            Some(json!({"username": "al", "email": "nope", "password": "short"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("username"));
    assert!(detail.contains("email"));
    assert!(detail.contains("password"));

    let (status, body) = app
        .call(Method::POST, "/users", Some(&token), Some(json!({"username": "alice"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert!(app.state.users.is_empty());
}

#[tokio::test]
async fn task_lifecycle() {
    let app = TestApp::new();
    let token = app.token().await;

    let (status, task) = app
        .call(Method::POST, "/tasks", Some(&token), Some(json!({"title": "Buy milk"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["description"], Value::Null);
    assert_eq!(task["completed"], false);

    let (status, task) = app
        .call(Method::PATCH, "/tasks/1/complete", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["completed"], true);

    let (status, body) = app.call(Method::DELETE, "/tasks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.call(Method::GET, "/tasks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Task not found");

    let (status, body) = app
        .call(Method::PATCH, "/tasks/1/complete", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Task not found");
}

#[tokio::test]
async fn put_replaces_title_and_description() {
    let app = TestApp::new();
    let token = app.token().await;
    app.call(
        Method::POST,
        "/tasks",
        Some(&token),
        Some(json!({"title": "Buy milk", "description": "2 litres"})),
    )
    .await;

    let (status, task) = app
        .call(Method::PUT, "/tasks/1", Some(&token), Some(json!({"title": "Buy bread"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Buy bread");
    assert_eq!(task["description"], Value::Null);

    let (status, _) = app
        .call(Method::PUT, "/tasks/1", Some(&token), Some(json!({"title": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(Method::PUT, "/tasks/9", Some(&token), Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completed_filter_preserves_order() {
    let app = TestApp::new();
    let token = app.token().await;
    for i in 1..=5 {
        app.call(
            Method::POST,
            "/tasks",
            Some(&token),
            Some(json!({ "title": format!("task {}", i) })),
        )
        .await;
    }
    for id in [4, 2] {
        app.call(Method::PATCH, &format!("/tasks/{}/complete", id), Some(&token), None)
            .await;
    }

    let (status, done) = app
        .call(Method::GET, "/tasks?completed=true", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = done
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 4]);

    let (_, open) = app
        .call(Method::GET, "/tasks?completed=false", Some(&token), None)
        .await;
    let ids: Vec<u64> = open
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[tokio::test]
async fn pagination_windows_the_collection() {
    let app = TestApp::new();
    let token = app.token().await;
    for i in 1..=15 {
        app.call(
            Method::POST,
            "/tasks",
            Some(&token),
            Some(json!({ "title": format!("task {}", i) })),
        )
        .await;
    }

    let (status, page) = app
        .call(Method::GET, "/tasks?skip=10&limit=10", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12, 13, 14, 15]);

    let (_, default_page) = app.call(Method::GET, "/tasks", Some(&token), None).await;
    assert_eq!(default_page.as_array().unwrap().len(), 10);

    let (status, empty) = app
        .call(Method::GET, "/tasks?skip=100", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));

    for query in ["limit=0", "limit=101", "skip=-1", "limit=abc"] {
        let (status, body) = app
            .call(Method::GET, &format!("/tasks?{}", query), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn non_numeric_ids_are_validation_errors() {
    let app = TestApp::new();
    let token = app.token().await;
    let (status, body) = app.call(Method::GET, "/users/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn unsupported_methods_are_405_not_401() {
    let app = TestApp::new();
    let token = app.token().await;
    let cases = [
        (Method::PUT, "/users/1"),
        (Method::PATCH, "/users/1"),
        (Method::DELETE, "/users"),
        (Method::POST, "/tasks/1"),
        (Method::GET, "/tasks/1/complete"),
    ];

    for (method, uri) in cases {
        for auth in [None, Some("garbage"), Some(token.as_str())] {
            let (status, _) = app.call(method.clone(), uri, auth, None).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {} {:?}", method, uri, auth);
        }
    }
}

#[tokio::test]
async fn openapi_document_is_served_publicly() {
    let app = TestApp::new();
    let (status, doc) = app.call(Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Taskboard API");
    assert!(doc["paths"]["/token"]["post"].is_object());
    assert!(doc["paths"]["/tasks/{id}/complete"]["patch"].is_object());
    assert_eq!(doc["paths"]["/users"]["get"]["tags"], json!(["Users"]));
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
    assert!(doc["components"]["schemas"]["Task"].is_object());
}

#[tokio::test]
async fn swagger_ui_is_mounted() {
    let app = TestApp::new();
    let response = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/docs/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
