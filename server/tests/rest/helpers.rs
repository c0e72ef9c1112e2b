use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::api::app_state::AppState;
use server::api::rest;
use server::bootstrap::config::Config;
use server::modules::auth::{jwt, password};

/// Build a router over a fresh in-memory database.
pub async fn test_app() -> (Router, DatabaseConnection) {
    jwt::init_jwt_secret("integration-test-secret");

    // A single connection keeps every query on the same in-memory database.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    let mut config = Config::default();
    config.uploads.dir = tempfile::tempdir().expect("tempdir").keep();

    let state = AppState::new(db.clone(), &config);
    (rest::build_router(state, &config), db)
}

/// Fire one request and return the status plus parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// A multipart form field: text, or a file with a name and content type.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

/// Fire one multipart form request and return the status plus parsed body.
pub async fn send_multipart(
    app: &Router,
    method: Method,
    uri: &str,
    parts: &[Part<'_>],
    token: Option<&str>,
) -> (StatusCode, Value) {
    let boundary = "------------------------axum-test-7349";

    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, content_type, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    send_raw(
        app,
        method,
        uri,
        &format!("multipart/form-data; boundary={boundary}"),
        body,
        token,
    )
    .await
}

/// Fire one request with an arbitrary body and content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: Vec<u8>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Insert an admin directly and mint a token for it.
pub async fn seed_admin(db: &DatabaseConnection) -> String {
    let now = chrono::Utc::now();
    let admin = entity::user::ActiveModel {
        name: Set("Admin".to_string()),
        email: Set("admin@example.com".to_string()),
        password_hash: Set(password::hash_password("admin-pass-123").expect("hash")),
        avatar: Set("/avatar.png".to_string()),
        role: Set("admin".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert admin");

    jwt::generate_token(admin.id, "admin", 1).expect("token")
}

/// Register through the API and return the issued token.
pub async fn register_user(app: &Router, name: &str, email: &str, pass: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": name, "email": email, "password": pass})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["data"]["token"].as_str().expect("token").to_string()
}

/// Create a scientist through the API and return its id.
pub async fn create_scientist(app: &Router, name: &str, field: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/scientists",
        Some(json!({"name": name, "field": field})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create scientist failed: {body}");
    body["data"]["id"].as_i64().expect("id")
}

/// Create a discovery through the API and return its id.
pub async fn create_discovery(app: &Router, scientist_id: i64, title: &str, year: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/discoveries",
        Some(json!({
            "title": title,
            "scientistId": scientist_id,
            "field": "Physics",
            "year": year,
            "image": "/uploads/discoveries/test.png"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create discovery failed: {body}");
    body["data"]["id"].as_i64().expect("id")
}
