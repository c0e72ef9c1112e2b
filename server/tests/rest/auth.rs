use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::{register_user, seed_admin, send, send_multipart, test_app, Part};

#[tokio::test]
async fn register_returns_sanitized_user_and_token() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Ada Lovelace", "email": "Ada@Example.com", "password": "secret123"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["user"]["email"], json!("ada@example.com"));
    assert_eq!(body["data"]["user"]["role"], json!("user"));
    assert_eq!(body["data"]["user"]["avatar"], json!("/avatar.png"));
    assert!(body["data"]["token"].as_str().is_some());
    // The hash must never appear anywhere in the response.
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (app, _db) = test_app().await;
    register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Imposter", "email": "ada@example.com", "password": "secret456"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let (app, _db) = test_app().await;

    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Ada", "email": "ada@example.com", "password": "tiny"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let (app, _db) = test_app().await;
    register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "secret123"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["name"], json!("Ada"));
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let (app, _db) = test_app().await;
    register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "wrong-password"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_token() {
    let (app, _db) = test_app().await;

    let (status, _body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _body) =
        send(&app, Method::GET, "/api/auth/me", None, Some("invalid.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_current_user() {
    let (app, _db) = test_app().await;
    let token = register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("ada@example.com"));
}

#[tokio::test]
async fn change_password_verifies_current_first() {
    let (app, _db) = test_app().await;
    let token = register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, _body) = send(
        &app,
        Method::PUT,
        "/api/auth/change-password",
        Some(json!({"currentPassword": "not-the-password", "newPassword": "brand-new-1"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _body) = send(
        &app,
        Method::PUT,
        "/api/auth/change-password",
        Some(json!({"currentPassword": "secret123", "newPassword": "brand-new-1"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password is dead, new one works.
    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ada@example.com", "password": "brand-new-1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_profile_changes_name() {
    let (app, _db) = test_app().await;
    let token = register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/profile",
        Some(json!({"name": "Ada King"})),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Ada King"));
}

#[tokio::test]
async fn update_profile_accepts_multipart_avatar_upload() {
    let (app, _db) = test_app().await;
    let token = register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send_multipart(
        &app,
        Method::PUT,
        "/api/auth/profile",
        &[
            Part::Text("name", "Ada King"),
            Part::File("avatar", "me.png", "image/png", b"fake png bytes"),
        ],
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "multipart profile update failed: {body}");
    assert_eq!(body["data"]["name"], json!("Ada King"));
    let avatar = body["data"]["avatar"].as_str().unwrap();
    assert!(avatar.starts_with("/uploads/avatars/"), "unexpected avatar path: {avatar}");
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let (app, _db) = test_app().await;
    let token = register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, _body) = send(&app, Method::GET, "/api/auth/users", None, Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_list_update_and_delete_users() {
    let (app, db) = test_app().await;
    let admin_token = seed_admin(&db).await;
    register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/users", None, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));

    let user_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == json!("ada@example.com"))
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/auth/users/{user_id}"),
        Some(json!({"role": "admin"})),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("admin"));

    let (status, _body) = send(
        &app,
        Method::DELETE,
        &format!("/api/auth/users/{user_id}"),
        None,
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Deleting the same user again is a clean 404.
    let (status, _body) = send(
        &app,
        Method::DELETE,
        &format!("/api/auth/users/{user_id}"),
        None,
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_update_rejects_unknown_role() {
    let (app, db) = test_app().await;
    let admin_token = seed_admin(&db).await;
    register_user(&app, "Ada", "ada@example.com", "secret123").await;

    let (_status, body) = send(&app, Method::GET, "/api/auth/users", None, Some(&admin_token)).await;
    let user_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == json!("ada@example.com"))
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _body) = send(
        &app,
        Method::PUT,
        &format!("/api/auth/users/{user_id}"),
        Some(json!({"role": "superuser"})),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
