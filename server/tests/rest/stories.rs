use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::{create_discovery, create_scientist, send, test_app};

#[tokio::test]
async fn story_inherits_image_and_scientist_from_discovery() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({
            "discoveryId": discovery_id,
            "impact": ["Opened the field of radioactivity research"]
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create story failed: {body}");
    assert_eq!(body["data"]["scientistId"], json!(scientist_id));
    assert_eq!(body["data"]["image"], json!("/uploads/discoveries/test.png"));
}

#[tokio::test]
async fn second_story_for_same_discovery_is_rejected() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;

    let payload = json!({"discoveryId": discovery_id});
    let (status, _body) =
        send(&app, Method::POST, "/api/discovery-stories", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send(&app, Method::POST, "/api/discovery-stories", Some(payload), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn create_for_missing_discovery_is_404() {
    let (app, _db) = test_app().await;

    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": 777})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_discovery_rejects_malformed_id() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/discovery-stories/by-discovery/abc",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid discovery id"));
}

#[tokio::test]
async fn by_discovery_without_story_is_404() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;

    let (status, _body) = send(
        &app,
        Method::GET,
        &format!("/api/discovery-stories/by-discovery/{discovery_id}"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_discovery_returns_populated_story() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;
    send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": discovery_id})),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/discovery-stories/by-discovery/{discovery_id}"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["discovery"]["title"], json!("Radium"));
    assert_eq!(body["data"]["scientist"]["name"], json!("Marie Curie"));
}

#[tokio::test]
async fn content_sections_are_trimmed_and_empties_dropped() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({
            "discoveryId": discovery_id,
            "content": [
                {"section": "  Background  ", "text": "  Pitchblende residue.  "},
                {"section": "   ", "text": ""},
                {"section": "Method", "text": "Fractional crystallization."}
            ]
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create story failed: {body}");
    let content = body["data"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["section"], json!("Background"));
    assert_eq!(content[0]["text"], json!("Pitchblende residue."));
}

#[tokio::test]
async fn update_replaces_impact_and_cleans_content() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;
    let (_status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": discovery_id})),
        None,
    )
    .await;
    let story_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/discovery-stories/{story_id}"),
        Some(json!({
            "impact": ["Two Nobel Prizes"],
            "content": [{"section": " Legacy ", "text": " A new science. "}]
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["impact"], json!(["Two Nobel Prizes"]));
    assert_eq!(body["data"]["content"][0]["section"], json!("Legacy"));
    assert_eq!(body["data"]["content"][0]["text"], json!("A new science."));
}

#[tokio::test]
async fn update_can_rehome_story_to_another_discovery() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let first = create_discovery(&app, scientist_id, "Radium", 1898).await;
    let second = create_discovery(&app, scientist_id, "Polonium", 1898).await;
    let (_status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": first})),
        None,
    )
    .await;
    let story_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/discovery-stories/{story_id}"),
        Some(json!({"discoveryId": second})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["discoveryId"], json!(second));
    assert_eq!(body["data"]["discovery"]["title"], json!("Polonium"));
}

#[tokio::test]
async fn update_rejects_discovery_that_already_has_a_story() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let first = create_discovery(&app, scientist_id, "Radium", 1898).await;
    let second = create_discovery(&app, scientist_id, "Polonium", 1898).await;
    let (_status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": first})),
        None,
    )
    .await;
    let story_id = body["data"]["id"].as_i64().unwrap();
    send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": second})),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/discovery-stories/{story_id}"),
        Some(json!({"discoveryId": second})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn update_rejects_missing_target_discovery() {
    let (app, _db) = test_app().await;
    let scientist_id = create_scientist(&app, "Marie Curie", "Physics").await;
    let discovery_id = create_discovery(&app, scientist_id, "Radium", 1898).await;
    let (_status, body) = send(
        &app,
        Method::POST,
        "/api/discovery-stories",
        Some(json!({"discoveryId": discovery_id})),
        None,
    )
    .await;
    let story_id = body["data"]["id"].as_i64().unwrap();

    let (status, _body) = send(
        &app,
        Method::PUT,
        &format!("/api/discovery-stories/{story_id}"),
        Some(json!({"discoveryId": 4242})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_story_is_404() {
    let (app, _db) = test_app().await;

    let (status, body) =
        send(&app, Method::DELETE, "/api/discovery-stories/999", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}
