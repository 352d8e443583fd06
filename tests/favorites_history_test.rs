//! Favorites and cooking-history endpoints.

mod helpers;

use axum::http::StatusCode;
use helpers::{delete, get, post_json, put_json, register_user, seed_catalog_recipe, setup_app};
use plateful_shared::Difficulty;
use serde_json::json;

#[tokio::test]
async fn favorites_attach_list_and_detach() {
    let (app, pool) = setup_app().await;
    let token = register_user(&app, "fav@example.com").await;
    let id = seed_catalog_recipe(&pool, "Keeper", &["rice"], Difficulty::Easy).await;

    let (status, _body) = post_json(
        &app,
        "/api/v1/favorites",
        Some(&token),
        json!({"recipe_id": id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Attaching twice stays a single favorite
    post_json(
        &app,
        "/api/v1/favorites",
        Some(&token),
        json!({"recipe_id": id}),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/favorites", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "Keeper");

    let (status, _body) = delete(&app, &format!("/api/v1/favorites/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/v1/favorites", Some(&token)).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn favoriting_a_missing_recipe_is_404() {
    let (app, _pool) = setup_app().await;
    let token = register_user(&app, "fav@example.com").await;

    let (status, _body) = post_json(
        &app,
        "/api/v1/favorites",
        Some(&token),
        json!({"recipe_id": "missing"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorites_are_scoped_per_user() {
    let (app, pool) = setup_app().await;
    let alice = register_user(&app, "alice@example.com").await;
    let bob = register_user(&app, "bob@example.com").await;
    let id = seed_catalog_recipe(&pool, "Shared dish", &["rice"], Difficulty::Easy).await;

    post_json(
        &app,
        "/api/v1/favorites",
        Some(&alice),
        json!({"recipe_id": id}),
    )
    .await;

    let (_, body) = get(&app, "/api/v1/favorites", Some(&bob)).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn history_records_update_and_delete() {
    let (app, pool) = setup_app().await;
    let token = register_user(&app, "cook@example.com").await;
    let id = seed_catalog_recipe(&pool, "Cooked dish", &["rice"], Difficulty::Easy).await;

    let (status, entry) = post_json(
        &app,
        "/api/v1/history",
        Some(&token),
        json!({"recipe_id": id, "rating": 4.0, "notes": "tasty"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["recipe_title"], "Cooked dish");
    let entry_id = entry["id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, "/api/v1/history", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, updated) = put_json(
        &app,
        &format!("/api/v1/history/{entry_id}"),
        Some(&token),
        json!({"rating": 5.0, "notes": "even better reheated"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((updated["rating"].as_f64().unwrap() - 5.0).abs() < 1e-9);

    let (status, _body) = delete(&app, &format!("/api/v1/history/{entry_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&app, "/api/v1/history", Some(&token)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn history_entries_are_owner_only() {
    let (app, pool) = setup_app().await;
    let alice = register_user(&app, "alice@example.com").await;
    let bob = register_user(&app, "bob@example.com").await;
    let id = seed_catalog_recipe(&pool, "Cooked dish", &["rice"], Difficulty::Easy).await;

    let (_, entry) = post_json(
        &app,
        "/api/v1/history",
        Some(&alice),
        json!({"recipe_id": id, "rating": 4.0}),
    )
    .await;
    let entry_id = entry["id"].as_str().unwrap();

    let (status, _body) = put_json(
        &app,
        &format!("/api/v1/history/{entry_id}"),
        Some(&bob),
        json!({"rating": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _body) = delete(&app, &format!("/api/v1/history/{entry_id}"), Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logging_history_for_a_missing_recipe_is_404() {
    let (app, _pool) = setup_app().await;
    let token = register_user(&app, "cook@example.com").await;

    let (status, _body) = post_json(
        &app,
        "/api/v1/history",
        Some(&token),
        json!({"recipe_id": "missing", "rating": 4.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
