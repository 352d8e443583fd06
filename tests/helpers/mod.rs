//! Shared helpers for driving the router in integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use plateful_recipe::CreateRecipeInput;
use plateful_shared::{Difficulty, RecipeSource};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt;

/// In-memory database with migrations applied, wrapped in the app router.
pub async fn setup_app() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    (plateful::create_app(pool.clone()), pool)
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
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request did not complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, token, None).await
}

/// Register a fresh account and return its bearer token.
pub async fn register_user(app: &Router, email: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/v1/auth/register",
        None,
        json!({"email": email, "password": "Password123", "name": "Test"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["token"].as_str().expect("token missing").to_string()
}

/// Create a recipe through the API and return its id.
pub async fn create_recipe_via_api(app: &Router, token: &str, title: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/v1/recipes",
        Some(token),
        json!({
            "title": title,
            "description": "A test recipe",
            "cooking_time_minutes": 30,
            "servings": 4,
            "difficulty": "easy",
            "ingredients": ["rice", "beans"],
            "instructions": ["cook"],
            "cuisines": ["mexican"],
            "tags": ["dinner"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "recipe creation failed: {body}");
    body["id"].as_str().expect("id missing").to_string()
}

/// Seed a catalog recipe directly in the store (the API only creates
/// user-sourced recipes).
pub async fn seed_catalog_recipe(
    pool: &SqlitePool,
    title: &str,
    ingredients: &[&str],
    difficulty: Difficulty,
) -> String {
    let input = CreateRecipeInput {
        title: title.to_string(),
        description: "A catalog recipe".to_string(),
        cooking_time_minutes: 30,
        servings: 4,
        difficulty,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: vec!["prep".to_string(), "cook".to_string()],
        cuisines: vec!["italian".to_string()],
        tags: vec!["dinner".to_string()],
        dietary_restrictions: vec![],
        image_url: None,
        calories: None,
        protein: None,
        carbs: None,
        fat: None,
    };

    plateful_recipe::store::create_recipe(pool, None, RecipeSource::Ai, &input)
        .await
        .expect("failed to seed catalog recipe")
        .id
}
