//! Store-level tests against an in-memory SQLite database.

use plateful_recipe::{
    store, CreateRecipeInput, LogCookInput, RateRecipeInput, RecipeError, RecipeFilter,
    UpdateCookInput, UpdateRecipeInput,
};
use plateful_shared::{Difficulty, RecipeSource};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

async fn seed_user(pool: &SqlitePool, id: &str) {
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, name, created_at) VALUES (?1, ?2, 'hash', '', 0)",
    )
    .bind(id)
    .bind(format!("{id}@example.com"))
    .execute(pool)
    .await
    .expect("failed to seed user");
}

fn recipe_input(title: &str, difficulty: Difficulty) -> CreateRecipeInput {
    CreateRecipeInput {
        title: title.to_string(),
        description: "A test recipe".to_string(),
        cooking_time_minutes: 30,
        servings: 4,
        difficulty,
        ingredients: vec!["rice".to_string(), "beans".to_string()],
        instructions: vec!["cook".to_string()],
        cuisines: vec!["Mexican".to_string()],
        tags: vec!["dinner".to_string()],
        dietary_restrictions: vec![],
        image_url: None,
        calories: None,
        protein: None,
        carbs: None,
        fat: None,
    }
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    let created = store::create_recipe(
        &pool,
        Some("alice"),
        RecipeSource::User,
        &recipe_input("Rice bowl", Difficulty::Easy),
    )
    .await
    .unwrap();

    let fetched = store::get_recipe(&pool, &created.id).await.unwrap();
    assert_eq!(fetched.title, "Rice bowl");
    assert_eq!(fetched.user_id.as_deref(), Some("alice"));
    assert_eq!(fetched.difficulty(), Difficulty::Easy);
    assert_eq!(fetched.source(), RecipeSource::User);
    assert_eq!(fetched.ingredient_list(), vec!["rice", "beans"]);
    assert_eq!(fetched.rating_count, 0);
}

#[tokio::test]
async fn get_missing_recipe_is_not_found() {
    let pool = setup_pool().await;
    let err = store::get_recipe(&pool, "nope").await.unwrap_err();
    assert!(matches!(err, RecipeError::NotFound));
}

#[tokio::test]
async fn list_filters_by_source_and_difficulty() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    store::create_recipe(
        &pool,
        Some("alice"),
        RecipeSource::User,
        &recipe_input("User easy", Difficulty::Easy),
    )
    .await
    .unwrap();
    store::create_recipe(
        &pool,
        None,
        RecipeSource::Ai,
        &recipe_input("Catalog hard", Difficulty::Hard),
    )
    .await
    .unwrap();

    let (ai_only, total) = store::list_recipes(
        &pool,
        &RecipeFilter {
            source: Some(RecipeSource::Ai),
            page: 1,
            per_page: 20,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(ai_only[0].title, "Catalog hard");

    let (hard_only, _) = store::list_recipes(
        &pool,
        &RecipeFilter {
            difficulty: Some(Difficulty::Hard),
            page: 1,
            per_page: 20,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hard_only.len(), 1);
    assert_eq!(hard_only[0].title, "Catalog hard");
}

#[tokio::test]
async fn list_supports_title_search_and_cuisine_filter() {
    let pool = setup_pool().await;

    store::create_recipe(
        &pool,
        None,
        RecipeSource::Ai,
        &recipe_input("Spicy Tacos", Difficulty::Easy),
    )
    .await
    .unwrap();
    let mut pasta = recipe_input("Pasta Carbonara", Difficulty::Medium);
    pasta.cuisines = vec!["Italian".to_string()];
    store::create_recipe(&pool, None, RecipeSource::Ai, &pasta)
        .await
        .unwrap();

    let (found, total) = store::list_recipes(
        &pool,
        &RecipeFilter {
            search: Some("TACO".to_string()),
            page: 1,
            per_page: 20,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Spicy Tacos");

    let (italian, _) = store::list_recipes(
        &pool,
        &RecipeFilter {
            cuisine: Some("italian".to_string()),
            page: 1,
            per_page: 20,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(italian.len(), 1);
    assert_eq!(italian[0].title, "Pasta Carbonara");
}

#[tokio::test]
async fn pagination_windows_the_listing() {
    let pool = setup_pool().await;

    for i in 0..5 {
        store::create_recipe(
            &pool,
            None,
            RecipeSource::Ai,
            &recipe_input(&format!("Recipe {i}"), Difficulty::Easy),
        )
        .await
        .unwrap();
    }

    let (page_one, total) = store::list_recipes(
        &pool,
        &RecipeFilter {
            page: 1,
            per_page: 2,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(total, 5);
    assert_eq!(page_one.len(), 2);

    let (page_three, _) = store::list_recipes(
        &pool,
        &RecipeFilter {
            page: 3,
            per_page: 2,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page_three.len(), 1);
}

#[tokio::test]
async fn update_requires_ownership() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;
    seed_user(&pool, "bob").await;

    let recipe = store::create_recipe(
        &pool,
        Some("alice"),
        RecipeSource::User,
        &recipe_input("Alice's dish", Difficulty::Easy),
    )
    .await
    .unwrap();

    let update = UpdateRecipeInput {
        title: Some("Bob's dish".to_string()),
        ..Default::default()
    };
    let err = store::update_recipe(&pool, &recipe.id, "bob", &update)
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::PermissionDenied));

    let updated = store::update_recipe(&pool, &recipe.id, "alice", &update)
        .await
        .unwrap();
    assert_eq!(updated.title, "Bob's dish");
    assert!(updated.updated_at.is_some());
    // Untouched fields keep their values
    assert_eq!(updated.servings, 4);
}

#[tokio::test]
async fn rating_upsert_refreshes_aggregates() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;
    seed_user(&pool, "bob").await;

    let recipe = store::create_recipe(
        &pool,
        None,
        RecipeSource::Ai,
        &recipe_input("Rated dish", Difficulty::Easy),
    )
    .await
    .unwrap();

    store::rate_recipe(
        &pool,
        &recipe.id,
        "alice",
        &RateRecipeInput {
            rating: 4.0,
            comment: Some("good".to_string()),
        },
    )
    .await
    .unwrap();
    store::rate_recipe(
        &pool,
        &recipe.id,
        "bob",
        &RateRecipeInput {
            rating: 5.0,
            comment: None,
        },
    )
    .await
    .unwrap();

    let rated = store::get_recipe(&pool, &recipe.id).await.unwrap();
    assert_eq!(rated.rating_count, 2);
    assert!((rated.average_rating - 4.5).abs() < 1e-9);
    assert!(rated.popularity_score > 0.0);

    // Re-rating replaces instead of appending
    store::rate_recipe(
        &pool,
        &recipe.id,
        "alice",
        &RateRecipeInput {
            rating: 2.0,
            comment: None,
        },
    )
    .await
    .unwrap();

    let rerated = store::get_recipe(&pool, &recipe.id).await.unwrap();
    assert_eq!(rerated.rating_count, 2);
    assert!((rerated.average_rating - 3.5).abs() < 1e-9);

    let ratings = store::list_ratings(&pool, &recipe.id).await.unwrap();
    assert_eq!(ratings.len(), 2);
}

#[tokio::test]
async fn rating_a_missing_recipe_is_not_found() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    let err = store::rate_recipe(
        &pool,
        "missing",
        "alice",
        &RateRecipeInput {
            rating: 3.0,
            comment: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound));
}

#[tokio::test]
async fn favorites_attach_is_idempotent() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    let recipe = store::create_recipe(
        &pool,
        None,
        RecipeSource::Ai,
        &recipe_input("Favorite dish", Difficulty::Easy),
    )
    .await
    .unwrap();

    store::add_favorite(&pool, "alice", &recipe.id).await.unwrap();
    store::add_favorite(&pool, "alice", &recipe.id).await.unwrap();

    let (favorites, total) = store::list_favorites(&pool, "alice", 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(favorites[0].id, recipe.id);

    store::remove_favorite(&pool, "alice", &recipe.id)
        .await
        .unwrap();
    let (favorites, total) = store::list_favorites(&pool, "alice", 1, 20).await.unwrap();
    assert_eq!(total, 0);
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn favoriting_a_missing_recipe_is_not_found() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    let err = store::add_favorite(&pool, "alice", "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NotFound));
}

#[tokio::test]
async fn cooking_history_crud_with_ownership() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;
    seed_user(&pool, "bob").await;

    let recipe = store::create_recipe(
        &pool,
        None,
        RecipeSource::Ai,
        &recipe_input("Cooked dish", Difficulty::Easy),
    )
    .await
    .unwrap();

    let entry = store::log_cook(
        &pool,
        "alice",
        &LogCookInput {
            recipe_id: recipe.id.clone(),
            rating: 4.0,
            notes: Some("came out great".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(entry.recipe_title, "Cooked dish");

    let entries = store::list_history(&pool, "alice").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(store::list_history(&pool, "bob").await.unwrap().is_empty());

    let err = store::update_cook(
        &pool,
        &entry.id,
        "bob",
        &UpdateCookInput {
            rating: 1.0,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RecipeError::PermissionDenied));

    let updated = store::update_cook(
        &pool,
        &entry.id,
        "alice",
        &UpdateCookInput {
            rating: 5.0,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert!((updated.rating - 5.0).abs() < 1e-9);

    let err = store::delete_cook(&pool, &entry.id, "bob").await.unwrap_err();
    assert!(matches!(err, RecipeError::PermissionDenied));

    store::delete_cook(&pool, &entry.id, "alice").await.unwrap();
    assert!(store::list_history(&pool, "alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_recipe_cascades_to_ratings_and_favorites() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice").await;

    let recipe = store::create_recipe(
        &pool,
        Some("alice"),
        RecipeSource::User,
        &recipe_input("Short-lived", Difficulty::Easy),
    )
    .await
    .unwrap();

    store::rate_recipe(
        &pool,
        &recipe.id,
        "alice",
        &RateRecipeInput {
            rating: 4.0,
            comment: None,
        },
    )
    .await
    .unwrap();
    store::add_favorite(&pool, "alice", &recipe.id).await.unwrap();

    store::delete_recipe(&pool, &recipe.id, "alice").await.unwrap();

    let err = store::get_recipe(&pool, &recipe.id).await.unwrap_err();
    assert!(matches!(err, RecipeError::NotFound));

    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ratings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphaned, 0);
    let (favorites, _) = store::list_favorites(&pool, "alice", 1, 20).await.unwrap();
    assert!(favorites.is_empty());
}
