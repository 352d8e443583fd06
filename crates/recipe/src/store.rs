//! All SQL for the recipe domain. Functions take the pool (or a transaction
//! where aggregates must stay consistent) and return domain errors.

use plateful_shared::{Difficulty, RecipeSource};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::error::{RecipeError, RecipeResult};
use crate::input::{
    CreateRecipeInput, LogCookInput, RateRecipeInput, UpdateCookInput, UpdateRecipeInput,
};
use crate::read_model::{CookingHistoryEntry, Recipe, RecipeRating};

fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

fn encode_list(values: &[String]) -> RecipeResult<String> {
    Ok(serde_json::to_string(values)?)
}

/// Listing filters; everything is optional except the page window.
#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    pub source: Option<RecipeSource>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub search: Option<String>,
    pub user_id: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl RecipeFilter {
    pub fn page_window(&self) -> (i64, i64) {
        let per_page = self.per_page.clamp(1, 100) as i64;
        let page = self.page.max(1) as i64;
        (per_page, (page - 1) * per_page)
    }
}

fn apply_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a RecipeFilter) {
    if let Some(source) = filter.source {
        qb.push(" AND source = ").push_bind(source.to_string());
    }
    if let Some(difficulty) = filter.difficulty {
        qb.push(" AND difficulty = ").push_bind(difficulty.to_string());
    }
    if let Some(cuisine) = &filter.cuisine {
        qb.push(" AND EXISTS (SELECT 1 FROM json_each(recipes.cuisines) WHERE lower(json_each.value) = ")
            .push_bind(cuisine.to_lowercase())
            .push(")");
    }
    if let Some(search) = &filter.search {
        qb.push(" AND lower(title) LIKE ")
            .push_bind(format!("%{}%", search.to_lowercase()));
    }
    if let Some(user_id) = &filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id.as_str());
    }
}

/// Newest-first page of recipes plus the total row count for the filter.
pub async fn list_recipes(
    pool: &SqlitePool,
    filter: &RecipeFilter,
) -> RecipeResult<(Vec<Recipe>, i64)> {
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes WHERE 1 = 1");
    apply_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let (limit, offset) = filter.page_window();
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM recipes WHERE 1 = 1");
    apply_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let recipes = qb.build_query_as::<Recipe>().fetch_all(pool).await?;
    Ok((recipes, total))
}

/// Every recipe from one source, newest first. Feeds the recommender.
pub async fn list_by_source(pool: &SqlitePool, source: RecipeSource) -> RecipeResult<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes WHERE source = ?1 ORDER BY created_at DESC",
    )
    .bind(source.to_string())
    .fetch_all(pool)
    .await?;
    Ok(recipes)
}

/// The full catalog, newest first. Feeds similarity ranking.
pub async fn list_all(pool: &SqlitePool) -> RecipeResult<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(recipes)
}

pub async fn get_recipe(pool: &SqlitePool, id: &str) -> RecipeResult<Recipe> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RecipeError::NotFound)
}

pub async fn create_recipe(
    pool: &SqlitePool,
    owner_id: Option<&str>,
    source: RecipeSource,
    input: &CreateRecipeInput,
) -> RecipeResult<Recipe> {
    input.validate()?;

    let id = Ulid::new().to_string();
    sqlx::query(
        r#"
        INSERT INTO recipes (
            id, user_id, title, description, cooking_time_minutes, servings,
            difficulty, ingredients, instructions, cuisines, tags,
            dietary_restrictions, image_url, source, calories, protein,
            carbs, fat, created_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.cooking_time_minutes as i64)
    .bind(input.servings as i64)
    .bind(input.difficulty.to_string())
    .bind(encode_list(&input.ingredients)?)
    .bind(encode_list(&input.instructions)?)
    .bind(encode_list(&input.cuisines)?)
    .bind(encode_list(&input.tags)?)
    .bind(encode_list(&input.dietary_restrictions)?)
    .bind(&input.image_url)
    .bind(source.to_string())
    .bind(input.calories.map(|c| c as i64))
    .bind(input.protein)
    .bind(input.carbs)
    .bind(input.fat)
    .bind(now())
    .execute(pool)
    .await?;

    get_recipe(pool, &id).await
}

/// Owner-checked partial update; absent fields keep their stored value.
pub async fn update_recipe(
    pool: &SqlitePool,
    id: &str,
    caller_id: &str,
    input: &UpdateRecipeInput,
) -> RecipeResult<Recipe> {
    input.validate()?;

    let current = get_recipe(pool, id).await?;
    if current.user_id.as_deref() != Some(caller_id) {
        return Err(RecipeError::PermissionDenied);
    }

    let ingredients = match &input.ingredients {
        Some(list) => encode_list(list)?,
        None => current.ingredients.clone(),
    };
    let instructions = match &input.instructions {
        Some(list) => encode_list(list)?,
        None => current.instructions.clone(),
    };
    let cuisines = match &input.cuisines {
        Some(list) => encode_list(list)?,
        None => current.cuisines.clone(),
    };
    let tags = match &input.tags {
        Some(list) => encode_list(list)?,
        None => current.tags.clone(),
    };
    let dietary = match &input.dietary_restrictions {
        Some(list) => encode_list(list)?,
        None => current.dietary_restrictions.clone(),
    };

    sqlx::query(
        r#"
        UPDATE recipes SET
            title = ?1, description = ?2, cooking_time_minutes = ?3,
            servings = ?4, difficulty = ?5, ingredients = ?6,
            instructions = ?7, cuisines = ?8, tags = ?9,
            dietary_restrictions = ?10, image_url = ?11, calories = ?12,
            protein = ?13, carbs = ?14, fat = ?15, updated_at = ?16
        WHERE id = ?17
        "#,
    )
    .bind(input.title.as_deref().unwrap_or(&current.title))
    .bind(input.description.as_deref().unwrap_or(&current.description))
    .bind(
        input
            .cooking_time_minutes
            .map(|v| v as i64)
            .unwrap_or(current.cooking_time_minutes),
    )
    .bind(input.servings.map(|v| v as i64).unwrap_or(current.servings))
    .bind(
        input
            .difficulty
            .map(|d| d.to_string())
            .unwrap_or_else(|| current.difficulty.clone()),
    )
    .bind(ingredients)
    .bind(instructions)
    .bind(cuisines)
    .bind(tags)
    .bind(dietary)
    .bind(input.image_url.as_deref().or(current.image_url.as_deref()))
    .bind(
        input
            .calories
            .map(|c| c as i64)
            .or(current.calories),
    )
    .bind(input.protein.or(current.protein))
    .bind(input.carbs.or(current.carbs))
    .bind(input.fat.or(current.fat))
    .bind(now())
    .bind(id)
    .execute(pool)
    .await?;

    get_recipe(pool, id).await
}

pub async fn delete_recipe(pool: &SqlitePool, id: &str, caller_id: &str) -> RecipeResult<()> {
    let current = get_recipe(pool, id).await?;
    if current.user_id.as_deref() != Some(caller_id) {
        return Err(RecipeError::PermissionDenied);
    }

    sqlx::query("DELETE FROM recipes WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// One rating per (recipe, user): inserting again replaces the previous
/// rating. The recipe's aggregates are refreshed in the same transaction.
pub async fn rate_recipe(
    pool: &SqlitePool,
    recipe_id: &str,
    user_id: &str,
    input: &RateRecipeInput,
) -> RecipeResult<RecipeRating> {
    input.validate()?;

    let mut tx = pool.begin().await?;

    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM recipes WHERE id = ?1")
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(RecipeError::NotFound);
    }

    sqlx::query(
        r#"
        INSERT INTO recipe_ratings (id, recipe_id, user_id, rating, comment, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(recipe_id, user_id) DO UPDATE SET
            rating = excluded.rating,
            comment = excluded.comment,
            created_at = excluded.created_at
        "#,
    )
    .bind(Ulid::new().to_string())
    .bind(recipe_id)
    .bind(user_id)
    .bind(input.rating)
    .bind(&input.comment)
    .bind(now())
    .execute(&mut *tx)
    .await?;

    let (average, count): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(AVG(rating), 0.0), COUNT(*) FROM recipe_ratings WHERE recipe_id = ?1",
    )
    .bind(recipe_id)
    .fetch_one(&mut *tx)
    .await?;

    // Popularity saturates towards the star average as ratings accumulate.
    let popularity = average / 5.0 * (count as f64 / (count as f64 + 10.0));

    sqlx::query(
        "UPDATE recipes SET average_rating = ?1, rating_count = ?2, popularity_score = ?3 WHERE id = ?4",
    )
    .bind(average)
    .bind(count)
    .bind(popularity)
    .bind(recipe_id)
    .execute(&mut *tx)
    .await?;

    let rating = sqlx::query_as::<_, RecipeRating>(
        "SELECT * FROM recipe_ratings WHERE recipe_id = ?1 AND user_id = ?2",
    )
    .bind(recipe_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(rating)
}

pub async fn list_ratings(pool: &SqlitePool, recipe_id: &str) -> RecipeResult<Vec<RecipeRating>> {
    get_recipe(pool, recipe_id).await?;

    let ratings = sqlx::query_as::<_, RecipeRating>(
        "SELECT * FROM recipe_ratings WHERE recipe_id = ?1 ORDER BY created_at DESC, id DESC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(ratings)
}

/// Attach a favorite; re-attaching an existing favorite is a no-op.
pub async fn add_favorite(pool: &SqlitePool, user_id: &str, recipe_id: &str) -> RecipeResult<()> {
    get_recipe(pool, recipe_id).await?;

    sqlx::query(
        "INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(user_id)
    .bind(recipe_id)
    .bind(now())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_favorite(
    pool: &SqlitePool,
    user_id: &str,
    recipe_id: &str,
) -> RecipeResult<()> {
    sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND recipe_id = ?2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_favorites(
    pool: &SqlitePool,
    user_id: &str,
    page: u32,
    per_page: u32,
) -> RecipeResult<(Vec<Recipe>, i64)> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let per_page = per_page.clamp(1, 100) as i64;
    let offset = (page.max(1) as i64 - 1) * per_page;
    let recipes = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT r.* FROM recipes r
        JOIN favorites f ON f.recipe_id = r.id
        WHERE f.user_id = ?1
        ORDER BY f.created_at DESC, r.id DESC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(user_id)
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((recipes, total))
}

pub async fn list_history(
    pool: &SqlitePool,
    user_id: &str,
) -> RecipeResult<Vec<CookingHistoryEntry>> {
    let entries = sqlx::query_as::<_, CookingHistoryEntry>(
        r#"
        SELECT h.id, h.user_id, h.recipe_id, r.title AS recipe_title,
               h.rating, h.notes, h.cooked_at
        FROM cooking_history h
        JOIN recipes r ON r.id = h.recipe_id
        WHERE h.user_id = ?1
        ORDER BY h.cooked_at DESC, h.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

async fn get_history_entry(pool: &SqlitePool, id: &str) -> RecipeResult<CookingHistoryEntry> {
    sqlx::query_as::<_, CookingHistoryEntry>(
        r#"
        SELECT h.id, h.user_id, h.recipe_id, r.title AS recipe_title,
               h.rating, h.notes, h.cooked_at
        FROM cooking_history h
        JOIN recipes r ON r.id = h.recipe_id
        WHERE h.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(RecipeError::NotFound)
}

pub async fn log_cook(
    pool: &SqlitePool,
    user_id: &str,
    input: &LogCookInput,
) -> RecipeResult<CookingHistoryEntry> {
    input.validate()?;
    get_recipe(pool, &input.recipe_id).await?;

    let id = Ulid::new().to_string();
    sqlx::query(
        r#"
        INSERT INTO cooking_history (id, user_id, recipe_id, rating, notes, cooked_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(&input.recipe_id)
    .bind(input.rating)
    .bind(&input.notes)
    .bind(now())
    .execute(pool)
    .await?;

    get_history_entry(pool, &id).await
}

pub async fn update_cook(
    pool: &SqlitePool,
    id: &str,
    caller_id: &str,
    input: &UpdateCookInput,
) -> RecipeResult<CookingHistoryEntry> {
    input.validate()?;

    let entry = get_history_entry(pool, id).await?;
    if entry.user_id != caller_id {
        return Err(RecipeError::PermissionDenied);
    }

    sqlx::query("UPDATE cooking_history SET rating = ?1, notes = ?2 WHERE id = ?3")
        .bind(input.rating)
        .bind(&input.notes)
        .bind(id)
        .execute(pool)
        .await?;

    get_history_entry(pool, id).await
}

pub async fn delete_cook(pool: &SqlitePool, id: &str, caller_id: &str) -> RecipeResult<()> {
    let entry = get_history_entry(pool, id).await?;
    if entry.user_id != caller_id {
        return Err(RecipeError::PermissionDenied);
    }

    sqlx::query("DELETE FROM cooking_history WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
