use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::session::AuthUser,
    error::ApiError,
    extract::ApiJson,
    recipes::{
        dto::{CreateRecipeRequest, RecipeResponse},
        repo_types::NewRecipe,
        validate::validate_recipe,
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let rows = state.store.list_recipes().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let valid = validate_recipe(payload).map_err(|errors| {
        warn!(?errors, "recipe rejected");
        ApiError::Validation(errors)
    })?;

    let new = NewRecipe {
        id: Uuid::new_v4(),
        title: valid.title,
        instructions: valid.instructions,
        minutes_to_complete: valid.minutes_to_complete,
        user_id,
    };
    let created = state.store.create_recipe(new).await.map_err(|e| {
        error!(error = %e, "create_recipe failed");
        ApiError::RecipeNotCreated
    })?;

    info!(recipe_id = %created.recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(created.into())))
}
