use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::RecipeWithOwner;
use crate::auth::dto::PublicUser;

/// No `user_id`: the owner comes from the session and unknown fields are
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user: PublicUser,
}

impl From<RecipeWithOwner> for RecipeResponse {
    fn from(r: RecipeWithOwner) -> Self {
        Self {
            id: r.recipe.id,
            title: r.recipe.title,
            instructions: r.recipe.instructions,
            minutes_to_complete: r.recipe.minutes_to_complete,
            user: r.owner.into(),
        }
    }
}
