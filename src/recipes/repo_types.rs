use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Insert payload. `user_id` is always the session's user.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct RecipeWithOwner {
    pub recipe: Recipe,
    pub owner: User,
}

/// Flat row of `recipes JOIN users`.
#[derive(Debug, FromRow)]
pub struct RecipeOwnerRow {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub owner_username: String,
    pub owner_password_hash: Option<String>,
    pub owner_bio: Option<String>,
    pub owner_image_url: Option<String>,
    pub owner_created_at: OffsetDateTime,
}

impl From<RecipeOwnerRow> for RecipeWithOwner {
    fn from(r: RecipeOwnerRow) -> Self {
        Self {
            owner: User {
                id: r.user_id,
                username: r.owner_username,
                password_hash: r.owner_password_hash,
                bio: r.owner_bio,
                image_url: r.owner_image_url,
                created_at: r.owner_created_at,
            },
            recipe: Recipe {
                id: r.id,
                title: r.title,
                instructions: r.instructions,
                minutes_to_complete: r.minutes_to_complete,
                user_id: r.user_id,
                created_at: r.created_at,
            },
        }
    }
}
