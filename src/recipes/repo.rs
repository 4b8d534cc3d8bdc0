use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::repo_types::{NewRecipe, Recipe, RecipeOwnerRow, RecipeWithOwner};

const SELECT_WITH_OWNER: &str = r#"
    SELECT r.id, r.title, r.instructions, r.minutes_to_complete, r.user_id, r.created_at,
           u.username      AS owner_username,
           u.password_hash AS owner_password_hash,
           u.bio           AS owner_bio,
           u.image_url     AS owner_image_url,
           u.created_at    AS owner_created_at
      FROM recipes r
      JOIN users u ON u.id = r.user_id
"#;

pub async fn insert_recipe_tx(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewRecipe,
) -> Result<Recipe, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (id, title, instructions, minutes_to_complete, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, instructions, minutes_to_complete, user_id, created_at
        "#,
    )
    .bind(new.id)
    .bind(&new.title)
    .bind(&new.instructions)
    .bind(new.minutes_to_complete)
    .bind(new.user_id)
    .fetch_one(&mut **tx)
    .await
}

pub async fn get_with_owner_tx(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: Uuid,
) -> Result<RecipeWithOwner, sqlx::Error> {
    let row = sqlx::query_as::<_, RecipeOwnerRow>(&format!("{SELECT_WITH_OWNER} WHERE r.id = $1"))
        .bind(recipe_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(row.into())
}

/// All recipes with their owners. Ordered only so repeated reads line up.
pub async fn list_with_owner(db: &PgPool) -> Result<Vec<RecipeWithOwner>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RecipeOwnerRow>(&format!(
        "{SELECT_WITH_OWNER} ORDER BY r.created_at ASC, r.id ASC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn delete_all_tx(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM recipes").execute(&mut **tx).await?;
    Ok(done.rows_affected())
}
