use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// Insert a user inside the caller's transaction.
pub async fn insert_user_tx(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewUser,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, bio, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, password_hash, bio, image_url, created_at
        "#,
    )
    .bind(new.id)
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.bio)
    .bind(&new.image_url)
    .fetch_one(&mut **tx)
    .await
}

/// Find a user by username.
pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, bio, image_url, created_at
          FROM users
         WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

/// Find a user by id.
pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, bio, image_url, created_at
          FROM users
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_all_tx(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let done = sqlx::query("DELETE FROM users").execute(&mut **tx).await?;
    Ok(done.rows_affected())
}
