use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::{
        self,
        repo_types::{NewUser, User},
    },
    config::AppConfig,
    recipes::{
        self,
        repo_types::{NewRecipe, RecipeWithOwner},
    },
};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("foreign key constraint violated")]
    ForeignKeyViolation,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation;
            }
        }
        StoreError::Other(e.into())
    }
}

/// Durable create/read surface for users and recipes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `UniqueViolation` when the username exists; nothing is
    /// written in that case.
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list_recipes(&self) -> anyhow::Result<Vec<RecipeWithOwner>>;
    /// Atomic: either the recipe row exists afterwards or nothing changed.
    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeWithOwner, StoreError>;
}

#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }

    /// Removes every recipe and user in one transaction.
    pub async fn clear_all(&self) -> anyhow::Result<(u64, u64)> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let recipes = recipes::repo::delete_all_tx(&mut tx)
            .await
            .context("delete recipes")?;
        let users = auth::repo::delete_all_tx(&mut tx)
            .await
            .context("delete users")?;
        tx.commit().await.context("commit tx")?;
        Ok((recipes, users))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tx = self.db.begin().await?;
        match auth::repo::insert_user_tx(&mut tx, &new).await {
            Ok(user) => {
                tx.commit().await?;
                Ok(user)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        auth::repo::find_by_username(&self.db, username)
            .await
            .context("find user by username")
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        auth::repo::find_by_id(&self.db, id)
            .await
            .context("find user by id")
    }

    async fn list_recipes(&self) -> anyhow::Result<Vec<RecipeWithOwner>> {
        recipes::repo::list_with_owner(&self.db)
            .await
            .context("list recipes")
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeWithOwner, StoreError> {
        let mut tx = self.db.begin().await?;
        let created = async {
            let recipe = recipes::repo::insert_recipe_tx(&mut tx, &new).await?;
            recipes::repo::get_with_owner_tx(&mut tx, recipe.id).await
        }
        .await;
        match created {
            Ok(row) => {
                tx.commit().await?;
                Ok(row)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }
}
