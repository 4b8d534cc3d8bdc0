use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::{
    auth::repo_types::{NewUser, User},
    recipes::repo_types::{NewRecipe, Recipe, RecipeWithOwner},
};

/// In-process `Store` with the same constraint behaviour as the Postgres
/// schema. One lock covers both tables so every write is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    recipes: Vec<Recipe>,
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    pub async fn recipes_by(&self, user_id: Uuid) -> Vec<Recipe> {
        self.tables
            .lock()
            .await
            .recipes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.username == new.username) {
            return Err(StoreError::UniqueViolation);
        }
        let user = User {
            id: new.id,
            username: new.username,
            password_hash: new.password_hash,
            bio: new.bio,
            image_url: new.image_url,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_recipes(&self) -> anyhow::Result<Vec<RecipeWithOwner>> {
        let t = self.tables.lock().await;
        let rows = t
            .recipes
            .iter()
            .filter_map(|r| {
                let owner = t.users.iter().find(|u| u.id == r.user_id)?;
                Some(RecipeWithOwner {
                    recipe: r.clone(),
                    owner: owner.clone(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<RecipeWithOwner, StoreError> {
        let mut t = self.tables.lock().await;
        let owner = t
            .users
            .iter()
            .find(|u| u.id == new.user_id)
            .cloned()
            .ok_or(StoreError::ForeignKeyViolation)?;
        let recipe = Recipe {
            id: new.id,
            title: new.title,
            instructions: new.instructions,
            minutes_to_complete: new.minutes_to_complete,
            user_id: new.user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.recipes.push(recipe.clone());
        Ok(RecipeWithOwner { recipe, owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_username_is_rejected_without_a_second_row() {
        let store = MemoryStore::default();
        store
            .create_user(NewUser::new("sam".into(), None, None))
            .await
            .unwrap();
        let err = store
            .create_user(NewUser::new("sam".into(), None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn recipe_for_unknown_user_is_rejected() {
        let store = MemoryStore::default();
        let err = store
            .create_recipe(NewRecipe {
                id: Uuid::new_v4(),
                title: "t".into(),
                instructions: "i".repeat(50),
                minutes_to_complete: None,
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation));
        assert!(store.list_recipes().await.unwrap().is_empty());
    }
}
