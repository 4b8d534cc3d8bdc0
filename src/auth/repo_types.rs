use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::password;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>, // Argon2 PHC string, never exposed
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// True iff `plain` matches the stored hash. A user without a hash never
    /// authenticates.
    pub fn authenticate(&self, plain: &str) -> bool {
        password::verify_password(plain, self.password_hash.as_deref())
    }
}

/// Fields needed to insert a user; the id is generated here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl NewUser {
    pub fn new(username: String, bio: Option<String>, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash: None,
            bio,
            image_url,
        }
    }

    /// Hashes `plain` with a fresh salt, replacing any previous hash.
    pub fn set_password(&mut self, plain: &str) -> anyhow::Result<()> {
        self.password_hash = Some(password::hash_password(plain)?);
        Ok(())
    }
}
