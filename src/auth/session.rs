//! Server-side sessions.
//!
//! The cookie only carries an opaque session id, signed with the app key so a
//! forged or edited cookie is dropped before it reaches the session table.
//! The table itself lives in process memory and maps session ids to user ids.

use std::{collections::HashMap, convert::Infallible, sync::Arc};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: Uuid,
    expires_at: OffsetDateTime,
}

impl SessionEntry {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

/// Process-wide session table.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Binds a fresh session id to `user_id`. Expired entries are swept here.
    pub async fn insert(&self, user_id: Uuid) -> Uuid {
        let now = OffsetDateTime::now_utc();
        let id = Uuid::new_v4();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| !e.is_expired(now));
        entries.insert(
            id,
            SessionEntry {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Uuid> {
        let now = OffsetDateTime::now_utc();
        let entry = self.entries.read().await.get(&id).copied()?;
        if entry.is_expired(now) {
            self.entries.write().await.remove(&id);
            return None;
        }
        Some(entry.user_id)
    }

    pub async fn remove(&self, id: Uuid) -> Option<Uuid> {
        self.entries.write().await.remove(&id).map(|e| e.user_id)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Per-request session context, resolved once from the signed cookie.
pub struct Session {
    jar: SignedCookieJar,
    store: SessionStore,
    secure: bool,
    id: Option<Uuid>,
    user_id: Option<Uuid>,
}

impl Session {
    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Binds this client to `user_id` under a new session id and returns the
    /// jar carrying the cookie. Any previous binding is dropped.
    pub async fn establish(self, user_id: Uuid) -> SignedCookieJar {
        if let Some(old) = self.id {
            self.store.remove(old).await;
        }
        let id = self.store.insert(user_id).await;
        debug!(%user_id, "session established");

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.store.ttl());
        self.jar.add(cookie)
    }

    /// Logs out. Without a live binding this is `Unauthorized`.
    pub async fn clear(self) -> Result<SignedCookieJar, ApiError> {
        let (Some(id), Some(user_id)) = (self.id, self.user_id) else {
            return Err(ApiError::unauthorized());
        };
        self.store.remove(id).await;
        debug!(%user_id, "session cleared");
        Ok(self.jar.remove(Cookie::build(SESSION_COOKIE).path("/")))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_request_parts(parts, state).await?;
        let id = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok());
        let user_id = match id {
            Some(id) => state.sessions.get(id).await,
            None => None,
        };
        Ok(Session {
            jar,
            store: state.sessions.clone(),
            secure: state.config.session.cookie_secure,
            id,
            user_id,
        })
    }
}

/// The logged-in user's id; rejects with 401 when there is no binding.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match Session::from_request_parts(parts, state).await {
            Ok(s) => s,
            Err(never) => match never {},
        };
        session
            .user_id()
            .map(AuthUser)
            .ok_or_else(ApiError::unauthorized)
    }
}
