use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::SignedCookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        password,
        repo_types::NewUser,
        session::Session,
        validate::validate_signup,
    },
    db::StoreError,
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", delete(logout))
        .route("/check_session", get(check_session))
}

#[instrument(skip(state, session, payload))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, SignedCookieJar, Json<PublicUser>), ApiError> {
    let valid = validate_signup(payload).map_err(|errors| {
        warn!(?errors, "signup rejected");
        ApiError::Validation(errors)
    })?;

    let new = tokio::task::spawn_blocking(move || -> anyhow::Result<NewUser> {
        let mut new = NewUser::new(valid.username, valid.bio, valid.image_url);
        new.set_password(&valid.password)?;
        Ok(new)
    })
    .await
    .context("hash password task")??;

    let user = match state.store.create_user(new).await {
        Ok(u) => u,
        Err(StoreError::UniqueViolation) => {
            warn!("username already taken");
            return Err(ApiError::UsernameTaken);
        }
        Err(e) => return Err(ApiError::Internal(e.into())),
    };

    let jar = session.establish(user.id).await;
    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(SignedCookieJar, Json<PublicUser>), ApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        warn!("login with missing fields");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    };

    let found = state.store.find_user_by_username(&username).await?;
    let (found, ok) = tokio::task::spawn_blocking(move || {
        let ok = match &found {
            Some(u) => u.authenticate(&password),
            None => password::verify_unknown_user(&password),
        };
        (found, ok)
    })
    .await
    .context("verify password task")?;

    let user = match found {
        Some(u) if ok => u,
        Some(u) => {
            warn!(user_id = %u.id, "login invalid password");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
        }
        None => {
            warn!("login unknown username");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
        }
    };

    let jar = session.establish(user.id).await;
    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((jar, Json(user.into())))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<(StatusCode, SignedCookieJar), ApiError> {
    let jar = session.clear().await?;
    info!("user logged out");
    Ok((StatusCode::NO_CONTENT, jar))
}

#[instrument(skip(state, session))]
pub async fn check_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PublicUser>, ApiError> {
    let user_id = session.user_id().ok_or_else(ApiError::unauthorized)?;
    match state.store.find_user_by_id(user_id).await? {
        Some(user) => Ok(Json(user.into())),
        None => {
            warn!(%user_id, "session bound to missing user");
            Err(ApiError::Unauthorized("User not found"))
        }
    }
}
