use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const USERNAME_TAKEN: &str = "Username must be unique.";
pub const RECIPE_NOT_CREATED: &str = "Failed to create recipe.";

/// Every failure a handler can answer with. The `IntoResponse` impl below is
/// the only place where these become status codes and bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("username already taken")]
    UsernameTaken,

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("recipe could not be stored")]
    RecipeNotCreated,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors })))
                    .into_response()
            }
            ApiError::UsernameTaken => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": [USERNAME_TAKEN] })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
            }
            ApiError::RecipeNotCreated => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": [RECIPE_NOT_CREATED] })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
