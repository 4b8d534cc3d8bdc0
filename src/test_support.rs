//! In-process HTTP client for handler tests.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Request, StatusCode,
    },
    response::IntoResponse,
    Router,
};
use axum_extra::extract::{cookie::Cookie, SignedCookieJar};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{app::build_app, auth::session::SESSION_COOKIE, state::AppState};

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// `name=value` of a session cookie set by the response, if any.
    pub cookie: Option<String>,
}

#[derive(Clone)]
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(state: AppState) -> Self {
        Self {
            app: build_app(state),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        send(self, "GET", path, None, None).await
    }

    pub async fn get_with(&self, path: &str, cookie: &str) -> TestResponse {
        send(self, "GET", path, Some(cookie), None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        send(self, "POST", path, None, Some(body.to_string())).await
    }

    pub async fn post_with(&self, path: &str, cookie: &str, body: Value) -> TestResponse {
        send(self, "POST", path, Some(cookie), Some(body.to_string())).await
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        send(self, "DELETE", path, cookie, None).await
    }
}

pub async fn send(
    client: &TestClient,
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: Option<String>,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        req = req.header(COOKIE, cookie);
    }
    let req = match body {
        Some(b) => req.header(CONTENT_TYPE, "application/json").body(Body::from(b)),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let res = client.app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let cookie = session_cookie(res.headers());
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        body,
        cookie,
    }
}

/// Binds a session to `user_id` directly in the table, skipping the user
/// lookup that signup and login do, and returns the signed cookie for it.
pub async fn session_cookie_for(state: &AppState, user_id: Uuid) -> String {
    let sid = state.sessions.insert(user_id).await;
    let jar = SignedCookieJar::new(state.cookie_key.clone())
        .add(Cookie::new(SESSION_COOKIE, sid.to_string()));
    session_cookie(jar.into_response().headers()).unwrap()
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{SESSION_COOKIE}=");
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|kv| kv.starts_with(&prefix) && kv.len() > prefix.len())
        .map(str::to_string)
}
