//! Session cookie handling and the request-context extractor.
//!
//! The session cookie carries an opaque token; the store maps it to a user.
//! Cookie format: `sessionid=<token>; HttpOnly; SameSite=Lax; Path=/; Max-Age=<secs>`

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::error::AppError;
use super::AppState;
use crate::entity::Session;
use crate::policy::Actor;
use crate::service::RequestContext;

pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// `Set-Cookie` value that stores the session token
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE_NAME,
        token,
        Session::MAX_AGE_SECS
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE_NAME
    )
}

/// Pull the session token out of a `Cookie` header value
pub fn extract_session_token(cookie_header: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let trimmed = part.trim();
        if let Some(value) = trimmed.strip_prefix(&format!("{}=", SESSION_COOKIE_NAME)) {
            let token = value.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Session token sent with the request, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(extract_session_token)
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let actor = match session_token(&parts.headers) {
            Some(token) => {
                let store = state.notes.store().lock().await;
                Actor::from(store.session_user(&token)?)
            }
            None => Actor::Anonymous,
        };

        Ok(RequestContext::new(actor, path))
    }
}
