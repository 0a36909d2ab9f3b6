//! URL paths and redirect helpers.

use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Response};

pub const HOME_PATH: &str = "/";
pub const LIST_PATH: &str = "/notes/";
pub const ADD_PATH: &str = "/add/";
pub const SUCCESS_PATH: &str = "/done/";
pub const LOGIN_PATH: &str = "/auth/login/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const SIGNUP_PATH: &str = "/auth/signup/";

/// `302 Found` pointing at `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Login page URL that returns to `next` afterwards.
///
/// `next` is percent-encoded, slashes are kept readable.
pub fn login_redirect(next: &str) -> String {
    let encoded = urlencoding::encode(next).replace("%2F", "/");
    format!("{}?next={}", LOGIN_PATH, encoded)
}

/// Where to go after logging in. Only local absolute paths are followed.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => HOME_PATH,
    }
}

/// A path on this site that is also a valid `Location` value.
///
/// Browsers read `/\host` like `//host`, so backslashes are refused along
/// with control characters.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c == '\\' || c.is_control())
}
