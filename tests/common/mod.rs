//! Shared helpers for router-level tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt; // for `oneshot`

use ya_note::config::ServerConfig;
use ya_note::entity::{Note, User};
use ya_note::storage::{NewNote, SqliteStore};
use ya_note::web::{create_router, AppState};

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = SqliteStore::open_in_memory().unwrap();
        let state = AppState::new(store, ServerConfig::for_tests());
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    pub async fn create_user(&self, username: &str) -> User {
        let hash = bcrypt::hash(PASSWORD, 4).unwrap(); // cost 4 for fast tests
        self.state
            .notes
            .store()
            .lock()
            .await
            .create_user(username, &hash)
            .unwrap()
    }

    /// Start a session for `user` without going through the login form.
    /// Returns the `Cookie` header value.
    pub async fn force_login(&self, user: &User) -> String {
        let session = self
            .state
            .notes
            .store()
            .lock()
            .await
            .create_session(user.id)
            .unwrap();
        format!("sessionid={}", session.token)
    }

    pub async fn create_note(&self, author: &User, title: &str, slug: Option<&str>) -> Note {
        self.state
            .notes
            .store()
            .lock()
            .await
            .create_note(
                author.id,
                NewNote {
                    title: title.to_string(),
                    text: "Текст".to_string(),
                    slug: slug.map(str::to_string),
                },
            )
            .unwrap()
    }

    pub async fn note(&self, slug: &str) -> Option<Note> {
        self.state.notes.store().lock().await.get_note(slug).unwrap()
    }

    pub async fn note_count(&self) -> usize {
        self.state.notes.store().lock().await.count_notes().unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = builder.body(Body::empty()).unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> Response {
        let body = encode_form(fields);
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let req = builder.body(Body::from(body)).unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("response has no Location header")
        .to_str()
        .unwrap()
}

/// Assert a `302 Found` to `expected`
pub fn assert_redirects(resp: &Response, expected: &str) {
    assert_eq!(resp.status(), StatusCode::FOUND, "expected a redirect");
    assert_eq!(location(resp), expected);
}
