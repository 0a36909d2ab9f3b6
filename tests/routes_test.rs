//! Which pages answer whom.

mod common;

use axum::http::StatusCode;
use common::{assert_redirects, TestApp};

const NOTE_SLUG: &str = "note-slug";

struct Fixture {
    app: TestApp,
    author_cookie: String,
    not_author_cookie: String,
}

async fn fixture() -> Fixture {
    let app = TestApp::new();
    let author = app.create_user("Автор").await;
    let not_author = app.create_user("Читатель").await;
    app.create_note(&author, "Заголовок", Some(NOTE_SLUG)).await;

    let author_cookie = app.force_login(&author).await;
    let not_author_cookie = app.force_login(&not_author).await;
    Fixture {
        app,
        author_cookie,
        not_author_cookie,
    }
}

fn note_url(prefix: &str) -> String {
    format!("/{}/{}/", prefix, NOTE_SLUG)
}

#[tokio::test]
async fn test_pages_availability_for_anonymous_user() {
    let app = TestApp::new();

    for url in ["/", "/auth/login/", "/auth/signup/"] {
        let resp = app.get(url, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", url);
    }

    let resp = app.post_form("/auth/logout/", None, &[]).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pages_availability_for_auth_user() {
    let f = fixture().await;

    for url in ["/notes/", "/add/", "/done/"] {
        let resp = f.app.get(url, Some(f.not_author_cookie.as_str())).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", url);
    }
}

#[tokio::test]
async fn test_note_exists() {
    let f = fixture().await;
    assert_eq!(f.app.note_count().await, 1);
    assert_eq!(f.app.note(NOTE_SLUG).await.unwrap().title, "Заголовок");
}

#[tokio::test]
async fn test_empty_db() {
    let app = TestApp::new();
    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn test_pages_availability_for_author() {
    let f = fixture().await;

    for prefix in ["note", "edit", "delete"] {
        let url = note_url(prefix);
        let resp = f.app.get(&url, Some(f.author_cookie.as_str())).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", url);
    }
}

#[tokio::test]
async fn test_pages_availability_for_different_users() {
    let f = fixture().await;
    let cases = [
        (&f.not_author_cookie, StatusCode::NOT_FOUND),
        (&f.author_cookie, StatusCode::OK),
    ];

    for (cookie, expected) in cases {
        for prefix in ["note", "edit", "delete"] {
            let url = note_url(prefix);
            let resp = f.app.get(&url, Some(cookie.as_str())).await;
            assert_eq!(resp.status(), expected, "GET {}", url);
        }
    }
}

#[tokio::test]
async fn test_redirects() {
    let f = fixture().await;
    let urls = [
        note_url("note"),
        note_url("edit"),
        note_url("delete"),
        "/add/".to_string(),
        "/done/".to_string(),
        "/notes/".to_string(),
    ];

    for url in urls {
        let resp = f.app.get(&url, None).await;
        assert_redirects(&resp, &format!("/auth/login/?next={}", url));
    }
}

#[tokio::test]
async fn test_anonymous_redirect_for_missing_note() {
    let app = TestApp::new();
    let resp = app.get("/note/does-not-exist/", None).await;
    assert_redirects(&resp, "/auth/login/?next=/note/does-not-exist/");
}

#[tokio::test]
async fn test_logout_requires_post() {
    let app = TestApp::new();
    let resp = app.get("/auth/logout/", None).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new();
    let resp = app.get("/no/such/page/", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_session_is_anonymous() {
    let app = TestApp::new();
    let resp = app.get("/notes/", Some("sessionid=unknown-token")).await;
    assert_redirects(&resp, "/auth/login/?next=/notes/");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&common::body_text(resp).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}
