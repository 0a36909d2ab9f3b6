//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::paths::{
    ADD_PATH, HOME_PATH, LIST_PATH, LOGIN_PATH, LOGOUT_PATH, SIGNUP_PATH, SUCCESS_PATH,
};
use super::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Notes
        .route(HOME_PATH, get(handlers::home))
        .route(LIST_PATH, get(handlers::list_notes))
        .route(ADD_PATH, get(handlers::add_form).post(handlers::add_note))
        .route("/note/{slug}/", get(handlers::note_detail))
        .route(
            "/edit/{slug}/",
            get(handlers::edit_form).post(handlers::edit_note),
        )
        .route(
            "/delete/{slug}/",
            get(handlers::delete_form).post(handlers::delete_note),
        )
        .route(SUCCESS_PATH, get(handlers::success))
        // Accounts
        .route(LOGIN_PATH, get(handlers::login_form).post(handlers::login))
        .route(LOGOUT_PATH, post(handlers::logout))
        .route(SIGNUP_PATH, get(handlers::signup_form).post(handlers::signup))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
