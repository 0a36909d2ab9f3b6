//! Page handlers.
//!
//! Note handlers hand the request context to [`NoteService`] and turn its
//! result into a page, a redirect, or an [`AppError`].
//!
//! [`NoteService`]: crate::service::NoteService

use axum::extract::{Path, Query, State};
use axum::http::{header::SET_COOKIE, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::AppError;
use super::pages;
use super::paths::{found, safe_next, ADD_PATH, LOGIN_PATH, SUCCESS_PATH};
use super::session::{clear_session_cookie, session_cookie, session_token, SESSION_COOKIE_NAME};
use super::AppState;
use crate::error::NotesError;
use crate::forms::{FormErrors, LoginForm, NoteForm, SignupForm};
use crate::service::{RequestContext, ServiceError};

const BAD_CREDENTIALS: &str = "Пожалуйста, введите правильные имя пользователя и пароль. \
                               Оба поля могут быть чувствительны к регистру.";
const USERNAME_TAKEN: &str = "Пользователь с таким именем уже существует.";

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

// ============================================================================
// Notes
// ============================================================================

pub async fn home(ctx: RequestContext) -> Html<String> {
    pages::home(&ctx.actor)
}

pub async fn list_notes(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let notes = state.notes.list(&ctx).await?;
    Ok(pages::notes_list(&ctx.actor, &notes))
}

pub async fn note_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let note = state.notes.detail(&ctx, &slug).await?;
    Ok(pages::note_detail(&ctx.actor, &note))
}

pub async fn add_form(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    state.notes.create_form(&ctx)?;
    Ok(pages::note_form(
        &ctx.actor,
        "Новая заметка",
        ADD_PATH,
        &NoteForm::default(),
        &FormErrors::new(),
    ))
}

pub async fn add_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    match state.notes.create(&ctx, &form).await {
        Ok(_) => Ok(found(SUCCESS_PATH)),
        Err(ServiceError::Invalid(errors)) => {
            debug!(?errors, "create form rejected");
            Ok(pages::note_form(&ctx.actor, "Новая заметка", ADD_PATH, &form, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let note = state.notes.edit_form(&ctx, &slug).await?;
    let form = NoteForm::new(&note.title, &note.text, &note.slug);
    Ok(pages::note_form(
        &ctx.actor,
        "Редактирование заметки",
        &note.edit_path(),
        &form,
        &FormErrors::new(),
    ))
}

pub async fn edit_note(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: RequestContext,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    match state.notes.update(&ctx, &slug, &form).await {
        Ok(_) => Ok(found(SUCCESS_PATH)),
        Err(ServiceError::Invalid(errors)) => {
            debug!(?errors, "edit form rejected");
            let action = format!("/edit/{}/", slug);
            Ok(
                pages::note_form(&ctx.actor, "Редактирование заметки", &action, &form, &errors)
                    .into_response(),
            )
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let note = state.notes.delete_form(&ctx, &slug).await?;
    Ok(pages::delete_confirm(&ctx.actor, &note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    state.notes.delete(&ctx, &slug).await?;
    Ok(found(SUCCESS_PATH))
}

pub async fn success(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    state.notes.success(&ctx)?;
    Ok(pages::success(&ctx.actor))
}

// ============================================================================
// Accounts
// ============================================================================

pub async fn login_form(Query(query): Query<NextQuery>) -> Html<String> {
    pages::login(&LoginForm::default(), &FormErrors::new(), query.next.as_deref())
}

pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = query.next.as_deref();
    if let Err(errors) = form.clean() {
        return Ok(pages::login(&form, &errors, next).into_response());
    }

    let user = {
        let store = state.notes.store().lock().await;
        store.get_user_by_username(form.username.trim())?
    };

    let verified = match user {
        Some(user) => {
            let password = form.password.clone();
            tokio::task::spawn_blocking(move || user.check_password(&password).then_some(user))
                .await?
        }
        None => None,
    };

    let Some(user) = verified else {
        debug!(username = %form.username, "login rejected");
        let mut errors = FormErrors::new();
        errors.add("__all__", BAD_CREDENTIALS);
        return Ok(pages::login(&form, &errors, next).into_response());
    };

    let session = state.notes.store().lock().await.create_session(user.id)?;
    info!(user_id = user.id, username = %user.username, "user logged in");

    Ok((
        StatusCode::FOUND,
        [
            (SET_COOKIE, session_cookie(&session.token)),
            (axum::http::header::LOCATION, safe_next(next).to_string()),
        ],
    )
        .into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(&headers) {
        state.notes.store().lock().await.delete_session(&token)?;
        debug!(cookie = SESSION_COOKIE_NAME, "session ended");
    }

    Ok(([(SET_COOKIE, clear_session_cookie())], pages::logged_out()).into_response())
}

pub async fn signup_form() -> Html<String> {
    pages::signup(&SignupForm::default(), &FormErrors::new())
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.clean() {
        return Ok(pages::signup(&form, &errors).into_response());
    }

    let password = form.password1.clone();
    let cost = state.config.password_cost;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await?
        .map_err(NotesError::from)?;

    let username = form.username.trim();
    let created = state
        .notes
        .store()
        .lock()
        .await
        .create_user(username, &password_hash);

    match created {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user signed up");
            Ok(found(LOGIN_PATH))
        }
        Err(NotesError::DuplicateUsername(_)) => {
            let mut errors = FormErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Ok(pages::signup(&form, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
