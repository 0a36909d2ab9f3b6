//! Note operations as seen by one request.
//!
//! Each operation receives the caller's [`RequestContext`] explicitly and
//! runs the access check before touching the store:
//!
//! - anonymous caller: [`ServiceError::Unauthenticated`] carrying the
//!   requested path, so the caller can come back after logging in
//! - logged in, note-scoped, not the author (or no such note):
//!   [`ServiceError::NotFound`]
//! - otherwise the store operation runs and either succeeds or fails with
//!   [`ServiceError::Invalid`] (bad form, slug taken) without writing
//!   anything.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::entity::{Note, User};
use crate::error::NotesError;
use crate::forms::{FormErrors, NoteForm};
use crate::policy::{self, Actor, Denial};
use crate::storage::{NewNote, NoteUpdate, SqliteStore};

/// Per-request caller context
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Actor,
    /// Path (with query) the caller asked for; used as the login `next`
    pub path: String,
}

impl RequestContext {
    pub fn new(actor: Actor, path: impl Into<String>) -> Self {
        Self {
            actor,
            path: path.into(),
        }
    }

    pub fn anonymous(path: impl Into<String>) -> Self {
        Self::new(Actor::Anonymous, path)
    }

    fn deny(&self, denial: Denial) -> ServiceError {
        debug!(path = %self.path, ?denial, "access denied");
        match denial {
            Denial::Unauthenticated => ServiceError::Unauthenticated {
                next: self.path.clone(),
            },
            Denial::NotFound => ServiceError::NotFound,
        }
    }

    fn require_user(&self) -> Result<&User, ServiceError> {
        policy::require_user(&self.actor).map_err(|d| self.deny(d))
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Login required to access {next}")]
    Unauthenticated { next: String },

    #[error("Not found")]
    NotFound,

    #[error("Invalid form submission")]
    Invalid(FormErrors),

    #[error(transparent)]
    Store(#[from] NotesError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// List/detail/create/edit/delete over the shared store
#[derive(Clone)]
pub struct NoteService {
    store: Arc<Mutex<SqliteStore>>,
}

impl NoteService {
    pub fn new(store: Arc<Mutex<SqliteStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Mutex<SqliteStore>> {
        &self.store
    }

    /// The caller's notes, ascending by id
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<Note>> {
        let user = ctx.require_user()?;
        let store = self.store.lock().await;
        Ok(store.list_notes_by_author(user.id)?)
    }

    pub async fn detail(&self, ctx: &RequestContext, slug: &str) -> ServiceResult<Note> {
        self.owned_note(ctx, slug).await
    }

    /// Load a note for the edit form
    pub async fn edit_form(&self, ctx: &RequestContext, slug: &str) -> ServiceResult<Note> {
        self.owned_note(ctx, slug).await
    }

    /// Load a note for the delete confirmation page
    pub async fn delete_form(&self, ctx: &RequestContext, slug: &str) -> ServiceResult<Note> {
        self.owned_note(ctx, slug).await
    }

    /// Confirmation page shown after a successful write
    pub fn success(&self, ctx: &RequestContext) -> ServiceResult<()> {
        ctx.require_user().map(|_| ())
    }

    /// Make sure the caller may open the create form
    pub fn create_form(&self, ctx: &RequestContext) -> ServiceResult<()> {
        ctx.require_user().map(|_| ())
    }

    pub async fn create(&self, ctx: &RequestContext, form: &NoteForm) -> ServiceResult<Note> {
        let user = ctx.require_user()?;
        let clean = form.clean().map_err(ServiceError::Invalid)?;

        let store = self.store.lock().await;
        let note = store
            .create_note(
                user.id,
                NewNote {
                    title: clean.title,
                    text: clean.text,
                    slug: Some(clean.slug),
                },
            )
            .map_err(slug_conflict)?;

        info!(note_id = note.id, slug = %note.slug, author = %user.username, "note created");
        Ok(note)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        slug: &str,
        form: &NoteForm,
    ) -> ServiceResult<Note> {
        let store = self.store.lock().await;
        let note = self.authorize(ctx, &store, slug)?;
        let clean = form.clean().map_err(ServiceError::Invalid)?;

        let updated = store
            .update_note(
                note.id,
                NoteUpdate {
                    title: clean.title,
                    text: clean.text,
                    slug: clean.slug,
                },
            )
            .map_err(slug_conflict)?;

        info!(note_id = updated.id, slug = %updated.slug, "note updated");
        Ok(updated)
    }

    pub async fn delete(&self, ctx: &RequestContext, slug: &str) -> ServiceResult<()> {
        let store = self.store.lock().await;
        let note = self.authorize(ctx, &store, slug)?;
        store.delete_note(note.id)?;

        info!(note_id = note.id, slug = %note.slug, "note deleted");
        Ok(())
    }

    async fn owned_note(&self, ctx: &RequestContext, slug: &str) -> ServiceResult<Note> {
        let store = self.store.lock().await;
        self.authorize(ctx, &store, slug)
    }

    /// Look the note up and run it through the ownership gate while the
    /// store lock is held, so the following write sees the same row.
    fn authorize(
        &self,
        ctx: &RequestContext,
        store: &SqliteStore,
        slug: &str,
    ) -> ServiceResult<Note> {
        ctx.require_user()?;
        let note = store.get_note(slug)?;
        policy::authorize_note(&ctx.actor, note).map_err(|d| ctx.deny(d))
    }
}

fn slug_conflict(err: NotesError) -> ServiceError {
    match err {
        NotesError::DuplicateSlug(slug) => ServiceError::Invalid(FormErrors::duplicate_slug(&slug)),
        other => ServiceError::Store(other),
    }
}
