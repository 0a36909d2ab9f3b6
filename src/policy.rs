//! Access rules for notes.
//!
//! Listing and creating need a logged-in actor. Everything scoped to a
//! single note additionally needs the actor to be its author, and a note
//! owned by someone else is reported exactly like a note that does not
//! exist.

use crate::entity::{Note, User};

/// Who is making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(User),
}

impl Actor {
    pub fn user(&self) -> Option<&User> {
        match self {
            Actor::Anonymous => None,
            Actor::User(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

impl From<Option<User>> for Actor {
    fn from(user: Option<User>) -> Self {
        user.map_or(Actor::Anonymous, Actor::User)
    }
}

/// Why access was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Not logged in; the caller should be sent to the login page
    Unauthenticated,
    /// Missing, or owned by someone else
    NotFound,
}

/// The actor's user, or `Unauthenticated`
pub fn require_user(actor: &Actor) -> Result<&User, Denial> {
    actor.user().ok_or(Denial::Unauthenticated)
}

pub fn can_list(actor: &Actor) -> bool {
    actor.is_authenticated()
}

pub fn can_create(actor: &Actor) -> bool {
    actor.is_authenticated()
}

/// Shared rule behind view, edit and delete
pub fn is_owner(actor: &Actor, note: &Note) -> bool {
    actor.user().is_some_and(|user| note.is_authored_by(user.id))
}

pub fn can_view(actor: &Actor, note: &Note) -> bool {
    is_owner(actor, note)
}

pub fn can_edit(actor: &Actor, note: &Note) -> bool {
    is_owner(actor, note)
}

pub fn can_delete(actor: &Actor, note: &Note) -> bool {
    is_owner(actor, note)
}

/// The single gate for note-scoped operations.
///
/// Authentication is checked before the lookup result is looked at, so an
/// anonymous caller learns nothing about which slugs exist.
pub fn authorize_note(actor: &Actor, note: Option<Note>) -> Result<Note, Denial> {
    require_user(actor)?;
    match note {
        Some(note) if is_owner(actor, &note) => Ok(note),
        _ => Err(Denial::NotFound),
    }
}
