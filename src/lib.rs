pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod forms;
pub mod policy;
pub mod service;
pub mod slug;
pub mod storage;
pub mod web;

pub use error::{NotesError, Result};
pub use service::{NoteService, RequestContext, ServiceError};
pub use storage::SqliteStore;
