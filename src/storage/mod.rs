mod accounts;
mod sqlite_store;

pub use sqlite_store::{NewNote, NoteUpdate, SqliteStore};
