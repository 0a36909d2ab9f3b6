use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::entity::Note;
use crate::error::{NotesError, Result};
use crate::slug::slugify_truncated;

const MAX_DERIVED_SLUG_LENGTH: usize = 100;

/// Payload for a new note. A missing slug is derived from the title.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

/// Replacement values for the mutable fields of a note
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// SQLite-backed store for notes, users and sessions
pub struct SqliteStore {
    pub(crate) conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Create a fresh database file
    pub fn init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(NotesError::AlreadyInitialized);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Open an existing database file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotesError::NotInitialized);
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let store = Self { conn, path };
        store.init_schema()?;
        Ok(store)
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_notes_author ON notes(author_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at);
            ",
        )?;
        Ok(())
    }

    /// All notes, ascending by id
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, text, slug, author_id FROM notes ORDER BY id ASC")?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// Notes written by one author, ascending by id
    pub fn list_notes_by_author(&self, author_id: i64) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, text, slug, author_id FROM notes
             WHERE author_id = ?1 ORDER BY id ASC",
        )?;

        let notes = stmt
            .query_map([author_id], note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn get_note(&self, slug: &str) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, title, text, slug, author_id FROM notes WHERE slug = ?1",
                [slug],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a note owned by `author_id`.
    ///
    /// The `UNIQUE` constraint on `slug` is the uniqueness check, so the
    /// check and the write are one statement.
    pub fn create_note(&self, author_id: i64, new: NewNote) -> Result<Note> {
        let slug = match new.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => slugify_truncated(&new.title, MAX_DERIVED_SLUG_LENGTH),
        };

        self.conn
            .execute(
                "INSERT INTO notes (title, text, slug, author_id) VALUES (?1, ?2, ?3, ?4)",
                params![new.title, new.text, slug, author_id],
            )
            .map_err(|e| map_slug_conflict(e, &slug))?;

        Ok(Note {
            id: self.conn.last_insert_rowid(),
            title: new.title,
            text: new.text,
            slug,
            author_id,
        })
    }

    /// Overwrite title, text and slug of note `id`. The author never changes.
    pub fn update_note(&self, id: i64, update: NoteUpdate) -> Result<Note> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET title = ?1, text = ?2, slug = ?3 WHERE id = ?4",
                params![update.title, update.text, update.slug, id],
            )
            .map_err(|e| map_slug_conflict(e, &update.slug))?;

        if changed == 0 {
            return Err(NotesError::NoteNotFound(id.to_string()));
        }

        let note = self.conn.query_row(
            "SELECT id, title, text, slug, author_id FROM notes WHERE id = ?1",
            [id],
            note_from_row,
        )?;
        Ok(note)
    }

    pub fn delete_note(&self, id: i64) -> Result<()> {
        let deleted = self.conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(NotesError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        slug: row.get(3)?,
        author_id: row.get(4)?,
    })
}

pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn map_slug_conflict(e: rusqlite::Error, slug: &str) -> NotesError {
    if is_unique_violation(&e) {
        NotesError::DuplicateSlug(slug.to_string())
    } else {
        e.into()
    }
}

impl From<rusqlite::Error> for NotesError {
    fn from(e: rusqlite::Error) -> Self {
        NotesError::Storage(format!("SQLite error: {}", e))
    }
}
