use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Database not found. Run 'ya-note init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove the database file to reinitialize.")]
    AlreadyInitialized,

    #[error("Slug already taken: {0}")]
    DuplicateSlug(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password error: {0}")]
    Password(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<bcrypt::BcryptError> for NotesError {
    fn from(e: bcrypt::BcryptError) -> Self {
        NotesError::Password(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
