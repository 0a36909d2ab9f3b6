use std::path::Path;

use tracing::info;

use crate::config::ServerConfig;
use crate::error::{NotesError, Result};
use crate::forms::SignupForm;
use crate::storage::SqliteStore;
use crate::web::{create_router, AppState};

pub fn handle_init(db_path: &Path) -> Result<()> {
    let _store = SqliteStore::init(db_path)?;
    println!("Initialized notes database at {}", db_path.display());
    Ok(())
}

pub fn handle_serve(config: ServerConfig) -> Result<()> {
    let store = SqliteStore::open(&config.db.db_path)?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let bind = config.bind;
        let app = create_router(AppState::new(store, config));
        let listener = tokio::net::TcpListener::bind(bind).await?;
        info!(address = %bind, "listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok::<(), NotesError>(())
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

pub fn handle_user_add(
    username: String,
    password: String,
    password_cost: u32,
    db_path: &Path,
) -> Result<()> {
    let form = SignupForm {
        username: username.clone(),
        password1: password.clone(),
        password2: password.clone(),
    };
    if let Err(errors) = form.clean() {
        let details: Vec<String> = errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        return Err(NotesError::InvalidInput(details.join("; ")));
    }

    let store = SqliteStore::open(db_path)?;
    let password_hash = bcrypt::hash(&password, password_cost)?;
    let user = store.create_user(username.trim(), &password_hash)?;

    println!("Created user {:03} - {}", user.id, user.username);
    Ok(())
}

pub fn handle_notes_list(author: Option<String>, json: bool, db_path: &Path) -> Result<()> {
    let store = SqliteStore::open(db_path)?;

    let notes = match author {
        Some(name) => {
            let user = store
                .get_user_by_username(&name)?
                .ok_or(NotesError::UserNotFound(name))?;
            store.list_notes_by_author(user.id)?
        }
        None => store.list_notes()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for note in notes {
            println!("{:03} {} - {}", note.id, note.slug, note.title);
        }
    }

    Ok(())
}
