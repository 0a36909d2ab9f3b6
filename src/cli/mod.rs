mod commands;
mod handlers;

pub use commands::{Cli, Commands, NotesAction, NotesCommand, UserAction, UserCommand};
pub use handlers::{handle_init, handle_notes_list, handle_serve, handle_user_add};
