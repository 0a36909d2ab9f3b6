use clap::{Args, Parser, Subcommand};

use crate::config::{DbArgs, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "ya-note")]
#[command(version, about = "Personal notes with per-author access")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new notes database
    Init {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Run the web server
    Serve(ServerConfig),

    /// Manage user accounts
    User(UserCommand),

    /// Inspect stored notes
    Notes(NotesCommand),
}

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create a user account
    Add {
        /// Login name
        username: String,

        /// Account password
        #[arg(long, env = "YA_NOTE_PASSWORD")]
        password: String,

        /// bcrypt cost used to hash the password
        #[arg(long, env = "YA_NOTE_PASSWORD_COST", default_value_t = bcrypt::DEFAULT_COST)]
        password_cost: u32,

        #[command(flatten)]
        db: DbArgs,
    },
}

#[derive(Args, Debug)]
pub struct NotesCommand {
    #[command(subcommand)]
    pub action: NotesAction,
}

#[derive(Subcommand, Debug)]
pub enum NotesAction {
    /// List notes in creation order
    List {
        /// Only notes written by this user
        #[arg(long)]
        author: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        db: DbArgs,
    },
}
