use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "ya_note.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Location of the notes database
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct DbArgs {
    /// Path to the SQLite database file
    #[arg(long = "db", env = "YA_NOTE_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

impl Default for DbArgs {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to listen on
    #[arg(long, env = "YA_NOTE_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// bcrypt cost used when hashing new passwords
    #[arg(long, env = "YA_NOTE_PASSWORD_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub password_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db: DbArgs::default(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            password_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    /// Config for tests: cheap password hashing, database path unused
    pub fn for_tests() -> Self {
        Self {
            password_cost: 4,
            ..Self::default()
        }
    }
}
