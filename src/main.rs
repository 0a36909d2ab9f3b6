use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ya_note::cli::{
    handle_init, handle_notes_list, handle_serve, handle_user_add, Cli, Commands, NotesAction,
    UserAction,
};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ya_note=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { db } => handle_init(&db.db_path),
        Commands::Serve(config) => handle_serve(config),
        Commands::User(user_cmd) => match user_cmd.action {
            UserAction::Add {
                username,
                password,
                password_cost,
                db,
            } => handle_user_add(username, password, password_cost, &db.db_path),
        },
        Commands::Notes(notes_cmd) => match notes_cmd.action {
            NotesAction::List { author, json, db } => handle_notes_list(author, json, &db.db_path),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
