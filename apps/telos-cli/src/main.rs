//! # telos-cli
//!
//! Command-line interface for the Telos goal-tracking backend.
//!
//! Workflow commands for employees and managers:
//! - `telos login/logout/whoami` — manage the persisted session
//! - `telos goal list/show/create/edit/delete` — work with your goals
//! - `telos goal submit/approve/complete/progress` — drive the lifecycle
//! - `telos team` — a manager's view of direct reports and their goals

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use telos_api::{ApiClient, ClientConfig};
use telos_session::{FileTokenStore, SessionStore};

/// Telos CLI — goals, approvals, and progress tracking.
#[derive(Parser)]
#[command(name = "telos", version, about)]
struct Cli {
    /// Path to the config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session tokens.
    Login {
        /// Account username.
        username: String,
        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Discard the persisted session.
    Logout,
    /// Show the signed-in identity and role flags.
    Whoami,
    /// Work with goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Show your direct reports and the goals waiting on you.
    Team,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?,
        None => match ClientConfig::default_path() {
            Some(path) => ClientConfig::load_or_default(&path),
            None => ClientConfig::default(),
        },
    };

    let token_path = ClientConfig::token_path()
        .ok_or_else(|| anyhow::anyhow!("cannot resolve the platform config directory"))?;
    let tokens = FileTokenStore::new(token_path);
    let session = Arc::new(SessionStore::restore(Box::new(tokens))?);
    let api = ApiClient::new(&config, session)?;

    match &cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&api, username, password.as_deref()).await
        }
        Commands::Logout => commands::auth::logout(&api),
        Commands::Whoami => commands::auth::whoami(&api).await,
        Commands::Goal { command } => commands::goal::execute(command, &api).await,
        Commands::Team => commands::team::execute(&api).await,
    }
}
