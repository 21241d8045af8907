//! HTTP server command
//!
//! Runs the boletim API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use boletim_server::db::{
    create_pool_with_options, default_disciplinas, MemoryStore, MySqlStore, SchoolStore,
};
use boletim_server::http::{run_server, ServerConfig};
use boletim_server::models::Disciplina;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:3001")]
    pub bind: SocketAddr,

    /// Serve from an in-memory store instead of MySQL
    #[arg(long)]
    pub in_memory: bool,

    /// JSON array of {"id", "nome"} subjects to load into the in-memory store
    /// (default: a built-in list of school subjects)
    #[arg(long, requires = "in_memory", value_name = "FILE")]
    pub seed_disciplinas: Option<PathBuf>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Parse a subject seed document.
fn parse_disciplinas(json: &str) -> Result<Vec<Disciplina>> {
    serde_json::from_str(json).context("Seed file must be a JSON array of {\"id\", \"nome\"}")
}

fn load_disciplinas(path: &Path) -> Result<Vec<Disciplina>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_disciplinas(&json)
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn SchoolStore> = if args.in_memory {
        let disciplinas = match &args.seed_disciplinas {
            Some(path) => load_disciplinas(path)?,
            None => default_disciplinas(),
        };
        tracing::warn!(
            disciplinas = disciplinas.len(),
            "Using in-memory store; data is lost on shutdown"
        );
        Arc::new(MemoryStore::with_disciplinas(disciplinas))
    } else {
        let pool = create_pool_with_options(args.db.database_url()?, args.db.pool_config())
            .await
            .context("Failed to create database pool")?;
        Arc::new(MySqlStore::new(pool))
    };

    tracing::info!("Starting boletim server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    run_server(store, config).await.context("Server error")?;

    Ok(())
}
