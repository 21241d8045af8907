//! Database connectivity check

use anyhow::{Context, Result};
use clap::Parser;

use boletim_server::db::{create_pool_with_options, MySqlStore, SchoolStore};

use super::DatabaseArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Connect, run a trivial query and report.
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let pool = create_pool_with_options(args.db.database_url()?, args.db.pool_config())
        .await
        .context("Failed to connect to database")?;

    let store = MySqlStore::new(pool);
    store.ping().await.context("Database did not answer")?;

    let disciplinas = store
        .list_disciplinas()
        .await
        .context("Failed to read disciplinas")?;

    println!("database ok ({} disciplinas)", disciplinas.len());
    Ok(())
}
