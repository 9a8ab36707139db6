//! CLI module for the statement service
//!
//! `serve` runs the HTTP server (the default), `reset` drops and
//! recreates the statements table.

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::{
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    provider::DatabasePool,
};

/// Deposit statement service
#[derive(Parser)]
#[command(name = "statements")]
#[command(about = "Deposit statement record service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default if no command specified)
    Serve,

    /// Drop and recreate the statements table. Every stored row is lost.
    Reset {
        /// Required confirmation for the destructive reset
        #[arg(long)]
        force: bool,
    },
}

/// Initialize configuration and return Config
pub fn init_config() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

pub async fn run_reset(force: bool) -> Result<(), Error> {
    if !force {
        warn!("Refusing to reset without --force");
        return Err(Error::ConfigurationError(String::from(
            "reset drops every statement, pass --force to confirm",
        )));
    }

    let config = init_config()?;
    let database = DatabasePool::new(&config).await?;

    info!("Dropping and recreating the statements table...");
    let result = database.reset().await;
    database.close().await;
    result?;
    info!("Statements table recreated");

    Ok(())
}
