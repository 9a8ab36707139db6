use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, Level};

use statements::{
    cli::{init_config, run_reset, Cli, Commands},
    configuration::{AppState, State},
    error::Error,
    provider::DatabasePool,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Reset { force } => run_reset(force).await,
    }
}

async fn serve() -> Result<(), Error> {
    let config = init_config()?;

    let database = DatabasePool::new(&config).await?;
    database.init_migrations().await?;

    let state = State::new(config, Arc::new(database.statement.clone()));
    let app_state = AppState::new(state);

    info!(
        "Listening on {}:{}",
        app_state.config.server_host, app_state.config.port
    );

    let result = server::server_task(&app_state).await;
    database.close().await;

    result
}
