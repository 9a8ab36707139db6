use std::fs;

use tracing::info;

use crate::{
    configuration::Config,
    dao::{get_path, Gateway},
    error::Error,
    model::{Statement, Table},
};

const SCHEMA_FILES: [&str; 1] = ["statements.sql"];
const DROP_FILES: [&str; 1] = ["drop_statements.sql"];

#[derive(Debug)]
pub struct DatabasePool {
    pub statement: Table<Statement>,
    pub gateway: Gateway,
}

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let gateway = Gateway::connect(
            config.connect_options(),
            config.database_pool_size,
        )
        .await?;

        info!(
            "Connected to {}:{}/{} with pool size {}",
            config.database_host,
            config.database_port,
            config.database_name,
            config.database_pool_size
        );

        Ok(DatabasePool {
            statement: Table::new(gateway.clone()),
            gateway,
        })
    }

    /// Creates the schema if it does not exist yet.
    pub async fn init_migrations(&self) -> Result<(), Error> {
        self.run_files(&SCHEMA_FILES).await
    }

    /// Drops and recreates the schema. All stored statements are lost.
    pub async fn reset(&self) -> Result<(), Error> {
        self.run_files(&DROP_FILES).await?;
        self.run_files(&SCHEMA_FILES).await
    }

    pub async fn close(&self) {
        self.gateway.close().await;
    }

    async fn run_files(&self, files: &[&str]) -> Result<(), Error> {
        let dir = env!("CARGO_MANIFEST_DIR");

        for file in files {
            let path = get_path(dir, file);
            let data = fs::read_to_string(&path)?;
            self.gateway.execute(data.as_str(), &[]).await?;
        }

        Ok(())
    }
}
