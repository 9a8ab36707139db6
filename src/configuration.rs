use std::{env, fs, ops::Deref, path::Path, sync::Arc};

use tracing::warn;

use crate::{
    dao::{ConnectOptions, StatementStore},
    error::Error,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

pub struct State {
    pub config: Config,
    pub statements: Arc<dyn StatementStore>,
}

impl State {
    pub fn new(config: Config, statements: Arc<dyn StatementStore>) -> State {
        Self { config, statements }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
    pub database_pool_size: u32,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub read_fail_open: bool,
    pub strict_intent: bool,
}

impl Config {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .username(&self.database_user)
            .password(&self.database_password)
            .database(&self.database_name)
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let database_host = var_or("DATABASE_HOST", "localhost");
    let database_port: u16 = var_or("DATABASE_PORT", "5432").parse()?;
    let database_user = var_or("DATABASE_USER", "postgres");
    let database_password = env::var("DATABASE_PASSWORD").map_err(|_| {
        Error::ConfigurationError(String::from(
            "DATABASE_PASSWORD must be set",
        ))
    })?;
    let database_name = var_or("DATABASE_NAME", "statements");
    let database_pool_size: u32 = var_or("DATABASE_POOL_SIZE", "5").parse()?;

    if database_pool_size == 0 {
        return Err(Error::ConfigurationError(String::from(
            "DATABASE_POOL_SIZE must be greater than 0",
        )));
    }

    let server_host = var_or("SERVER_HOST", "127.0.0.1");
    let port: u16 = var_or("PORT", "8080").parse()?;
    let allowed_origins = var_or("ALLOWED_ORIGINS", "*")
        .split(',')
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect::<Vec<String>>();
    let static_dir = format!(
        "{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        var_or("STATIC_DIRECTORY", "static")
    );
    let read_fail_open = var_or("READ_FAIL_OPEN", "true").parse()?;
    let strict_intent = var_or("STRICT_INTENT", "false").parse()?;

    let config = Config {
        database_host,
        database_port,
        database_user,
        database_password,
        database_name,
        database_pool_size,
        server_host,
        port,
        allowed_origins,
        static_dir,
        read_fail_open,
        strict_intent,
    };

    Ok(config)
}

/// Loads `KEY=VALUE` lines from `.env` next to the manifest into the
/// process environment. A missing file is not an error.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    if !Path::new(&path).exists() {
        warn!("{} not found, using process environment", path);
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;
    parse_config_string(config_string);

    Ok(())
}

fn parse_config_string(config: String) {
    for (key, value) in parse_pairs(&config) {
        env::set_var(key, value);
    }
}

fn parse_pairs(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
