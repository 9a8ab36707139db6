use sqlx::{
    postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow},
    PgPool, Postgres,
};

pub type PoolType = PgPool;
pub type PoolOption = PgPoolOptions;
pub type ConnectOptions = PgConnectOptions;
pub type DBArguments = PgArguments;
pub type DBRow = PgRow;
pub type DataBase = Postgres;

/// SQLSTATE raised by Postgres on a unique/primary key violation.
pub const DUPLICATE_ERROR: &str = "23505";
