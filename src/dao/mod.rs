use async_trait::async_trait;

use crate::{
    error::Error,
    model::{Statement, StatementChanges},
};

mod postgre;

#[cfg(test)]
pub mod memory;

pub use postgre::{
    get_path, ConnectOptions, DBArguments, DBRow, DataBase, Gateway, Param,
    PoolOption, PoolType, DUPLICATE_ERROR,
};

/// Persistence seam used by the request handlers.
///
/// `update` and `delete` return the number of rows they touched; zero is
/// not an error.
#[async_trait]
pub trait StatementStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Statement>, Error>;

    async fn insert(&self, data: &Statement) -> Result<(), Error>;

    async fn update(
        &self,
        original_id: &str,
        data: &StatementChanges,
    ) -> Result<u64, Error>;

    async fn delete(&self, original_id: &str) -> Result<u64, Error>;
}
