use std::sync::Mutex;

use async_trait::async_trait;

use super::StatementStore;
use crate::{
    error::Error,
    model::{Statement, StatementChanges},
};

/// In-process store with the same key semantics as the `statements` table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Statement>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like an unreachable database.
    pub fn failing() -> Self {
        MemoryStore {
            rows: Mutex::new(vec![]),
            failing: true,
        }
    }

    pub fn rows(&self) -> Vec<Statement> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), Error> {
        if self.failing {
            return Err(Error::SQL(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl StatementStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Statement>, Error> {
        self.check()?;
        let mut rows = self.rows();
        rows.sort_by(|a, b| a.dp_id.cmp(&b.dp_id));
        Ok(rows)
    }

    async fn insert(&self, data: &Statement) -> Result<(), Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.dp_id == data.dp_id) {
            return Err(Error::DuplicateField(String::from(
                "DP ID already exists",
            )));
        }
        rows.push(data.clone());
        Ok(())
    }

    async fn update(
        &self,
        original_id: &str,
        data: &StatementChanges,
    ) -> Result<u64, Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();

        if !rows.iter().any(|row| row.dp_id == original_id) {
            return Ok(0);
        }

        if let Some(new_id) = &data.dp_id {
            if new_id != original_id
                && rows.iter().any(|row| &row.dp_id == new_id)
            {
                return Err(Error::DuplicateField(String::from(
                    "DP ID already exists",
                )));
            }
        }

        let mut affected = 0;
        for row in rows.iter_mut().filter(|row| row.dp_id == original_id) {
            data.apply(row);
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, original_id: &str) -> Result<u64, Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.dp_id != original_id);
        Ok((before - rows.len()) as u64)
    }
}
