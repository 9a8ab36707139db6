use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use sqlx::{query::Query, Error};
use tracing::{error, info};

use super::types::{
    ConnectOptions, DBArguments, DBRow, DataBase, PoolOption, PoolType,
};

/// Positional parameter bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(Option<String>),
    Decimal(Option<BigDecimal>),
    Timestamp(Option<NaiveDateTime>),
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(Some(value.to_owned()))
    }
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        Param::Text(value)
    }
}

impl From<Option<BigDecimal>> for Param {
    fn from(value: Option<BigDecimal>) -> Self {
        Param::Decimal(value)
    }
}

impl From<Option<NaiveDateTime>> for Param {
    fn from(value: Option<NaiveDateTime>) -> Self {
        Param::Timestamp(value)
    }
}

/// Owner of the bounded connection pool. Every statement goes through
/// [`Gateway::query`] or [`Gateway::execute`], which check a connection
/// out for the duration of one statement only.
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: PoolType,
}

impl Gateway {
    pub fn new(pool: PoolType) -> Self {
        Gateway { pool }
    }

    pub async fn connect(
        options: ConnectOptions,
        max_connections: u32,
    ) -> Result<Gateway, Error> {
        let pool = PoolOption::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Gateway::new(pool))
    }

    pub async fn query(
        &self,
        sql: &str,
        params: &[Param],
    ) -> Result<Vec<DBRow>, Error> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            error!("Could not acquire connection: {}", e);
            e
        })?;

        let result = bind(sqlx::query(sql), params).fetch_all(&mut *conn).await;
        drop(conn);

        match result {
            Ok(rows) => {
                info!(
                    "Executed `{}` with {} params, {} rows",
                    compact(sql),
                    params.len(),
                    rows.len()
                );
                Ok(rows)
            },
            Err(e) => {
                error!("Query `{}` failed: {}", compact(sql), e);
                Err(e)
            },
        }
    }

    /// Like [`Gateway::query`] but reports the number of affected rows.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[Param],
    ) -> Result<u64, Error> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            error!("Could not acquire connection: {}", e);
            e
        })?;

        let result = bind(sqlx::query(sql), params).execute(&mut *conn).await;
        drop(conn);

        match result {
            Ok(done) => {
                info!(
                    "Executed `{}` with {} params, {} rows affected",
                    compact(sql),
                    params.len(),
                    done.rows_affected()
                );
                Ok(done.rows_affected())
            },
            Err(e) => {
                error!("Query `{}` failed: {}", compact(sql), e);
                Err(e)
            },
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn bind<'q>(
    mut query: Query<'q, DataBase, DBArguments>,
    params: &[Param],
) -> Query<'q, DataBase, DBArguments> {
    for param in params {
        query = match param {
            Param::Text(value) => query.bind(value.clone()),
            Param::Decimal(value) => query.bind(value.clone()),
            Param::Timestamp(value) => query.bind(*value),
        };
    }

    query
}

fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_collapses_sql_whitespace() {
        let sql = r#"
        DELETE FROM "statements"
        WHERE "dp_id" = $1
        "#;
        assert_eq!(compact(sql), r#"DELETE FROM "statements" WHERE "dp_id" = $1"#);
    }

    #[test]
    fn params_convert_from_optional_values() {
        assert_eq!(Param::from("A00001"), Param::Text(Some(String::from("A00001"))));
        assert_eq!(Param::from(None::<BigDecimal>), Param::Decimal(None));
        assert_eq!(Param::from(None::<NaiveDateTime>), Param::Timestamp(None));
    }
}
