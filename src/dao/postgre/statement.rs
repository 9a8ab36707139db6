use async_trait::async_trait;
use sqlx::{Error, FromRow};

use super::{gateway::Param, types::DUPLICATE_ERROR};
use crate::{
    dao::StatementStore,
    error::Error as AppError,
    model::{Statement, StatementChanges, Table},
};

impl Table<Statement> {
    pub async fn get_all(&self) -> Result<Vec<Statement>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "statements"
        ORDER BY "dp_id"
        "#;

        let rows = self.gateway.query(SQL, &[]).await?;
        rows.iter().map(Statement::from_row).collect()
    }

    pub async fn insert(&self, data: &Statement) -> Result<(), Error> {
        const SQL: &str = r#"
        INSERT INTO "statements" (
            "dp_id",
            "amount",
            "deposit_date",
            "owner_name",
            "depositor_name",
            "bank_name",
            "reconciliation",
            "ref_number",
            "deposit_number",
            "account_type",
            "comment"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#;

        let params = insert_params(data);

        self.gateway.execute(SQL, &params).await.map(drop)
    }

    pub async fn update(
        &self,
        original_id: &str,
        data: &StatementChanges,
    ) -> Result<u64, Error> {
        const SQL: &str = r#"
        UPDATE "statements" SET
            "dp_id" = COALESCE($1, "dp_id"),
            "amount" = COALESCE($2, "amount"),
            "owner_name" = COALESCE($3, "owner_name"),
            "depositor_name" = COALESCE($4, "depositor_name"),
            "bank_name" = COALESCE($5, "bank_name"),
            "reconciliation" = COALESCE($6, "reconciliation"),
            "ref_number" = COALESCE($7, "ref_number"),
            "deposit_number" = COALESCE($8, "deposit_number"),
            "account_type" = COALESCE($9, "account_type"),
            "comment" = COALESCE($10, "comment")
        WHERE "dp_id" = $11
        "#;

        let params = update_params(original_id, data);

        self.gateway.execute(SQL, &params).await
    }

    pub async fn delete(&self, original_id: &str) -> Result<u64, Error> {
        const SQL: &str = r#"
        DELETE FROM "statements"
        WHERE "dp_id" = $1
        "#;

        self.gateway.execute(SQL, &[Param::from(original_id)]).await
    }
}

#[async_trait]
impl StatementStore for Table<Statement> {
    async fn get_all(&self) -> Result<Vec<Statement>, AppError> {
        Ok(Table::<Statement>::get_all(self).await?)
    }

    async fn insert(&self, data: &Statement) -> Result<(), AppError> {
        Table::<Statement>::insert(self, data)
            .await
            .map_err(duplicate_key)
    }

    async fn update(
        &self,
        original_id: &str,
        data: &StatementChanges,
    ) -> Result<u64, AppError> {
        Table::<Statement>::update(self, original_id, data)
            .await
            .map_err(duplicate_key)
    }

    async fn delete(&self, original_id: &str) -> Result<u64, AppError> {
        Ok(Table::<Statement>::delete(self, original_id).await?)
    }
}

/// Column order of the INSERT template.
fn insert_params(data: &Statement) -> [Param; 11] {
    [
        Param::from(data.dp_id.as_str()),
        Param::from(Some(data.amount.clone())),
        Param::from(data.deposit_date),
        Param::from(data.owner_name.clone()),
        Param::from(data.depositor_name.clone()),
        Param::from(data.bank_name.clone()),
        Param::from(data.reconciliation.clone()),
        Param::from(data.ref_number.clone()),
        Param::from(data.deposit_number.clone()),
        Param::from(data.account_type.clone()),
        Param::from(data.comment.clone()),
    ]
}

/// `$1..$10` feed the COALESCE assignments, a `None` keeps the stored
/// value; `$11` is the key matched by the WHERE clause.
fn update_params(original_id: &str, data: &StatementChanges) -> [Param; 11] {
    [
        Param::from(data.dp_id.clone()),
        Param::from(data.amount.clone()),
        Param::from(data.owner_name.clone()),
        Param::from(data.depositor_name.clone()),
        Param::from(data.bank_name.clone()),
        Param::from(data.reconciliation.clone()),
        Param::from(data.ref_number.clone()),
        Param::from(data.deposit_number.clone()),
        Param::from(data.account_type.clone()),
        Param::from(data.comment.clone()),
        Param::from(original_id),
    ]
}

fn duplicate_key(e: Error) -> AppError {
    match &e {
        Error::Database(db)
            if db.code().as_deref() == Some(DUPLICATE_ERROR) =>
        {
            AppError::DuplicateField(String::from("DP ID already exists"))
        },
        _ => AppError::SQL(e),
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError, fmt, str::FromStr};

    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct PgError {
        code: &'static str,
    }

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "database error {}", self.code)
        }
    }

    impl StdError for PgError {}

    impl DatabaseError for PgError {
        fn message(&self) -> &str {
            "database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(
            &mut self,
        ) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(
            self: Box<Self>,
        ) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.code == DUPLICATE_ERROR {
                return ErrorKind::UniqueViolation;
            }
            ErrorKind::Other
        }
    }

    fn database_error(code: &'static str) -> Error {
        Error::Database(Box::new(PgError { code }))
    }

    fn statement() -> Statement {
        Statement {
            dp_id: String::from("AB1234"),
            amount: BigDecimal::from_str("410.25").unwrap(),
            deposit_date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|date| date.and_hms_opt(8, 0, 5)),
            owner_name: Some(String::from("Owner")),
            depositor_name: Some(String::from("Depositor")),
            bank_name: Some(String::from("Bank")),
            reconciliation: Some(String::from("pending")),
            ref_number: Some(String::from("REF")),
            deposit_number: Some(String::from("DEP")),
            account_type: Some(String::from("checking")),
            comment: Some(String::from("Comment")),
        }
    }

    fn text(value: &str) -> Param {
        Param::Text(Some(value.to_owned()))
    }

    #[test]
    fn unique_violation_maps_to_duplicate_field() {
        let err = duplicate_key(database_error(DUPLICATE_ERROR));

        assert!(matches!(&err, AppError::DuplicateField(_)));
        assert_eq!(err.to_string(), "DP ID already exists");
    }

    #[test]
    fn other_database_errors_stay_persistence_failures() {
        assert!(matches!(
            duplicate_key(database_error("23502")),
            AppError::SQL(Error::Database(_))
        ));
        assert!(matches!(
            duplicate_key(Error::RowNotFound),
            AppError::SQL(Error::RowNotFound)
        ));
    }

    #[test]
    fn insert_params_follow_column_order() {
        let row = statement();

        assert_eq!(
            insert_params(&row),
            [
                text("AB1234"),
                Param::Decimal(Some(row.amount.clone())),
                Param::Timestamp(row.deposit_date),
                text("Owner"),
                text("Depositor"),
                text("Bank"),
                text("pending"),
                text("REF"),
                text("DEP"),
                text("checking"),
                text("Comment"),
            ]
        );
    }

    #[test]
    fn update_params_keep_absent_fields_and_end_with_key() {
        let changes = StatementChanges {
            dp_id: Some(String::from("CD5678")),
            bank_name: Some(String::from("Harbor")),
            comment: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            update_params("AB1234", &changes),
            [
                text("CD5678"),
                Param::Decimal(None),
                Param::Text(None),
                Param::Text(None),
                text("Harbor"),
                Param::Text(None),
                Param::Text(None),
                Param::Text(None),
                Param::Text(None),
                text(""),
                text("AB1234"),
            ]
        );
    }
}
