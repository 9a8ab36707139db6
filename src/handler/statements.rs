//! Read and write paths of the statement form.
//!
//! `load` backs the list view; `action` validates a submitted form and
//! performs exactly one of insert, update or delete.

use tracing::{error, info, warn};

use crate::{
    dao::StatementStore,
    error::Error,
    helpers::Intent,
    model::Statement,
    types::StatementForm,
};

/// Fetches every statement. With `fail_open` a storage failure is logged
/// and an empty list is returned so the page still renders.
pub async fn load(
    store: &dyn StatementStore,
    fail_open: bool,
) -> Result<Vec<Statement>, Error> {
    match store.get_all().await {
        Ok(rows) => Ok(rows),
        Err(e) => {
            error!("Could not load statements: {}", e);
            if fail_open {
                return Ok(vec![]);
            }
            Err(e)
        },
    }
}

/// Dispatches a submitted form on its intent.
///
/// Unknown intents are accepted as a no-op unless `strict_intent` is set.
/// Updates and deletes that match no row succeed.
pub async fn action(
    store: &dyn StatementStore,
    form: &StatementForm,
    strict_intent: bool,
) -> Result<(), Error> {
    let intent = match form.intent() {
        Ok(intent) => intent,
        Err(e) if strict_intent => return Err(e),
        Err(e) => {
            warn!("{}, nothing to do", e);
            return Ok(());
        },
    };

    match intent {
        Intent::Create => {
            let statement = form.to_new_statement()?;
            store.insert(&statement).await?;
            info!("Created statement {}", statement.dp_id);
        },
        Intent::Update => {
            let (original_id, changes) = form.to_changes()?;
            let affected = store.update(&original_id, &changes).await?;
            if affected == 0 {
                warn!("Update matched no statement {}", original_id);
            } else {
                info!("Updated statement {}", original_id);
            }
        },
        Intent::Delete => {
            let original_id = form.original_id()?;
            let affected = store.delete(&original_id).await?;
            if affected == 0 {
                warn!("Delete matched no statement {}", original_id);
            } else {
                info!("Deleted statement {}", original_id);
            }
        },
    }

    Ok(())
}
