use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::statements,
    types::StatementForm,
};

#[get("/statements")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let data = statements::load(
        state.statements.as_ref(),
        state.config.read_fail_open,
    )
    .await?;

    Ok(web::Json(data))
}

#[post("/statements")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    form: web::Form<StatementForm>,
) -> Result<impl Responder, Error> {
    statements::action(
        state.statements.as_ref(),
        &form,
        state.config.strict_intent,
    )
    .await?;

    Ok(web::Json(Response { success: true }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
}
