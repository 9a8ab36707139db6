use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    dev::Server, http::header, middleware, web, App, HttpServer, Scope,
};

use crate::{
    configuration::{AppState, State},
    controller::statements,
    error::Error,
};

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(statements::get_index)
        .service(statements::post_index)
}

/// Malformed form bodies are answered with the same `{error}` payload as
/// validation failures.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| Error::Validation(err.to_string()).into())
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let static_dir = app_state.config.static_dir.to_owned();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(form_config())
            .service(api_scope())
            .service(Files::new("/", static_dir).index_file("index.html"))
    })
    .bind((host, port))?
    .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use super::*;

    #[actix_web::test]
    async fn index_page_row_editor_accepts_stored_values() {
        let static_dir = format!("{}/static", env!("CARGO_MANIFEST_DIR"));
        let app = test::init_service(
            App::new()
                .service(Files::new("/", static_dir).index_file("index.html")),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let page = String::from_utf8_lossy(&body);
        let (_, row) = page.split_once(r#"<template id="row">"#).unwrap();

        assert!(!page.contains(r#"step="0.01""#));
        assert!(row.contains(r#"name="amount" type="number" step="any""#));
        assert_eq!(row.matches(r#"<option value=""></option>"#).count(), 2);
    }
}
