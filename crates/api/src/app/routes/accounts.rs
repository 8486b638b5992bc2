use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::LedgerEngine;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/:id", get(get_account))
}

pub async fn list_accounts(
    Extension(engine): Extension<Arc<LedgerEngine>>,
) -> axum::response::Response {
    match engine.directory().list() {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_account(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    body: Result<Json<dto::CreateAccountRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match engine.directory().create(&body.name) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_account_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match engine.directory().get(id) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
