use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::LedgerEngine;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/transfer", post(transfer))
        .route("/accounts/:id/deposit", post(deposit))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/accounts/:id/history", get(history))
}

pub async fn transfer(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    body: Result<Json<dto::TransferRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let (from, to, amount) = match (
        dto::parse_account_id(&body.from),
        dto::parse_account_id(&body.to),
        dto::parse_amount(&body.amount),
    ) {
        (Ok(from), Ok(to), Ok(amount)) => (from, to, amount),
        (Err(resp), _, _) | (_, Err(resp), _) | (_, _, Err(resp)) => return resp,
    };

    match engine.transfer(from, to, amount) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_movement(&id, body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match engine.deposit(id, amount) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_movement(&id, body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match engine.withdraw(id, amount) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn history(
    Extension(engine): Extension<Arc<LedgerEngine>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_account_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match engine.history(id) {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

fn parse_movement(
    id: &str,
    body: Result<Json<dto::AmountRequest>, JsonRejection>,
) -> Result<(ledger_core::AccountId, ledger_core::Money), axum::response::Response> {
    let id = dto::parse_account_id(id)?;
    let body = dto::json_body(body)?;
    let amount = dto::parse_amount(&body.amount)?;
    Ok((id, amount))
}
