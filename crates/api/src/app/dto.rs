use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;

use ledger_core::{AccountId, Money};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

/// Amounts stay raw JSON until [`parse_amount`] reads their text.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: Value,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Value,
}

// -------------------------
// Input parsing
// -------------------------

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    body.map(|Json(v)| v)
        .map_err(|rejection| errors::bad_request(rejection.body_text()))
}

pub fn parse_account_id(raw: &str) -> Result<AccountId, axum::response::Response> {
    raw.parse::<AccountId>()
        .map_err(|e| errors::ledger_error_to_response(e.into()))
}

/// Read an amount from a JSON number or string.
///
/// Numbers are parsed from their JSON source text (`serde_json` is built with
/// `arbitrary_precision`), never through `f64`, so `12.340` keeps its three
/// fractional digits and is later rejected by the amount policy.
pub fn parse_amount(value: &Value) -> Result<Money, axum::response::Response> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(errors::bad_request("missing amount")),
        _ => return Err(errors::bad_request("amount must be a number or a string")),
    };
    text.parse::<Money>()
        .map_err(|e| errors::ledger_error_to_response(e.into()))
}
