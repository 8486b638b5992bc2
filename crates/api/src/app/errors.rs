use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ledger_infra::LedgerError;

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    if err.is_rejection() {
        tracing::warn!(error = %err, "request rejected");
    } else {
        tracing::error!(error = %err, "request failed");
    }

    let message = err.to_string();
    match err {
        LedgerError::InvalidAmount(_) => json_error(StatusCode::BAD_REQUEST, "invalid_amount", message),
        LedgerError::InvalidName(_) => json_error(StatusCode::BAD_REQUEST, "invalid_name", message),
        LedgerError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        LedgerError::AccountNotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        LedgerError::InsufficientFunds { .. } => {
            json_error(StatusCode::CONFLICT, "insufficient_funds", message)
        }
        LedgerError::NonPositiveTransfer(_) => {
            json_error(StatusCode::CONFLICT, "non_positive_amount", message)
        }
        LedgerError::SelfTransfer(_) => json_error(StatusCode::CONFLICT, "self_transfer", message),
        LedgerError::TransferFailed(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "transfer_failed", message)
        }
        LedgerError::Store(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message),
        LedgerError::Integrity(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "integrity_violation", message)
        }
    }
}

pub fn bad_request(message: impl Into<String>) -> axum::response::Response {
    let message = message.into();
    tracing::warn!(%message, "bad request");
    json_error(StatusCode::BAD_REQUEST, "bad_request", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{AccountId, Money};
    use ledger_infra::RepositoryError;

    #[test]
    fn status_codes_follow_failure_kind() {
        let id = AccountId::new();
        let cases = [
            (LedgerError::InvalidAmount("1.001".into()), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidName("x;".into()), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidId("nope".into()), StatusCode::BAD_REQUEST),
            (LedgerError::AccountNotFound(id), StatusCode::NOT_FOUND),
            (
                LedgerError::InsufficientFunds {
                    account: id,
                    name: "a".into(),
                    amount: Money::from_cents(1),
                },
                StatusCode::CONFLICT,
            ),
            (LedgerError::NonPositiveTransfer(Money::zero()), StatusCode::CONFLICT),
            (LedgerError::SelfTransfer(id), StatusCode::CONFLICT),
            (
                LedgerError::TransferFailed(RepositoryError::Unavailable("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (LedgerError::Integrity("dup".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ledger_error_to_response(err).status(), expected);
        }
    }
}
