use axum::Router;

pub mod accounts;
pub mod system;
pub mod transfers;

/// Router for every ledger endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .merge(accounts::router())
        .merge(transfers::router())
}
