//! Service wiring: one engine per process, shared by every handler.

use std::sync::Arc;

use ledger_infra::{InMemoryRepository, TransferEngine};

pub type LedgerEngine = TransferEngine<InMemoryRepository>;

pub fn build_services() -> Arc<LedgerEngine> {
    Arc::new(TransferEngine::new(InMemoryRepository::new()))
}
