//! Infrastructure layer: record store, account directory and the transfer
//! engine that mutates balances.

pub mod directory;
pub mod engine;
pub mod error;
pub mod repository;

#[cfg(test)]
mod testing;

pub use directory::AccountDirectory;
pub use engine::{MutationStage, TransferEngine};
pub use error::LedgerError;
pub use repository::{AccountRepository, InMemoryRepository, RepositoryError};
