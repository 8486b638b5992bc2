use std::sync::Arc;

use thiserror::Error;

use ledger_accounts::{Account, Transfer};
use ledger_core::AccountId;

/// Record store operation error.
///
/// These are **infrastructure errors**. The engine does not distinguish
/// between them: any failure during a mutation's persistence phase triggers
/// a rollback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A write broke a storage constraint (duplicate key, dangling reference).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An internal lock was poisoned by a panicking writer.
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Passive persistence surface for accounts and their history.
///
/// ## Unit of work
///
/// Writes (`create_account`, `update_account`, `create_transfer`) are staged
/// until `commit()` makes them durable as a whole; `rollback()` discards
/// everything staged since the last commit. There is one unit of work per
/// repository: callers that write must serialize themselves.
///
/// ## Reads
///
/// `get_account` returns every stored row matching the id. A well-behaved
/// store returns zero or one; more than one is a contract violation that the
/// caller is expected to detect.
///
/// No ordering guarantee is given for `get_all_accounts` / `get_history`
/// beyond "repository-defined".
pub trait AccountRepository: Send + Sync {
    fn get_account(&self, id: AccountId) -> Result<Vec<Account>, RepositoryError>;

    fn get_all_accounts(&self) -> Result<Vec<Account>, RepositoryError>;

    fn create_account(&self, account: &Account) -> Result<(), RepositoryError>;

    /// Replace the stored record with the same id.
    fn update_account(&self, account: &Account) -> Result<(), RepositoryError>;

    /// Every movement where `account_id` is source or destination.
    fn get_history(&self, account_id: AccountId) -> Result<Vec<Transfer>, RepositoryError>;

    fn create_transfer(&self, transfer: &Transfer) -> Result<(), RepositoryError>;

    fn commit(&self) -> Result<(), RepositoryError>;

    fn rollback(&self) -> Result<(), RepositoryError>;
}

impl<R> AccountRepository for Arc<R>
where
    R: AccountRepository + ?Sized,
{
    fn get_account(&self, id: AccountId) -> Result<Vec<Account>, RepositoryError> {
        (**self).get_account(id)
    }

    fn get_all_accounts(&self) -> Result<Vec<Account>, RepositoryError> {
        (**self).get_all_accounts()
    }

    fn create_account(&self, account: &Account) -> Result<(), RepositoryError> {
        (**self).create_account(account)
    }

    fn update_account(&self, account: &Account) -> Result<(), RepositoryError> {
        (**self).update_account(account)
    }

    fn get_history(&self, account_id: AccountId) -> Result<Vec<Transfer>, RepositoryError> {
        (**self).get_history(account_id)
    }

    fn create_transfer(&self, transfer: &Transfer) -> Result<(), RepositoryError> {
        (**self).create_transfer(transfer)
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        (**self).commit()
    }

    fn rollback(&self) -> Result<(), RepositoryError> {
        (**self).rollback()
    }
}
