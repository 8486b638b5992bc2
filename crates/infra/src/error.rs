//! Error surface of the ledger services.

use thiserror::Error;

use ledger_core::{AccountId, DomainError, Money};

use crate::repository::RepositoryError;

/// Every way a directory or engine operation can fail.
///
/// All kinds except `TransferFailed`, `Store` and `Integrity` are input
/// rejections: they are detected before anything is written and leave the
/// store untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount has more than two fractional digits (or overflows).
    #[error("invalid amount of money: {0}")]
    InvalidAmount(String),

    /// Transfer or withdrawal of zero or a negative amount.
    #[error("attempted to transfer non-positive amount of {0}")]
    NonPositiveTransfer(Money),

    /// Source equals destination in a transfer.
    #[error("account {0} cannot transfer to itself")]
    SelfTransfer(AccountId),

    /// Account name contains disallowed characters.
    #[error("illegal name: {0:?}")]
    InvalidName(String),

    /// Malformed identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Referenced account does not exist.
    #[error("no account with ID {0}")]
    AccountNotFound(AccountId),

    /// Source balance is lower than the outgoing amount.
    #[error("account '{name}' ({account}) has insufficient funds to transfer out {amount}")]
    InsufficientFunds {
        account: AccountId,
        name: String,
        amount: Money,
    },

    /// Persistence failed after validation passed. The operation was rolled
    /// back and must be treated as not having happened.
    #[error("exception while transferring: {0}")]
    TransferFailed(#[source] RepositoryError),

    /// A read outside of any mutation failed.
    #[error("store read failed: {0}")]
    Store(#[source] RepositoryError),

    /// The store broke its contract (e.g. two rows for one id), or the
    /// mutation lock was poisoned. Always fatal to the operation.
    #[error("integrity violation: {0}")]
    Integrity(String),
}

impl LedgerError {
    /// Whether the failure is a plain input rejection (nothing was written).
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            LedgerError::TransferFailed(_) | LedgerError::Store(_) | LedgerError::Integrity(_)
        )
    }
}

impl From<DomainError> for LedgerError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidAmount(msg) => LedgerError::InvalidAmount(msg),
            DomainError::NonPositiveTransfer(amount) => LedgerError::NonPositiveTransfer(amount),
            DomainError::SelfTransfer(id) => LedgerError::SelfTransfer(id),
            DomainError::InvalidName(name) => LedgerError::InvalidName(name),
            DomainError::InvalidId(msg) => LedgerError::InvalidId(msg),
            DomainError::AccountNotFound(id) => LedgerError::AccountNotFound(id),
            DomainError::InsufficientFunds {
                account,
                name,
                amount,
            } => LedgerError::InsufficientFunds {
                account,
                name,
                amount,
            },
        }
    }
}
