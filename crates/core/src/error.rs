//! Domain error model.

use thiserror::Error;

use crate::id::AccountId;
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level rejection.
///
/// Every variant is an input rejection: it is detected before anything is
/// written, so returning one of these leaves the store untouched. Storage
/// failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The amount carries more than two fractional digits, or does not fit
    /// the fixed-point representation.
    #[error("invalid amount of money: {0}")]
    InvalidAmount(String),

    /// A transfer of zero or a negative amount was requested.
    #[error("attempted to transfer non-positive amount of {0}")]
    NonPositiveTransfer(Money),

    /// Source and destination of a transfer are the same account.
    #[error("account {0} cannot transfer to itself")]
    SelfTransfer(AccountId),

    /// An account name contains characters outside the allowed set.
    #[error("illegal name: {0:?}")]
    InvalidName(String),

    /// The referenced account does not exist.
    #[error("no account with ID {0}")]
    AccountNotFound(AccountId),

    /// The source balance is lower than the outgoing amount.
    #[error("account '{name}' ({account}) has insufficient funds to transfer out {amount}")]
    InsufficientFunds {
        account: AccountId,
        name: String,
        amount: Money,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: AccountId) -> Self {
        Self::AccountNotFound(id)
    }

    pub fn insufficient_funds(account: AccountId, name: impl Into<String>, amount: Money) -> Self {
        Self::InsufficientFunds {
            account,
            name: name.into(),
            amount,
        }
    }
}
