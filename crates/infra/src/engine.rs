//! Balance-mutation engine (application-level orchestration).
//!
//! Every mutation runs the same pipeline:
//!
//! ```text
//! Validating ──▶ Resolving ──▶ Mutating ──▶ Committing ──▶ Committed
//!                                  │             │
//!                                  └─────────────┴──▶ RolledBack
//! ```
//!
//! - **Validating**: amount policy and sign/self-transfer checks (pure).
//! - **Resolving**: accounts are read through the [`AccountDirectory`].
//! - **Mutating**: replacement records and the history entry are staged.
//! - **Committing**: the repository unit of work is committed.
//!
//! Rejections in the first two stages never reach the store. Any repository
//! error in the last two triggers a rollback and surfaces as
//! [`LedgerError::TransferFailed`]; callers see either every write of the
//! operation or none of them.
//!
//! ## Serialization
//!
//! `transfer`, `deposit` and `withdraw` hold one engine-wide lock from
//! resolution to commit. Balances are read-modify-written as whole records
//! without version checks, so this lock is what prevents lost updates. Reads
//! (`history`, and the directory's `list` / `get` / `exists`) do not take it
//! and may observe the state before or after an in-flight mutation.

use ledger_accounts::{Account, Transfer, validate_amount};
use ledger_core::{AccountId, DomainError, Money};

use crate::directory::AccountDirectory;
use crate::error::LedgerError;
use crate::repository::{AccountRepository, RepositoryError};

/// Position of a mutation in its pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MutationStage {
    Validating,
    Resolving,
    Mutating,
    Committing,
    Committed,
    RolledBack,
}

impl MutationStage {
    /// `Committed` and `RolledBack` are absorbing.
    pub fn is_terminal(self) -> bool {
        matches!(self, MutationStage::Committed | MutationStage::RolledBack)
    }
}

/// Kind of balance mutation, used for logging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operation {
    Transfer,
    Deposit,
    Withdraw,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Transfer => "transfer",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
        }
    }
}

fn enter(operation: Operation, stage: MutationStage) {
    tracing::debug!(operation = operation.as_str(), stage = ?stage, "mutation stage");
}

/// Transfer / deposit / withdraw orchestration over an [`AccountRepository`].
///
/// The engine is an ordinary value: wrap it in an `Arc` to share it between
/// request handlers. Its lifetime bounds the lifetime of the mutation lock.
#[derive(Debug)]
pub struct TransferEngine<R> {
    directory: AccountDirectory<R>,
}

impl<R> TransferEngine<R> {
    pub fn new(repository: R) -> Self {
        Self {
            directory: AccountDirectory::new(repository),
        }
    }

    pub fn directory(&self) -> &AccountDirectory<R> {
        &self.directory
    }

    pub fn repository(&self) -> &R {
        self.directory.repository()
    }
}

impl<R> TransferEngine<R>
where
    R: AccountRepository,
{
    /// Move `amount` from one account to another.
    ///
    /// Persists the history entry, then the source, then the destination, then
    /// commits. Returns the history entry.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<Transfer, LedgerError> {
        let op = Operation::Transfer;
        enter(op, MutationStage::Validating);
        validate_amount(amount)?;
        if !amount.is_positive() {
            return Err(DomainError::NonPositiveTransfer(amount).into());
        }
        if from == to {
            return Err(DomainError::SelfTransfer(from).into());
        }

        let _guard = self.directory.lock_mutations()?;

        enter(op, MutationStage::Resolving);
        let destination = self.directory.get(to)?;
        let source = self.directory.get(from)?;
        if !source.covers(amount) {
            return Err(insufficient_funds(&source, amount));
        }

        let new_source = source.with_balance(debit(source.balance(), amount)?);
        let new_destination = destination.with_balance(credit(destination.balance(), amount)?);
        let record = Transfer::new(from, to, amount);

        self.persist(op, |repo| {
            repo.create_transfer(&record)?;
            repo.update_account(&new_source)?;
            repo.update_account(&new_destination)
        })?;

        tracing::info!(%from, %to, %amount, transfer_id = %record.id_typed(), "transferred");
        Ok(record)
    }

    /// Add `amount` to an account.
    ///
    /// Only the amount's precision is checked; zero and negative deposits are
    /// accepted as-is.
    pub fn deposit(&self, account_id: AccountId, amount: Money) -> Result<Transfer, LedgerError> {
        let op = Operation::Deposit;
        enter(op, MutationStage::Validating);
        validate_amount(amount)?;

        let _guard = self.directory.lock_mutations()?;

        enter(op, MutationStage::Resolving);
        let account = self.directory.get(account_id)?;

        let updated = account.with_balance(credit(account.balance(), amount)?);
        let record = Transfer::deposit(account_id, amount);

        self.persist(op, |repo| {
            repo.update_account(&updated)?;
            repo.create_transfer(&record)
        })?;

        tracing::info!(%account_id, %amount, transfer_id = %record.id_typed(), "deposited");
        Ok(record)
    }

    /// Take `amount` out of an account. The history entry carries `-amount`.
    pub fn withdraw(&self, account_id: AccountId, amount: Money) -> Result<Transfer, LedgerError> {
        let op = Operation::Withdraw;
        enter(op, MutationStage::Validating);
        validate_amount(amount)?;
        if !amount.is_positive() {
            return Err(DomainError::NonPositiveTransfer(amount).into());
        }

        let _guard = self.directory.lock_mutations()?;

        enter(op, MutationStage::Resolving);
        let account = self.directory.get(account_id)?;
        if !account.covers(amount) {
            return Err(insufficient_funds(&account, amount));
        }

        let updated = account.with_balance(debit(account.balance(), amount)?);
        let record = Transfer::withdrawal(account_id, amount);

        self.persist(op, |repo| {
            repo.update_account(&updated)?;
            repo.create_transfer(&record)
        })?;

        tracing::info!(%account_id, %amount, transfer_id = %record.id_typed(), "withdrew");
        Ok(record)
    }

    /// Every movement where the account is source or destination.
    ///
    /// The account is resolved first, so duplicate rows and store failures
    /// surface as such instead of as a missing account.
    pub fn history(&self, account_id: AccountId) -> Result<Vec<Transfer>, LedgerError> {
        self.directory.get(account_id)?;
        let history = self
            .repository()
            .get_history(account_id)
            .map_err(LedgerError::Store)?;
        tracing::debug!(%account_id, count = history.len(), "retrieved history");
        Ok(history)
    }

    /// Stage `writes`, then commit; roll back on any repository error.
    ///
    /// Must be called with the mutation lock held. Rollback is best-effort:
    /// its own failure is logged and the original cause is surfaced.
    fn persist<F>(&self, op: Operation, writes: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&R) -> Result<(), RepositoryError>,
    {
        let repo = self.repository();

        enter(op, MutationStage::Mutating);
        let outcome = writes(repo).and_then(|()| {
            enter(op, MutationStage::Committing);
            repo.commit()
        });

        match outcome {
            Ok(()) => {
                enter(op, MutationStage::Committed);
                Ok(())
            }
            Err(cause) => {
                if let Err(e) = repo.rollback() {
                    tracing::warn!(operation = op.as_str(), error = %e, "rollback failed");
                }
                enter(op, MutationStage::RolledBack);
                tracing::error!(operation = op.as_str(), error = %cause, "exception while transferring");
                Err(LedgerError::TransferFailed(cause))
            }
        }
    }
}

fn insufficient_funds(account: &Account, amount: Money) -> LedgerError {
    DomainError::insufficient_funds(account.id_typed(), account.name(), amount).into()
}

fn credit(balance: Money, amount: Money) -> Result<Money, LedgerError> {
    balance
        .checked_add(amount)
        .ok_or_else(|| DomainError::invalid_amount(format!("{balance} + {amount} overflows")).into())
}

fn debit(balance: Money, amount: Money) -> Result<Money, LedgerError> {
    balance
        .checked_sub(amount)
        .ok_or_else(|| DomainError::invalid_amount(format!("{balance} - {amount} overflows")).into())
}
