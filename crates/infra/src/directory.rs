//! Account lookup, existence checks and creation.
//!
//! The directory never changes a balance. It owns the mutation lock that
//! serializes every write against the shared repository session; the
//! transfer engine borrows it through [`AccountDirectory::lock_mutations`].

use std::sync::{Mutex, MutexGuard};

use ledger_accounts::{Account, validate_name};
use ledger_core::{AccountId, DomainError};

use crate::error::LedgerError;
use crate::repository::AccountRepository;

#[derive(Debug)]
pub struct AccountDirectory<R> {
    repository: R,
    mutations: Mutex<()>,
}

impl<R> AccountDirectory<R> {
    /// Only the engine builds a directory, so every write against one
    /// repository goes through a single mutation lock.
    pub(crate) fn new(repository: R) -> Self {
        Self {
            repository,
            mutations: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Enter the engine-wide critical section.
    ///
    /// Blocks while another mutation is in flight. A poisoned lock means a
    /// previous mutation panicked half-way; that is reported, not recovered.
    pub(crate) fn lock_mutations(&self) -> Result<MutexGuard<'_, ()>, LedgerError> {
        self.mutations
            .lock()
            .map_err(|_| LedgerError::Integrity("mutation lock poisoned".to_string()))
    }
}

impl<R> AccountDirectory<R>
where
    R: AccountRepository,
{
    /// All known accounts, in repository order.
    pub fn list(&self) -> Result<Vec<Account>, LedgerError> {
        let accounts = self.repository.get_all_accounts().map_err(LedgerError::Store)?;
        tracing::debug!(count = accounts.len(), "retrieved accounts");
        Ok(accounts)
    }

    /// Single-account lookup.
    ///
    /// More than one row for the same id is a repository contract violation
    /// and is never resolved by picking one of them.
    pub fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        let mut rows = self.repository.get_account(id).map_err(LedgerError::Store)?;
        match rows.len() {
            0 => Err(DomainError::not_found(id).into()),
            1 => Ok(rows.remove(0)),
            n => {
                tracing::error!(account_id = %id, rows = n, "multiple results for account id");
                Err(LedgerError::Integrity(format!(
                    "multiple results for account ID {id}"
                )))
            }
        }
    }

    /// Whether `id` resolves to exactly one account. Never fails.
    pub fn exists(&self, id: AccountId) -> bool {
        match self.get(id) {
            Ok(_) => true,
            Err(LedgerError::AccountNotFound(_)) => false,
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "existence check failed");
                false
            }
        }
    }

    /// Open a new account with balance `0.00` under a validated name.
    pub fn create(&self, name: &str) -> Result<Account, LedgerError> {
        validate_name(name)?;
        let account = Account::open(name);

        let _guard = self.lock_mutations()?;
        let persisted = self
            .repository
            .create_account(&account)
            .and_then(|()| self.repository.commit());

        if let Err(cause) = persisted {
            if let Err(e) = self.repository.rollback() {
                tracing::warn!(error = %e, "rollback failed after account creation error");
            }
            tracing::error!(error = %cause, "could not create account");
            return Err(LedgerError::TransferFailed(cause));
        }

        tracing::info!(account_id = %account.id_typed(), "created account");
        Ok(account)
    }
}
