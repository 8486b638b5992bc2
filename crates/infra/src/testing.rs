//! Fault-injecting repository used by the engine and directory tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use ledger_accounts::{Account, Transfer};
use ledger_core::AccountId;

use crate::repository::{AccountRepository, InMemoryRepository, RepositoryError};

/// Wraps an [`InMemoryRepository`] and breaks it on demand.
#[derive(Debug, Default)]
pub(crate) struct FaultyRepository {
    inner: InMemoryRepository,
    /// 1-based index of the `update_account` call that fails.
    fail_update_on: Option<usize>,
    fail_transfer_insert: bool,
    fail_commit: bool,
    fail_rollback: bool,
    duplicate_rows: bool,
    updates: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl FaultyRepository {
    pub(crate) fn new(inner: InMemoryRepository) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub(crate) fn failing_update(mut self, nth: usize) -> Self {
        self.fail_update_on = Some(nth);
        self
    }

    pub(crate) fn failing_transfer_insert(mut self) -> Self {
        self.fail_transfer_insert = true;
        self
    }

    pub(crate) fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub(crate) fn failing_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    pub(crate) fn duplicating_rows(mut self) -> Self {
        self.duplicate_rows = true;
        self
    }

    pub(crate) fn inner(&self) -> &InMemoryRepository {
        &self.inner
    }

    pub(crate) fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub(crate) fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

impl AccountRepository for FaultyRepository {
    fn get_account(&self, id: AccountId) -> Result<Vec<Account>, RepositoryError> {
        let mut rows = self.inner.get_account(id)?;
        if self.duplicate_rows {
            rows.extend(rows.clone());
        }
        Ok(rows)
    }

    fn get_all_accounts(&self) -> Result<Vec<Account>, RepositoryError> {
        self.inner.get_all_accounts()
    }

    fn create_account(&self, account: &Account) -> Result<(), RepositoryError> {
        self.inner.create_account(account)
    }

    fn update_account(&self, account: &Account) -> Result<(), RepositoryError> {
        let call = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_update_on == Some(call) {
            return Err(RepositoryError::Unavailable(format!(
                "injected failure on update #{call}"
            )));
        }
        self.inner.update_account(account)
    }

    fn get_history(&self, account_id: AccountId) -> Result<Vec<Transfer>, RepositoryError> {
        self.inner.get_history(account_id)
    }

    fn create_transfer(&self, transfer: &Transfer) -> Result<(), RepositoryError> {
        if self.fail_transfer_insert {
            return Err(RepositoryError::Unavailable(
                "injected failure on history insert".to_string(),
            ));
        }
        self.inner.create_transfer(transfer)
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit {
            return Err(RepositoryError::Unavailable("injected commit failure".to_string()));
        }
        self.inner.commit()
    }

    fn rollback(&self) -> Result<(), RepositoryError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        // Staged writes are dropped even when the rollback call itself reports
        // an error, mirroring a store that lost its session.
        self.inner.rollback()?;
        if self.fail_rollback {
            return Err(RepositoryError::Unavailable("injected rollback failure".to_string()));
        }
        Ok(())
    }
}
