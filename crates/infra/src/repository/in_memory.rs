use std::sync::{Mutex, RwLock};

use ledger_accounts::{Account, Transfer};
use ledger_core::AccountId;

use super::r#trait::{AccountRepository, RepositoryError};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    history: Vec<Transfer>,
}

impl Tables {
    fn has_account(&self, id: AccountId) -> bool {
        self.accounts.iter().any(|a| a.id_typed() == id)
    }
}

#[derive(Debug, Clone)]
enum StagedWrite {
    CreateAccount(Account),
    UpdateAccount(Account),
    CreateTransfer(Transfer),
}

/// In-memory record store with a single staged unit of work.
///
/// Intended for tests/dev and the default server wiring. Reads only observe
/// committed rows; staged writes become visible atomically on `commit()`.
/// Rows are kept in insertion order, which is the order reads return them in.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    committed: RwLock<Tables>,
    staged: Mutex<Vec<StagedWrite>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already-committed accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            committed: RwLock::new(Tables {
                accounts: accounts.into_iter().collect(),
                history: Vec::new(),
            }),
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Number of writes waiting for `commit()`.
    pub fn staged_len(&self) -> Result<usize, RepositoryError> {
        self.staged
            .lock()
            .map(|s| s.len())
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    fn stage(&self, write: StagedWrite) -> Result<(), RepositoryError> {
        self.staged
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push(write);
        Ok(())
    }

    /// Whether `id` exists once the current unit of work is applied.
    fn account_visible_to_writer(
        tables: &Tables,
        staged: &[StagedWrite],
        id: AccountId,
    ) -> bool {
        tables.has_account(id)
            || staged.iter().any(|w| match w {
                StagedWrite::CreateAccount(a) => a.id_typed() == id,
                _ => false,
            })
    }
}

impl AccountRepository for InMemoryRepository {
    fn get_account(&self, id: AccountId) -> Result<Vec<Account>, RepositoryError> {
        let tables = self
            .committed
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(tables
            .accounts
            .iter()
            .filter(|a| a.id_typed() == id)
            .cloned()
            .collect())
    }

    fn get_all_accounts(&self) -> Result<Vec<Account>, RepositoryError> {
        let tables = self
            .committed
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.accounts.clone())
    }

    fn create_account(&self, account: &Account) -> Result<(), RepositoryError> {
        let id = account.id_typed();
        {
            let tables = self
                .committed
                .read()
                .map_err(|_| RepositoryError::LockPoisoned)?;
            let staged = self.staged.lock().map_err(|_| RepositoryError::LockPoisoned)?;
            if Self::account_visible_to_writer(&tables, &staged, id) {
                return Err(RepositoryError::Constraint(format!(
                    "duplicate account id {id}"
                )));
            }
        }
        self.stage(StagedWrite::CreateAccount(account.clone()))
    }

    fn update_account(&self, account: &Account) -> Result<(), RepositoryError> {
        let id = account.id_typed();
        {
            let tables = self
                .committed
                .read()
                .map_err(|_| RepositoryError::LockPoisoned)?;
            let staged = self.staged.lock().map_err(|_| RepositoryError::LockPoisoned)?;
            if !Self::account_visible_to_writer(&tables, &staged, id) {
                return Err(RepositoryError::Constraint(format!(
                    "no account row for id {id}"
                )));
            }
        }
        self.stage(StagedWrite::UpdateAccount(account.clone()))
    }

    fn get_history(&self, account_id: AccountId) -> Result<Vec<Transfer>, RepositoryError> {
        let tables = self
            .committed
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(tables
            .history
            .iter()
            .filter(|t| t.involves(account_id))
            .cloned()
            .collect())
    }

    fn create_transfer(&self, transfer: &Transfer) -> Result<(), RepositoryError> {
        {
            let tables = self
                .committed
                .read()
                .map_err(|_| RepositoryError::LockPoisoned)?;
            let staged = self.staged.lock().map_err(|_| RepositoryError::LockPoisoned)?;

            // Both ends must reference stored accounts.
            for side in [transfer.from(), transfer.to()] {
                if !Self::account_visible_to_writer(&tables, &staged, side) {
                    return Err(RepositoryError::Constraint(format!(
                        "transfer {} references unknown account {side}",
                        transfer.id_typed()
                    )));
                }
            }
        }
        self.stage(StagedWrite::CreateTransfer(transfer.clone()))
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        // Lock order is always committed -> staged.
        let mut tables = self
            .committed
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut staged = self.staged.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        for write in staged.drain(..) {
            match write {
                StagedWrite::CreateAccount(account) => tables.accounts.push(account),
                StagedWrite::UpdateAccount(account) => {
                    let id = account.id_typed();
                    if let Some(row) = tables.accounts.iter_mut().find(|a| a.id_typed() == id) {
                        *row = account;
                    }
                }
                StagedWrite::CreateTransfer(transfer) => tables.history.push(transfer),
            }
        }

        Ok(())
    }

    fn rollback(&self) -> Result<(), RepositoryError> {
        self.staged
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::Money;

    fn account(name: &str, cents: i64) -> Account {
        Account::open(name).with_balance(Money::from_cents(cents))
    }

    #[test]
    fn writes_are_invisible_until_commit() {
        let repo = InMemoryRepository::new();
        let a = account("Jane Doe", 0);

        repo.create_account(&a).unwrap();
        assert!(repo.get_account(a.id_typed()).unwrap().is_empty());
        assert_eq!(repo.staged_len().unwrap(), 1);

        repo.commit().unwrap();
        assert_eq!(repo.get_account(a.id_typed()).unwrap(), vec![a]);
        assert_eq!(repo.staged_len().unwrap(), 0);
    }

    #[test]
    fn staged_len_reports_poisoned_lock() {
        let repo = std::sync::Arc::new(InMemoryRepository::new());
        let poisoner = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.staged.lock().unwrap();
            panic!("writer died mid-stage");
        })
        .join();

        assert_eq!(repo.staged_len(), Err(RepositoryError::LockPoisoned));
    }

    #[test]
    fn rollback_discards_staged_writes() {
        let a = account("Jane Doe", 1000);
        let repo = InMemoryRepository::with_accounts([a.clone()]);

        repo.update_account(&a.with_balance(Money::from_cents(1))).unwrap();
        repo.create_transfer(&Transfer::deposit(a.id_typed(), Money::from_cents(1)))
            .unwrap();
        repo.rollback().unwrap();
        repo.commit().unwrap();

        assert_eq!(repo.get_account(a.id_typed()).unwrap(), vec![a.clone()]);
        assert!(repo.get_history(a.id_typed()).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_whole_record() {
        let a = account("Jane Doe", 1000);
        let repo = InMemoryRepository::with_accounts([a.clone()]);

        let updated = a.with_balance(Money::from_cents(900));
        repo.update_account(&updated).unwrap();
        repo.commit().unwrap();

        assert_eq!(repo.get_all_accounts().unwrap(), vec![updated]);
    }

    #[test]
    fn duplicate_create_is_a_constraint_violation() {
        let a = account("Jane Doe", 0);
        let repo = InMemoryRepository::with_accounts([a.clone()]);
        assert!(matches!(
            repo.create_account(&a),
            Err(RepositoryError::Constraint(_))
        ));
    }

    #[test]
    fn update_of_unknown_account_is_a_constraint_violation() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.update_account(&account("ghost", 0)),
            Err(RepositoryError::Constraint(_))
        ));
    }

    #[test]
    fn transfer_must_reference_known_accounts() {
        let a = account("Jane Doe", 0);
        let repo = InMemoryRepository::with_accounts([a.clone()]);
        let dangling = Transfer::new(a.id_typed(), AccountId::new(), Money::from_cents(1));
        assert!(matches!(
            repo.create_transfer(&dangling),
            Err(RepositoryError::Constraint(_))
        ));
    }

    #[test]
    fn staged_account_can_be_referenced_in_same_unit_of_work() {
        let repo = InMemoryRepository::new();
        let a = account("Jane Doe", 0);
        repo.create_account(&a).unwrap();
        repo.create_transfer(&Transfer::deposit(a.id_typed(), Money::zero()))
            .unwrap();
        repo.commit().unwrap();
        assert_eq!(repo.get_history(a.id_typed()).unwrap().len(), 1);
    }

    #[test]
    fn history_matches_either_side_in_insertion_order() {
        let a = account("a", 1000);
        let b = account("b", 0);
        let c = account("c", 0);
        let repo = InMemoryRepository::with_accounts([a.clone(), b.clone(), c.clone()]);

        let t1 = Transfer::new(a.id_typed(), b.id_typed(), Money::from_cents(100));
        let t2 = Transfer::new(c.id_typed(), a.id_typed(), Money::from_cents(50));
        let t3 = Transfer::new(b.id_typed(), c.id_typed(), Money::from_cents(10));
        for t in [&t1, &t2, &t3] {
            repo.create_transfer(t).unwrap();
        }
        repo.commit().unwrap();

        assert_eq!(repo.get_history(a.id_typed()).unwrap(), vec![t1, t2]);
        assert_eq!(repo.get_history(c.id_typed()).unwrap().len(), 2);
    }
}
