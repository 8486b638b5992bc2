use serde::{Deserialize, Serialize};

use ledger_core::{AccountId, Entity, Money, TransferId};

/// A named balance.
///
/// Balances change only through full-record replacement
/// ([`Account::with_balance`]); there is no in-place delta operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Money,
}

impl Account {
    /// Build an account, generating an identity when none is supplied.
    pub fn new(id: Option<AccountId>, name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: id.unwrap_or_default(),
            name: name.into(),
            balance,
        }
    }

    /// A brand-new account: fresh identity, balance `0.00`.
    pub fn open(name: impl Into<String>) -> Self {
        Self::new(None, name, Money::zero())
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Replacement record carrying `balance`, kept at cent scale.
    pub fn with_balance(&self, balance: Money) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            balance: balance.at_cent_scale(),
        }
    }

    /// Whether an outgoing movement of `amount` is covered by the balance.
    pub fn covers(&self, amount: Money) -> bool {
        self.balance >= amount
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// History entry: one immutable balance movement.
///
/// Deposits and withdrawals are recorded against a single account
/// (`from == to`); withdrawals carry a negated amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    id: TransferId,
    from: AccountId,
    to: AccountId,
    amount: Money,
}

impl Transfer {
    /// A new movement with a fresh identity.
    pub fn new(from: AccountId, to: AccountId, amount: Money) -> Self {
        Self {
            id: TransferId::new(),
            from,
            to,
            amount,
        }
    }

    /// Movement recorded for a deposit into `account`.
    pub fn deposit(account: AccountId, amount: Money) -> Self {
        Self::new(account, account, amount)
    }

    /// Movement recorded for a withdrawal from `account` (amount negated).
    pub fn withdrawal(account: AccountId, amount: Money) -> Self {
        Self::new(account, account, -amount)
    }

    pub fn id_typed(&self) -> TransferId {
        self.id
    }

    pub fn from(&self) -> AccountId {
        self.from
    }

    pub fn to(&self) -> AccountId {
        self.to
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Whether `account` appears on either side of this movement.
    pub fn involves(&self, account: AccountId) -> bool {
        self.from == account || self.to == account
    }
}

impl Entity for Transfer {
    type Id = TransferId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
