//! Accounts module (named balances and their movement history).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod policy;

pub use account::{Account, Transfer};
pub use policy::{validate_amount, validate_name};
