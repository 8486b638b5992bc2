//! `ledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the fixed-point `Money` type and the rejection taxonomy.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, TransferId};
pub use money::{CENT_SCALE, Money};
pub use value_object::ValueObject;
