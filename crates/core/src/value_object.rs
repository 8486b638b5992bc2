//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two amounts of
/// `10.00` are the same amount, while two accounts holding `10.00` are still
/// two different accounts (see [`crate::Entity`]).
///
/// ```ignore
/// use ledger_core::{Money, ValueObject};
///
/// let a = Money::from_cents(1000);
/// let b = "10.0".parse::<Money>().unwrap();
/// assert_eq!(a, b); // equal by value, not by representation
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
