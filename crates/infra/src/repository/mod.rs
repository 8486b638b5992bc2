//! Record store boundary.
//!
//! The engine talks to storage only through [`AccountRepository`], a passive
//! create/read/update surface with an explicit unit of work
//! (`commit` / `rollback`). No business rules live behind this trait.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRepository;
pub use r#trait::{AccountRepository, RepositoryError};
