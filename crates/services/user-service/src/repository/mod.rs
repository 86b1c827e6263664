//! Repository layer for data access.
//!
//! Two interchangeable stores implement [`UserRepository`]: a process-local
//! map and a PostgreSQL table.

pub mod entities;
mod memory;
mod user_repository;

pub use memory::InMemoryUserStore;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
