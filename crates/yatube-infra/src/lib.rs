//! # Yatube Infrastructure
//!
//! Concrete implementations of the ports defined in `yatube-core`.
//! This crate contains the storage backends, session tokens, password
//! hashing, and the rendered-page cache.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory storage only
//! - `postgres` - PostgreSQL storage via SeaORM

pub mod auth;
pub mod cache;
pub mod database;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::InMemoryStore;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};

#[cfg(feature = "postgres")]
pub use database::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};
