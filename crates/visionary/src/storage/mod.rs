//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `visionary_core::storage`. The backend is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - without `sqlite`: in-memory backend, nothing is persisted
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p visionary
//! ```
//!
//! Build with the in-memory backend:
//! ```bash
//! cargo build -p visionary --no-default-features
//! ```

#[cfg(any(test, not(feature = "sqlite")))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, not(feature = "sqlite")))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
