//! In-memory storage backend.
//!
//! Stores all rows in ordered maps wrapped in `Arc<RwLock<_>>`. Used by the
//! handler tests and by builds without the `sqlite` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use visionary::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
