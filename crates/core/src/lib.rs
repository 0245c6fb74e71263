//! Functional core of the Visionary service.
//!
//! Holds the domain types shared by every storage backend and the HTTP
//! layer, the partial-update merge rules, and the repository contracts.
//! Nothing in this crate performs I/O.

pub mod profile;
pub mod serde;
pub mod storage;
