//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept the store as the first argument.

pub mod entry_repo;

pub use entry_repo::EntryRepo;
