//! Domain layer for the inventory listings service.
//!
//! Pure types and logic with no I/O: entry kinds and their typed records,
//! slug normalisation, form mapping, list presentation, and the editor
//! access gate.

pub mod access;
pub mod entry;
pub mod error;
pub mod form;
pub mod presenter;
pub mod slug;
pub mod types;
