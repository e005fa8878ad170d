//! Row models shared by the store backends.

pub mod stored_entry;
