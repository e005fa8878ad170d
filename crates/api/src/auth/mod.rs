//! Session token verification.
//!
//! Sign-in happens at an external identity provider, which issues HS256
//! session tokens signed with a secret shared with this service.

pub mod jwt;
