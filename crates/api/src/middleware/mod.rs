//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in identity from a Bearer session token.
//! - [`gate::RequireEditor`] -- Requires that identity to be on the editor allow-list.

pub mod auth;
pub mod gate;
