//! Editor access gate.
//!
//! Mutations are allowed only for session emails on a static allow-list.
//! There are no roles: an identity is either an editor or a visitor.

use std::collections::HashSet;

use crate::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    editors: HashSet<String>,
}

impl AccessGate {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let editors = emails
            .into_iter()
            .filter_map(|email| normalize(email.as_ref()))
            .collect();
        Self { editors }
    }

    /// Build from a comma-separated list, as found in `EDITOR_EMAILS`.
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Case-insensitive membership check on the trimmed address.
    pub fn permits(&self, email: &str) -> bool {
        normalize(email).is_some_and(|email| self.editors.contains(&email))
    }

    pub fn check(&self, email: &str) -> Result<(), CoreError> {
        if self.permits(email) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "This account is not allowed to modify listings".into(),
            ))
        }
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

fn normalize(email: &str) -> Option<String> {
    let email = email.trim();
    (!email.is_empty()).then(|| email.to_lowercase())
}
