//! Expected error-message fixtures
//!
//! The validation strings shown by the application belong to a system
//! outside this repository's control, so they are loaded from a JSON
//! fixture file at runtime rather than compiled in. Scenarios reference
//! them by dotted key (`signup.email_in_use`).

use std::path::Path;

use serde_json::Value;

use crate::error::{E2eError, E2eResult};

/// Expected error messages for the environment under test
#[derive(Debug, Clone)]
pub struct Messages {
    root: Value,
}

impl Messages {
    /// Load from a JSON fixture file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            root: serde_json::from_str(&content)?,
        })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Empty fixture; every lookup fails with a named error
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Default::default()),
        }
    }

    /// Look up a dotted key like `signup.email_in_use`
    pub fn lookup(&self, dotted: &str) -> Option<&str> {
        let mut node = &self.root;
        for part in dotted.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }

    /// Like [`lookup`](Self::lookup), but a missing key is an error the
    /// scenario reports instead of comparing against nothing
    pub fn require(&self, dotted: &str) -> E2eResult<&str> {
        self.lookup(dotted)
            .ok_or_else(|| E2eError::MissingMessage(dotted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_resolves_dotted_keys() {
        let messages = Messages::from_value(json!({
            "signup": { "email_in_use": "Email address is already in use" },
        }));
        assert_eq!(
            messages.lookup("signup.email_in_use"),
            Some("Email address is already in use")
        );
        assert_eq!(messages.lookup("signup.missing"), None);
        assert_eq!(messages.lookup("login.wrong_data"), None);
    }

    #[test]
    fn require_names_the_missing_key() {
        let err = Messages::empty().require("login.wrong_data").unwrap_err();
        assert!(err.to_string().contains("login.wrong_data"));
    }
}
