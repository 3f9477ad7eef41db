// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use crate::error::NotionError;
use std::fmt;

/// Integration token sent as the bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new token, rejecting blank input.
    pub fn new(token: impl Into<String>) -> Result<Self, NotionError> {
        let token = token.into();
        let trimmed = token.trim();

        if trimmed.is_empty() {
            return Err(NotionError::MissingConfiguration(
                "auth token cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(NotionError::InvalidConfiguration(
                "auth token contains control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        format!("{}...", visible)
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact token in display
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.redacted()).finish()
    }
}
