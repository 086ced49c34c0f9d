//! GitHub username validation
//!
//! A [`Username`] is only constructed for code paths that place the login in a
//! URL (the REST commit search). GraphQL requests pass the login as a query
//! variable and accept it unvalidated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Maximum length of a GitHub login
pub const MAX_USERNAME_LENGTH: usize = 39;

// Alphanumeric segments joined by single hyphens; no leading or trailing hyphen.
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:-?[A-Za-z0-9])*$").expect("Failed to compile username regex")
});

/// A login that passed the GitHub identifier check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validates `username` against the GitHub identifier pattern
    pub fn parse(username: &str) -> Result<Self, StatsError> {
        if username.len() > MAX_USERNAME_LENGTH || !USERNAME_REGEX.is_match(username) {
            tracing::warn!("Invalid username provided: {}", username);
            return Err(StatsError::InvalidUsername(username.to_string()));
        }
        Ok(Self(username.to_string()))
    }

    /// Get the username as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Username {
    type Error = StatsError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialEq<&str> for Username {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
