//! REST commit search
//!
//! The GraphQL API exposes no lifetime commit total, so all-commits mode asks
//! the commit search endpoint for the number of commits authored by the user.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Accept header required by the commit search endpoint
pub const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview";

/// Body of `GET /search/commits`
///
/// Only the result count is read; it is kept as raw JSON so a missing or
/// non-numeric value can be told apart from a genuine count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitSearchResponse {
    #[serde(default)]
    pub total_count: Option<serde_json::Value>,
}

impl CommitSearchResponse {
    /// Extracts the result count.
    ///
    /// Numbers and numeric strings are accepted; anything else is an
    /// upstream data error rather than a zero.
    pub fn total_count(&self) -> Result<u64, StatsError> {
        let count = match &self.total_count {
            Some(serde_json::Value::Number(number)) => number.as_u64(),
            Some(serde_json::Value::String(text)) => text.trim().parse::<u64>().ok(),
            _ => None,
        };
        count.ok_or_else(|| StatsError::upstream_data("Could not fetch total commits."))
    }
}

/// Search qualifier restricting results to commits authored by `login`
pub fn author_query(login: &str) -> String {
    format!("author:{}", login)
}
