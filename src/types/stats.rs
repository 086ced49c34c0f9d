//! Stats snapshot and output record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RepositoryPage;

/// Every counter fetched for a user in one pass, with the repository listing
/// accumulated across pages.
///
/// Optional counters are `None` when their inclusion flag was off and the
/// field was therefore never requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub login: String,
    pub name: Option<String>,
    /// Commit contributions in the current contribution window
    pub current_commits: u64,
    pub total_reviews: u64,
    /// Commit contributions per fixed calendar year; absent or null years map to `None`
    pub yearly_commits: BTreeMap<i32, Option<u64>>,
    pub total_prs: u64,
    pub merged_prs: Option<u64>,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub followers: u64,
    pub discussions_started: Option<u64>,
    pub discussions_answered: Option<u64>,
    pub contributed_to: u64,
    pub repositories: RepositoryPage,
}

impl UserSnapshot {
    /// Display name, falling back to the login when absent or empty
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.login,
        }
    }
}

/// Letter grade and percentile produced by the ranking collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    pub level: String,
    pub percentile: f64,
}

impl Default for Rank {
    fn default() -> Self {
        Self {
            level: "C".to_string(),
            percentile: 100.0,
        }
    }
}

/// Final metrics for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub name: String,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    #[serde(rename = "totalPRsMerged")]
    pub total_prs_merged: u64,
    #[serde(rename = "mergedPRsPercentage")]
    pub merged_prs_percentage: f64,
    pub total_reviews: u64,
    pub total_commits: u64,
    pub total_issues: u64,
    pub total_stars: u64,
    pub total_discussions_started: u64,
    pub total_discussions_answered: u64,
    pub contributed_to: u64,
    pub rank: Rank,
}
