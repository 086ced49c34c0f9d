//! Caller options for a stats request

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Independent switches accepted by the stats entry point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOptions {
    /// Count commits through the REST commit search instead of the contribution graph
    pub include_all_commits: bool,
    /// Repository names left out of the star total
    pub exclude_repo: Vec<String>,
    pub include_merged_pull_requests: bool,
    pub include_discussions: bool,
    pub include_discussions_answers: bool,
    /// Sum one contribution window per calendar year
    pub include_all_time_commits: bool,
}

impl StatsOptions {
    /// Exclusion set built from `exclude_repo`; matching is exact and case-sensitive
    pub fn exclusion_set(&self) -> HashSet<String> {
        self.exclude_repo.iter().cloned().collect()
    }
}
