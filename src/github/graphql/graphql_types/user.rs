use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{RepositoryConnection, TotalCount};
use crate::types::UserSnapshot;

/// Alias prefix of the per-year contribution windows in the stats query
pub const YEARLY_CONTRIBUTIONS_ALIAS_PREFIX: &str = "contributionsCollection";

/// `data` of the stats query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub user: Option<UserStatsNode>,
}

/// `data` of the repositories-only continuation query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoriesResponse {
    pub user: Option<UserRepositoriesNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRepositoriesNode {
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsNode {
    pub name: Option<String>,
    pub login: String,
    pub contributions_collection: ContributionsCollection,
    pub repositories_contributed_to: TotalCount,
    pub pull_requests: TotalCount,
    pub merged_pull_requests: Option<TotalCount>,
    pub open_issues: TotalCount,
    pub closed_issues: TotalCount,
    pub followers: TotalCount,
    pub repository_discussions: Option<TotalCount>,
    pub repository_discussion_comments: Option<TotalCount>,
    pub repositories: RepositoryConnection,
    /// `contributionsCollection<YEAR>` aliases, present only when all-time
    /// commits were requested
    #[serde(flatten)]
    pub yearly_contributions: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    #[serde(default)]
    pub total_commit_contributions: u64,
    #[serde(default)]
    pub total_pull_request_review_contributions: u64,
}

impl UserStatsNode {
    /// Per-year commit totals keyed by calendar year.
    ///
    /// A year whose alias is null or lacks a numeric total maps to `None`.
    pub fn yearly_commit_contributions(&self) -> BTreeMap<i32, Option<u64>> {
        self.yearly_contributions
            .iter()
            .filter_map(|(key, value)| {
                let year = key
                    .strip_prefix(YEARLY_CONTRIBUTIONS_ALIAS_PREFIX)?
                    .parse::<i32>()
                    .ok()?;
                let total = value
                    .get("totalCommitContributions")
                    .and_then(|v| v.as_u64());
                Some((year, total))
            })
            .collect()
    }
}

impl From<UserStatsNode> for UserSnapshot {
    fn from(node: UserStatsNode) -> Self {
        let yearly_commits = node.yearly_commit_contributions();
        Self {
            login: node.login,
            name: node.name,
            current_commits: node.contributions_collection.total_commit_contributions,
            total_reviews: node
                .contributions_collection
                .total_pull_request_review_contributions,
            yearly_commits,
            total_prs: node.pull_requests.total_count,
            merged_prs: node.merged_pull_requests.map(|c| c.total_count),
            open_issues: node.open_issues.total_count,
            closed_issues: node.closed_issues.total_count,
            followers: node.followers.total_count,
            discussions_started: node.repository_discussions.map(|c| c.total_count),
            discussions_answered: node.repository_discussion_comments.map(|c| c.total_count),
            contributed_to: node.repositories_contributed_to.total_count,
            repositories: node.repositories.into(),
        }
    }
}
