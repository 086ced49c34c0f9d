//! Commit count reconciliation
//!
//! Exactly one strategy produces the commit total of a request. The strategy is
//! selected once, up front, so that username validation for the REST path
//! happens before any request is sent.

use crate::error::StatsError;
use crate::github::CommitSearcher;
use crate::github::graphql::stats::ALL_TIME_YEARS;
use crate::types::{StatsOptions, UserSnapshot, Username};

/// How the commit total is counted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStrategy {
    /// Result count of the REST commit search for the author
    AllCommits(Username),
    /// Current contribution window plus every fixed calendar year
    AllTime,
    /// Current contribution window only
    Default,
}

impl CommitStrategy {
    /// Picks the strategy in priority order: all-commits, all-time, default.
    ///
    /// All-commits mode validates the username and fails with
    /// [`StatsError::InvalidUsername`] when it does not match.
    pub fn select(options: &StatsOptions, username: &str) -> Result<Self, StatsError> {
        if options.include_all_commits {
            Ok(Self::AllCommits(Username::parse(username)?))
        } else if options.include_all_time_commits {
            Ok(Self::AllTime)
        } else {
            Ok(Self::Default)
        }
    }

    pub fn is_all_commits(&self) -> bool {
        matches!(self, Self::AllCommits(_))
    }

    /// Produces the commit total for `snapshot`.
    ///
    /// Only [`CommitStrategy::AllCommits`] issues a request.
    pub async fn reconcile<S: CommitSearcher>(
        &self,
        snapshot: &UserSnapshot,
        searcher: &S,
    ) -> Result<u64, StatsError> {
        match self {
            Self::AllCommits(username) => {
                let response = searcher.search_commits(username).await?;
                let total = response.total_count()?;
                tracing::debug!("Commit search reported {} commits for {}", total, username);
                Ok(total)
            }
            Self::AllTime => Ok(all_time_commits(snapshot)),
            Self::Default => Ok(snapshot.current_commits),
        }
    }
}

/// Current window plus one total per year in [`ALL_TIME_YEARS`]; missing years count as zero
pub fn all_time_commits(snapshot: &UserSnapshot) -> u64 {
    let yearly: u64 = ALL_TIME_YEARS
        .map(|year| {
            snapshot
                .yearly_commits
                .get(&year)
                .copied()
                .flatten()
                .unwrap_or(0)
        })
        .sum();
    snapshot.current_commits + yearly
}
