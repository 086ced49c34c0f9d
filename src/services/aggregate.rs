//! Metric aggregation
//!
//! Folds a fetched snapshot and the reconciled commit total into the final
//! [`StatsRecord`]. Each derived field is computed independently.

use std::collections::HashSet;

use crate::error::StatsError;
use crate::services::rank::{RankCalculator, RankInput};
use crate::types::{RepositoryNode, StatsOptions, StatsRecord, UserSnapshot};

/// Builds the stats record.
///
/// Optional counters are read only when their inclusion flag is set; a flag
/// whose counter is missing from the snapshot is an upstream data error.
pub fn aggregate<R: RankCalculator>(
    snapshot: &UserSnapshot,
    total_commits: u64,
    exclusion_set: &HashSet<String>,
    options: &StatsOptions,
    ranker: &R,
) -> Result<StatsRecord, StatsError> {
    let mut stats = StatsRecord {
        name: snapshot.display_name().to_string(),
        total_prs: snapshot.total_prs,
        total_reviews: snapshot.total_reviews,
        total_commits,
        total_issues: snapshot.open_issues + snapshot.closed_issues,
        contributed_to: snapshot.contributed_to,
        total_stars: star_total(&snapshot.repositories.nodes, exclusion_set),
        ..Default::default()
    };

    if options.include_merged_pull_requests {
        let merged = required(snapshot.merged_prs, "merged pull requests")?;
        stats.total_prs_merged = merged;
        stats.merged_prs_percentage = merged_percentage(merged, snapshot.total_prs);
    }
    if options.include_discussions {
        stats.total_discussions_started =
            required(snapshot.discussions_started, "repository discussions")?;
    }
    if options.include_discussions_answers {
        stats.total_discussions_answered =
            required(snapshot.discussions_answered, "discussion answers")?;
    }

    stats.rank = ranker.rank(&RankInput {
        all_commits: options.include_all_commits,
        commits: stats.total_commits,
        prs: stats.total_prs,
        issues: stats.total_issues,
        reviews: stats.total_reviews,
        repos: snapshot.repositories.total_count,
        stars: stats.total_stars,
        followers: snapshot.followers,
    });

    Ok(stats)
}

/// Sum of stars over repositories whose name is not excluded
pub fn star_total(nodes: &[RepositoryNode], exclusion_set: &HashSet<String>) -> u64 {
    nodes
        .iter()
        .filter(|node| !exclusion_set.contains(&node.name))
        .map(|node| node.star_count)
        .sum()
}

/// Merged share of all pull requests in percent; zero when there are none
pub fn merged_percentage(merged: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (merged as f64 * 100.0) / total as f64
}

fn required(value: Option<u64>, field: &str) -> Result<u64, StatsError> {
    value.ok_or_else(|| {
        StatsError::upstream_data(format!("GraphQL stats response is missing {}", field))
    })
}
