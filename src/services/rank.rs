//! Ranking collaborator
//!
//! Turns the final counters into a letter grade and a percentile. The pipeline
//! treats the calculator as a pure function behind [`RankCalculator`].

use crate::types::Rank;

/// Counters handed to the ranking function
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankInput {
    /// Whether commits were counted through the REST commit search
    pub all_commits: bool,
    pub commits: u64,
    pub prs: u64,
    pub issues: u64,
    pub reviews: u64,
    /// Unfiltered repository total
    pub repos: u64,
    /// Star total after exclusions
    pub stars: u64,
    pub followers: u64,
}

pub trait RankCalculator {
    fn rank(&self, input: &RankInput) -> Rank;
}

/// Weighted cumulative-distribution ranking.
///
/// Activity counters use an exponential CDF and popularity counters a
/// log-normal-like CDF, each normalised by a median. The repository count is
/// accepted but not scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileRank;

const COMMITS_MEDIAN: f64 = 250.0;
const ALL_COMMITS_MEDIAN: f64 = 1000.0;
const COMMITS_WEIGHT: f64 = 2.0;
const PRS_MEDIAN: f64 = 50.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_MEDIAN: f64 = 25.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_MEDIAN: f64 = 50.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;

const TOTAL_WEIGHT: f64 = COMMITS_WEIGHT
    + PRS_WEIGHT
    + ISSUES_WEIGHT
    + REVIEWS_WEIGHT
    + STARS_WEIGHT
    + FOLLOWERS_WEIGHT;

const THRESHOLDS: [f64; 9] = [1.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];
const LEVELS: [&str; 9] = ["S", "A+", "A", "A-", "B+", "B", "B-", "C+", "C"];

fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

impl RankCalculator for PercentileRank {
    fn rank(&self, input: &RankInput) -> Rank {
        let commits_median = if input.all_commits {
            ALL_COMMITS_MEDIAN
        } else {
            COMMITS_MEDIAN
        };

        let score = COMMITS_WEIGHT * exponential_cdf(input.commits as f64 / commits_median)
            + PRS_WEIGHT * exponential_cdf(input.prs as f64 / PRS_MEDIAN)
            + ISSUES_WEIGHT * exponential_cdf(input.issues as f64 / ISSUES_MEDIAN)
            + REVIEWS_WEIGHT * exponential_cdf(input.reviews as f64 / REVIEWS_MEDIAN)
            + STARS_WEIGHT * log_normal_cdf(input.stars as f64 / STARS_MEDIAN)
            + FOLLOWERS_WEIGHT * log_normal_cdf(input.followers as f64 / FOLLOWERS_MEDIAN);

        let percentile = (1.0 - score / TOTAL_WEIGHT) * 100.0;
        let level = THRESHOLDS
            .iter()
            .position(|threshold| percentile <= *threshold)
            .map(|index| LEVELS[index])
            .unwrap_or(LEVELS[LEVELS.len() - 1]);

        Rank {
            level: level.to_string(),
            percentile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_activity_is_lowest_grade() {
        let rank = PercentileRank.rank(&RankInput::default());
        assert_eq!(rank.level, "C");
        assert_eq!(rank.percentile, 100.0);
    }

    #[test]
    fn test_median_user_is_b_plus() {
        let rank = PercentileRank.rank(&RankInput {
            all_commits: false,
            commits: 250,
            prs: 50,
            issues: 25,
            reviews: 2,
            repos: 0,
            stars: 50,
            followers: 10,
        });
        // Every CDF evaluates to one half.
        assert!((rank.percentile - 50.0).abs() < 1e-9);
        assert_eq!(rank.level, "B+");
    }

    #[test]
    fn test_all_commits_raises_commit_median() {
        let input = RankInput {
            commits: 500,
            ..Default::default()
        };
        let default_mode = PercentileRank.rank(&input);
        let all_commits_mode = PercentileRank.rank(&RankInput {
            all_commits: true,
            ..input
        });
        assert!(all_commits_mode.percentile > default_mode.percentile);
    }

    #[test]
    fn test_highly_active_user_is_s() {
        let rank = PercentileRank.rank(&RankInput {
            all_commits: false,
            commits: 100_000,
            prs: 100_000,
            issues: 100_000,
            reviews: 100_000,
            repos: 100,
            stars: 10_000_000,
            followers: 10_000_000,
        });
        assert_eq!(rank.level, "S");
    }
}
