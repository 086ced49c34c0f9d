use tracing::info;

use crate::config::PaginationConfig;
use crate::error::StatsError;
use crate::github::graphql::stats::{REPOSITORIES_PAGE_SIZE, StatsVariable};
use crate::github::{CommitSearcher, GraphQLExecutor};
use crate::services::aggregate::aggregate;
use crate::services::commits::CommitStrategy;
use crate::services::paginator::RepositoryPaginator;
use crate::services::rank::{PercentileRank, RankCalculator};
use crate::types::{StatsOptions, StatsRecord};

/// Entry point of the stats pipeline
///
/// Each call allocates its own snapshot and record; requests are issued one at
/// a time in a fixed order (stats page, continuation pages, commit search).
pub struct StatsService<C, R = PercentileRank> {
    client: C,
    pagination: PaginationConfig,
    ranker: R,
}

impl<C> StatsService<C, PercentileRank> {
    /// Creates a service using the default percentile ranking
    pub fn new(client: C, pagination: PaginationConfig) -> Self {
        Self {
            client,
            pagination,
            ranker: PercentileRank,
        }
    }
}

impl<C, R> StatsService<C, R> {
    /// Replaces the ranking collaborator
    pub fn with_ranker<R2: RankCalculator>(self, ranker: R2) -> StatsService<C, R2> {
        StatsService {
            client: self.client,
            pagination: self.pagination,
            ranker,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C, R> StatsService<C, R>
where
    C: GraphQLExecutor + CommitSearcher,
    R: RankCalculator,
{
    /// Fetches and aggregates the stats of `username`.
    ///
    /// # Errors
    ///
    /// - [`StatsError::MissingParameter`] when `username` is empty
    /// - [`StatsError::InvalidUsername`] in all-commits mode, before any request
    /// - [`StatsError::UserNotFound`], [`StatsError::GraphQLMessage`] or
    ///   [`StatsError::GraphQL`] when any page carries an error envelope
    /// - [`StatsError::UpstreamData`] when a response lacks a required value
    /// - [`StatsError::Transport`] when no response could be obtained
    ///
    /// No partial record is returned on error.
    pub async fn fetch_stats(
        &self,
        username: &str,
        options: &StatsOptions,
    ) -> Result<StatsRecord, StatsError> {
        if username.trim().is_empty() {
            return Err(StatsError::missing(["username"]));
        }

        let strategy = CommitStrategy::select(options, username)?;

        let variables = StatsVariable {
            login: username.to_string(),
            first: REPOSITORIES_PAGE_SIZE,
            after: None,
            include_merged_pull_requests: options.include_merged_pull_requests,
            include_discussions: options.include_discussions,
            include_discussions_answers: options.include_discussions_answers,
            include_all_time_commits: options.include_all_time_commits,
        };

        let snapshot = RepositoryPaginator::new(&self.client, self.pagination)
            .paginate(&variables)
            .await?;

        let total_commits = strategy.reconcile(&snapshot, &self.client).await?;

        let stats = aggregate(
            &snapshot,
            total_commits,
            &options.exclusion_set(),
            options,
            &self.ranker,
        )?;

        info!(
            "Aggregated stats for {}: {} commits, {} stars, rank {}",
            username, stats.total_commits, stats.total_stars, stats.rank.level
        );

        Ok(stats)
    }
}
