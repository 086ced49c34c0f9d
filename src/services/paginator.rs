//! Repository pagination
//!
//! The first request fetches every counter of the user together with the first
//! page of owned repositories; later requests fetch repositories only and their
//! nodes are appended to the first page in request order.
//!
//! Repositories are requested in descending stargazer order. Pagination relies
//! on that ordering: once a page contains a repository without stars, no later
//! page can add to the star total, so fetching stops there.

use crate::config::PaginationConfig;
use crate::error::StatsError;
use crate::github::GraphQLExecutor;
use crate::github::graphql::error::check_graphql_response;
use crate::github::graphql::graphql_types::{
    GraphQLPayload, GraphQLQuery, GraphQLResponse, RepositoriesResponse, StatsResponse,
};
use crate::github::graphql::stats::{StatsVariable, repositories_query, stats_query};
use crate::types::{RepositoryPage, UserSnapshot};

use tracing::{debug, info, warn};

/// Fetches the stats snapshot and accumulates repository pages
pub struct RepositoryPaginator<'a, E> {
    executor: &'a E,
    config: PaginationConfig,
}

impl<'a, E: GraphQLExecutor> RepositoryPaginator<'a, E> {
    pub fn new(executor: &'a E, config: PaginationConfig) -> Self {
        Self { executor, config }
    }

    /// Fetches the user snapshot, following repository pages while allowed.
    ///
    /// Every response is classified before it is merged; an error envelope on
    /// any page aborts the whole fetch.
    pub async fn paginate(&self, variables: &StatsVariable) -> Result<UserSnapshot, StatsError> {
        let payload = GraphQLPayload {
            query: GraphQLQuery(stats_query()),
            variables: Some(variables.clone()),
        };
        let response: GraphQLResponse<StatsResponse> =
            self.executor.execute_graphql("user_stats", payload).await?;
        check_graphql_response(&response)?;

        let user = response.data.and_then(|data| data.user).ok_or_else(|| {
            StatsError::upstream_data(format!(
                "No user in GraphQL stats response for {}",
                variables.login
            ))
        })?;
        let mut snapshot = UserSnapshot::from(user);

        let mut page_number = 1;
        let mut cursor = self.next_cursor(&snapshot.repositories, page_number);

        while let Some(after) = cursor {
            page_number += 1;
            debug!(
                "Fetching repository page {} for {}",
                page_number, variables.login
            );

            let payload = GraphQLPayload {
                query: GraphQLQuery(repositories_query()),
                variables: Some(variables.next_page(after)),
            };
            let response: GraphQLResponse<RepositoriesResponse> = self
                .executor
                .execute_graphql("user_repositories", payload)
                .await?;
            check_graphql_response(&response)?;

            let page: RepositoryPage = response
                .data
                .and_then(|data| data.user)
                .map(|user| user.repositories.into())
                .ok_or_else(|| {
                    StatsError::upstream_data(format!(
                        "No user in GraphQL repositories response for {}",
                        variables.login
                    ))
                })?;

            cursor = self.next_cursor(&page, page_number);
            snapshot.repositories.append_page(page);
        }

        info!(
            "Fetched {} repositories over {} page(s) for {}",
            snapshot.repositories.nodes.len(),
            page_number,
            variables.login
        );

        Ok(snapshot)
    }

    /// Cursor of the next page to request, or `None` to stop after `page`.
    ///
    /// Continues only when multi-page fetching is enabled, every node of the
    /// current page is starred, and upstream reports more pages.
    fn next_cursor(&self, page: &RepositoryPage, page_number: usize) -> Option<String> {
        if !self.config.fetch_multi_page_stars || !page.all_starred() || !page.has_next_page {
            return None;
        }
        if page.end_cursor.is_none() {
            warn!(
                "Repository page {} reports more pages without an end cursor; stopping",
                page_number
            );
        }
        page.end_cursor.clone()
    }
}
