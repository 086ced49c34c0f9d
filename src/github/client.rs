use crate::config::{DEFAULT_GRAPHQL_URL, DEFAULT_MAX_RETRY_COUNT, DEFAULT_REST_BASE_URL, StatsConfig};
use crate::github::error::ApiRetryableError;
use crate::github::graphql::graphql_types::{GraphQLPayload, GraphQLResponse};
use crate::github::search::{COMMIT_SEARCH_ACCEPT, CommitSearchResponse, author_query};
use crate::types::Username;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

const USER_AGENT_VALUE: &str = concat!("github-stats/", env!("CARGO_PKG_VERSION"));

/// Upstream error type returned inside a GraphQL envelope when the token is throttled
const RATE_LIMITED_ERROR_TYPE: &str = "RATE_LIMITED";

/// Issues a single GraphQL request.
///
/// Implementations own retries and timeouts. An error envelope in the body is
/// returned as part of the response, never as `Err`.
pub trait GraphQLExecutor {
    #[allow(async_fn_in_trait)]
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>>;
}

/// Issues the REST commit search for a validated username
pub trait CommitSearcher {
    #[allow(async_fn_in_trait)]
    async fn search_commits(&self, username: &Username) -> Result<CommitSearchResponse>;
}

#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: Option<String>,
    graphql_url: String,
    rest_base_url: String,
    max_retry_count: u32,
}

impl GitHubClient {
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let timeout_duration = timeout.unwrap_or_else(|| Duration::from_secs(10));
        let connection_timeout = if timeout_duration < Duration::from_secs(10) {
            std::cmp::max(timeout_duration, Duration::from_secs(1))
        } else {
            Duration::from_secs(30)
        };

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .connect_timeout(connection_timeout)
            .timeout(std::cmp::max(timeout_duration, Duration::from_secs(1)))
            .build()
            .context("Failed to build GitHub client")?;

        Ok(Self {
            http,
            token,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            max_retry_count: DEFAULT_MAX_RETRY_COUNT,
        })
    }

    /// Builds a client from resolved configuration
    pub fn from_config(config: &StatsConfig) -> Result<Self> {
        Ok(
            Self::new(config.github_token.clone(), Some(config.request_timeout()))?
                .with_endpoints(&config.graphql_url, &config.rest_base_url)
                .with_max_retry_count(config.max_retry_count),
        )
    }

    /// Overrides the GraphQL endpoint and REST base URL
    pub fn with_endpoints(mut self, graphql_url: &str, rest_base_url: &str) -> Self {
        self.graphql_url = graphql_url.to_string();
        self.rest_base_url = rest_base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_retry_count(mut self, max_retry_count: u32) -> Self {
        self.max_retry_count = max_retry_count;
        self
    }

    fn authorization(&self, scheme: &str) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{} {}", scheme, token))
    }
}

/// Whether a GraphQL body reports a throttled token in its first error entry
fn is_rate_limited(body: &serde_json::Value) -> bool {
    body.get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("type"))
        .and_then(|t| t.as_str())
        == Some(RATE_LIMITED_ERROR_TYPE)
}

fn has_error_envelope(body: &serde_json::Value) -> bool {
    body.get("errors")
        .and_then(|errors| errors.as_array())
        .is_some_and(|errors| !errors.is_empty())
}

impl GraphQLExecutor for GitHubClient {
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>> {
        let result = retry_with_backoff(query_name, Some(self.max_retry_count), || async {
            debug!(
                "Starting GraphQL request {} with variables: {}",
                query_name,
                serde_json::to_string(&payload.variables)
                    .unwrap_or_else(|_| "Invalid JSON".to_string())
            );

            let start_time = std::time::Instant::now();

            let mut request = self.http.post(&self.graphql_url).json(&payload);
            if let Some(authorization) = self.authorization("bearer") {
                request = request.header(AUTHORIZATION, authorization);
            }

            let response = request
                .send()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;

            info!(
                "GraphQL request {} completed with status {} in {:?}",
                query_name,
                status.as_u16(),
                start_time.elapsed()
            );

            let value: serde_json::Value = match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(e) => {
                    return Err(ApiRetryableError::from_status(status, &body).unwrap_or_else(
                        || {
                            ApiRetryableError::NonRetryable(format!(
                                "Failed to parse GraphQL response: {}",
                                e
                            ))
                        },
                    ));
                }
            };

            if is_rate_limited(&value) {
                warn!("GraphQL request {} was rate limited", query_name);
                return Err(ApiRetryableError::RateLimit);
            }

            // Error envelopes are handed to the caller for classification
            if !has_error_envelope(&value) {
                if let Some(retry_error) = ApiRetryableError::from_status(status, &body) {
                    return Err(retry_error);
                }
            }

            let mut response: GraphQLResponse<R> =
                serde_json::from_value(value).map_err(|e| {
                    ApiRetryableError::NonRetryable(format!(
                        "Failed to decode GraphQL response: {}",
                        e
                    ))
                })?;
            response.status_text = status.canonical_reason().unwrap_or_default().to_string();

            Ok(response)
        })
        .await?;

        Ok(result)
    }
}

impl CommitSearcher for GitHubClient {
    async fn search_commits(&self, username: &Username) -> Result<CommitSearchResponse> {
        let url = format!("{}/search/commits", self.rest_base_url);
        let query = author_query(username.as_str());

        retry_with_backoff("search_commits", Some(self.max_retry_count), || async {
            let mut request = self
                .http
                .get(&url)
                .query(&[("q", query.as_str())])
                .header(ACCEPT, COMMIT_SEARCH_ACCEPT);
            if let Some(authorization) = self.authorization("token") {
                request = request.header(AUTHORIZATION, authorization);
            }

            let response = request
                .send()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;

            if let Some(retry_error) = ApiRetryableError::from_status(status, &body) {
                return Err(retry_error);
            }

            serde_json::from_str::<CommitSearchResponse>(&body).map_err(|e| {
                ApiRetryableError::NonRetryable(format!(
                    "Failed to parse commit search response: {}",
                    e
                ))
            })
        })
        .await
        .with_context(|| format!("Commit search failed for {}", username))
    }
}

pub(crate) async fn retry_with_backoff<F, Fut, T>(
    operation_name: &str,
    max_retry_count: Option<u32>,
    execute_operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, ApiRetryableError>>,
{
    let mut attempt = 0;
    let max_retries = max_retry_count.unwrap_or(DEFAULT_MAX_RETRY_COUNT);

    loop {
        match execute_operation().await {
            Ok(result) => {
                tracing::debug!(
                    "Operation {} succeeded on attempt {}",
                    operation_name,
                    attempt + 1
                );
                return Ok(result);
            }
            Err(e) => {
                tracing::warn!(
                    "Operation {} failed on attempt {}: {}",
                    operation_name,
                    attempt + 1,
                    e,
                );

                let base_delay_ms = match e {
                    ApiRetryableError::NonRetryable(_) => {
                        tracing::warn!(
                            "Operation {} returned non-retryable error, failing immediately: {}",
                            operation_name,
                            e
                        );
                        return Err(anyhow::anyhow!(e));
                    }
                    ApiRetryableError::RateLimit => 1000_u64,
                    ApiRetryableError::Retryable(_) => 500_u64,
                };

                if attempt >= max_retries {
                    tracing::warn!(
                        "Retries exhausted for {} after {} attempts",
                        operation_name,
                        attempt + 1
                    );
                    return Err(anyhow::anyhow!(e));
                }

                attempt += 1;
                let backoff_delay = Duration::from_millis(
                    base_delay_ms.saturating_mul(2_u64.saturating_pow(attempt - 1)),
                );

                tracing::warn!(
                    "{} for {}, attempt {}/{}, backing off for {:?}",
                    e,
                    operation_name,
                    attempt,
                    max_retries,
                    backoff_delay
                );

                sleep(backoff_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_rate_limited_envelope_detection() {
        assert!(is_rate_limited(
            &json!({"errors": [{"type": "RATE_LIMITED", "message": "API rate limit exceeded"}]})
        ));
        assert!(!is_rate_limited(
            &json!({"errors": [{"type": "NOT_FOUND", "message": "Could not resolve"}]})
        ));
        assert!(!is_rate_limited(&json!({"data": {}})));
    }

    #[tokio::test]
    async fn test_retry_stops_on_non_retryable() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_with_backoff("test", Some(5), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiRetryableError::NonRetryable("bad request".to_string()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", Some(2), || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiRetryableError::Retryable("502".to_string()))
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
