//! Integration tests for commit reconciliation through the stats entry point


use github_stats::config::PaginationConfig;
use github_stats::error::StatsError;
use github_stats::{StatsOptions, StatsService};
use serde_json::json;
use test_util::{FakeGitHub, stats_body};

fn stats_with_years(years: impl IntoIterator<Item = (i32, u64)>) -> serde_json::Value {
    let mut body = stats_body(&[("a", 1)], 1, false, None);
    for (year, commits) in years {
        body["data"]["user"][format!("contributionsCollection{}", year)] =
            json!({ "totalCommitContributions": commits });
    }
    body
}

#[tokio::test]
async fn test_all_commits_takes_priority_over_all_time() {
    let fake = FakeGitHub::new()
        .with_graphql_response(stats_with_years((2008..=2025).map(|y| (y, 100))))
        .with_commit_search(json!({ "total_count": 4321 }));
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_commits: true,
        include_all_time_commits: true,
        ..Default::default()
    };
    let stats = service.fetch_stats("octocat", &options).await.unwrap();

    assert_eq!(stats.total_commits, 4321);
    assert_eq!(service.client().search_requests(), vec!["octocat"]);
}

#[tokio::test]
async fn test_all_time_sums_present_years_only() {
    // 2008-2012 are absent from the response, 2013-2025 carry 10 commits each.
    let fake = FakeGitHub::new().with_graphql_response(stats_with_years((2013..=2025).map(|y| (y, 10))));
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_time_commits: true,
        ..Default::default()
    };
    let stats = service.fetch_stats("octocat", &options).await.unwrap();

    // 13 years * 10 + 40 in the current window
    assert_eq!(stats.total_commits, 170);
    assert!(service.client().search_requests().is_empty());
    assert_eq!(
        service.client().graphql_requests()[0].variables["includeAllTimeCommits"],
        true
    );
}

#[tokio::test]
async fn test_all_time_treats_null_years_as_zero() {
    let mut body = stats_with_years([(2020, 7)]);
    body["data"]["user"]["contributionsCollection2019"] = serde_json::Value::Null;
    let fake = FakeGitHub::new().with_graphql_response(body);
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_time_commits: true,
        ..Default::default()
    };
    let stats = service.fetch_stats("octocat", &options).await.unwrap();

    assert_eq!(stats.total_commits, 47);
}

#[tokio::test]
async fn test_default_mode_uses_current_window() {
    let fake = FakeGitHub::new().with_graphql_response(stats_with_years([(2020, 500)]));
    let service = StatsService::new(fake, PaginationConfig::default());

    let stats = service
        .fetch_stats("octocat", &StatsOptions::default())
        .await
        .unwrap();

    assert_eq!(stats.total_commits, 40);
    assert!(service.client().search_requests().is_empty());
}

#[tokio::test]
async fn test_invalid_username_fails_before_any_request() {
    let fake = FakeGitHub::new()
        .with_graphql_response(stats_body(&[], 0, false, None))
        .with_commit_search(json!({ "total_count": 1 }));
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_commits: true,
        ..Default::default()
    };
    let err = service.fetch_stats("0-invalid-", &options).await.unwrap_err();

    assert!(matches!(err, StatsError::InvalidUsername(ref name) if name == "0-invalid-"));
    assert_eq!(service.client().request_count(), 0);
}

#[tokio::test]
async fn test_missing_search_count_is_fatal() {
    let fake = FakeGitHub::new()
        .with_graphql_response(stats_body(&[("a", 1)], 1, false, None))
        .with_commit_search(json!({ "incomplete_results": true }));
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_commits: true,
        ..Default::default()
    };
    let err = service.fetch_stats("octocat", &options).await.unwrap_err();

    assert!(matches!(err, StatsError::UpstreamData(_)));
    assert_eq!(err.error_type(), "GITHUB_REST_API_ERROR");
}

#[tokio::test]
async fn test_non_numeric_search_count_is_fatal() {
    let fake = FakeGitHub::new()
        .with_graphql_response(stats_body(&[("a", 1)], 1, false, None))
        .with_commit_search(json!({ "total_count": "unknown" }));
    let service = StatsService::new(fake, PaginationConfig::default());

    let options = StatsOptions {
        include_all_commits: true,
        ..Default::default()
    };
    let err = service.fetch_stats("octocat", &options).await.unwrap_err();

    assert!(matches!(err, StatsError::UpstreamData(_)));
}
