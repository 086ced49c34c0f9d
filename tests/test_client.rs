//! Integration tests for the HTTP transport
//!
//! These tests run `GitHubClient` against a local mock server to verify
//! authentication headers, status text propagation, error envelopes and the
//! commit search request.


use github_stats::config::PaginationConfig;
use github_stats::error::StatsError;
use github_stats::github::graphql_types::{GraphQLPayload, GraphQLQuery, StatsResponse};
use github_stats::github::{CommitSearcher, GraphQLExecutor};
use github_stats::types::Username;
use github_stats::{StatsOptions, StatsService};
use mockito::{Matcher, Server};
use serde_json::{Value, json};
use test_util::{create_test_github_client, error_body, stats_body};

fn payload() -> GraphQLPayload<Value> {
    GraphQLPayload {
        query: GraphQLQuery("query { viewer { login } }".to_string()),
        variables: Some(json!({ "login": "octocat" })),
    }
}

#[tokio::test]
async fn test_graphql_sends_bearer_token_and_records_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", "bearer test-token")
        .match_body(Matcher::PartialJson(json!({ "variables": { "login": "octocat" } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(stats_body(&[("a", 3)], 1, false, None).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = create_test_github_client(&server.url());
    let response = client
        .execute_graphql::<_, StatsResponse>("user_stats", payload())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status_text, "OK");
    let user = response.data.unwrap().user.unwrap();
    assert_eq!(user.login, "octocat");
    assert_eq!(user.repositories.nodes.len(), 1);
}

#[tokio::test]
async fn test_error_envelope_is_returned_not_raised() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(error_body(Some("NOT_FOUND"), Some("Could not resolve to a User")).to_string())
        .create_async()
        .await;

    let client = create_test_github_client(&server.url());
    let response = client
        .execute_graphql::<_, StatsResponse>("user_stats", payload())
        .await
        .unwrap();

    let first = response.first_error().unwrap();
    assert_eq!(first.error_type.as_deref(), Some("NOT_FOUND"));
    assert_eq!(first.message.as_deref(), Some("Could not resolve to a User"));
}

#[tokio::test]
async fn test_error_envelope_keeps_failure_status_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(502)
        .with_header("content-type", "application/json")
        .with_body(error_body(None, Some("Something went wrong")).to_string())
        .create_async()
        .await;

    let client = create_test_github_client(&server.url());
    let response = client
        .execute_graphql::<_, StatsResponse>("user_stats", payload())
        .await
        .unwrap();

    assert_eq!(response.status_text, "Bad Gateway");
}

#[tokio::test]
async fn test_rate_limited_envelope_fails_when_retries_exhausted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(error_body(Some("RATE_LIMITED"), Some("API rate limit exceeded")).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = create_test_github_client(&server.url());
    let result = client
        .execute_graphql::<_, StatsResponse>("user_stats", payload())
        .await;

    mock.assert_async().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unauthorized_without_envelope_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Bad credentials"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_github_client(&server.url()).with_max_retry_count(3);
    let result = client
        .execute_graphql::<_, StatsResponse>("user_stats", payload())
        .await;

    mock.assert_async().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_commit_search_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/commits")
        .match_header("authorization", "token test-token")
        .match_header("accept", "application/vnd.github.cloak-preview")
        .match_query(Matcher::UrlEncoded(
            "q".to_string(),
            "author:octocat".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_count": 987, "incomplete_results": false, "items": []}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_github_client(&server.url());
    let username = Username::parse("octocat").unwrap();
    let response = client.search_commits(&username).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.total_count().unwrap(), 987);
}

#[tokio::test]
async fn test_service_reports_unknown_user() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            error_body(
                Some("NOT_FOUND"),
                Some("Could not resolve to a User with the login of 'nobody-here'."),
            )
            .to_string(),
        )
        .create_async()
        .await;

    let service = StatsService::new(
        create_test_github_client(&server.url()),
        PaginationConfig::default(),
    );
    let err = service
        .fetch_stats("nobody-here", &StatsOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.error_type(), "USER_NOT_FOUND");
    assert!(matches!(err, StatsError::UserNotFound(ref message) if message.contains("nobody-here")));
}

#[tokio::test]
async fn test_service_end_to_end_with_commit_search() {
    let mut server = Server::new_async().await;
    let graphql = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "login": "octocat", "first": 100 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(stats_body(&[("a", 12), ("b", 8)], 2, false, None).to_string())
        .expect(1)
        .create_async()
        .await;
    let search = server
        .mock("GET", "/search/commits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_count": 2500}"#)
        .expect(1)
        .create_async()
        .await;

    let service = StatsService::new(
        create_test_github_client(&server.url()),
        PaginationConfig::default(),
    );
    let options = StatsOptions {
        include_all_commits: true,
        ..Default::default()
    };
    let stats = service.fetch_stats("octocat", &options).await.unwrap();

    graphql.assert_async().await;
    search.assert_async().await;
    assert_eq!(stats.total_commits, 2500);
    assert_eq!(stats.total_stars, 20);
}
