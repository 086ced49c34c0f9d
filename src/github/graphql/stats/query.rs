use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::github::graphql::graphql_types::YEARLY_CONTRIBUTIONS_ALIAS_PREFIX;

/// Calendar years fetched as individual contribution windows for all-time commits
pub const ALL_TIME_YEARS: RangeInclusive<i32> = 2008..=2025;

/// Page size of the repositories connection (GitHub maximum)
pub const REPOSITORIES_PAGE_SIZE: u32 = 100;

/// Variables of the stats query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsVariable {
    pub login: String,
    pub first: u32,
    pub after: Option<String>,
    pub include_merged_pull_requests: bool,
    pub include_discussions: bool,
    pub include_discussions_answers: bool,
    pub include_all_time_commits: bool,
}

/// Variables of the repositories-only continuation query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoriesVariable {
    pub login: String,
    pub first: u32,
    pub after: Option<String>,
}

impl StatsVariable {
    /// Variables for the continuation page starting after `cursor`
    pub fn next_page(&self, cursor: String) -> RepositoriesVariable {
        RepositoriesVariable {
            login: self.login.clone(),
            first: self.first,
            after: Some(cursor),
        }
    }
}

fn repositories_field() -> &'static str {
    r#"
        repositories(first: $first, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}, after: $after) {
            totalCount
            nodes {
                name
                stargazers {
                    totalCount
                }
            }
            pageInfo {
                hasNextPage
                endCursor
            }
        }
    "#
}

fn yearly_contributions_fields() -> String {
    ALL_TIME_YEARS
        .rev()
        .map(|year| {
            format!(
                r#"
        {prefix}{year}: contributionsCollection(from: "{year}-01-01T00:00:00Z", to: "{year}-12-31T23:59:59Z") @include(if: $includeAllTimeCommits) {{
            totalCommitContributions
        }}"#,
                prefix = YEARLY_CONTRIBUTIONS_ALIAS_PREFIX,
                year = year
            )
        })
        .collect()
}

/// Query for the first page: every counter plus the first repositories page
pub fn stats_query() -> String {
    format!(
        r#"
    query userInfo($login: String!, $first: Int!, $after: String, $includeMergedPullRequests: Boolean!, $includeDiscussions: Boolean!, $includeDiscussionsAnswers: Boolean!, $includeAllTimeCommits: Boolean!) {{
        user(login: $login) {{
            name
            login
            contributionsCollection {{
                totalCommitContributions
                totalPullRequestReviewContributions
            }}
            {yearly}
            repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) {{
                totalCount
            }}
            pullRequests(first: 1) {{
                totalCount
            }}
            mergedPullRequests: pullRequests(states: MERGED) @include(if: $includeMergedPullRequests) {{
                totalCount
            }}
            openIssues: issues(states: OPEN) {{
                totalCount
            }}
            closedIssues: issues(states: CLOSED) {{
                totalCount
            }}
            followers {{
                totalCount
            }}
            repositoryDiscussions @include(if: $includeDiscussions) {{
                totalCount
            }}
            repositoryDiscussionComments(onlyAnswers: true) @include(if: $includeDiscussionsAnswers) {{
                totalCount
            }}
            {repositories}
        }}
    }}
    "#,
        yearly = yearly_contributions_fields(),
        repositories = repositories_field()
    )
}

/// Query for continuation pages: the repositories connection only
pub fn repositories_query() -> String {
    format!(
        r#"
    query userInfo($login: String!, $first: Int!, $after: String) {{
        user(login: $login) {{
            {repositories}
        }}
    }}
    "#,
        repositories = repositories_field()
    )
}
