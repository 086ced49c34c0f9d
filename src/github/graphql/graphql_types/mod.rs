pub mod pager;
pub mod repository;
pub mod user;

use serde::{Deserialize, Serialize};

pub use pager::*;
pub use repository::*;
pub use user::*;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLQuery(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLPayload<T: serde::Serialize> {
    pub query: GraphQLQuery,
    pub variables: Option<T>,
}

/// GraphQL response envelope as returned by the GitHub API
///
/// An `errors` entry is a regular part of the response, not a transport
/// failure; callers classify it before reading `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
    /// HTTP status text of the response that carried this body
    #[serde(skip)]
    pub status_text: String,
}

impl<T> GraphQLResponse<T> {
    /// First entry of the error envelope, if any
    pub fn first_error(&self) -> Option<&GraphQLError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: Option<String>,
    /// Upstream error marker such as `NOT_FOUND` or `RATE_LIMITED`
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub locations: Vec<serde_json::Value>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// `{ totalCount }` connection used for every counter in the stats query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCount {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
