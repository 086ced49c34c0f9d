//! Error taxonomy for the stats pipeline
//!
//! Every failure that aborts a stats request is expressed as a [`StatsError`].
//! Upstream failures are classified into typed variants before any field of a
//! response is read, so callers can branch on the kind of failure instead of
//! parsing messages.

use thiserror::Error;

/// Fallback message used when the upstream error envelope carries neither a
/// recognised type nor a message.
pub const GRAPHQL_FALLBACK_MESSAGE: &str =
    "Something went wrong while trying to retrieve the stats data using the GraphQL API.";

/// Default message used when a user lookup fails without an upstream message.
pub const USER_NOT_FOUND_FALLBACK_MESSAGE: &str = "Could not fetch user.";

/// Errors produced by the stats pipeline
#[derive(Debug, Error)]
pub enum StatsError {
    /// Required input absent; raised before any network activity
    #[error("Missing params {}", format_params(.0))]
    MissingParameter(Vec<String>),

    /// Username does not match the GitHub identifier pattern
    #[error("Invalid username provided: '{0}'")]
    InvalidUsername(String),

    /// Upstream classified the user as not found
    #[error("{0}")]
    UserNotFound(String),

    /// Upstream reported a failure with a message
    #[error("{message}")]
    GraphQLMessage {
        message: String,
        /// Status text of the HTTP response carrying the error envelope
        code: String,
    },

    /// Upstream reported a failure without a usable message
    #[error("{0}")]
    GraphQL(String),

    /// A response was structurally valid but lacked a value the pipeline needs
    #[error("{0}")]
    UpstreamData(String),

    /// The transport could not obtain a response at all
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl StatsError {
    /// Creates a missing parameter error for the given parameter names
    pub fn missing<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingParameter(params.into_iter().map(Into::into).collect())
    }

    /// Creates an upstream data error
    pub fn upstream_data(message: impl Into<String>) -> Self {
        Self::UpstreamData(message.into())
    }

    /// Stable error code for this error.
    ///
    /// For [`StatsError::GraphQLMessage`] this is the upstream status text.
    pub fn error_type(&self) -> &str {
        match self {
            Self::MissingParameter(_) => "MISSING_PARAM",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::GraphQLMessage { code, .. } => code,
            Self::GraphQL(_) => "GRAPHQL_ERROR",
            Self::UpstreamData(_) => "GITHUB_REST_API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
        }
    }
}

fn format_params(params: &[String]) -> String {
    params
        .iter()
        .map(|p| format!("\"{}\"", p))
        .collect::<Vec<_>>()
        .join(", ")
}
