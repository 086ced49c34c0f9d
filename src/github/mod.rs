pub mod client;
pub mod error;
pub mod graphql;
pub mod search;

pub use client::{CommitSearcher, GitHubClient, GraphQLExecutor};
pub use graphql::graphql_types;
