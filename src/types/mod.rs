//! Core type definitions for the stats pipeline
//!
//! Wire-format GraphQL nodes live under `github::graphql::graphql_types`; the
//! types here are what the pipeline operates on and returns.

pub mod options;
pub mod repository;
pub mod stats;
pub mod user;

pub use options::*;
pub use repository::*;
pub use stats::*;
pub use user::*;
