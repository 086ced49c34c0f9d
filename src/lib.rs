/// Runtime configuration: defaults, TOML file and environment overrides
pub mod config;

/// Error taxonomy of the stats pipeline
pub mod error;

/// GitHub transport, GraphQL wire types, queries and response classification
pub mod github;

/// Pagination, commit reconciliation, aggregation and ranking
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;

pub use error::StatsError;
pub use services::StatsService;
pub use types::{StatsOptions, StatsRecord};
