pub mod aggregate;
pub mod commits;
pub mod paginator;
pub mod rank;
pub mod stats;

pub use aggregate::{aggregate, merged_percentage, star_total};
pub use commits::{CommitStrategy, all_time_commits};
pub use paginator::RepositoryPaginator;
pub use rank::{PercentileRank, RankCalculator, RankInput};
pub use stats::StatsService;
