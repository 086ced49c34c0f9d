use serde::{Deserialize, Serialize};

use super::{PageInfo, TotalCount};
use crate::types::{RepositoryNode, RepositoryPage};

/// One page of the owner's repositories, ordered by stargazers descending
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<RepositoryStarNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryStarNode {
    pub name: String,
    pub stargazers: TotalCount,
}

impl From<RepositoryStarNode> for RepositoryNode {
    fn from(node: RepositoryStarNode) -> Self {
        Self {
            name: node.name,
            star_count: node.stargazers.total_count,
        }
    }
}

impl From<RepositoryConnection> for RepositoryPage {
    fn from(connection: RepositoryConnection) -> Self {
        Self {
            nodes: connection.nodes.into_iter().map(Into::into).collect(),
            total_count: connection.total_count,
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        }
    }
}
