//! Repository listing types

use serde::{Deserialize, Serialize};

/// An owned repository and its star count. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryNode {
    pub name: String,
    pub star_count: u64,
}

/// Repository listing accumulated across pages.
///
/// `total_count` is the upstream total of owned repositories and is never
/// affected by exclusion filtering. `has_next_page` and `end_cursor` describe
/// the last page that was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPage {
    pub nodes: Vec<RepositoryNode>,
    pub total_count: u64,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl RepositoryPage {
    /// Appends the nodes of a later page, keeping their order
    pub fn append_page(&mut self, page: RepositoryPage) {
        self.nodes.extend(page.nodes);
        self.has_next_page = page.has_next_page;
        self.end_cursor = page.end_cursor;
    }

    /// Whether every node on this page has at least one star
    pub fn all_starred(&self) -> bool {
        self.nodes.iter().all(|node| node.star_count != 0)
    }
}
