//! Case-insensitive substring filter over a folder listing.
//!
//! # Invariants
//! - Matching never recurses; callers pass one folder's direct children.
//! - An empty term matches everything; whitespace in the term is significant.
//! - Input order is preserved.

use crate::model::node::{DocumentNode, NodeKind};

/// Filter options for name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    /// User query text, matched as typed.
    pub text: String,
    /// Optional kind filter.
    pub kind: Option<NodeKind>,
}

impl NameQuery {
    /// Creates a query matching both files and folders.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns whether one node passes this query.
    pub fn matches(&self, node: &DocumentNode) -> bool {
        if self.kind.is_some_and(|kind| kind != node.kind()) {
            return false;
        }
        self.text.is_empty() || node.name.to_lowercase().contains(&self.text.to_lowercase())
    }
}

/// Keeps nodes whose name contains the query text, ignoring case.
pub fn filter_by_name(items: Vec<DocumentNode>, query: &NameQuery) -> Vec<DocumentNode> {
    items.into_iter().filter(|node| query.matches(node)).collect()
}
