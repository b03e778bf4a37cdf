//! Nested, serializable view of the forest.

use crate::model::node::{FileType, NodeId, NodeKind, ProcessingStatus};
use serde::Serialize;

/// Whole-forest snapshot in root order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub roots: Vec<SnapshotNode>,
}

impl TreeSnapshot {
    /// Total number of nodes in the snapshot.
    pub fn len(&self) -> usize {
        self.roots.iter().map(SnapshotNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// One node with its children materialized inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_status: Option<ProcessingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    /// `None` for files, `Some` (possibly empty) for folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SnapshotNode>>,
}

impl SnapshotNode {
    fn subtree_len(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(SnapshotNode::subtree_len)
            .sum::<usize>()
    }
}
