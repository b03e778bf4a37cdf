//! Document tree repository contracts and in-memory arena implementation.
//!
//! # Responsibility
//! - Own the flat node table and the ordered root list.
//! - Keep parent/child link maintenance inside the repository boundary.
//!
//! # Invariants
//! - Every stored node is reachable from exactly one entry of the root list.
//! - A child id appears exactly once in its parent's `children`.
//! - Child listing is deterministic: insertion order, moved nodes appended.
//! - Every write validates all of its inputs before touching storage.

use crate::model::node::{DocumentNode, NodeContent, NodeId, ProcessingStatus};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by tree repository operations.
pub type TreeRepoResult<T> = Result<T, TreeRepoError>;

/// Errors from tree repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRepoError {
    /// Target node does not exist.
    NodeNotFound(NodeId),
    /// Target node exists but is not folder kind.
    NodeNotFolder(NodeId),
    /// Target node exists but is not file kind.
    NodeNotFile(NodeId),
    /// Insert would reuse an id already present in the forest.
    DuplicateId(NodeId),
    /// Stored links are inconsistent with the requested operation.
    InvalidData(String),
}

impl Display for TreeRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "tree node not found: {id}"),
            Self::NodeNotFolder(id) => write!(f, "tree node is not a folder: {id}"),
            Self::NodeNotFile(id) => write!(f, "tree node is not a file: {id}"),
            Self::DuplicateId(id) => write!(f, "tree node id already in use: {id}"),
            Self::InvalidData(message) => write!(f, "invalid tree data: {message}"),
        }
    }
}

impl Error for TreeRepoError {}

/// Repository interface for document tree storage.
pub trait TreeRepository {
    /// Inserts a prepared node, appending it to its parent (or root list).
    fn insert_node(&mut self, node: DocumentNode) -> TreeRepoResult<DocumentNode>;
    /// Loads one node by id.
    fn get_node(&self, node_id: NodeId) -> Option<&DocumentNode>;
    /// Lists children under one parent, `None` meaning root level.
    fn list_children(&self, parent_id: Option<NodeId>) -> TreeRepoResult<Vec<DocumentNode>>;
    /// Renames one node in place.
    fn rename_node(&mut self, node_id: NodeId, name: &str) -> TreeRepoResult<DocumentNode>;
    /// Updates the processing status of one file.
    fn set_processing_status(
        &mut self,
        node_id: NodeId,
        status: ProcessingStatus,
    ) -> TreeRepoResult<DocumentNode>;
    /// Detaches one node and appends it under another parent (or root).
    ///
    /// Does not check for cycles; callers must.
    fn move_node(
        &mut self,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
    ) -> TreeRepoResult<DocumentNode>;
    /// Removes one node with its whole subtree and returns the removed ids.
    fn delete_subtree(&mut self, node_id: NodeId) -> TreeRepoResult<Vec<NodeId>>;
    /// Root-level ids in display order.
    fn root_ids(&self) -> &[NodeId];
    /// Number of stored nodes.
    fn len(&self) -> usize;
    /// Returns whether the forest holds no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Arena-backed tree repository: flat id table plus ordered child-id lists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTreeRepository {
    nodes: HashMap<NodeId, DocumentNode>,
    roots: Vec<NodeId>,
}

impl InMemoryTreeRepository {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_folder(&self, node_id: NodeId) -> TreeRepoResult<()> {
        match self.nodes.get(&node_id) {
            None => Err(TreeRepoError::NodeNotFound(node_id)),
            Some(node) if node.is_folder() => Ok(()),
            Some(_) => Err(TreeRepoError::NodeNotFolder(node_id)),
        }
    }

    fn sibling_list_mut(&mut self, parent_id: Option<NodeId>) -> TreeRepoResult<&mut Vec<NodeId>> {
        match parent_id {
            None => Ok(&mut self.roots),
            Some(parent_id) => self
                .nodes
                .get_mut(&parent_id)
                .ok_or(TreeRepoError::NodeNotFound(parent_id))?
                .children_mut()
                .ok_or(TreeRepoError::NodeNotFolder(parent_id)),
        }
    }

    fn detach(&mut self, node_id: NodeId, parent_id: Option<NodeId>) -> TreeRepoResult<()> {
        let siblings = self.sibling_list_mut(parent_id)?;
        let before = siblings.len();
        siblings.retain(|id| *id != node_id);
        if siblings.len() + 1 != before {
            return Err(TreeRepoError::InvalidData(format!(
                "node {node_id} is not linked exactly once under its parent"
            )));
        }
        Ok(())
    }

    fn collect_subtree_ids(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut collected = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            collected.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children().iter().rev().copied());
            }
        }
        collected
    }

    fn load_required(&self, node_id: NodeId) -> TreeRepoResult<DocumentNode> {
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or(TreeRepoError::NodeNotFound(node_id))
    }
}

impl TreeRepository for InMemoryTreeRepository {
    fn insert_node(&mut self, node: DocumentNode) -> TreeRepoResult<DocumentNode> {
        if self.nodes.contains_key(&node.id) {
            return Err(TreeRepoError::DuplicateId(node.id));
        }
        if !node.children().is_empty() {
            return Err(TreeRepoError::InvalidData(format!(
                "new node {} must not arrive with children",
                node.id
            )));
        }
        if let Some(parent_id) = node.parent_id {
            self.ensure_folder(parent_id)?;
        }

        self.sibling_list_mut(node.parent_id)?.push(node.id);
        self.nodes.insert(node.id, node.clone());
        Ok(node)
    }

    fn get_node(&self, node_id: NodeId) -> Option<&DocumentNode> {
        self.nodes.get(&node_id)
    }

    fn list_children(&self, parent_id: Option<NodeId>) -> TreeRepoResult<Vec<DocumentNode>> {
        let ids = match parent_id {
            None => self.roots.as_slice(),
            Some(parent_id) => {
                self.ensure_folder(parent_id)?;
                self.nodes
                    .get(&parent_id)
                    .map(DocumentNode::children)
                    .unwrap_or_default()
            }
        };
        ids.iter().map(|id| self.load_required(*id)).collect()
    }

    fn rename_node(&mut self, node_id: NodeId, name: &str) -> TreeRepoResult<DocumentNode> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(TreeRepoError::NodeNotFound(node_id))?;
        node.name = name.to_string();
        node.touch();
        Ok(node.clone())
    }

    fn set_processing_status(
        &mut self,
        node_id: NodeId,
        status: ProcessingStatus,
    ) -> TreeRepoResult<DocumentNode> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(TreeRepoError::NodeNotFound(node_id))?;
        match &mut node.content {
            NodeContent::File(file) => file.processing_status = status,
            NodeContent::Folder(_) => {
                return Err(TreeRepoError::NodeNotFile(node_id));
            }
        }
        node.touch();
        Ok(node.clone())
    }

    fn move_node(
        &mut self,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
    ) -> TreeRepoResult<DocumentNode> {
        let old_parent_id = self
            .nodes
            .get(&node_id)
            .ok_or(TreeRepoError::NodeNotFound(node_id))?
            .parent_id;
        if let Some(parent_id) = new_parent_id {
            self.ensure_folder(parent_id)?;
        }

        self.detach(node_id, old_parent_id)?;
        self.sibling_list_mut(new_parent_id)?.push(node_id);

        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(TreeRepoError::NodeNotFound(node_id))?;
        node.parent_id = new_parent_id;
        node.touch();
        Ok(node.clone())
    }

    fn delete_subtree(&mut self, node_id: NodeId) -> TreeRepoResult<Vec<NodeId>> {
        let parent_id = self
            .nodes
            .get(&node_id)
            .ok_or(TreeRepoError::NodeNotFound(node_id))?
            .parent_id;

        let removed = self.collect_subtree_ids(node_id);
        self.detach(node_id, parent_id)?;
        for id in &removed {
            self.nodes.remove(id);
        }
        Ok(removed)
    }

    fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
