//! Document tree use-case service.
//!
//! # Responsibility
//! - Validate tree hierarchy invariants above the repository layer.
//! - Provide folder/file create, rename, move, delete and list operations.
//!
//! # Invariants
//! - Parent node must exist and be a folder when provided.
//! - Move operations must not create parent-child cycles.
//! - Display names are trimmed and never blank.
//! - A rejected command leaves the forest untouched.

use crate::model::node::{
    DocumentNode, FileAttributes, FileType, NodeContent, NodeId, ProcessingStatus,
};
use crate::model::snapshot::{SnapshotNode, TreeSnapshot};
use crate::repo::tree_repo::{TreeRepoError, TreeRepository};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by tree service operations.
pub type TreeServiceResult<T> = Result<T, TreeServiceError>;

/// Coarse error category surfaced to presentation callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeErrorKind {
    /// Input rejected before lookup (blank name, wrong node kind).
    Validation,
    /// Referenced node or destination does not exist.
    NotFound,
    /// Move would nest a folder under itself or a descendant.
    Cycle,
    /// Degenerate request such as dropping a node onto itself.
    InvalidOperation,
}

/// Errors from tree service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeServiceError {
    /// Display name is blank after trim.
    InvalidDisplayName,
    /// Target node does not exist.
    NodeNotFound(NodeId),
    /// Parent or destination node does not exist.
    ParentNotFound(NodeId),
    /// Parent exists but is not folder kind.
    ParentMustBeFolder(NodeId),
    /// Target node exists but is not folder kind.
    NodeMustBeFolder(NodeId),
    /// Target node exists but is not file kind.
    NodeMustBeFile(NodeId),
    /// Move destination exists but is not folder kind.
    DestinationNotFolder(NodeId),
    /// Move operation would create a cycle.
    CycleDetected { node_id: NodeId, parent_id: NodeId },
    /// Node was dropped onto itself.
    SelfDrop(NodeId),
    /// Repository-level failure.
    Repo(TreeRepoError),
}

impl TreeServiceError {
    /// Maps this error onto its logical category.
    pub fn kind(&self) -> TreeErrorKind {
        match self {
            Self::InvalidDisplayName
            | Self::ParentMustBeFolder(_)
            | Self::NodeMustBeFolder(_)
            | Self::NodeMustBeFile(_) => TreeErrorKind::Validation,
            Self::NodeNotFound(_) | Self::ParentNotFound(_) | Self::DestinationNotFolder(_) => {
                TreeErrorKind::NotFound
            }
            Self::CycleDetected { .. } => TreeErrorKind::Cycle,
            Self::SelfDrop(_) | Self::Repo(_) => TreeErrorKind::InvalidOperation,
        }
    }

    /// Id of the node the error is about, when there is one.
    pub fn offending_id(&self) -> Option<NodeId> {
        match self {
            Self::InvalidDisplayName | Self::Repo(_) => None,
            Self::NodeNotFound(id)
            | Self::ParentNotFound(id)
            | Self::ParentMustBeFolder(id)
            | Self::NodeMustBeFolder(id)
            | Self::NodeMustBeFile(id)
            | Self::DestinationNotFolder(id)
            | Self::SelfDrop(id) => Some(*id),
            Self::CycleDetected { node_id, .. } => Some(*node_id),
        }
    }
}

impl Display for TreeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDisplayName => write!(f, "display name must not be blank"),
            Self::NodeNotFound(id) => write!(f, "tree node not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "tree parent not found: {id}"),
            Self::ParentMustBeFolder(id) => write!(f, "tree parent must be folder: {id}"),
            Self::NodeMustBeFolder(id) => write!(f, "tree node must be folder: {id}"),
            Self::NodeMustBeFile(id) => write!(f, "tree node must be file: {id}"),
            Self::DestinationNotFolder(id) => {
                write!(f, "move destination is not a folder: {id}")
            }
            Self::CycleDetected { node_id, parent_id } => write!(
                f,
                "move would create cycle: node {node_id} under parent {parent_id}"
            ),
            Self::SelfDrop(id) => write!(f, "node cannot be dropped onto itself: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TreeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeRepoError> for TreeServiceError {
    fn from(value: TreeRepoError) -> Self {
        match value {
            TreeRepoError::NodeNotFound(id) => Self::NodeNotFound(id),
            TreeRepoError::NodeNotFolder(id) => Self::NodeMustBeFolder(id),
            TreeRepoError::NodeNotFile(id) => Self::NodeMustBeFile(id),
            other => Self::Repo(other),
        }
    }
}

/// Input for file creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDraft {
    /// Base name without extension; the extension comes from `file_type`.
    pub base_name: String,
    pub file_type: FileType,
    /// Optional display size. Blank labels are dropped.
    pub size_label: Option<String>,
}

impl FileDraft {
    pub fn new(base_name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            base_name: base_name.into(),
            file_type,
            size_label: None,
        }
    }

    pub fn with_size_label(mut self, size_label: impl Into<String>) -> Self {
        self.size_label = Some(size_label.into());
        self
    }
}

/// Document tree service facade.
pub struct TreeService<R: TreeRepository> {
    repo: R,
}

impl<R: TreeRepository> TreeService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates one folder under optional parent.
    pub fn create_folder(
        &mut self,
        parent_id: Option<NodeId>,
        display_name: impl Into<String>,
    ) -> TreeServiceResult<DocumentNode> {
        self.create_folder_inner(parent_id, display_name.into())
            .inspect(|node| log_created(node))
            .inspect_err(|err| log_rejected("tree_create", err))
    }

    /// Creates one file under optional parent.
    ///
    /// The stored name is `<trimmed base>.<extension>` and the file starts
    /// in `ProcessingStatus::Processing`.
    pub fn create_file(
        &mut self,
        parent_id: Option<NodeId>,
        draft: FileDraft,
    ) -> TreeServiceResult<DocumentNode> {
        self.create_file_inner(parent_id, draft)
            .inspect(|node| log_created(node))
            .inspect_err(|err| log_rejected("tree_create", err))
    }

    /// Loads one node by id.
    pub fn find_node(&self, node_id: NodeId) -> Option<&DocumentNode> {
        self.repo.get_node(node_id)
    }

    /// Lists child nodes under optional parent.
    pub fn list_children(&self, parent_id: Option<NodeId>) -> TreeServiceResult<Vec<DocumentNode>> {
        if let Some(parent_id) = parent_id {
            self.ensure_parent_is_folder(parent_id)?;
        }
        self.repo.list_children(parent_id).map_err(Into::into)
    }

    /// Number of direct children of one folder.
    pub fn child_count(&self, folder_id: NodeId) -> TreeServiceResult<usize> {
        let folder = self
            .repo
            .get_node(folder_id)
            .ok_or(TreeServiceError::NodeNotFound(folder_id))?;
        if !folder.is_folder() {
            return Err(TreeServiceError::NodeMustBeFolder(folder_id));
        }
        Ok(folder.children().len())
    }

    /// Renames one node.
    pub fn rename_node(
        &mut self,
        node_id: NodeId,
        display_name: impl Into<String>,
    ) -> TreeServiceResult<DocumentNode> {
        self.rename_node_inner(node_id, display_name.into())
            .inspect(|node| info!("event=tree_rename module=tree status=ok node_id={}", node.id))
            .inspect_err(|err| log_rejected("tree_rename", err))
    }

    /// Records a new processing status for one file.
    pub fn set_processing_status(
        &mut self,
        node_id: NodeId,
        status: ProcessingStatus,
    ) -> TreeServiceResult<DocumentNode> {
        self.repo
            .set_processing_status(node_id, status)
            .map_err(TreeServiceError::from)
            .inspect(|node| {
                info!(
                    "event=tree_status module=tree status=ok node_id={} processing={:?}",
                    node.id, status
                )
            })
            .inspect_err(|err| log_rejected("tree_status", err))
    }

    /// Moves one node under optional parent, appending it last.
    pub fn move_node(
        &mut self,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
    ) -> TreeServiceResult<DocumentNode> {
        self.move_node_inner(node_id, new_parent_id)
            .inspect(|node| {
                info!(
                    "event=tree_move module=tree status=ok node_id={} parent_id={}",
                    node.id,
                    parent_label(node.parent_id)
                )
            })
            .inspect_err(|err| log_rejected("tree_move", err))
    }

    /// Deletes one node with its whole subtree and returns the removed ids.
    pub fn delete_node(&mut self, node_id: NodeId) -> TreeServiceResult<Vec<NodeId>> {
        self.repo
            .delete_subtree(node_id)
            .map_err(TreeServiceError::from)
            .inspect(|removed| {
                info!(
                    "event=tree_delete module=tree status=ok node_id={node_id} removed={}",
                    removed.len()
                )
            })
            .inspect_err(|err| log_rejected("tree_delete", err))
    }

    /// Returns whether `node_id` equals `ancestor_id` or lies beneath it.
    pub fn is_within(&self, node_id: NodeId, ancestor_id: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if current == ancestor_id {
                return true;
            }
            if !visited.insert(current) {
                return false;
            }
            cursor = self.repo.get_node(current).and_then(|node| node.parent_id);
        }
        false
    }

    /// Every node in pre-order: roots in order, each folder before its
    /// descendants, siblings in insertion order.
    pub fn walk_depth_first(&self) -> Vec<&DocumentNode> {
        let mut visited = Vec::with_capacity(self.repo.len());
        let mut stack: Vec<NodeId> = self.repo.root_ids().iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let Some(node) = self.repo.get_node(current) else {
                continue;
            };
            visited.push(node);
            stack.extend(node.children().iter().rev().copied());
        }
        visited
    }

    /// Builds a nested view of the whole forest.
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            roots: self
                .repo
                .root_ids()
                .iter()
                .filter_map(|id| self.snapshot_node(*id))
                .collect(),
        }
    }

    fn snapshot_node(&self, node_id: NodeId) -> Option<SnapshotNode> {
        let node = self.repo.get_node(node_id)?;
        let (file_type, processing_status, size_label, children) = match &node.content {
            NodeContent::File(file) => (
                Some(file.file_type),
                Some(file.processing_status),
                file.size_label.clone(),
                None,
            ),
            NodeContent::Folder(folder) => (
                None,
                None,
                None,
                Some(
                    folder
                        .children
                        .iter()
                        .filter_map(|id| self.snapshot_node(*id))
                        .collect(),
                ),
            ),
        };
        Some(SnapshotNode {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind(),
            created_at: node.created_at,
            file_type,
            processing_status,
            size_label,
            children,
        })
    }

    fn create_folder_inner(
        &mut self,
        parent_id: Option<NodeId>,
        display_name: String,
    ) -> TreeServiceResult<DocumentNode> {
        let normalized = normalize_display_name(display_name)?;
        if let Some(parent_id) = parent_id {
            self.ensure_parent_is_folder(parent_id)?;
        }
        self.repo
            .insert_node(DocumentNode::new_folder(parent_id, normalized))
            .map_err(Into::into)
    }

    fn create_file_inner(
        &mut self,
        parent_id: Option<NodeId>,
        draft: FileDraft,
    ) -> TreeServiceResult<DocumentNode> {
        let base = normalize_display_name(draft.base_name)?;
        if let Some(parent_id) = parent_id {
            self.ensure_parent_is_folder(parent_id)?;
        }
        let attributes = FileAttributes {
            file_type: draft.file_type,
            processing_status: ProcessingStatus::Processing,
            size_label: draft
                .size_label
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty()),
        };
        let name = draft.file_type.compose_name(&base);
        self.repo
            .insert_node(DocumentNode::new_file(parent_id, name, attributes))
            .map_err(Into::into)
    }

    fn rename_node_inner(
        &mut self,
        node_id: NodeId,
        display_name: String,
    ) -> TreeServiceResult<DocumentNode> {
        if self.repo.get_node(node_id).is_none() {
            return Err(TreeServiceError::NodeNotFound(node_id));
        }
        let normalized = normalize_display_name(display_name)?;
        self.repo
            .rename_node(node_id, normalized.as_str())
            .map_err(Into::into)
    }

    fn move_node_inner(
        &mut self,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
    ) -> TreeServiceResult<DocumentNode> {
        let node = self
            .repo
            .get_node(node_id)
            .ok_or(TreeServiceError::NodeNotFound(node_id))?;

        if let Some(parent_id) = new_parent_id {
            if parent_id == node_id {
                return Err(if node.is_folder() {
                    TreeServiceError::CycleDetected { node_id, parent_id }
                } else {
                    TreeServiceError::SelfDrop(node_id)
                });
            }

            self.ensure_destination_is_folder(parent_id)?;
            if self.would_create_cycle(node_id, parent_id)? {
                return Err(TreeServiceError::CycleDetected { node_id, parent_id });
            }
        }

        self.repo
            .move_node(node_id, new_parent_id)
            .map_err(Into::into)
    }

    fn ensure_parent_is_folder(&self, parent_id: NodeId) -> TreeServiceResult<()> {
        let parent = self
            .repo
            .get_node(parent_id)
            .ok_or(TreeServiceError::ParentNotFound(parent_id))?;
        if !parent.is_folder() {
            return Err(TreeServiceError::ParentMustBeFolder(parent_id));
        }
        Ok(())
    }

    fn ensure_destination_is_folder(&self, parent_id: NodeId) -> TreeServiceResult<()> {
        let parent = self
            .repo
            .get_node(parent_id)
            .ok_or(TreeServiceError::ParentNotFound(parent_id))?;
        if !parent.is_folder() {
            return Err(TreeServiceError::DestinationNotFolder(parent_id));
        }
        Ok(())
    }

    fn would_create_cycle(
        &self,
        node_id: NodeId,
        candidate_parent_id: NodeId,
    ) -> TreeServiceResult<bool> {
        let mut visited = HashSet::new();
        let mut cursor = Some(candidate_parent_id);
        while let Some(current) = cursor {
            if current == node_id {
                return Ok(true);
            }
            if !visited.insert(current) {
                return Ok(true);
            }

            let node = self
                .repo
                .get_node(current)
                .ok_or(TreeServiceError::ParentNotFound(current))?;
            cursor = node.parent_id;
        }
        Ok(false)
    }
}

fn normalize_display_name(value: String) -> TreeServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TreeServiceError::InvalidDisplayName);
    }
    Ok(trimmed.to_string())
}

fn parent_label(parent_id: Option<NodeId>) -> String {
    parent_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "root".to_string())
}

fn log_created(node: &DocumentNode) {
    info!(
        "event=tree_create module=tree status=ok kind={:?} node_id={} parent_id={}",
        node.kind(),
        node.id,
        parent_label(node.parent_id)
    );
}

// Names are user content; only ids and error categories are logged.
fn log_rejected(event: &str, err: &TreeServiceError) {
    warn!(
        "event={event} module=tree status=rejected kind={:?} node_id={}",
        err.kind(),
        err.offending_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
}
