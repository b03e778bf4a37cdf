//! Session-owned document tree store.
//!
//! # Responsibility
//! - Own the single forest of one session together with its navigator.
//! - Expose the full command/query surface used by presentation callers.
//! - Keep the navigator consistent with every successful mutation.
//!
//! # Invariants
//! - The forest is only reachable through this type's methods.
//! - The navigator never points at a removed folder.
//! - Breadcrumbs are rebuilt after rename/move so labels and paths are fresh.

use crate::config::StoreOptions;
use crate::model::node::{DocumentNode, NodeId, ProcessingStatus};
use crate::model::snapshot::TreeSnapshot;
use crate::repo::tree_repo::{InMemoryTreeRepository, TreeRepository};
use crate::sample::seed_sample_workspace;
use crate::search::name_filter::{filter_by_name, NameQuery};
use crate::service::navigator::{Breadcrumb, Navigator};
use crate::service::tree_service::{FileDraft, TreeService, TreeServiceError, TreeServiceResult};
use log::{info, warn};

/// Document tree store: forest + navigator for one session.
pub struct TreeStore<R: TreeRepository = InMemoryTreeRepository> {
    service: TreeService<R>,
    navigator: Navigator,
}

impl TreeStore<InMemoryTreeRepository> {
    /// Creates an empty in-memory store with default options.
    pub fn new() -> Self {
        Self::from_repository(InMemoryTreeRepository::new(), &StoreOptions::default())
    }

    /// Creates an in-memory store, seeding the sample workspace on request.
    pub fn with_options(options: &StoreOptions) -> TreeServiceResult<Self> {
        let mut store = Self::from_repository(InMemoryTreeRepository::new(), options);
        if options.seed_sample {
            seed_sample_workspace(&mut store)?;
        }
        Ok(store)
    }
}

impl Default for TreeStore<InMemoryTreeRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TreeRepository> TreeStore<R> {
    /// Wraps an existing repository; the navigator starts at root.
    pub fn from_repository(repo: R, options: &StoreOptions) -> Self {
        Self {
            service: TreeService::new(repo),
            navigator: Navigator::new(options.effective_root_label()),
        }
    }

    pub fn find_by_id(&self, node_id: NodeId) -> Option<&DocumentNode> {
        self.service.find_node(node_id)
    }

    /// Children of a folder, or root-level nodes for `None`.
    pub fn list_children_of(&self, folder_id: Option<NodeId>) -> TreeServiceResult<Vec<DocumentNode>> {
        self.service.list_children(folder_id)
    }

    /// Direct children of the navigator's current folder.
    pub fn current_folder_items(&self) -> Vec<DocumentNode> {
        self.service
            .list_children(self.navigator.current_folder_id())
            .or_else(|_| self.service.list_children(None))
            .unwrap_or_default()
    }

    /// Case-insensitive name search over the current folder's direct
    /// children. Subfolders are not searched.
    pub fn search(&self, term: &str) -> Vec<DocumentNode> {
        self.search_with(&NameQuery::new(term))
    }

    pub fn search_with(&self, query: &NameQuery) -> Vec<DocumentNode> {
        filter_by_name(self.current_folder_items(), query)
    }

    pub fn child_count(&self, folder_id: NodeId) -> TreeServiceResult<usize> {
        self.service.child_count(folder_id)
    }

    pub fn walk_depth_first(&self) -> Vec<&DocumentNode> {
        self.service.walk_depth_first()
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        self.service.snapshot()
    }

    pub fn len(&self) -> usize {
        self.service.repo().len()
    }

    pub fn is_empty(&self) -> bool {
        self.service.repo().is_empty()
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        self.navigator.breadcrumbs()
    }

    pub fn current_folder_id(&self) -> Option<NodeId> {
        self.navigator.current_folder_id()
    }

    pub fn create_folder(
        &mut self,
        parent_id: Option<NodeId>,
        name: impl Into<String>,
    ) -> TreeServiceResult<DocumentNode> {
        self.service.create_folder(parent_id, name)
    }

    pub fn create_file(
        &mut self,
        parent_id: Option<NodeId>,
        draft: FileDraft,
    ) -> TreeServiceResult<DocumentNode> {
        self.service.create_file(parent_id, draft)
    }

    pub fn rename(
        &mut self,
        node_id: NodeId,
        new_name: impl Into<String>,
    ) -> TreeServiceResult<DocumentNode> {
        let renamed = self.service.rename_node(node_id, new_name)?;
        self.navigator.refresh(self.service.repo());
        Ok(renamed)
    }

    pub fn set_processing_status(
        &mut self,
        node_id: NodeId,
        status: ProcessingStatus,
    ) -> TreeServiceResult<DocumentNode> {
        self.service.set_processing_status(node_id, status)
    }

    /// Deletes a node with its subtree and returns the removed ids.
    ///
    /// Resets the navigator to root when its folder was inside the subtree.
    pub fn delete(&mut self, node_id: NodeId) -> TreeServiceResult<Vec<NodeId>> {
        let navigator_inside = self
            .navigator
            .current_folder_id()
            .is_some_and(|current| self.service.is_within(current, node_id));

        let removed = self.service.delete_node(node_id)?;
        if navigator_inside {
            info!("event=navigator_reset module=store status=ok cause=delete node_id={node_id}");
            self.navigator.reset_to_root();
        } else {
            self.navigator.refresh(self.service.repo());
        }
        Ok(removed)
    }

    /// Moves a node under `destination` (`None` = root), appending it last.
    pub fn move_node(
        &mut self,
        node_id: NodeId,
        destination: Option<NodeId>,
    ) -> TreeServiceResult<DocumentNode> {
        let moved = self.service.move_node(node_id, destination)?;
        self.navigator.refresh(self.service.repo());
        Ok(moved)
    }

    /// Resolves a drag-and-drop gesture into a move.
    ///
    /// - `target == Some(dragged_id)` is rejected with `SelfDrop`.
    /// - A folder target receives the node.
    /// - A file target or the background (`None`) sends the node to the
    ///   current folder.
    pub fn drop_onto(
        &mut self,
        dragged_id: NodeId,
        target: Option<NodeId>,
    ) -> TreeServiceResult<DocumentNode> {
        let destination = self.resolve_drop_destination(dragged_id, target).inspect_err(|err| {
            warn!(
                "event=tree_drop module=store status=rejected kind={:?} node_id={dragged_id}",
                err.kind()
            )
        })?;
        self.move_node(dragged_id, destination)
    }

    /// Opens a folder (`None` = root) and returns the new breadcrumbs.
    pub fn navigate_to(&mut self, folder_id: Option<NodeId>) -> &[Breadcrumb] {
        self.navigator.navigate_to(self.service.repo(), folder_id)
    }

    /// Opens `node_id` if it is a folder. Returns whether navigation happened.
    pub fn enter_if_folder(&mut self, node_id: NodeId) -> bool {
        match self.service.find_node(node_id) {
            Some(node) => self.navigator.enter_if_folder(self.service.repo(), node),
            None => false,
        }
    }

    fn resolve_drop_destination(
        &self,
        dragged_id: NodeId,
        target: Option<NodeId>,
    ) -> TreeServiceResult<Option<NodeId>> {
        if target == Some(dragged_id) {
            return Err(TreeServiceError::SelfDrop(dragged_id));
        }
        let Some(target_id) = target else {
            return Ok(self.navigator.current_folder_id());
        };
        let target_node = self
            .service
            .find_node(target_id)
            .ok_or(TreeServiceError::NodeNotFound(target_id))?;
        if target_node.is_folder() {
            Ok(Some(target_id))
        } else {
            Ok(self.navigator.current_folder_id())
        }
    }
}
