//! Folder navigation and breadcrumb reconstruction.
//!
//! # Responsibility
//! - Track the folder currently opened by the session.
//! - Derive the root-to-folder breadcrumb path from `parent_id` links.
//!
//! # Invariants
//! - `breadcrumbs[0]` is always the synthetic root entry (`id == None`).
//! - The last breadcrumb always names the current folder.
//! - An unresolvable target falls back to root; stale paths are never kept.

use crate::model::node::{DocumentNode, NodeId};
use crate::repo::tree_repo::TreeRepository;
use serde::Serialize;
use std::collections::HashSet;

/// Default label of the synthetic root breadcrumb.
pub const DEFAULT_ROOT_LABEL: &str = "Home";

/// One breadcrumb entry. `id == None` marks the synthetic root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub id: Option<NodeId>,
    pub name: String,
}

/// Current-folder pointer plus its derived breadcrumb path.
#[derive(Debug, Clone)]
pub struct Navigator {
    root_label: String,
    current_folder_id: Option<NodeId>,
    breadcrumbs: Vec<Breadcrumb>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL)
    }
}

impl Navigator {
    /// Creates a navigator positioned at root.
    pub fn new(root_label: impl Into<String>) -> Self {
        let root_label = root_label.into();
        let breadcrumbs = vec![root_breadcrumb(&root_label)];
        Self {
            root_label,
            current_folder_id: None,
            breadcrumbs,
        }
    }

    pub fn current_folder_id(&self) -> Option<NodeId> {
        self.current_folder_id
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Opens `target` (`None` = root) and rebuilds the breadcrumb path.
    ///
    /// Targets that do not resolve to a folder reset the navigator to root.
    pub fn navigate_to<R: TreeRepository>(
        &mut self,
        repo: &R,
        target: Option<NodeId>,
    ) -> &[Breadcrumb] {
        match target.and_then(|folder_id| self.build_path(repo, folder_id)) {
            Some(path) => {
                self.current_folder_id = target;
                self.breadcrumbs = path;
            }
            None => self.reset_to_root(),
        }
        &self.breadcrumbs
    }

    /// Descends into `node` when it is a folder. Returns whether it did.
    pub fn enter_if_folder<R: TreeRepository>(&mut self, repo: &R, node: &DocumentNode) -> bool {
        if !node.is_folder() {
            return false;
        }
        self.navigate_to(repo, Some(node.id));
        self.current_folder_id == Some(node.id)
    }

    /// Re-derives breadcrumbs for the current folder after a tree change.
    pub fn refresh<R: TreeRepository>(&mut self, repo: &R) {
        let current = self.current_folder_id;
        self.navigate_to(repo, current);
    }

    pub fn reset_to_root(&mut self) {
        self.current_folder_id = None;
        self.breadcrumbs = vec![root_breadcrumb(&self.root_label)];
    }

    fn build_path<R: TreeRepository>(&self, repo: &R, folder_id: NodeId) -> Option<Vec<Breadcrumb>> {
        let folder = repo.get_node(folder_id).filter(|node| node.is_folder())?;

        let mut chain = vec![folder];
        let mut visited = HashSet::from([folder.id]);
        let mut cursor = folder.parent_id;
        while let Some(parent_id) = cursor {
            if !visited.insert(parent_id) {
                return None;
            }
            let parent = repo.get_node(parent_id)?;
            chain.push(parent);
            cursor = parent.parent_id;
        }

        let mut path = Vec::with_capacity(chain.len() + 1);
        path.push(root_breadcrumb(&self.root_label));
        path.extend(chain.into_iter().rev().map(|node| Breadcrumb {
            id: Some(node.id),
            name: node.name.clone(),
        }));
        Some(path)
    }
}

fn root_breadcrumb(label: &str) -> Breadcrumb {
    Breadcrumb {
        id: None,
        name: label.to_string(),
    }
}
