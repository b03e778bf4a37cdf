//! Core domain logic for DocShelf.
//! This crate is the single source of truth for document tree invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sample;
pub mod search;
pub mod service;
pub mod store;

pub use config::StoreOptions;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::node::{
    DocumentNode, FileAttributes, FileType, FolderAttributes, NodeContent, NodeId, NodeKind,
    ProcessingStatus,
};
pub use model::snapshot::{SnapshotNode, TreeSnapshot};
pub use repo::tree_repo::{InMemoryTreeRepository, TreeRepoError, TreeRepoResult, TreeRepository};
pub use sample::{seed_sample_workspace, SampleWorkspace};
pub use search::name_filter::{filter_by_name, NameQuery};
pub use service::navigator::{Breadcrumb, Navigator, DEFAULT_ROOT_LABEL};
pub use service::tree_service::{
    FileDraft, TreeErrorKind, TreeService, TreeServiceError, TreeServiceResult,
};
pub use store::TreeStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
