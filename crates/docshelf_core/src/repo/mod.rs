//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the storage contract for the document forest.
//! - Isolate link bookkeeping from service/business orchestration.
//!
//! # Invariants
//! - Repository writes never leave a half-applied link update behind.
//! - Repository APIs return semantic errors (`NodeNotFound`, `NodeNotFolder`).

pub mod tree_repo;
