//! Document tree domain model.
//!
//! # Responsibility
//! - Define canonical node structures used by repository and service layers.
//! - Define the nested read-only snapshot handed to presentation callers.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId`.
//! - Deletion is a hard removal; there are no tombstones in the forest.

pub mod node;
pub mod snapshot;
