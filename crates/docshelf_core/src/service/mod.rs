//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation callers decoupled from storage details.

pub mod navigator;
pub mod tree_service;
