//! Name search entry points.
//!
//! # Responsibility
//! - Filter one folder listing by a user-typed term.
//! - Keep matching rules inside core so every caller filters the same way.

pub mod name_filter;
