//! Tree store construction options.
//!
//! # Responsibility
//! - Hold session-level knobs the host passes when opening a store.
//! - Accept the same options as JSON through serde with per-field defaults.

use crate::service::navigator::DEFAULT_ROOT_LABEL;
use serde::Deserialize;

/// Options applied when a `TreeStore` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Label of the synthetic root breadcrumb.
    pub root_label: String,
    /// Seed the store with the built-in sample workspace.
    pub seed_sample: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            seed_sample: false,
        }
    }
}

impl StoreOptions {
    /// Root label with blank values replaced by the default.
    pub fn effective_root_label(&self) -> &str {
        let trimmed = self.root_label.trim();
        if trimmed.is_empty() {
            DEFAULT_ROOT_LABEL
        } else {
            trimmed
        }
    }
}
