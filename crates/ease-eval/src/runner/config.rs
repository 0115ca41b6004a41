//! Batch run configuration

use serde::{Deserialize, Serialize};

use crate::cases::EvalCase;

/// Configuration for batch runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Keep going after a case errors
    #[serde(default = "default_continue_on_error")]
    pub continue_on_error: bool,

    /// Specific case IDs to run (empty = all)
    #[serde(default)]
    pub case_ids: Vec<String>,

    /// Tags to filter by; a case runs if it has any of them (empty = all)
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_continue_on_error() -> bool {
    true
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            continue_on_error: default_continue_on_error(),
            case_ids: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl EvalConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set specific case IDs
    pub fn with_case_ids(mut self, ids: Vec<String>) -> Self {
        self.case_ids = ids;
        self
    }

    /// Set tags to filter by
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Stop at the first case that errors
    pub fn fail_fast(mut self) -> Self {
        self.continue_on_error = false;
        self
    }

    /// Check whether a case passes the id and tag filters
    pub fn selects(&self, case: &EvalCase) -> bool {
        let id_ok = self.case_ids.is_empty() || self.case_ids.contains(&case.id);
        let tag_ok = self.tags.is_empty() || self.tags.iter().any(|t| case.has_tag(t));
        id_ok && tag_ok
    }
}
