//! Editor configuration, loadable from JSON with every field optional.

use crate::merge_tags::{default_tags, MergeTag};
use mailframe_compiler_html::CompileOptions;
use serde::{Deserialize, Serialize};

/// Snapshots kept by the undo history unless configured otherwise
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Undo snapshots retained; the oldest is evicted past this
    pub history_capacity: usize,

    /// Start new editors with one single-column row
    pub seed_default_row: bool,

    /// Permit deleting the only remaining row
    pub allow_delete_last_row: bool,

    pub enable_merge_tags: bool,
    pub merge_tags: Vec<MergeTag>,

    /// Settings handed to the HTML renderer on export
    pub compile: CompileOptions,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed_default_row: true,
            allow_delete_last_row: false,
            enable_merge_tags: true,
            merge_tags: default_tags(),
            compile: CompileOptions::default(),
        }
    }
}

impl EditorOptions {
    /// Merge tags offered to authors, empty when the feature is off
    pub fn available_merge_tags(&self) -> &[MergeTag] {
        if self.enable_merge_tags {
            &self.merge_tags
        } else {
            &[]
        }
    }
}
