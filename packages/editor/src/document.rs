//! # Document Handle
//!
//! A design together with its undo history and editor options.
//!
//! ## Lifecycle
//!
//! ```text
//! Seed/Load → Edit → Render/Export → Save
//!     ↓         ↓          ↓           ↓
//!  Design   Mutations    HTML        JSON
//! ```
//!
//! Every successful edit (single mutation, batch or load) is preceded by
//! exactly one history checkpoint. A failed edit leaves both the design and
//! the history untouched.

use crate::mutations::{Mutation, MutationResult};
use crate::options::EditorOptions;
use crate::post_effects::PostEffectEngine;
use crate::undo_stack::UndoStack;
use crate::EditorError;
use mailframe_compiler_html::compile_to_html;
use mailframe_model::{deserialize, serialize, Design};
use tracing::debug;

/// Editable email design
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each change)
    pub version: u64,

    design: Design,
    history: UndoStack,
    effects: PostEffectEngine,
    options: EditorOptions,
}

impl Document {
    /// New document, seeded with one row unless the options say otherwise
    pub fn new(options: EditorOptions) -> Self {
        let design = if options.seed_default_row {
            Design::seeded()
        } else {
            Design::new()
        };
        Self::from_design(design, options)
    }

    /// Wrap an existing design (no history)
    pub fn from_design(design: Design, options: EditorOptions) -> Self {
        Self {
            version: 0,
            design,
            history: UndoStack::with_capacity(options.history_capacity),
            effects: PostEffectEngine::new(),
            options,
        }
    }

    /// Parse a saved design (no history)
    pub fn from_json(source: &str, options: EditorOptions) -> Result<Self, EditorError> {
        Ok(Self::from_design(deserialize(source)?, options))
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a mutation and its post-effects as one undo step
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let description = mutation.name();
        self.apply_batch(vec![mutation], description)
    }

    /// Apply several mutations atomically as one undo step.
    ///
    /// If any mutation fails the design is restored and nothing is recorded.
    pub fn apply_batch(
        &mut self,
        mutations: Vec<Mutation>,
        description: &str,
    ) -> Result<MutationResult, EditorError> {
        let before = self.design.clone();
        let mut applied = Vec::new();
        let mut selection = None;

        for mutation in mutations {
            match self
                .effects
                .apply_with_effects(mutation, &mut self.design, &self.options)
            {
                Ok((mut effects, moved)) => {
                    applied.append(&mut effects);
                    if moved.is_some() {
                        selection = moved;
                    }
                }
                Err(err) => {
                    self.design = before;
                    return Err(err.into());
                }
            }
        }

        self.history.checkpoint(before, description);
        self.version += 1;
        debug!(version = self.version, description, "applied edit");

        Ok(MutationResult {
            version: self.version,
            applied,
            selection,
        })
    }

    /// Step back one edit; false if there is no history
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.design);
        if undone {
            self.version += 1;
        }
        undone
    }

    /// Re-apply the last undone edit; false if there is none
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.design);
        if redone {
            self.version += 1;
        }
        redone
    }

    /// Replace the whole design (undoable)
    pub fn load(&mut self, design: Design) {
        let before = std::mem::replace(&mut self.design, design);
        self.history.checkpoint(before, "Load design");
        self.version += 1;
    }

    /// Replace the whole design from JSON; on error nothing changes
    pub fn load_json(&mut self, source: &str) -> Result<(), EditorError> {
        let design = deserialize(source)?;
        self.load(design);
        Ok(())
    }

    /// Current design as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serialize(&self.design)?)
    }

    /// Render the current design with the configured compile options
    pub fn render(&self) -> Result<String, EditorError> {
        Ok(compile_to_html(&self.design, &self.options.compile)?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
