//! # Mailframe Editor
//!
//! Editing engine for Mailframe email designs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Design tree + JSON                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Post-effects (usage counters, cells)     │
//! │  - Snapshot undo/redo                       │
//! │  - Selection, drag & drop, observers        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Design → table-based HTML    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Design is source of truth**: HTML is a derived view
//! 2. **Mutations are data**: every edit is a validated, serializable value
//! 3. **One checkpoint per edit**: a batch undoes as a single step
//! 4. **Failed edits leave no trace**: neither design nor history changes
//!
//! ## Usage
//!
//! ```rust
//! use mailframe_editor::{Document, Mutation};
//! use mailframe_model::{ColumnPath, ContentType};
//!
//! let mut doc = Document::default();
//!
//! doc.apply(Mutation::PlaceComponent {
//!     column: ColumnPath::top(0, 0),
//!     index: None,
//!     content_type: ContentType::Button,
//! })
//! .unwrap();
//!
//! let html = doc.render().unwrap();
//! assert!(html.contains("Click Here"));
//!
//! assert!(doc.undo());
//! ```

mod document;
mod errors;
pub mod library;
pub mod merge_tags;
mod mutations;
mod options;
mod pipeline;
mod post_effects;
mod session;
mod undo_stack;

pub use document::Document;
pub use errors::EditorError;
pub use library::{ComponentDefinition, LayoutDefinition};
pub use merge_tags::{MergeTag, MergeTagCategory};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use options::{EditorOptions, DEFAULT_HISTORY_CAPACITY};
pub use pipeline::{ExportResult, Pipeline};
pub use post_effects::{NormalizeCells, PostEffect, PostEffectEngine, TrackContentUsage};
pub use session::{resolve_drop, DragSource, DropTarget, EditSession, EditorObserver, Selection};
pub use undo_stack::{Checkpoint, UndoStack};

// Re-export common types for convenience
pub use mailframe_compiler_html::{CompileOptions, ColumnWidthPolicy};
pub use mailframe_model::Design;
