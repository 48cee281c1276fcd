//! # Edit Session Management
//!
//! Tracks one user's interactive state on top of a [`Document`]: what is
//! selected, what is being dragged, and who wants to hear about changes.
//!
//! Session operations are forgiving: an edit that does not apply (bad path,
//! forbidden shape) is logged at debug level and reported as `false`, with
//! no change to the design, history or selection.

use crate::library::{ComponentDefinition, LayoutDefinition};
use crate::mutations::Mutation;
use crate::pipeline::{ExportResult, Pipeline};
use crate::{Document, EditorError};
use mailframe_model::{ColumnPath, Content, ContentPath, Design};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the user has selected
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Row(usize),
    Content(ContentPath),
}

/// What is currently being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A new component from the library
    Component(ComponentDefinition),
    /// A column layout from the library
    Layout(LayoutDefinition),
    /// Existing content being repositioned
    Content(ContentPath),
}

/// Where a drag was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The gap before row `index` (`rows.len()` for the end)
    RowBoundary(usize),
    /// Onto a row as a whole
    Row(usize),
    /// Onto a column, appending
    Column(ColumnPath),
    /// Before position `index` of a column
    Content { column: ColumnPath, index: usize },
}

/// Hooks fired by a session; all optional
pub trait EditorObserver {
    /// Once, after the initial design is in place
    fn on_ready(&mut self, _design: &Design) {}

    /// After every applied edit, undo, redo or load
    fn on_change(&mut self, _design: &Design) {}

    fn on_save(&mut self, _design: &Design) {}

    fn on_export(&mut self, _result: &ExportResult) {}
}

/// Single edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    document: Document,

    selection: Selection,
    drag: Option<DragSource>,
    pipeline: Pipeline,
    observers: Vec<Box<dyn EditorObserver>>,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self::with_observers(id, document, Vec::new())
    }

    /// Create a session and fire `on_ready` on each observer
    pub fn with_observers(
        id: impl Into<String>,
        document: Document,
        observers: Vec<Box<dyn EditorObserver>>,
    ) -> Self {
        let pipeline = Pipeline::new(document.options().compile.clone());
        let mut session = Self {
            id: id.into(),
            document,
            selection: Selection::None,
            drag: None,
            pipeline,
            observers,
        };

        let design = session.document.design();
        for observer in &mut session.observers {
            observer.on_ready(design);
        }
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn design(&self) -> &Design {
        self.document.design()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag(&self) -> Option<&DragSource> {
        self.drag.as_ref()
    }

    /// The selected content block, if any
    pub fn selected_content(&self) -> Option<&Content> {
        match &self.selection {
            Selection::Content(path) => self.design().content(path),
            _ => None,
        }
    }

    pub fn select_row(&mut self, index: usize) -> bool {
        if self.design().row(index).is_none() {
            return false;
        }
        self.selection = Selection::Row(index);
        true
    }

    pub fn select_content(&mut self, path: ContentPath) -> bool {
        if self.design().content(&path).is_none() {
            return false;
        }
        self.selection = Selection::Content(path);
        true
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::None;
    }

    /// Apply one mutation; false if it was refused
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        let description = mutation.name();
        self.apply_batch(vec![mutation], description)
    }

    /// Apply several mutations as one undo step; false if any was refused
    pub fn apply_batch(&mut self, mutations: Vec<Mutation>, description: &str) -> bool {
        match self.document.apply_batch(mutations, description) {
            Ok(result) => {
                if let Some(selection) = result.selection {
                    self.selection = selection;
                }
                self.revalidate_selection();
                self.notify_change();
                true
            }
            Err(err) => {
                debug!(session = %self.id, %err, "edit refused");
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        if !self.document.undo() {
            return false;
        }
        self.selection = Selection::None;
        self.notify_change();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.document.redo() {
            return false;
        }
        self.selection = Selection::None;
        self.notify_change();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.document.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.history().can_redo()
    }

    /// Start dragging; replaces any drag in progress
    pub fn begin_drag(&mut self, source: DragSource) {
        self.drag = Some(source);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Release the current drag over `target`.
    ///
    /// The drag ends either way; returns whether the design changed.
    pub fn drop(&mut self, target: DropTarget) -> bool {
        let Some(source) = self.drag.take() else {
            return false;
        };

        match resolve_drop(&source, &target, self.design()) {
            Some(mutations) => {
                let description = match &source {
                    DragSource::Component(_) => "Add component",
                    DragSource::Layout(_) => "Add layout",
                    DragSource::Content(_) => "Move content",
                };
                self.apply_batch(mutations, description)
            }
            None => {
                debug!(session = %self.id, ?target, "drop target does not accept this drag");
                false
            }
        }
    }

    /// Replace the design (undoable)
    pub fn load(&mut self, design: Design) {
        self.document.load(design);
        self.reset_interaction();
        self.notify_change();
    }

    /// Replace the design from JSON; on error nothing changes
    pub fn load_json(&mut self, source: &str) -> Result<(), EditorError> {
        self.document.load_json(source)?;
        self.reset_interaction();
        self.notify_change();
        Ok(())
    }

    /// Current design, for storage
    pub fn save(&mut self) -> Design {
        let design = self.document.design().clone();
        for observer in &mut self.observers {
            observer.on_save(&design);
        }
        design
    }

    /// Render and package the current design
    pub fn export(&mut self) -> ExportResult {
        let result = self.pipeline.export(self.document.design());
        for observer in &mut self.observers {
            observer.on_export(&result);
        }
        result
    }

    fn reset_interaction(&mut self) {
        self.selection = Selection::None;
        self.drag = None;
    }

    fn revalidate_selection(&mut self) {
        let valid = match &self.selection {
            Selection::None => true,
            Selection::Row(index) => self.design().row(*index).is_some(),
            Selection::Content(path) => self.design().content(path).is_some(),
        };
        if !valid {
            self.selection = Selection::None;
        }
    }

    fn notify_change(&mut self) {
        let design = self.document.design();
        for observer in &mut self.observers {
            observer.on_change(design);
        }
    }
}

/// Translate a drop into the mutations it implies, if the target accepts it
pub fn resolve_drop(source: &DragSource, target: &DropTarget, design: &Design) -> Option<Vec<Mutation>> {
    match source {
        DragSource::Component(component) => {
            let place = |column: ColumnPath, index: Option<usize>| Mutation::PlaceComponent {
                column,
                index,
                content_type: component.content_type,
            };

            match target {
                DropTarget::RowBoundary(index) => Some(vec![
                    Mutation::InsertRow {
                        index: *index,
                        layout: LayoutDefinition::equal(1),
                    },
                    place(ColumnPath::top(*index, 0), None),
                ]),
                DropTarget::Row(_) if design.rows().is_empty() => Some(vec![
                    Mutation::InsertRow {
                        index: 0,
                        layout: LayoutDefinition::equal(1),
                    },
                    place(ColumnPath::top(0, 0), None),
                ]),
                DropTarget::Row(index) => Some(vec![place(ColumnPath::top(*index, 0), None)]),
                DropTarget::Column(column) => Some(vec![place(column.clone(), None)]),
                DropTarget::Content { column, index } => {
                    Some(vec![place(column.clone(), Some(*index))])
                }
            }
        }

        DragSource::Layout(layout) => {
            let layout_content = || Content::layout_of(layout.empty_columns());

            match target {
                DropTarget::RowBoundary(index) => Some(vec![Mutation::InsertRow {
                    index: *index,
                    layout: layout.clone(),
                }]),
                DropTarget::Row(index) => {
                    let at = if design.rows().is_empty() { 0 } else { index + 1 };
                    Some(vec![Mutation::InsertRow {
                        index: at,
                        layout: layout.clone(),
                    }])
                }
                DropTarget::Column(column) if column.is_top_level() => {
                    Some(vec![Mutation::ReplaceColumnWithLayout {
                        row: column.row,
                        column: column.column,
                        layout: layout.clone(),
                    }])
                }
                DropTarget::Column(column) => Some(vec![Mutation::InsertContent {
                    column: column.clone(),
                    index: None,
                    content: layout_content(),
                }]),
                DropTarget::Content { column, index } => Some(vec![Mutation::InsertContent {
                    column: column.clone(),
                    index: Some(*index),
                    content: layout_content(),
                }]),
            }
        }

        DragSource::Content(from) => match target {
            DropTarget::Content { column, index } => Some(vec![Mutation::MoveContent {
                from: from.clone(),
                to: column.clone(),
                index: *index,
            }]),
            DropTarget::Column(column) => {
                let len = design.column(column)?.contents.len();
                Some(vec![Mutation::MoveContent {
                    from: from.clone(),
                    to: column.clone(),
                    index: len,
                }])
            }
            DropTarget::Row(_) | DropTarget::RowBoundary(_) => None,
        },
    }
}
