//! # Design Mutations
//!
//! Every structural edit a user can make to a design, as data.
//!
//! ## Semantics
//!
//! 1. **Positional**: nodes are addressed by index path, never by id
//! 2. **Validated**: out-of-range paths and forbidden shapes are rejected
//!    before anything changes
//! 3. **One undo step**: the caller checkpoints once per mutation (or batch)
//!
//! ### Rows
//! - The last remaining row cannot be deleted unless allowed by options
//! - Moving past either end is rejected
//!
//! ### Columns
//! - `cells[i]` always matches `columns[i]` once post-effects have run
//! - Collapsing (`SetColumnCount`) keeps all content, in order, in the
//!   first column
//!
//! ### MoveContent
//! - The index is read as "before removal": moving forward within one
//!   column lands one slot earlier than the raw index
//! - A layout cannot be moved into one of its own columns

use crate::library::LayoutDefinition;
use crate::options::EditorOptions;
use crate::post_effects::normalized_cells;
use crate::session::Selection;
use mailframe_model::{
    equal_share, BodyValues, Column, ColumnPath, ColumnValues, Content, ContentKind, ContentPath,
    ContentType, Design, Row, RowValues,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new row shaped like `layout` before `index`
    InsertRow { index: usize, layout: LayoutDefinition },

    DeleteRow { index: usize },

    /// Deep copy inserted directly below the original
    DuplicateRow { index: usize },

    MoveRowUp { index: usize },

    MoveRowDown { index: usize },

    /// Rebuild the row as `count` equal columns, all content in the first
    SetColumnCount { row: usize, count: usize },

    /// Halve a column's width and insert an empty column after it
    SplitColumn { row: usize, column: usize },

    AddColumn { row: usize },

    /// Remove the last column of a row
    RemoveColumn { row: usize },

    /// Replace one top-level column by the columns of `layout`
    ReplaceColumnWithLayout {
        row: usize,
        column: usize,
        layout: LayoutDefinition,
    },

    /// Set every column width of a row at once
    SetRowCells { row: usize, cells: Vec<u32> },

    /// Insert existing content; `None` appends
    InsertContent {
        column: ColumnPath,
        index: Option<usize>,
        content: Content,
    },

    /// Create library content with its defaults and insert it
    PlaceComponent {
        column: ColumnPath,
        index: Option<usize>,
        content_type: ContentType,
    },

    DeleteContent { path: ContentPath },

    MoveContentUp { path: ContentPath },

    MoveContentDown { path: ContentPath },

    DuplicateContent { path: ContentPath },

    MoveContent {
        from: ContentPath,
        to: ColumnPath,
        index: usize,
    },

    /// Swap in an edited copy of a content block
    ReplaceContent { path: ContentPath, content: Content },

    SetImageSource { path: ContentPath, url: String },

    SetBodyValues { values: BodyValues },

    SetRowValues { row: usize, values: RowValues },

    SetColumnValues { column: ColumnPath, values: ColumnValues },

    IncrementCounter { key: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Row not found: {0}")]
    RowNotFound(usize),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot delete the last row")]
    LastRow,

    #[error("Cannot remove the last column")]
    LastColumn,

    #[error("Already at the edge")]
    AtBoundary,

    #[error("Invalid column count: {0}")]
    InvalidColumnCount(usize),

    #[error("Content is not an image: {0}")]
    NotAnImage(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Mutation {
    /// Short human label, used as the undo description
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertRow { .. } => "Insert row",
            Mutation::DeleteRow { .. } => "Delete row",
            Mutation::DuplicateRow { .. } => "Duplicate row",
            Mutation::MoveRowUp { .. } => "Move row up",
            Mutation::MoveRowDown { .. } => "Move row down",
            Mutation::SetColumnCount { .. } => "Set column count",
            Mutation::SplitColumn { .. } => "Split column",
            Mutation::AddColumn { .. } => "Add column",
            Mutation::RemoveColumn { .. } => "Remove column",
            Mutation::ReplaceColumnWithLayout { .. } => "Apply layout to column",
            Mutation::SetRowCells { .. } => "Resize columns",
            Mutation::InsertContent { .. } => "Insert content",
            Mutation::PlaceComponent { .. } => "Add component",
            Mutation::DeleteContent { .. } => "Delete content",
            Mutation::MoveContentUp { .. } => "Move content up",
            Mutation::MoveContentDown { .. } => "Move content down",
            Mutation::DuplicateContent { .. } => "Duplicate content",
            Mutation::MoveContent { .. } => "Move content",
            Mutation::ReplaceContent { .. } => "Edit content",
            Mutation::SetImageSource { .. } => "Set image",
            Mutation::SetBodyValues { .. } => "Edit body",
            Mutation::SetRowValues { .. } => "Edit row",
            Mutation::SetColumnValues { .. } => "Edit column",
            Mutation::IncrementCounter { .. } => "Count usage",
        }
    }

    /// Apply mutation to the design with validation.
    ///
    /// Returns the selection the edit leaves behind, if it moves it.
    pub fn apply(
        &self,
        design: &mut Design,
        options: &EditorOptions,
    ) -> Result<Option<Selection>, MutationError> {
        // Validate first
        self.validate(design, options)?;

        match self {
            Mutation::InsertRow { index, layout } => {
                design.rows_mut().insert(*index, layout.to_row());
                Ok(Some(Selection::Row(*index)))
            }

            Mutation::DeleteRow { index } => {
                design.rows_mut().remove(*index);
                Ok(Some(Selection::None))
            }

            Mutation::DuplicateRow { index } => {
                let copy = row(design, *index)?.duplicate();
                design.rows_mut().insert(index + 1, copy);
                Ok(Some(Selection::Row(index + 1)))
            }

            Mutation::MoveRowUp { index } => {
                design.rows_mut().swap(index - 1, *index);
                Ok(Some(Selection::Row(index - 1)))
            }

            Mutation::MoveRowDown { index } => {
                design.rows_mut().swap(*index, index + 1);
                Ok(Some(Selection::Row(index + 1)))
            }

            Mutation::SetColumnCount { row: index, count } => {
                Self::apply_set_column_count(row_mut(design, *index)?, *count);
                Ok(None)
            }

            Mutation::SplitColumn { row: index, column } => {
                Self::apply_split(row_mut(design, *index)?, *column);
                Ok(None)
            }

            Mutation::AddColumn { row: index } => {
                let row = row_mut(design, *index)?;
                row.cells = normalized_cells(row);
                row.columns.push(Column::new());
                row.cells.push(equal_share(row.columns.len()));
                Ok(None)
            }

            Mutation::RemoveColumn { row: index } => {
                let row = row_mut(design, *index)?;
                row.columns.pop();
                row.cells.truncate(row.columns.len());
                Ok(None)
            }

            Mutation::ReplaceColumnWithLayout { row: index, column, layout } => {
                Self::apply_replace_column(row_mut(design, *index)?, *column, layout);
                Ok(None)
            }

            Mutation::SetRowCells { row: index, cells } => {
                row_mut(design, *index)?.cells = cells.clone();
                Ok(None)
            }

            Mutation::InsertContent { column, index, content } => {
                Self::apply_insert(design, column, *index, content.clone())
            }

            Mutation::PlaceComponent { column, index, content_type } => {
                Self::apply_insert(design, column, *index, Content::create(*content_type))
            }

            Mutation::DeleteContent { path } => {
                column_mut(design, &path.column)?.contents.remove(path.index);
                Ok(Some(Selection::None))
            }

            Mutation::MoveContentUp { path } => {
                column_mut(design, &path.column)?
                    .contents
                    .swap(path.index - 1, path.index);
                Ok(Some(Selection::Content(path.with_index(path.index - 1))))
            }

            Mutation::MoveContentDown { path } => {
                column_mut(design, &path.column)?
                    .contents
                    .swap(path.index, path.index + 1);
                Ok(Some(Selection::Content(path.with_index(path.index + 1))))
            }

            Mutation::DuplicateContent { path } => {
                let column = column_mut(design, &path.column)?;
                let copy = column.contents[path.index].duplicate();
                column.contents.insert(path.index + 1, copy);
                Ok(Some(Selection::Content(path.with_index(path.index + 1))))
            }

            Mutation::MoveContent { from, to, index } => Self::apply_move(design, from, to, *index),

            Mutation::ReplaceContent { path, content } => {
                *content_mut(design, path)? = content.clone();
                Ok(Some(Selection::Content(path.clone())))
            }

            Mutation::SetImageSource { path, url } => {
                if let ContentKind::Image(image) = &mut content_mut(design, path)?.kind {
                    image.src.get_or_insert_with(Default::default).url = url.clone();
                }
                Ok(None)
            }

            Mutation::SetBodyValues { values } => {
                design.body.values = values.clone();
                Ok(None)
            }

            Mutation::SetRowValues { row: index, values } => {
                row_mut(design, *index)?.values = values.clone();
                Ok(None)
            }

            Mutation::SetColumnValues { column, values } => {
                column_mut(design, column)?.values = values.clone();
                Ok(None)
            }

            Mutation::IncrementCounter { key } => {
                design.increment_counter(key);
                Ok(None)
            }
        }
    }

    fn apply_set_column_count(row: &mut Row, count: usize) {
        let contents: Vec<Content> = row
            .columns
            .drain(..)
            .flat_map(|column| column.contents)
            .collect();

        let mut rebuilt = Row::with_columns(count, None);
        rebuilt.columns[0].contents = contents;
        row.cells = rebuilt.cells;
        row.columns = rebuilt.columns;
    }

    fn apply_split(row: &mut Row, column: usize) {
        row.cells = normalized_cells(row);

        let current = row.cells[column];
        let kept = current / 2;
        row.cells[column] = kept;
        row.cells.insert(column + 1, current - kept);
        row.columns.insert(column + 1, Column::new());
    }

    fn apply_replace_column(row: &mut Row, column: usize, layout: &LayoutDefinition) {
        row.cells = normalized_cells(row);

        let mut contents = row.columns.remove(column).contents;
        row.cells.remove(column);

        for (i, width) in layout.widths().into_iter().enumerate() {
            let mut new_column = Column::new();
            if i == 0 {
                new_column.contents = std::mem::take(&mut contents);
            }
            row.columns.insert(column + i, new_column);
            row.cells.insert(column + i, width);
        }
    }

    fn apply_insert(
        design: &mut Design,
        path: &ColumnPath,
        index: Option<usize>,
        content: Content,
    ) -> Result<Option<Selection>, MutationError> {
        let column = column_mut(design, path)?;
        let index = index.unwrap_or(column.contents.len());
        column.contents.insert(index, content);
        Ok(Some(Selection::Content(path.content(index))))
    }

    fn apply_move(
        design: &mut Design,
        from: &ContentPath,
        to: &ColumnPath,
        index: usize,
    ) -> Result<Option<Selection>, MutationError> {
        let moved = column_mut(design, &from.column)?.contents.remove(from.index);

        let to = path_after_removal(to, from);
        let index = if to == from.column && from.index < index {
            index - 1
        } else {
            index
        };

        let target = column_mut(design, &to)?;
        let index = index.min(target.contents.len());
        target.contents.insert(index, moved);
        Ok(Some(Selection::Content(to.content(index))))
    }

    /// Validate without applying
    pub fn validate(&self, design: &Design, options: &EditorOptions) -> Result<(), MutationError> {
        match self {
            Mutation::InsertRow { index, layout } => {
                check_insert_index(*index, design.rows().len())?;
                check_layout(layout)
            }

            Mutation::DeleteRow { index } => {
                row(design, *index)?;
                if design.rows().len() <= 1 && !options.allow_delete_last_row {
                    return Err(MutationError::LastRow);
                }
                Ok(())
            }

            Mutation::DuplicateRow { index } => row(design, *index).map(|_| ()),

            Mutation::MoveRowUp { index } => {
                row(design, *index)?;
                if *index == 0 {
                    return Err(MutationError::AtBoundary);
                }
                Ok(())
            }

            Mutation::MoveRowDown { index } => {
                row(design, *index)?;
                if index + 1 >= design.rows().len() {
                    return Err(MutationError::AtBoundary);
                }
                Ok(())
            }

            Mutation::SetColumnCount { row: index, count } => {
                row(design, *index)?;
                if *count == 0 {
                    return Err(MutationError::InvalidColumnCount(*count));
                }
                Ok(())
            }

            Mutation::SplitColumn { row: index, column } => {
                top_column(design, *index, *column).map(|_| ())
            }

            Mutation::AddColumn { row: index } => row(design, *index).map(|_| ()),

            Mutation::RemoveColumn { row: index } => {
                if row(design, *index)?.columns.len() <= 1 {
                    return Err(MutationError::LastColumn);
                }
                Ok(())
            }

            Mutation::ReplaceColumnWithLayout { row: index, column, layout } => {
                top_column(design, *index, *column)?;
                check_layout(layout)
            }

            Mutation::SetRowCells { row: index, cells } => {
                let row = row(design, *index)?;
                if cells.len() != row.columns.len() {
                    return Err(MutationError::InvalidStructure(format!(
                        "{} widths for {} columns",
                        cells.len(),
                        row.columns.len()
                    )));
                }
                Ok(())
            }

            Mutation::InsertContent { column, index, .. }
            | Mutation::PlaceComponent { column, index, .. } => {
                let target = column_ref(design, column)?;
                if let Some(index) = index {
                    check_insert_index(*index, target.contents.len())?;
                }
                Ok(())
            }

            Mutation::DeleteContent { path }
            | Mutation::DuplicateContent { path }
            | Mutation::ReplaceContent { path, .. } => content(design, path).map(|_| ()),

            Mutation::MoveContentUp { path } => {
                content(design, path)?;
                if path.index == 0 {
                    return Err(MutationError::AtBoundary);
                }
                Ok(())
            }

            Mutation::MoveContentDown { path } => {
                content(design, path)?;
                let len = column_ref(design, &path.column)?.contents.len();
                if path.index + 1 >= len {
                    return Err(MutationError::AtBoundary);
                }
                Ok(())
            }

            Mutation::MoveContent { from, to, index } => {
                content(design, from)?;
                let target = column_ref(design, to)?;
                check_insert_index(*index, target.contents.len())?;
                if is_inside(to, from) {
                    return Err(MutationError::InvalidStructure(
                        "cannot move a layout into itself".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::SetImageSource { path, .. } => match &content(design, path)?.kind {
                ContentKind::Image(_) => Ok(()),
                _ => Err(MutationError::NotAnImage(path.to_string())),
            },

            Mutation::SetRowValues { row: index, .. } => row(design, *index).map(|_| ()),

            Mutation::SetColumnValues { column, .. } => column_ref(design, column).map(|_| ()),

            Mutation::SetBodyValues { .. } | Mutation::IncrementCounter { .. } => Ok(()),
        }
    }
}

/// Result of applying a mutation through a document
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Primary mutations followed by their post-effects, in application order
    pub applied: Vec<Mutation>,

    /// Selection the edit left behind, if it moved it
    pub selection: Option<Selection>,
}

fn row(design: &Design, index: usize) -> Result<&Row, MutationError> {
    design.row(index).ok_or(MutationError::RowNotFound(index))
}

fn row_mut(design: &mut Design, index: usize) -> Result<&mut Row, MutationError> {
    design.row_mut(index).ok_or(MutationError::RowNotFound(index))
}

fn top_column(design: &Design, row_index: usize, column: usize) -> Result<&Column, MutationError> {
    row(design, row_index)?
        .columns
        .get(column)
        .ok_or_else(|| MutationError::ColumnNotFound(ColumnPath::top(row_index, column).to_string()))
}

fn column_ref<'a>(design: &'a Design, path: &ColumnPath) -> Result<&'a Column, MutationError> {
    design
        .column(path)
        .ok_or_else(|| MutationError::ColumnNotFound(path.to_string()))
}

fn column_mut<'a>(design: &'a mut Design, path: &ColumnPath) -> Result<&'a mut Column, MutationError> {
    design
        .column_mut(path)
        .ok_or_else(|| MutationError::ColumnNotFound(path.to_string()))
}

fn content<'a>(design: &'a Design, path: &ContentPath) -> Result<&'a Content, MutationError> {
    design
        .content(path)
        .ok_or_else(|| MutationError::ContentNotFound(path.to_string()))
}

fn content_mut<'a>(design: &'a mut Design, path: &ContentPath) -> Result<&'a mut Content, MutationError> {
    design
        .content_mut(path)
        .ok_or_else(|| MutationError::ContentNotFound(path.to_string()))
}

fn check_insert_index(index: usize, len: usize) -> Result<(), MutationError> {
    if index > len {
        return Err(MutationError::IndexOutOfRange { index, len });
    }
    Ok(())
}

fn check_layout(layout: &LayoutDefinition) -> Result<(), MutationError> {
    if layout.columns == 0 {
        return Err(MutationError::InvalidColumnCount(0));
    }
    Ok(())
}

/// Whether `column` lies inside the content at `content` (a layout's own columns)
fn is_inside(column: &ColumnPath, content: &ContentPath) -> bool {
    let depth = content.column.nested.len();
    column.row == content.column.row
        && column.column == content.column.column
        && column.nested.len() > depth
        && column.nested[..depth] == content.column.nested[..]
        && column.nested[depth].content == content.index
}

/// `path` re-expressed after the content at `removed` is taken out
fn path_after_removal(path: &ColumnPath, removed: &ContentPath) -> ColumnPath {
    let depth = removed.column.nested.len();
    let mut adjusted = path.clone();

    let shares_column = path.row == removed.column.row
        && path.column == removed.column.column
        && path.nested.len() > depth
        && path.nested[..depth] == removed.column.nested[..];

    if shares_column && adjusted.nested[depth].content > removed.index {
        adjusted.nested[depth].content -= 1;
    }
    adjusted
}
