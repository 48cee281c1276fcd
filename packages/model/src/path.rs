//! Positional addressing into a design.
//!
//! Ids are display keys only; every edit addresses nodes by index path.
//! A [`ColumnPath`] starts at a top-level `(row, column)` and then descends
//! through layout contents, one [`NestedStep`] per level.

use crate::content::Content;
use crate::design::{Column, Design};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One descent through a layout: content index, then nested column index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedStep {
    pub content: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPath {
    pub row: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedStep>,
}

impl ColumnPath {
    /// Path to a column directly inside a row
    pub fn top(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            nested: Vec::new(),
        }
    }

    /// Path to column `column` of the layout at `content` within this column
    pub fn child(&self, content: usize, column: usize) -> Self {
        let mut nested = self.nested.clone();
        nested.push(NestedStep { content, column });
        Self {
            row: self.row,
            column: self.column,
            nested,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.nested.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.nested.len()
    }

    pub fn content(&self, index: usize) -> ContentPath {
        ContentPath {
            column: self.clone(),
            index,
        }
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} column {}", self.row, self.column)?;
        for step in &self.nested {
            write!(f, " > content {} column {}", step.content, step.column)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPath {
    pub column: ColumnPath,
    pub index: usize,
}

impl ContentPath {
    pub fn new(column: ColumnPath, index: usize) -> Self {
        Self { column, index }
    }

    pub fn top(row: usize, column: usize, index: usize) -> Self {
        Self::new(ColumnPath::top(row, column), index)
    }

    /// Same column, different index
    pub fn with_index(&self, index: usize) -> Self {
        Self::new(self.column.clone(), index)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} content {}", self.column, self.index)
    }
}

impl Design {
    pub fn column(&self, path: &ColumnPath) -> Option<&Column> {
        let mut column = self.row(path.row)?.columns.get(path.column)?;
        for step in &path.nested {
            column = column.contents.get(step.content)?.columns()?.get(step.column)?;
        }
        Some(column)
    }

    pub fn column_mut(&mut self, path: &ColumnPath) -> Option<&mut Column> {
        let mut column = self.row_mut(path.row)?.columns.get_mut(path.column)?;
        for step in &path.nested {
            column = column
                .contents
                .get_mut(step.content)?
                .columns_mut()?
                .get_mut(step.column)?;
        }
        Some(column)
    }

    pub fn content(&self, path: &ContentPath) -> Option<&Content> {
        self.column(&path.column)?.contents.get(path.index)
    }

    pub fn content_mut(&mut self, path: &ContentPath) -> Option<&mut Content> {
        self.column_mut(&path.column)?.contents.get_mut(path.index)
    }
}
