//! # Design Tree
//!
//! The structural half of the document model:
//!
//! ```text
//! Design
//!  └─ Body
//!      └─ Row*        (cells[i] is the width percentage of columns[i])
//!          └─ Column*
//!              └─ Content*   (layout contents nest further Columns)
//! ```
//!
//! Every style-bearing node carries its documented defaults so that a
//! freshly constructed tree renders identically to one loaded from JSON
//! with the fields omitted.

use crate::content::Content;
use crate::id_generator::new_id;
use crate::visitor::{ReassignIds, VisitorMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current schema version written into new designs
pub const SCHEMA_VERSION: u32 = 1;

/// Prefix of the usage counters bumped when library content is placed
pub const CONTENT_COUNTER_PREFIX: &str = "u_content_";

/// Root document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    /// Usage telemetry (`"u_content_" + type` → count)
    pub counters: BTreeMap<String, u32>,
    pub body: Body,
    pub schema_version: u32,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            counters: BTreeMap::new(),
            body: Body::default(),
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl Design {
    /// Empty design (no rows)
    pub fn new() -> Self {
        Self::default()
    }

    /// Design seeded with a single one-column row, as a new editor starts
    pub fn seeded() -> Self {
        let mut design = Self::default();
        design.body.rows.push(Row::with_columns(1, None));
        design
    }

    pub fn rows(&self) -> &[Row] {
        &self.body.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.body.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.body.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.body.rows.get_mut(index)
    }

    /// Bump a usage counter, starting at 1
    pub fn increment_counter(&mut self, key: &str) -> u32 {
        let count = self.counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Usage counter key for a content type name
    pub fn content_counter_key(type_name: &str) -> String {
        format!("{}{}", CONTENT_COUNTER_PREFIX, type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Body {
    pub id: String,
    pub rows: Vec<Row>,
    pub values: BodyValues,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            id: new_id(),
            rows: Vec::new(),
            values: BodyValues::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyValues {
    pub background_color: String,
    pub content_width: String,
    pub font_family: FontFamily,
    pub preheader_text: String,
}

impl Default for BodyValues {
    fn default() -> Self {
        Self {
            background_color: "#f9f9f9".to_string(),
            content_width: "600px".to_string(),
            font_family: FontFamily::default(),
            preheader_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFamily {
    pub label: String,
    pub value: String,
}

impl Default for FontFamily {
    fn default() -> Self {
        Self {
            label: "Arial".to_string(),
            value: "arial,helvetica,sans-serif".to_string(),
        }
    }
}

/// Horizontal band of the email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    pub id: String,
    /// Column width percentages, parallel to `columns`
    pub cells: Vec<u32>,
    pub columns: Vec<Column>,
    pub values: RowValues,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            id: new_id(),
            cells: Vec::new(),
            columns: Vec::new(),
            values: RowValues::default(),
        }
    }
}

impl Row {
    /// Row with `count` empty columns.
    ///
    /// Widths come from `widths` where given; missing entries fall back to
    /// an equal share (`100 / count`).
    pub fn with_columns(count: usize, widths: Option<&[u32]>) -> Self {
        let mut row = Row::default();
        let share = equal_share(count);

        for i in 0..count {
            let width = widths.and_then(|w| w.get(i).copied()).unwrap_or(share);
            row.cells.push(width);
            row.columns.push(Column::new());
        }

        row
    }

    /// Deep copy with a fresh id on every node of the copy
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        ReassignIds.visit_row_mut(&mut copy);
        copy
    }

    /// Whether `cells` and `columns` have the same length
    pub fn is_balanced(&self) -> bool {
        self.cells.len() == self.columns.len()
    }

    /// Stored width for a column, falling back to an equal share
    pub fn width_of(&self, column: usize) -> u32 {
        self.cells
            .get(column)
            .copied()
            .unwrap_or_else(|| equal_share(self.columns.len()))
    }
}

/// Integer equal split of 100% across `count` columns
pub fn equal_share(count: usize) -> u32 {
    if count == 0 {
        100
    } else {
        100 / count as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowValues {
    pub background_color: String,
    pub padding: String,
    pub columns_background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    pub hide_desktop: bool,
    pub hide_mobile: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<String>,
}

impl Default for RowValues {
    fn default() -> Self {
        Self {
            background_color: String::new(),
            padding: "10px".to_string(),
            columns_background_color: String::new(),
            background_image: None,
            hide_desktop: false,
            hide_mobile: false,
            display_condition: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundImage {
    pub url: String,
    pub full_width: bool,
    pub repeat: String,
    pub size: String,
    pub position: String,
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            url: String::new(),
            full_width: true,
            repeat: "no-repeat".to_string(),
            size: "cover".to_string(),
            position: "center".to_string(),
        }
    }
}

/// Vertical slot inside a row (or inside a layout content)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    pub id: String,
    pub contents: Vec<Content>,
    pub values: ColumnValues,
    /// Legacy nested columns from older designs; never created by the editor
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_columns: Vec<Column>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: new_id(),
            contents: Vec::new(),
            values: ColumnValues::default(),
            sub_columns: Vec::new(),
        }
    }
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            ..Self::default()
        }
    }

    /// True if the column or any legacy sub-column holds content
    pub fn has_content(&self) -> bool {
        !self.contents.is_empty() || self.sub_columns.iter().any(|sub| !sub.contents.is_empty())
    }

    /// Deep copy with a fresh id on every node of the copy
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        ReassignIds.visit_column_mut(&mut copy);
        copy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnValues {
    pub background_color: String,
    pub padding: String,
    pub border: Border,
}

impl Default for ColumnValues {
    fn default() -> Self {
        Self {
            background_color: String::new(),
            padding: "0px".to_string(),
            border: Border::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Border {
    pub border_top_width: String,
    pub border_top_style: String,
    pub border_top_color: String,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            border_top_width: "0px".to_string(),
            border_top_style: "solid".to_string(),
            border_top_color: "#000000".to_string(),
        }
    }
}

impl Border {
    /// Whether the border draws anything
    pub fn is_visible(&self) -> bool {
        let width = self.border_top_width.trim();
        !(width.is_empty() || width == "0" || width == "0px")
    }
}
