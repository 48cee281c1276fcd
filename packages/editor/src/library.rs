//! # Component & Layout Library
//!
//! What the palette offers for dragging into a design: content components
//! (one per [`ContentType`]) and column layouts.

use mailframe_model::{equal_share, Column, ContentType, Row};
use serde::{Deserialize, Serialize};

/// A draggable content component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

impl ComponentDefinition {
    pub fn new(content_type: ContentType, label: impl Into<String>) -> Self {
        Self {
            content_type,
            label: label.into(),
            icon: String::new(),
        }
    }
}

/// A draggable column arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDefinition {
    pub columns: usize,
    #[serde(default)]
    pub label: String,
    /// Width percentage per column; missing entries get `100 / columns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<u32>>,
}

impl LayoutDefinition {
    /// Equal-width layout
    pub fn equal(columns: usize) -> Self {
        Self {
            columns,
            label: format!("{} Column{}", columns, if columns == 1 { "" } else { "s" }),
            column_widths: None,
        }
    }

    pub fn with_widths(widths: Vec<u32>) -> Self {
        let label = widths
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" / ");
        Self {
            columns: widths.len(),
            label,
            column_widths: Some(widths),
        }
    }

    /// Resolved width per column, padded with the equal share
    pub fn widths(&self) -> Vec<u32> {
        let share = equal_share(self.columns);
        (0..self.columns)
            .map(|i| {
                self.column_widths
                    .as_ref()
                    .and_then(|w| w.get(i).copied())
                    .unwrap_or(share)
            })
            .collect()
    }

    /// A new top-level row shaped like this layout
    pub fn to_row(&self) -> Row {
        Row::with_columns(self.columns, self.column_widths.as_deref())
    }

    /// Fresh empty columns for this layout
    pub fn empty_columns(&self) -> Vec<Column> {
        (0..self.columns).map(|_| Column::new()).collect()
    }
}

/// Components offered by default
pub fn default_components() -> Vec<ComponentDefinition> {
    vec![
        ComponentDefinition::new(ContentType::Text, "Text"),
        ComponentDefinition::new(ContentType::Heading, "Heading"),
        ComponentDefinition::new(ContentType::Image, "Image"),
        ComponentDefinition::new(ContentType::Button, "Button"),
        ComponentDefinition::new(ContentType::Divider, "Divider"),
        ComponentDefinition::new(ContentType::ColumnDivider, "Column Divider"),
    ]
}

/// Layouts offered by default
pub fn default_layouts() -> Vec<LayoutDefinition> {
    vec![
        LayoutDefinition::equal(1),
        LayoutDefinition::equal(2),
        LayoutDefinition::equal(3),
        LayoutDefinition::equal(4),
        LayoutDefinition::with_widths(vec![33, 67]),
        LayoutDefinition::with_widths(vec![67, 33]),
    ]
}
