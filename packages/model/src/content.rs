//! # Content Blocks
//!
//! Content is a sum type: the `type` discriminant selects a payload that
//! carries only the fields meaningful for that kind. On the wire every kind
//! still shares one flat `values` bag (see `wire.rs`), so designs written by
//! older editors load unchanged.
//!
//! Unrecognized types are preserved verbatim in [`UnknownValues`] and render
//! as nothing.

use crate::design::Column;
use crate::id_generator::new_id;
use crate::visitor::{ReassignIds, VisitorMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CONTAINER_PADDING: &str = "10px";
pub const DEFAULT_FONT_SIZE: &str = "14px";
pub const DEFAULT_TEXT_ALIGN: &str = "left";
pub const DEFAULT_LINE_HEIGHT: &str = "140%";
pub const DEFAULT_COLOR: &str = "#000000";
pub const DIVIDER_COLOR: &str = "#CCCCCC";
pub const DIVIDER_THICKNESS: &str = "1px";
pub const COLUMN_DIVIDER_THICKNESS: &str = "2px";
pub const COLUMN_DIVIDER_HEIGHT: &str = "150px";

/// The recognized content kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Text,
    Heading,
    Image,
    Button,
    Divider,
    ColumnDivider,
    Layout,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Text,
        ContentType::Heading,
        ContentType::Image,
        ContentType::Button,
        ContentType::Divider,
        ContentType::ColumnDivider,
        ContentType::Layout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Heading => "heading",
            ContentType::Image => "image",
            ContentType::Button => "button",
            ContentType::Divider => "divider",
            ContentType::ColumnDivider => "column-divider",
            ContentType::Layout => "layout",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown content type: {}", s))
    }
}

/// A block inside a column
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: String,
    pub kind: ContentKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Text(TextValues),
    Heading(TextValues),
    Image(ImageValues),
    Button(ButtonValues),
    Divider(DividerValues),
    ColumnDivider(ColumnDividerValues),
    Layout(LayoutValues),
    Unknown(UnknownValues),
}

/// Settings shared by every recognized kind
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub padding: String,
    pub hide_desktop: bool,
    pub hide_mobile: bool,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            padding: DEFAULT_CONTAINER_PADDING.to_string(),
            hide_desktop: false,
            hide_mobile: false,
        }
    }
}

/// Payload of `text` and `heading`
#[derive(Debug, Clone, PartialEq)]
pub struct TextValues {
    pub container: Container,
    /// Raw markup, rendered unescaped
    pub text: Option<String>,
    pub font_size: String,
    pub text_align: String,
    pub line_height: String,
    pub color: String,
}

impl Default for TextValues {
    fn default() -> Self {
        Self {
            container: Container::default(),
            text: None,
            font_size: DEFAULT_FONT_SIZE.to_string(),
            text_align: DEFAULT_TEXT_ALIGN.to_string(),
            line_height: DEFAULT_LINE_HEIGHT.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageValues {
    pub container: Container,
    pub src: Option<ImageSource>,
    pub alt_text: String,
    pub text_align: String,
    pub link: Option<LinkAction>,
}

impl Default for ImageValues {
    fn default() -> Self {
        Self {
            container: Container::default(),
            src: None,
            alt_text: String::new(),
            text_align: DEFAULT_TEXT_ALIGN.to_string(),
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonValues {
    pub container: Container,
    pub text: Option<String>,
    pub link: Option<LinkAction>,
    pub colors: Option<ButtonColors>,
    pub font_size: String,
    pub text_align: String,
    pub line_height: String,
    pub color: String,
}

impl Default for ButtonValues {
    fn default() -> Self {
        Self {
            container: Container::default(),
            text: None,
            link: None,
            colors: None,
            font_size: DEFAULT_FONT_SIZE.to_string(),
            text_align: DEFAULT_TEXT_ALIGN.to_string(),
            line_height: DEFAULT_LINE_HEIGHT.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Orientation of a divider, stored on the wire in `textAlign`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DividerOrientation {
    Horizontal,
    Vertical,
    /// Any other `textAlign` value; kept as-is and rendered horizontally
    Other(String),
}

impl DividerOrientation {
    pub fn parse(value: &str) -> Self {
        match value {
            "horizontal" => DividerOrientation::Horizontal,
            "vertical" => DividerOrientation::Vertical,
            other => DividerOrientation::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DividerOrientation::Horizontal => "horizontal",
            DividerOrientation::Vertical => "vertical",
            DividerOrientation::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerValues {
    pub container: Container,
    pub orientation: DividerOrientation,
    /// Line thickness, stored on the wire in `fontSize`
    pub thickness: String,
    pub color: String,
}

impl Default for DividerValues {
    fn default() -> Self {
        Self {
            container: Container::default(),
            orientation: DividerOrientation::Horizontal,
            thickness: DIVIDER_THICKNESS.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Always-vertical rule placed between columns
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDividerValues {
    pub container: Container,
    /// Stored on the wire in `fontSize`
    pub thickness: String,
    /// Stored on the wire in `lineHeight`
    pub height: String,
    pub color: String,
}

impl Default for ColumnDividerValues {
    fn default() -> Self {
        Self {
            container: Container::default(),
            thickness: COLUMN_DIVIDER_THICKNESS.to_string(),
            height: COLUMN_DIVIDER_HEIGHT.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Row-like container nested inside a column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutValues {
    pub container: Container,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownValues {
    pub type_name: String,
    pub values: serde_json::Value,
    pub columns: Option<Vec<Column>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub max_width: String,
    pub auto_width: bool,
}

impl Default for ImageSource {
    fn default() -> Self {
        Self {
            url: String::new(),
            width: 0,
            height: 0,
            max_width: "100%".to_string(),
            auto_width: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkAction {
    pub name: String,
    pub values: LinkValues,
}

impl Default for LinkAction {
    fn default() -> Self {
        Self {
            name: "web".to_string(),
            values: LinkValues::default(),
        }
    }
}

impl LinkAction {
    pub fn web(href: impl Into<String>) -> Self {
        Self {
            name: "web".to_string(),
            values: LinkValues {
                href: href.into(),
                ..LinkValues::default()
            },
        }
    }

    pub fn href(&self) -> &str {
        &self.values.href
    }

    pub fn target(&self) -> &str {
        &self.values.target
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkValues {
    pub href: String,
    pub target: String,
}

impl Default for LinkValues {
    fn default() -> Self {
        Self {
            href: String::new(),
            target: "_blank".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonColors {
    pub color: String,
    pub background_color: String,
    pub hover_color: String,
    pub hover_background_color: String,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            background_color: "#3AAEE0".to_string(),
            hover_color: "#FFFFFF".to_string(),
            hover_background_color: "#2A8EC0".to_string(),
        }
    }
}

impl Content {
    pub fn new(kind: ContentKind) -> Self {
        Self { id: new_id(), kind }
    }

    /// New content of the given type, pre-populated with creation defaults
    pub fn create(content_type: ContentType) -> Self {
        let kind = match content_type {
            ContentType::Text => ContentKind::Text(TextValues {
                text: Some("<p>Enter your text here...</p>".to_string()),
                ..TextValues::default()
            }),
            ContentType::Heading => ContentKind::Heading(TextValues {
                text: Some("Your Heading".to_string()),
                font_size: "24px".to_string(),
                ..TextValues::default()
            }),
            ContentType::Image => ContentKind::Image(ImageValues {
                src: Some(ImageSource {
                    width: 600,
                    height: 400,
                    ..ImageSource::default()
                }),
                ..ImageValues::default()
            }),
            ContentType::Button => ContentKind::Button(ButtonValues {
                text: Some("Click Here".to_string()),
                link: Some(LinkAction::default()),
                colors: Some(ButtonColors::default()),
                ..ButtonValues::default()
            }),
            ContentType::Divider => ContentKind::Divider(DividerValues {
                color: DIVIDER_COLOR.to_string(),
                ..DividerValues::default()
            }),
            ContentType::ColumnDivider => ContentKind::ColumnDivider(ColumnDividerValues {
                color: DIVIDER_COLOR.to_string(),
                ..ColumnDividerValues::default()
            }),
            ContentType::Layout => ContentKind::Layout(LayoutValues::default()),
        };

        Self::new(kind)
    }

    /// `text` content holding the given markup
    pub fn text(markup: impl Into<String>) -> Self {
        Self::new(ContentKind::Text(TextValues {
            text: Some(markup.into()),
            ..TextValues::default()
        }))
    }

    /// `layout` content with `count` empty nested columns
    pub fn layout(count: usize) -> Self {
        Self::layout_of((0..count).map(|_| Column::new()).collect())
    }

    pub fn layout_of(columns: Vec<Column>) -> Self {
        Self::new(ContentKind::Layout(LayoutValues {
            container: Container::default(),
            columns,
        }))
    }

    /// The recognized type, if any
    pub fn content_type(&self) -> Option<ContentType> {
        match &self.kind {
            ContentKind::Text(_) => Some(ContentType::Text),
            ContentKind::Heading(_) => Some(ContentType::Heading),
            ContentKind::Image(_) => Some(ContentType::Image),
            ContentKind::Button(_) => Some(ContentType::Button),
            ContentKind::Divider(_) => Some(ContentType::Divider),
            ContentKind::ColumnDivider(_) => Some(ContentType::ColumnDivider),
            ContentKind::Layout(_) => Some(ContentType::Layout),
            ContentKind::Unknown(_) => None,
        }
    }

    /// Wire name of the type (`"column-divider"`, or the unknown name)
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ContentKind::Unknown(unknown) => &unknown.type_name,
            _ => self.content_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn container(&self) -> Option<&Container> {
        match &self.kind {
            ContentKind::Text(v) | ContentKind::Heading(v) => Some(&v.container),
            ContentKind::Image(v) => Some(&v.container),
            ContentKind::Button(v) => Some(&v.container),
            ContentKind::Divider(v) => Some(&v.container),
            ContentKind::ColumnDivider(v) => Some(&v.container),
            ContentKind::Layout(v) => Some(&v.container),
            ContentKind::Unknown(_) => None,
        }
    }

    /// Nested columns of a layout (or of an unknown kind that carried some)
    pub fn columns(&self) -> Option<&[Column]> {
        match &self.kind {
            ContentKind::Layout(layout) => Some(&layout.columns),
            ContentKind::Unknown(unknown) => unknown.columns.as_deref(),
            _ => None,
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut Vec<Column>> {
        match &mut self.kind {
            ContentKind::Layout(layout) => Some(&mut layout.columns),
            ContentKind::Unknown(unknown) => unknown.columns.as_mut(),
            _ => None,
        }
    }

    pub fn is_layout(&self) -> bool {
        matches!(self.kind, ContentKind::Layout(_))
    }

    /// Deep copy with a fresh id on every node of the copy
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        ReassignIds.visit_content_mut(&mut copy);
        copy
    }
}
