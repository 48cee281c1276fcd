//! # Mailframe Model
//!
//! The email design document: a tree of rows, columns and content blocks,
//! with recursive `layout` blocks nesting further columns.
//!
//! ```rust
//! use mailframe_model::{Content, ContentType, Design};
//!
//! let mut design = Design::seeded();
//! design.rows_mut()[0].columns[0]
//!     .contents
//!     .push(Content::create(ContentType::Button));
//!
//! let json = mailframe_model::serialize(&design).unwrap();
//! assert_eq!(mailframe_model::deserialize(&json).unwrap(), design);
//! ```

pub mod content;
pub mod design;
pub mod error;
pub mod id_generator;
pub mod path;
pub mod serializer;
pub mod visitor;
mod wire;

pub use content::{
    ButtonColors, ButtonValues, ColumnDividerValues, Container, Content, ContentKind, ContentType,
    DividerOrientation, DividerValues, ImageSource, ImageValues, LayoutValues, LinkAction,
    LinkValues, TextValues, UnknownValues,
};
pub use design::{
    equal_share, BackgroundImage, Body, BodyValues, Border, Column, ColumnValues, Design,
    FontFamily, Row, RowValues, CONTENT_COUNTER_PREFIX, SCHEMA_VERSION,
};
pub use error::{DesignError, DesignResult};
pub use id_generator::new_id;
pub use path::{ColumnPath, ContentPath, NestedStep};
pub use serializer::{deserialize, from_value, serialize, serialize_compact};
pub use visitor::{Visitor, VisitorMut};
