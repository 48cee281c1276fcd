//! # Mailframe HTML Compiler
//!
//! Renders an email design to a standalone HTML document built from nested
//! tables and inline styles, the subset of HTML that email clients agree on.
//!
//! ```rust
//! use mailframe_compiler_html::{compile_to_html, CompileOptions};
//! use mailframe_model::Design;
//!
//! let html = compile_to_html(&Design::seeded(), &CompileOptions::default()).unwrap();
//! assert!(html.contains("<tr class=\"row\">"));
//! ```

mod compiler;

pub use compiler::{compile_to_html, escape_html, ColumnWidthPolicy, CompileError, CompileOptions};

#[cfg(test)]
mod tests;
