//! # Mailframe Linter
//!
//! Structural and email-compatibility checks over a design. Every rule is
//! advisory: the editor and renderer accept designs with diagnostics.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{has_errors, lint_design, LintOptions};
pub use rules::{
    A11yRule, CellsMatchColumnsRule, CssValuesRule, DividerOrientationRule, ImageSourceRule,
    KnownContentTypeRule, LintRule, MergeTagSyntaxRule, RowVisibilityRule, RuleRegistry,
    UniqueIdsRule,
};
