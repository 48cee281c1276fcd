mod a11y;
mod cells_match_columns;
mod css_values;
mod divider_orientation;
mod image_source;
mod known_content_type;
mod merge_tag_syntax;
mod row_visibility;
mod unique_ids;

pub use a11y::A11yRule;
pub use cells_match_columns::CellsMatchColumnsRule;
pub use css_values::CssValuesRule;
pub use divider_orientation::DividerOrientationRule;
pub use image_source::ImageSourceRule;
pub use known_content_type::KnownContentTypeRule;
pub use merge_tag_syntax::MergeTagSyntaxRule;
pub use row_visibility::RowVisibilityRule;
pub use unique_ids::UniqueIdsRule;

use crate::diagnostic::Diagnostic;
use mailframe_model::{Column, ColumnPath, Content, ContentPath, Design, Row};

/// Trait for implementing lint rules.
///
/// Every hook defaults to no diagnostics; a rule overrides the levels it
/// cares about.
pub trait LintRule {
    /// Kebab-case id shown next to each diagnostic
    fn name(&self) -> &'static str;

    /// One-line summary for `--help` style listings
    fn description(&self) -> &'static str;

    /// Check the design as a whole (runs once, before the tree walk)
    fn check_design(&self, _design: &Design) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_row(&self, _index: usize, _row: &Row) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check a column, top-level or nested in a layout
    fn check_column(&self, _path: &ColumnPath, _column: &Column) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_content(&self, _path: &ContentPath, _content: &Content) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Ordered set of rules run by `lint_design`
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Every built-in rule
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(UniqueIdsRule),
                Box::new(CellsMatchColumnsRule),
                Box::new(RowVisibilityRule),
                Box::new(KnownContentTypeRule),
                Box::new(DividerOrientationRule),
                Box::new(ImageSourceRule),
                Box::new(A11yRule),
                Box::new(CssValuesRule),
                Box::new(MergeTagSyntaxRule::new()),
            ],
        }
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// No rules; build up with `add_rule`
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Drop every rule with the given name
    pub fn remove_rule(&mut self, name: &str) {
        self.rules.retain(|rule| rule.name() != name);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
