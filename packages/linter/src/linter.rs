use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::rules::RuleRegistry;
use mailframe_model::{Column, ColumnPath, Design, Row};

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint a design and return diagnostics in document order
pub fn lint_design(design: &Design, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_design(design));
    }

    for (index, row) in design.rows().iter().enumerate() {
        diagnostics.extend(lint_row(index, row, &registry));
    }

    diagnostics
}

/// Whether any diagnostic is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Error)
}

fn lint_row(index: usize, row: &Row, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_row(index, row));
    }

    for (column_index, column) in row.columns.iter().enumerate() {
        diagnostics.extend(lint_column(&ColumnPath::top(index, column_index), column, registry));
    }

    diagnostics
}

/// Recursively lint a column and any layouts inside it
fn lint_column(path: &ColumnPath, column: &Column, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_column(path, column));
    }

    for (index, content) in column.contents.iter().enumerate() {
        let content_path = path.content(index);
        for rule in registry.rules() {
            diagnostics.extend(rule.check_content(&content_path, content));
        }

        if let Some(nested) = content.columns() {
            for (nested_index, nested_column) in nested.iter().enumerate() {
                diagnostics.extend(lint_column(
                    &path.child(index, nested_index),
                    nested_column,
                    registry,
                ));
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LintRule;
    use mailframe_model::{Content, ContentPath};

    /// Records every location it is shown
    struct Trace;

    impl LintRule for Trace {
        fn name(&self) -> &'static str {
            "trace"
        }

        fn description(&self) -> &'static str {
            "Reports every column and content visited"
        }

        fn check_column(&self, path: &ColumnPath, _column: &Column) -> Vec<Diagnostic> {
            vec![Diagnostic::info("trace", "column", path.to_string())]
        }

        fn check_content(&self, path: &ContentPath, _content: &Content) -> Vec<Diagnostic> {
            vec![Diagnostic::info("trace", "content", path.to_string())]
        }
    }

    fn trace_registry() -> RuleRegistry {
        let mut registry = RuleRegistry::empty();
        registry.add_rule(Box::new(Trace));
        registry
    }

    #[test]
    fn test_walks_nested_layouts_in_order() {
        let mut design = Design::seeded();
        design.rows_mut()[0].columns[0]
            .contents
            .push(Content::layout_of(vec![Column::with_contents(vec![Content::text("x")])]));

        let diagnostics = lint_design(
            &design,
            LintOptions {
                registry: Some(trace_registry()),
            },
        );

        let locations: Vec<&str> = diagnostics.iter().map(|d| d.location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                "row 0 column 0",
                "row 0 column 0 content 0",
                "row 0 column 0 > content 0 column 0",
                "row 0 column 0 > content 0 column 0 content 0",
            ]
        );
    }

    #[test]
    fn test_empty_registry_reports_nothing() {
        let diagnostics = lint_design(
            &Design::seeded(),
            LintOptions {
                registry: Some(RuleRegistry::empty()),
            },
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_has_errors() {
        assert!(!has_errors(&[Diagnostic::warning("r", "m", "design")]));
        assert!(has_errors(&[Diagnostic::error("r", "m", "design")]));
    }
}
