use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::Row;

/// Lint rule for rows hidden on every device
pub struct RowVisibilityRule;

impl LintRule for RowVisibilityRule {
    fn name(&self) -> &'static str {
        "row-visibility"
    }

    fn description(&self) -> &'static str {
        "A row hidden on both desktop and mobile is never shown"
    }

    fn check_row(&self, index: usize, row: &Row) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if row.values.hide_desktop && row.values.hide_mobile {
            diagnostics.push(
                Diagnostic::warning(
                    "row-visibility",
                    "Row is hidden on desktop and on mobile",
                    format!("row {}", index),
                )
                .with_suggestion("Delete the row, or clear one of 'hideDesktop' / 'hideMobile'"),
            );
        }

        if !row.columns.iter().any(|column| column.has_content()) {
            diagnostics.push(Diagnostic::info(
                "row-visibility",
                "Row has no content",
                format!("row {}", index),
            ));
        }

        diagnostics
    }
}
