use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::Row;

/// Lint rule that checks column widths against the columns they describe
pub struct CellsMatchColumnsRule;

impl LintRule for CellsMatchColumnsRule {
    fn name(&self) -> &'static str {
        "cells-match-columns"
    }

    fn description(&self) -> &'static str {
        "A row needs exactly one width per column, adding up to at most 100%"
    }

    fn check_row(&self, index: usize, row: &Row) -> Vec<Diagnostic> {
        let location = format!("row {}", index);

        if !row.is_balanced() {
            return vec![Diagnostic::error(
                "cells-match-columns",
                format!(
                    "Row has {} column widths for {} columns",
                    row.cells.len(),
                    row.columns.len()
                ),
                location,
            )
            .with_suggestion("Re-apply a layout to the row, or edit 'cells' to match 'columns'")];
        }

        let total: u32 = row.cells.iter().sum();
        if total > 100 {
            return vec![Diagnostic::warning(
                "cells-match-columns",
                format!("Column widths add up to {}%", total),
                location,
            )];
        }

        Vec::new()
    }
}
