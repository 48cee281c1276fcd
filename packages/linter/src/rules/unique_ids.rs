use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::visitor::{CollectIds, Visitor};
use mailframe_model::Design;
use std::collections::BTreeMap;

/// Lint rule for ids shared by more than one node
pub struct UniqueIdsRule;

impl LintRule for UniqueIdsRule {
    fn name(&self) -> &'static str {
        "unique-ids"
    }

    fn description(&self) -> &'static str {
        "Every body, row, column and content id must be unique"
    }

    fn check_design(&self, design: &Design) -> Vec<Diagnostic> {
        let mut collector = CollectIds::default();
        collector.visit_design(design);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for id in &collector.ids {
            *counts.entry(id.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| {
                let message = if id.is_empty() {
                    format!("{} nodes have an empty id", count)
                } else {
                    format!("Id '{}' is used by {} nodes", id, count)
                };
                Diagnostic::error("unique-ids", message, "design")
                    .with_suggestion("Duplicate rows and content through the editor so ids are regenerated")
            })
            .collect()
    }
}
