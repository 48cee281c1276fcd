//! # Post-effects
//!
//! Some mutations imply secondary changes that belong to the same undo step:
//! - Placing a library component bumps its usage counter
//! - Any row whose `cells` drifted from its `columns` is brought back in line
//!
//! Effects only inspect the primary mutation and the resulting design; they
//! answer with further mutations, which are applied in order.

use crate::mutations::{Mutation, MutationError};
use crate::options::EditorOptions;
use crate::session::Selection;
use mailframe_model::{equal_share, Design, Row};

/// Derives follow-up mutations from an applied one
pub trait PostEffect: std::fmt::Debug {
    fn analyze(&self, mutation: &Mutation, design: &Design) -> Vec<Mutation>;
}

/// Count placements of library components under `u_content_<type>`
#[derive(Debug)]
pub struct TrackContentUsage;

impl PostEffect for TrackContentUsage {
    fn analyze(&self, mutation: &Mutation, _design: &Design) -> Vec<Mutation> {
        match mutation {
            Mutation::PlaceComponent { content_type, .. } => vec![Mutation::IncrementCounter {
                key: Design::content_counter_key(content_type.as_str()),
            }],
            _ => vec![],
        }
    }
}

/// Keep `len(cells) == len(columns)` on every row
#[derive(Debug)]
pub struct NormalizeCells;

impl PostEffect for NormalizeCells {
    fn analyze(&self, mutation: &Mutation, design: &Design) -> Vec<Mutation> {
        if let Mutation::SetRowCells { .. } = mutation {
            return vec![];
        }

        design
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_balanced())
            .map(|(index, row)| Mutation::SetRowCells {
                row: index,
                cells: normalized_cells(row),
            })
            .collect()
    }
}

/// `cells` padded with the equal share (or truncated) to match `columns`
pub(crate) fn normalized_cells(row: &Row) -> Vec<u32> {
    let share = equal_share(row.columns.len());
    let mut cells = row.cells.clone();
    cells.resize(row.columns.len(), share);
    cells
}

/// Runs registered effects after each primary mutation
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Usage tracking and cells normalization
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(TrackContentUsage), Box::new(NormalizeCells)],
        }
    }

    pub fn with_effects(effects: Vec<Box<dyn PostEffect>>) -> Self {
        Self { effects }
    }

    /// Follow-up mutations from every effect, in registration order
    pub fn analyze(&self, mutation: &Mutation, design: &Design) -> Vec<Mutation> {
        self.effects
            .iter()
            .flat_map(|effect| effect.analyze(mutation, design))
            .collect()
    }

    /// Apply a mutation with all its post-effects.
    ///
    /// Returns every mutation applied, primary first, and the selection
    /// left by the primary mutation.
    pub fn apply_with_effects(
        &self,
        mutation: Mutation,
        design: &mut Design,
        options: &EditorOptions,
    ) -> Result<(Vec<Mutation>, Option<Selection>), MutationError> {
        let selection = mutation.apply(design, options)?;

        let follow_ups = self.analyze(&mutation, design);
        let mut applied = vec![mutation];
        for follow_up in follow_ups {
            follow_up.apply(design, options)?;
            applied.push(follow_up);
        }

        Ok((applied, selection))
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailframe_model::{ColumnPath, Column, ContentType};

    #[test]
    fn test_post_effect_engine_creation() {
        let engine = PostEffectEngine::new();
        assert_eq!(engine.effects.len(), 2);
    }

    #[test]
    fn test_place_component_counts_usage() {
        let mut design = Design::seeded();
        let engine = PostEffectEngine::new();

        let mutation = Mutation::PlaceComponent {
            column: ColumnPath::top(0, 0),
            index: None,
            content_type: ContentType::ColumnDivider,
        };
        let (applied, _) = engine
            .apply_with_effects(mutation, &mut design, &EditorOptions::default())
            .unwrap();

        assert_eq!(applied.len(), 2);
        assert_eq!(design.counters.get("u_content_column-divider"), Some(&1));
    }

    #[test]
    fn test_unbalanced_rows_are_normalized() {
        let mut design = Design::seeded();
        design.rows_mut()[0].columns.push(Column::new());
        design.rows_mut()[0].columns.push(Column::new());
        let engine = PostEffectEngine::new();

        engine
            .apply_with_effects(
                Mutation::IncrementCounter { key: "touch".to_string() },
                &mut design,
                &EditorOptions::default(),
            )
            .unwrap();

        assert_eq!(design.rows()[0].cells, vec![100, 33, 33]);
    }

    #[test]
    fn test_extra_cells_are_dropped() {
        let mut row = Row::with_columns(2, None);
        row.cells.push(10);

        assert_eq!(normalized_cells(&row), vec![50, 50]);
    }

    #[test]
    fn test_balanced_design_has_no_secondary_effects() {
        let design = Design::seeded();
        let engine = PostEffectEngine::new();

        let secondary = engine.analyze(&Mutation::AddColumn { row: 0 }, &design);

        assert!(secondary.is_empty());
    }
}
