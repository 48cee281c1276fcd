//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Design error: {0}")]
    Design(#[from] mailframe_model::DesignError),

    #[error("Render error: {0}")]
    Render(#[from] mailframe_compiler_html::CompileError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),
}
