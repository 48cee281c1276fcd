use thiserror::Error;

pub type DesignResult<T> = Result<T, DesignError>;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Malformed design: {0}")]
    Malformed(#[from] serde_json::Error),
}
