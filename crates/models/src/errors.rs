use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Message without the category prefix, for field-level reporting.
    pub fn detail(&self) -> &str {
        match self {
            ModelError::Validation(m) | ModelError::Db(m) => m,
        }
    }
}
