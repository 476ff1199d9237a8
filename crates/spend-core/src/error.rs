use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {field} amount: `{input}`")]
    InvalidAmount { field: &'static str, input: String },
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<spend_domain::MonthKeyError> for CoreError {
    fn from(err: spend_domain::MonthKeyError) -> Self {
        CoreError::InvalidMonth(err.to_string())
    }
}
