use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown {what}: '{value}'")]
    Parse { what: &'static str, value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { field, reason: reason.into() }
    }

    pub fn parse(what: &'static str, value: impl Into<String>) -> Self {
        Self::Parse { what, value: value.into() }
    }
}

pub type DashResult<T> = Result<T, DashError>;
