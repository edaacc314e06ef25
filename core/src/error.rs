use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unknown insight query: '{label}'")]
    UnknownQuery { label: String },

    #[error("Invalid {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },
}

pub type CheckResult<T> = Result<T, CheckError>;
