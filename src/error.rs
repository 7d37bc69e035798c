use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssuefmtError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid label color '{0}': expected 6 hex digits")]
    InvalidColor(String),

    #[error("Failed to install signal handler: {0}")]
    SignalHandler(String),

    #[error("No issue #{0} in input")]
    IssueNotFound(u64),

    #[error("Input contains no issues")]
    NoIssues,
}

pub type Result<T> = std::result::Result<T, IssuefmtError>;
