use thiserror::Error;

#[derive(Error, Debug)]
pub enum PillarError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Oracle Unavailable ({path}): {reason}")]
    OracleUnavailable { path: String, reason: String },

    #[error("Worker Pool Error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type PfResult<T> = Result<T, PillarError>;

pub fn invalid(msg: impl Into<String>) -> PillarError {
    PillarError::InvalidInput(msg.into())
}
