use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid target pattern: {0}")]
    Pattern(#[from] regex::Error),
}
