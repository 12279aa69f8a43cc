use thiserror::Error;

pub type Result<T, E = SportError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SportError {
    #[error("network interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("operation not supported on this backend: {0}")]
    Unsupported(&'static str),
    #[error("{command} rejected by sport service (code {code})")]
    Rejected { command: &'static str, code: i32 },
    #[error("timeout")]
    Timeout,
}
