use thiserror::Error;

/// Core error type shared across randjson crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A generation parameter is out of range or inconsistent with another.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results returned by randjson crates.
pub type Result<T> = std::result::Result<T, Error>;
