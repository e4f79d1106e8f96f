use thiserror::Error;

/// Rejected table parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBuckets,
    #[error("load factor must be in (0, 1], got {0}")]
    InvalidLoadFactor(f64),
}
