use thiserror::Error;

/// Errors reported by fallible `ProbeMap` operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeMapError {
    /// A resize was asked for fewer buckets than there are live entries
    #[error("requested capacity {requested} is below the number of live entries ({len})")]
    CapacityBelowLen { requested: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ProbeMapError>;
