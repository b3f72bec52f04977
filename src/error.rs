use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourierError {
    #[error("invalid setup at line {line}: {reason}")]
    InvalidSetup { line: usize, reason: String },

    #[error("invalid discount table: {0}")]
    InvalidDiscountTable(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("incomplete setup: no vehicle available")]
    EmptyFleet,

    #[error("incomplete setup: no package to deliver")]
    NoPackages,

    #[error("no delivery available, plan deliveries first")]
    NotPlanned,

    #[error("discount code {code} not found")]
    UnknownDiscountCode { code: String },

    #[error("cannot find package {name}")]
    PackageNotFound { name: String },

    #[error("cannot find vehicle {id}")]
    VehicleNotFound { id: usize },
}

impl CourierError {
    pub(crate) fn invalid_setup(line: usize, reason: impl Into<String>) -> Self {
        CourierError::InvalidSetup {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CourierError>;
