use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type.
///
/// Collaborator failures (content reads, schedule mutations) are either
/// recovered locally — a missing document is reported as [`MnemaError::NotFound`],
/// never a crash — or propagated unchanged. Invariant violations the queue can
/// correct on its own (out-of-range indices) are clamped rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum MnemaError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File system error: {0}")]
    Io(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("Schedule store error: {0}")]
    Schedule(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<io::Error> for MnemaError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => MnemaError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => MnemaError::PermissionDenied,
            _ => MnemaError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<toml::de::Error> for MnemaError {
    fn from(src: toml::de::Error) -> MnemaError {
        MnemaError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for MnemaError {
    fn from(src: toml::ser::Error) -> MnemaError {
        MnemaError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<walkdir::Error> for MnemaError {
    fn from(src: walkdir::Error) -> MnemaError {
        match src.io_error().map(|e| e.kind()) {
            Some(io::ErrorKind::NotFound) => MnemaError::NotFound(format!("{src}")),
            Some(io::ErrorKind::PermissionDenied) => MnemaError::PermissionDenied,
            _ => MnemaError::Io(format!("Directory walk error: {src}")),
        }
    }
}
