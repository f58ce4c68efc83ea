//! Session and guard errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Login grant carries no token")]
    MissingToken,

    #[error("Session storage I/O failed: {0}")]
    StorageIo(#[from] std::io::Error),

    #[error("Session storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    /// A guard was declared without any codes to check.
    #[error("{kind} guard requires at least one code, e.g. [\"{example}\"]")]
    EmptyRequirement { kind: &'static str, example: &'static str },
}
