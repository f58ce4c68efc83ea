//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Session expired or not authenticated")]
    Unauthorized,

    #[error("Menu source unavailable: {0}")]
    MenuSourceUnavailable(String),

    #[error("Malformed menu data: {0}")]
    MalformedMenuData(#[from] serde_json::Error),
}
