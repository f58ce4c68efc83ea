//! Menu source trait (port)

use async_trait::async_trait;

use crate::domain::MenuRecord;
use crate::error::DomainError;

/// Supplies the flat menu list for the current session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menus(&self) -> Result<Vec<MenuRecord>, DomainError>;
}
