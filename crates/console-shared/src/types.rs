//! Common types

use serde::{Deserialize, Serialize};

/// Backend primary key (menuId, roleId, userId, ...).
pub type EntityId = i64;

/// Paging parameters understood by every `list` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_num: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.clamp(1, super::constants::MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page_num: 1, page_size: super::constants::DEFAULT_PAGE_SIZE }
    }
}
