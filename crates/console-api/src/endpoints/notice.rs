//! Notice / announcement endpoints

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/notice";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeVo {
    pub notice_id: EntityId,
    #[serde(default)]
    pub notice_title: String,
    /// `"1"` notification, `"2"` announcement.
    #[serde(default)]
    pub notice_type: String,
    #[serde(default)]
    pub notice_content: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub create_by: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoticeForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_id: Option<EntityId>,

    #[validate(length(min = 1, max = 50, message = "Notice title must be between 1 and 50 characters"))]
    pub notice_title: String,

    #[validate(length(equal = 1, message = "Notice type is a single digit code"))]
    pub notice_type: String,

    pub notice_content: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub struct NoticeApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn notices(&self) -> NoticeApi<'_> {
        NoticeApi { resource: Resource::new(self, BASE) }
    }
}

impl NoticeApi<'_> {
    pub async fn list(&self, query: &NoticeQuery) -> Result<Page<NoticeVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, notice_id: EntityId) -> Result<NoticeVo, ApiError> {
        self.resource.get(notice_id).await
    }

    pub async fn add(&self, form: &NoticeForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &NoticeForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, notice_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(notice_ids).await
    }
}
