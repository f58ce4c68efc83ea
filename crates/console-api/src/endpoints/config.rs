//! System parameter (config key) endpoints

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/config";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigVo {
    pub config_id: EntityId,
    #[serde(default)]
    pub config_name: String,
    #[serde(default)]
    pub config_key: String,
    #[serde(default)]
    pub config_value: String,
    /// `"Y"` for built-in parameters.
    #[serde(default)]
    pub config_type: String,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<EntityId>,

    #[validate(length(min = 1, max = 100, message = "Parameter name must be between 1 and 100 characters"))]
    pub config_name: String,

    #[validate(length(min = 1, max = 100, message = "Parameter key must be between 1 and 100 characters"))]
    pub config_key: String,

    #[validate(length(min = 1, max = 500, message = "Parameter value must be between 1 and 500 characters"))]
    pub config_value: String,

    pub config_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub struct ConfigApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn configs(&self) -> ConfigApi<'_> {
        ConfigApi { resource: Resource::new(self, BASE) }
    }
}

impl ConfigApi<'_> {
    pub async fn list(&self, query: &ConfigQuery) -> Result<Page<ConfigVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, config_id: EntityId) -> Result<ConfigVo, ApiError> {
        self.resource.get(config_id).await
    }

    /// Value of a parameter by key, e.g. `sys.account.captchaEnabled`.
    pub async fn get_by_key(&self, config_key: &str) -> Result<String, ApiError> {
        let value: Option<String> =
            self.resource.client().get(&self.resource.path(&format!("configKey/{}", config_key))).await?;
        Ok(value.unwrap_or_default())
    }

    pub async fn add(&self, form: &ConfigForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &ConfigForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, config_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(config_ids).await
    }

    pub async fn refresh_cache(&self) -> Result<(), ApiError> {
        self.resource.client().delete(&self.resource.path("refreshCache")).await
    }
}
