// ============================================================================
// Console API - Dictionary Endpoints
// File: crates/console-api/src/endpoints/dict.rs
// Description: Dictionary types and their data entries
// ============================================================================

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;
use crate::response::Page;

const TYPE_BASE: &str = "/api/system/dict/type";
const DATA_BASE: &str = "/api/system/dict/data";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeVo {
    pub dict_id: EntityId,
    #[serde(default)]
    pub dict_name: String,
    #[serde(default)]
    pub dict_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_id: Option<EntityId>,

    #[validate(length(min = 1, max = 100, message = "Dictionary name must be between 1 and 100 characters"))]
    pub dict_name: String,

    #[validate(length(min = 1, max = 100, message = "Dictionary type must be between 1 and 100 characters"))]
    pub dict_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictDataQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictDataVo {
    pub dict_code: EntityId,
    #[serde(default)]
    pub dict_sort: i32,
    #[serde(default)]
    pub dict_label: String,
    #[serde(default)]
    pub dict_value: String,
    #[serde(default)]
    pub dict_type: String,
    #[serde(default)]
    pub css_class: Option<String>,
    #[serde(default)]
    pub list_class: Option<String>,
    #[serde(default)]
    pub is_default: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DictDataForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dict_code: Option<EntityId>,

    #[validate(range(min = 0, message = "Sort order must not be negative"))]
    pub dict_sort: i32,

    #[validate(length(min = 1, max = 100, message = "Label must be between 1 and 100 characters"))]
    pub dict_label: String,

    #[validate(length(min = 1, max = 100, message = "Value must be between 1 and 100 characters"))]
    pub dict_value: String,

    #[validate(length(min = 1, max = 100, message = "Dictionary type is required"))]
    pub dict_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub struct DictTypeApi<'a> {
    resource: Resource<'a>,
}

pub struct DictDataApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn dict_types(&self) -> DictTypeApi<'_> {
        DictTypeApi { resource: Resource::new(self, TYPE_BASE) }
    }

    pub fn dict_data(&self) -> DictDataApi<'_> {
        DictDataApi { resource: Resource::new(self, DATA_BASE) }
    }
}

impl DictTypeApi<'_> {
    pub async fn list(&self, query: &DictTypeQuery) -> Result<Page<DictTypeVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, dict_id: EntityId) -> Result<DictTypeVo, ApiError> {
        self.resource.get(dict_id).await
    }

    pub async fn add(&self, form: &DictTypeForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &DictTypeForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, dict_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(dict_ids).await
    }

    pub async fn refresh_cache(&self) -> Result<(), ApiError> {
        self.resource.client().delete(&self.resource.path("refreshCache")).await
    }

    pub async fn option_select(&self) -> Result<Vec<DictTypeVo>, ApiError> {
        self.resource.client().get(&self.resource.path("optionselect")).await
    }

    /// Whether `dict_type` is still free. The backend answers with a bare
    /// boolean in `data`.
    pub async fn is_unique(&self, dict_type: &str) -> Result<bool, ApiError> {
        let query = json!({ "dictType": dict_type });
        self.resource.client().get_query(&self.resource.path("checkDictTypeUnique"), &query).await
    }
}

impl DictDataApi<'_> {
    pub async fn list(&self, query: &DictDataQuery) -> Result<Page<DictDataVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, dict_code: EntityId) -> Result<DictDataVo, ApiError> {
        self.resource.get(dict_code).await
    }

    /// Enabled entries of one dictionary type, in display order.
    pub async fn by_type(&self, dict_type: &str) -> Result<Vec<DictDataVo>, ApiError> {
        self.resource.client().get(&self.resource.path(&format!("type/{}", dict_type))).await
    }

    pub async fn label(&self, dict_type: &str, dict_value: &str) -> Result<String, ApiError> {
        let query = json!({ "dictType": dict_type, "dictValue": dict_value });
        let label: Option<String> = self.resource.client().get_query(&self.resource.path("label"), &query).await?;
        Ok(label.unwrap_or_default())
    }

    pub async fn add(&self, form: &DictDataForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &DictDataForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, dict_codes: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(dict_codes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_data_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/dict/data/type/sys_user_sex"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": [
                    {"dictCode": 1, "dictSort": 1, "dictLabel": "男", "dictValue": "0", "dictType": "sys_user_sex"},
                    {"dictCode": 2, "dictSort": 2, "dictLabel": "女", "dictValue": "1", "dictType": "sys_user_sex"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let entries = client.dict_data().by_type("sys_user_sex").await.unwrap();
        let labels: Vec<_> = entries.iter().map(|e| e.dict_label.as_str()).collect();
        assert_eq!(labels, vec!["男", "女"]);
    }

    #[tokio::test]
    async fn test_type_uniqueness_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/dict/type/checkDictTypeUnique"))
            .and(query_param("dictType", "sys_yes_no"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": false})))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        assert!(!client.dict_types().is_unique("sys_yes_no").await.unwrap());
    }
}
