//! Post (job position) endpoints

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/post";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVo {
    pub post_id: EntityId,
    #[serde(default)]
    pub post_code: String,
    #[serde(default)]
    pub post_name: String,
    #[serde(default)]
    pub post_sort: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<EntityId>,

    #[validate(length(min = 1, max = 64, message = "Post code must be between 1 and 64 characters"))]
    pub post_code: String,

    #[validate(length(min = 1, max = 50, message = "Post name must be between 1 and 50 characters"))]
    pub post_name: String,

    #[validate(range(min = 0, message = "Sort order must not be negative"))]
    pub post_sort: i32,

    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub struct PostApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn posts(&self) -> PostApi<'_> {
        PostApi { resource: Resource::new(self, BASE) }
    }
}

impl PostApi<'_> {
    pub async fn list(&self, query: &PostQuery) -> Result<Page<PostVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, post_id: EntityId) -> Result<PostVo, ApiError> {
        self.resource.get(post_id).await
    }

    pub async fn add(&self, form: &PostForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &PostForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, post_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(post_ids).await
    }

    pub async fn option_select(&self) -> Result<Vec<PostVo>, ApiError> {
        self.resource.client().get(&self.resource.path("optionselect")).await
    }

    pub async fn change_status(&self, post_id: EntityId, status: &str) -> Result<(), ApiError> {
        let body = json!({ "postId": post_id, "status": status });
        self.resource.client().put(&self.resource.path("changeStatus"), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_post_sends_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/system/post"))
            .and(body_json(json!({"postCode": "ceo", "postName": "董事长", "postSort": 1, "status": "0"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let form = PostForm {
            post_code: "ceo".into(),
            post_name: "董事长".into(),
            post_sort: 1,
            status: "0".into(),
            ..Default::default()
        };
        client.posts().add(&form).await.unwrap();
    }
}
