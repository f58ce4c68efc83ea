// ============================================================================
// Console API - User Endpoints
// File: crates/console-api/src/endpoints/user.rs
// ============================================================================
//! User management, profile and role assignment

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::menu::TreeSelect;
use crate::endpoints::resource::{ids_segment, Resource};
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/user";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVo {
    pub user_id: EntityId,
    #[serde(default)]
    pub dept_id: Option<EntityId>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phonenumber: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub dept_name: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<EntityId>,

    #[validate(length(min = 2, max = 20, message = "Username must be between 2 and 20 characters"))]
    pub user_name: String,

    #[validate(length(max = 30, message = "Nickname too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,

    /// Only sent when creating a user.
    #[validate(length(min = 5, max = 20, message = "Password must be between 5 and 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[validate(length(max = 11, message = "Phone number too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub post_ids: Vec<EntityId>,
    pub role_ids: Vec<EntityId>,
}

/// `GET /user/{id}` payload: the user plus selectable roles and posts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(default)]
    pub user: Option<UserVo>,
    #[serde(default)]
    pub roles: Vec<Value>,
    #[serde(default)]
    pub role_ids: Vec<EntityId>,
    #[serde(default)]
    pub posts: Vec<Value>,
    #[serde(default)]
    pub post_ids: Vec<EntityId>,
}

/// `GET /user/authRole/{id}` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserRoles {
    #[serde(default)]
    pub user: Option<UserVo>,
    #[serde(default)]
    pub roles: Vec<Value>,
}

pub struct UserApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn users(&self) -> UserApi<'_> {
        UserApi { resource: Resource::new(self, BASE) }
    }
}

impl UserApi<'_> {
    pub async fn list(&self, query: &UserQuery) -> Result<Page<UserVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, user_id: EntityId) -> Result<UserDetail, ApiError> {
        self.resource.get(user_id).await
    }

    /// Role and post options for a blank create form.
    pub async fn form_options(&self) -> Result<UserDetail, ApiError> {
        self.resource.client().get(&self.resource.path("")).await
    }

    pub async fn option_select(&self, user_ids: &[EntityId]) -> Result<Vec<UserVo>, ApiError> {
        let ids = ids_segment(user_ids).ok_or(ApiError::EmptyIds(BASE))?;
        self.resource
            .client()
            .get_query(&self.resource.path("optionselect"), &json!({ "userIds": ids }))
            .await
    }

    pub async fn add(&self, form: &UserForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &UserForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, user_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(user_ids).await
    }

    pub async fn reset_password(&self, user_id: EntityId, password: &str) -> Result<(), ApiError> {
        let body = json!({ "userId": user_id, "password": password });
        self.resource.client().put(&self.resource.path("resetPwd"), &body).await
    }

    pub async fn change_status(&self, user_id: EntityId, status: &str) -> Result<(), ApiError> {
        let body = json!({ "userId": user_id, "status": status });
        self.resource.client().put(&self.resource.path("changeStatus"), &body).await
    }

    pub async fn profile(&self) -> Result<Value, ApiError> {
        self.resource.client().get(&self.resource.path("profile")).await
    }

    pub async fn update_profile(&self, form: &UserForm) -> Result<(), ApiError> {
        form.validate()?;
        self.resource.client().put(&self.resource.path("profile"), form).await
    }

    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError> {
        let body = json!({ "oldPassword": old_password, "newPassword": new_password });
        self.resource.client().put(&self.resource.path("profile/updatePwd"), &body).await
    }

    pub async fn auth_role(&self, user_id: EntityId) -> Result<UserRoles, ApiError> {
        self.resource.client().get(&self.resource.path(&format!("authRole/{}", user_id))).await
    }

    /// Replaces the user's roles; an empty list removes all of them.
    pub async fn update_auth_role(&self, user_id: EntityId, role_ids: &[EntityId]) -> Result<(), ApiError> {
        let role_ids = ids_segment(role_ids).unwrap_or_default();
        let query = json!({ "userId": user_id, "roleIds": role_ids });
        self.resource.client().put_query(&self.resource.path("authRole"), &query).await
    }

    pub async fn list_by_dept(&self, dept_id: EntityId) -> Result<Vec<UserVo>, ApiError> {
        self.resource.client().get(&self.resource.path(&format!("list/dept/{}", dept_id))).await
    }

    pub async fn dept_tree(&self) -> Result<Vec<TreeSelect>, ApiError> {
        self.resource.client().get("/api/system/dept/treeselect").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"code": 200, "msg": "操作成功"}))
    }

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/user/list"))
            .and(query_param("userName", "adm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200, "total": 1,
                "rows": [{"userId": 1, "userName": "admin", "nickName": "管理员", "status": "0"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let query = UserQuery { user_name: Some("adm".into()), ..Default::default() };
        let page = client.users().list(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].nick_name, "管理员");
    }

    #[tokio::test]
    async fn test_change_status_and_batch_delete() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/system/user/changeStatus"))
            .and(body_json(json!({"userId": 3, "status": "1"})))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/system/user/3,4"))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        client.users().change_status(3, "1").await.unwrap();
        client.users().delete(&[3, 4]).await.unwrap();
        assert!(matches!(client.users().delete(&[]).await, Err(ApiError::EmptyIds(_))));
    }

    #[tokio::test]
    async fn test_update_auth_role_uses_query() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/system/user/authRole"))
            .and(query_param("userId", "5"))
            .and(query_param("roleIds", "2,3"))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        client.users().update_auth_role(5, &[2, 3]).await.unwrap();
    }

    #[test]
    fn test_user_form_validation() {
        let mut form = UserForm { user_name: "ry".into(), status: "0".into(), ..Default::default() };
        assert!(form.validate().is_ok());
        form.email = Some("not-an-email".into());
        assert!(form.validate().is_err());
        form.email = Some("ry@example.com".into());
        form.password = Some("123".into());
        assert!(form.validate().is_err());
    }
}
