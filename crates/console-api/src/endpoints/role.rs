//! Role management, data scope and user assignment

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::menu::TreeSelect;
use crate::endpoints::resource::{ids_segment, Resource};
use crate::endpoints::user::UserVo;
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/role";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleVo {
    pub role_id: EntityId,
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub role_key: String,
    #[serde(default)]
    pub role_sort: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data_scope: Option<String>,
    #[serde(default)]
    pub flag: Option<bool>,
    #[serde(default)]
    pub admin: Option<bool>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,

    #[validate(length(min = 1, max = 30, message = "Role name must be between 1 and 30 characters"))]
    pub role_name: String,

    #[validate(length(min = 1, max = 100, message = "Role key must be between 1 and 100 characters"))]
    pub role_key: String,

    #[validate(range(min = 0, message = "Sort order must not be negative"))]
    pub role_sort: i32,

    pub status: String,
    pub menu_ids: Vec<EntityId>,
    pub dept_ids: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_check_strictly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_check_strictly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DataScopeForm {
    pub role_id: EntityId,
    pub role_name: String,
    pub role_key: String,
    #[validate(length(equal = 1, message = "Data scope is a single digit code"))]
    pub data_scope: String,
    pub dept_ids: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_check_strictly: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub role_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDeptTree {
    #[serde(default)]
    pub checked_keys: Vec<EntityId>,
    #[serde(default)]
    pub depts: Vec<TreeSelect>,
}

pub struct RoleApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn roles(&self) -> RoleApi<'_> {
        RoleApi { resource: Resource::new(self, BASE) }
    }
}

impl RoleApi<'_> {
    pub async fn list(&self, query: &RoleQuery) -> Result<Page<RoleVo>, ApiError> {
        self.resource.list(query).await
    }

    pub async fn get(&self, role_id: EntityId) -> Result<RoleVo, ApiError> {
        self.resource.get(role_id).await
    }

    pub async fn add(&self, form: &RoleForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &RoleForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, role_ids: &[EntityId]) -> Result<(), ApiError> {
        self.resource.delete(role_ids).await
    }

    pub async fn data_scope(&self, form: &DataScopeForm) -> Result<(), ApiError> {
        form.validate()?;
        self.resource.client().put(&self.resource.path("dataScope"), form).await
    }

    pub async fn change_status(&self, role_id: EntityId, status: &str) -> Result<(), ApiError> {
        let body = json!({ "roleId": role_id, "status": status });
        self.resource.client().put(&self.resource.path("changeStatus"), &body).await
    }

    pub async fn option_select(&self) -> Result<Vec<RoleVo>, ApiError> {
        self.resource.client().get(&self.resource.path("optionselect")).await
    }

    pub async fn allocated_users(&self, query: &AuthUserQuery) -> Result<Page<UserVo>, ApiError> {
        self.resource.client().get_page(&self.resource.path("authUser/allocatedList"), query).await
    }

    pub async fn unallocated_users(&self, query: &AuthUserQuery) -> Result<Page<UserVo>, ApiError> {
        self.resource.client().get_page(&self.resource.path("authUser/unallocatedList"), query).await
    }

    pub async fn cancel_user(&self, role_id: EntityId, user_id: EntityId) -> Result<(), ApiError> {
        let body = json!({ "roleId": role_id, "userId": user_id });
        self.resource.client().put(&self.resource.path("authUser/cancel"), &body).await
    }

    pub async fn cancel_users(&self, role_id: EntityId, user_ids: &[EntityId]) -> Result<(), ApiError> {
        self.assign(role_id, user_ids, "authUser/cancelAll").await
    }

    pub async fn select_users(&self, role_id: EntityId, user_ids: &[EntityId]) -> Result<(), ApiError> {
        self.assign(role_id, user_ids, "authUser/selectAll").await
    }

    pub async fn dept_tree(&self, role_id: EntityId) -> Result<RoleDeptTree, ApiError> {
        self.resource.client().get(&self.resource.path(&format!("deptTree/{}", role_id))).await
    }

    async fn assign(&self, role_id: EntityId, user_ids: &[EntityId], action: &str) -> Result<(), ApiError> {
        let user_ids = ids_segment(user_ids).ok_or(ApiError::EmptyIds(BASE))?;
        let query: Value = json!({ "roleId": role_id, "userIds": user_ids });
        self.resource.client().put_query(&self.resource.path(action), &query).await
    }
}
