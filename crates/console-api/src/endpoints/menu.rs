// ============================================================================
// Console API - Menu Endpoints
// File: crates/console-api/src/endpoints/menu.rs
// ============================================================================
//! Menu management endpoints and the backend-backed menu source

use async_trait::async_trait;
use console_core::repositories::MenuSource;
use console_core::{DomainError, MenuRecord};
use console_shared::constants::MAX_PAGE_SIZE;
use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;
use crate::response::Page;

const BASE: &str = "/api/system/menu";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Create/update payload
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<EntityId>,
    pub parent_id: EntityId,

    #[validate(length(min = 1, max = 50, message = "Menu name must be between 1 and 50 characters"))]
    pub menu_name: String,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order_num: i32,

    #[validate(length(max = 200, message = "Route path too long"))]
    pub path: String,

    #[validate(length(max = 255, message = "Component path too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// `"0"` external link, `"1"` internal route.
    pub is_frame: String,
    /// `"0"` cached, `"1"` not cached.
    pub is_cache: String,

    #[validate(length(equal = 1, message = "Menu type must be M, C or F"))]
    pub menu_type: String,
    pub visible: String,
    pub status: String,

    #[validate(length(max = 100, message = "Permission code too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<String>,

    #[validate(length(max = 100, message = "Menu icon too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl MenuForm {
    pub fn new(parent_id: EntityId, menu_name: impl Into<String>, menu_type: &str, order_num: i32) -> Self {
        Self {
            menu_id: None,
            parent_id,
            menu_name: menu_name.into().trim().to_string(),
            order_num,
            path: String::new(),
            component: None,
            query: None,
            is_frame: "1".to_string(),
            is_cache: "0".to_string(),
            menu_type: menu_type.to_string(),
            visible: "0".to_string(),
            status: "0".to_string(),
            perms: None,
            icon: None,
            remark: None,
        }
    }
}

/// Node of a `{id, label, children}` selection tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSelect {
    pub id: EntityId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSelect>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMenuTree {
    #[serde(default)]
    pub checked_keys: Vec<EntityId>,
    #[serde(default)]
    pub menus: Vec<TreeSelect>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub no_cache: bool,
    #[serde(default)]
    pub link: Option<String>,
}

/// Route tree as assembled by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterVo {
    #[serde(default)]
    pub name: Option<String>,
    pub path: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub always_show: Option<bool>,
    #[serde(default)]
    pub meta: Option<RouterMeta>,
    #[serde(default)]
    pub children: Vec<RouterVo>,
}

pub struct MenuApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn menus(&self) -> MenuApi<'_> {
        MenuApi { resource: Resource::new(self, BASE) }
    }
}

impl MenuApi<'_> {
    pub async fn list(&self, query: &MenuQuery) -> Result<Page<MenuRecord>, ApiError> {
        self.resource.list(query).await
    }

    /// Every page of the listing, concatenated.
    pub async fn list_all(&self) -> Result<Vec<MenuRecord>, ApiError> {
        let mut records = Vec::new();
        let mut query = MenuQuery { page: PageQuery::new(1, MAX_PAGE_SIZE), ..Default::default() };
        loop {
            let page = self.list(&query).await?;
            let fetched = page.rows.len();
            records.extend(page.rows);
            debug!(page = query.page.page_num, fetched, total = page.total, "menu page fetched");
            if fetched == 0 || records.len() as u64 >= page.total {
                break;
            }
            query.page.page_num += 1;
        }
        Ok(records)
    }

    pub async fn get(&self, menu_id: EntityId) -> Result<MenuRecord, ApiError> {
        self.resource.get(menu_id).await
    }

    pub async fn treeselect(&self) -> Result<Vec<TreeSelect>, ApiError> {
        self.resource.client().get(&self.resource.path("treeselect")).await
    }

    pub async fn role_menu_treeselect(&self, role_id: EntityId) -> Result<RoleMenuTree, ApiError> {
        let path = self.resource.path(&format!("roleMenuTreeselect/{}", role_id));
        self.resource.client().get(&path).await
    }

    pub async fn add(&self, form: &MenuForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &MenuForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, menu_id: EntityId) -> Result<(), ApiError> {
        self.resource.delete(&[menu_id]).await
    }

    pub async fn get_routers(&self) -> Result<Vec<RouterVo>, ApiError> {
        self.resource.client().get(&self.resource.path("getRouters")).await
    }
}

#[async_trait]
impl MenuSource for ApiClient {
    async fn fetch_menus(&self) -> Result<Vec<MenuRecord>, DomainError> {
        let records = self.menus().list_all().await?;
        info!(count = records.len(), "menu records loaded from backend");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::MenuType;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn row(id: i64, parent: i64, name: &str, menu_type: &str) -> serde_json::Value {
        json!({
            "menuId": id, "parentId": parent, "menuName": name, "orderNum": 1,
            "path": format!("/{}", name), "menuType": menu_type, "visible": "0", "status": "0"
        })
    }

    #[tokio::test]
    async fn test_fetch_menus_pages_through_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/menu/list"))
            .and(query_param("pageNum", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"rows": [row(1, 0, "system", "M")], "total": 2}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/system/menu/list"))
            .and(query_param("pageNum", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"rows": [row(100, 1, "user", "C")], "total": 2}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let records = client.fetch_menus().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].menu_type, MenuType::Menu);
        assert_eq!(records[1].parent_id, 1);
    }

    #[tokio::test]
    async fn test_fetch_menus_maps_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 401, "msg": "认证失败"})))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        assert!(matches!(client.fetch_menus().await, Err(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_get_routers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/menu/getRouters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "msg": "操作成功",
                "data": [{
                    "name": "System", "path": "/system", "hidden": false, "alwaysShow": true,
                    "meta": {"title": "系统管理", "icon": "system", "noCache": false},
                    "children": [{"name": "User", "path": "user", "component": "system/user/index",
                                  "meta": {"title": "用户管理", "icon": "user"}}]
                }]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let routers = client.menus().get_routers().await.unwrap();
        assert_eq!(routers[0].children[0].component.as_deref(), Some("system/user/index"));
        assert_eq!(routers[0].meta.as_ref().map(|m| m.title.as_str()), Some("系统管理"));
    }

    #[tokio::test]
    async fn test_role_menu_treeselect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/menu/roleMenuTreeselect/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"checkedKeys": [1, 100], "menus": [{"id": 1, "label": "系统管理",
                          "children": [{"id": 100, "label": "用户管理"}]}]}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let tree = client.menus().role_menu_treeselect(2).await.unwrap();
        assert_eq!(tree.checked_keys, vec![1, 100]);
        assert_eq!(tree.menus[0].children[0].label, "用户管理");
    }

    #[test]
    fn test_menu_form_validation() {
        let mut form = MenuForm::new(0, "  ", "M", 1);
        assert!(form.validate().is_err());
        form.menu_name = "系统管理".into();
        assert!(form.validate().is_ok());
        form.menu_type = "MC".into();
        assert!(form.validate().is_err());
    }
}
