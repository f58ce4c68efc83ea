//! Department tree endpoints

use console_shared::{EntityId, PageQuery};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ApiClient;
use crate::endpoints::menu::TreeSelect;
use crate::endpoints::resource::Resource;
use crate::error::ApiError;

const BASE: &str = "/api/system/dept";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeptQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeptVo {
    pub dept_id: EntityId,
    #[serde(default)]
    pub parent_id: EntityId,
    #[serde(default)]
    pub ancestors: Option<String>,
    #[serde(default)]
    pub dept_name: String,
    #[serde(default)]
    pub order_num: i32,
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub children: Vec<DeptVo>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeptForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<EntityId>,
    pub parent_id: EntityId,

    #[validate(length(min = 1, max = 30, message = "Department name must be between 1 and 30 characters"))]
    pub dept_name: String,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order_num: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,

    #[validate(length(max = 11, message = "Phone number too long"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub status: String,
}

pub struct DeptApi<'a> {
    resource: Resource<'a>,
}

impl ApiClient {
    pub fn depts(&self) -> DeptApi<'_> {
        DeptApi { resource: Resource::new(self, BASE) }
    }
}

impl DeptApi<'_> {
    /// Flat list; the caller assembles the tree from `parent_id`.
    pub async fn list(&self, query: &DeptQuery) -> Result<Vec<DeptVo>, ApiError> {
        self.resource.client().get_query(&self.resource.path("list"), query).await
    }

    /// Candidate parents for `dept_id`: every department outside its subtree.
    pub async fn list_exclude_child(&self, dept_id: EntityId) -> Result<Vec<DeptVo>, ApiError> {
        self.resource.client().get(&self.resource.path(&format!("list/exclude/{}", dept_id))).await
    }

    pub async fn get(&self, dept_id: EntityId) -> Result<DeptVo, ApiError> {
        self.resource.get(dept_id).await
    }

    pub async fn add(&self, form: &DeptForm) -> Result<(), ApiError> {
        self.resource.add(form).await
    }

    pub async fn update(&self, form: &DeptForm) -> Result<(), ApiError> {
        self.resource.update(form).await
    }

    pub async fn delete(&self, dept_id: EntityId) -> Result<(), ApiError> {
        self.resource.delete(&[dept_id]).await
    }

    pub async fn treeselect(&self) -> Result<Vec<TreeSelect>, ApiError> {
        self.resource.client().get(&self.resource.path("treeselect")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_exclude_child() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/dept/list/exclude/101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": [{"deptId": 100, "parentId": 0, "deptName": "总公司", "orderNum": 0, "status": "0"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let depts = client.depts().list_exclude_child(101).await.unwrap();
        assert_eq!(depts.len(), 1);
        assert_eq!(depts[0].dept_name, "总公司");
        assert!(depts[0].children.is_empty());
    }

    #[test]
    fn test_dept_form_validation() {
        let form = DeptForm { dept_name: "研发部门".into(), status: "0".into(), order_num: -1, ..Default::default() };
        assert!(form.validate().is_err());
    }
}
