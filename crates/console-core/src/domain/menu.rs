// ============================================================================
// Console Core - Menu Entity
// File: crates/console-core/src/domain/menu.rs
// Description: Flat menu records from the backend and the tree nodes built
//              from them
// ============================================================================

use console_shared::EntityId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Menu type enumeration (`M` / `C` / `F` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuType {
    /// Groups children, has no view of its own.
    Directory,
    /// Navigable page backed by a view component.
    Menu,
    /// Inline action permission, never navigable.
    Button,
    /// Any code the backend sends that is none of the above.
    Unrecognized(String),
}

impl MenuType {
    pub fn as_str(&self) -> &str {
        match self {
            MenuType::Directory => "M",
            MenuType::Menu => "C",
            MenuType::Button => "F",
            MenuType::Unrecognized(code) => code,
        }
    }

    pub fn from_code(s: &str) -> Self {
        match s.trim() {
            "M" => MenuType::Directory,
            "C" => MenuType::Menu,
            "F" => MenuType::Button,
            other => MenuType::Unrecognized(other.to_string()),
        }
    }

    pub fn is_navigable(&self) -> bool {
        matches!(self, MenuType::Directory | MenuType::Menu)
    }
}

impl From<String> for MenuType {
    fn from(s: String) -> Self {
        MenuType::from_code(&s)
    }
}

impl From<MenuType> for String {
    fn from(t: MenuType) -> Self {
        t.as_str().to_string()
    }
}

/// Menu visibility (`"0"`/`0` visible, `"1"`/`1` hidden)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FlagValue", into = "String")]
pub enum Visibility {
    Visible,
    Hidden,
    Unrecognized(String),
}

impl Visibility {
    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Visible => "0",
            Visibility::Hidden => "1",
            Visibility::Unrecognized(code) => code,
        }
    }

    pub fn from_code(s: &str) -> Self {
        match s.trim() {
            "0" => Visibility::Visible,
            "1" => Visibility::Hidden,
            other => Visibility::Unrecognized(other.to_string()),
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Visible
    }
}

impl From<FlagValue> for Visibility {
    fn from(value: FlagValue) -> Self {
        Visibility::from_code(&value.into_string())
    }
}

impl From<Visibility> for String {
    fn from(v: Visibility) -> Self {
        v.as_str().to_string()
    }
}

/// The backend sends single-character flags either as strings or as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Text(String),
    Number(i64),
}

impl FlagValue {
    fn into_string(self) -> String {
        match self {
            FlagValue::Text(s) => s,
            FlagValue::Number(n) => n.to_string(),
        }
    }
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FlagValue>::deserialize(deserializer)?.map(FlagValue::into_string))
}

/// One row of the backend menu table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    #[serde(rename = "menuId")]
    pub id: EntityId,

    /// Required: a record without a parent cannot be placed in the tree.
    pub parent_id: EntityId,

    #[serde(rename = "menuName")]
    pub name: String,

    #[serde(default)]
    pub order_num: i32,

    #[serde(default)]
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    pub menu_type: MenuType,

    #[serde(default)]
    pub visible: Visibility,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perms: Option<String>,

    /// `"0"` marks an external link.
    #[serde(default, deserialize_with = "optional_flag", skip_serializing_if = "Option::is_none")]
    pub is_frame: Option<String>,

    /// `"1"` disables page caching.
    #[serde(default, deserialize_with = "optional_flag", skip_serializing_if = "Option::is_none")]
    pub is_cache: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, deserialize_with = "optional_flag", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MenuRecord {
    pub fn new(
        id: EntityId,
        parent_id: EntityId,
        name: impl Into<String>,
        order_num: i32,
        path: impl Into<String>,
        menu_type: MenuType,
    ) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            order_num,
            path: path.into(),
            component: None,
            menu_type,
            visible: Visibility::Visible,
            icon: None,
            perms: None,
            is_frame: None,
            is_cache: None,
            query: None,
            status: None,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_perms(mut self, perms: impl Into<String>) -> Self {
        self.perms = Some(perms.into());
        self
    }

    pub fn with_visibility(mut self, visible: Visibility) -> Self {
        self.visible = visible;
        self
    }

    /// Parse the JSON array returned by the menu endpoint.
    pub fn parse_list(json: &str) -> Result<Vec<MenuRecord>, DomainError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Component path with empty strings treated as absent.
    pub fn component_path(&self) -> Option<&str> {
        self.component.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    pub fn is_navigable(&self) -> bool {
        self.menu_type.is_navigable() && self.visible == Visibility::Visible
    }

    pub fn is_external_link(&self) -> bool {
        self.is_frame.as_deref() == Some("0")
    }

    pub fn is_no_cache(&self) -> bool {
        self.is_cache.as_deref() == Some("1")
    }
}

/// A menu record with its ordered children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub record: MenuRecord,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn leaf(record: MenuRecord) -> Self {
        Self { record, children: Vec::new() }
    }

    /// Pre-order walk over this node and all descendants.
    pub fn flatten(&self) -> Vec<&MenuRecord> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a MenuRecord>) {
        out.push(&self.record);
        for child in &self.children {
            child.collect_into(out);
        }
    }

    /// Pre-order walk over a forest.
    pub fn flatten_all(nodes: &[MenuNode]) -> Vec<&MenuRecord> {
        let mut out = Vec::new();
        for node in nodes {
            node.collect_into(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_json() {
        let json = r#"[
            {"menuId": 1, "parentId": 0, "menuName": "系统管理", "orderNum": 1,
             "path": "system", "menuType": "M", "visible": "0", "icon": "system"},
            {"menuId": 100, "parentId": 1, "menuName": "用户管理", "orderNum": 1,
             "path": "user", "component": "system/user/index", "menuType": "C",
             "visible": 0, "perms": "system:user:list", "isFrame": 1, "isCache": "0"}
        ]"#;
        let records = MenuRecord::parse_list(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].menu_type, MenuType::Directory);
        assert_eq!(records[0].component, None);
        assert_eq!(records[0].perms, None);
        assert_eq!(records[1].visible, Visibility::Visible);
        assert_eq!(records[1].is_frame.as_deref(), Some("1"));
        assert_eq!(records[1].component_path(), Some("system/user/index"));
    }

    #[test]
    fn test_unrecognized_codes_are_kept() {
        let json = r#"[{"menuId": 9, "parentId": 0, "menuName": "x", "menuType": "Z", "visible": "2"}]"#;
        let records = MenuRecord::parse_list(json).unwrap();
        assert_eq!(records[0].menu_type, MenuType::Unrecognized("Z".into()));
        assert_eq!(records[0].visible, Visibility::Unrecognized("2".into()));
        assert!(!records[0].is_navigable());
    }

    #[test]
    fn test_missing_visible_defaults_to_visible() {
        let json = r#"[{"menuId": 3, "parentId": 0, "menuName": "x", "menuType": "C"}]"#;
        let records = MenuRecord::parse_list(json).unwrap();
        assert!(records[0].is_navigable());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            MenuRecord::parse_list("{not json"),
            Err(DomainError::MalformedMenuData(_))
        ));
    }

    #[test]
    fn test_missing_parent_id_is_malformed() {
        let json = r#"[{"menuId": 4, "menuName": "x", "menuType": "C"}]"#;
        assert!(matches!(MenuRecord::parse_list(json), Err(DomainError::MalformedMenuData(_))));
    }

    #[test]
    fn test_codes_parse_with_surrounding_space() {
        assert_eq!(MenuType::from_code(" M "), MenuType::Directory);
        assert_eq!(Visibility::from_code("1"), Visibility::Hidden);
    }

    #[test]
    fn test_empty_component_is_absent() {
        let record = MenuRecord::new(1, 0, "x", 1, "/x", MenuType::Menu).with_component("  ");
        assert_eq!(record.component_path(), None);
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let mut root = MenuNode::leaf(MenuRecord::new(1, 0, "a", 1, "/a", MenuType::Directory));
        let mut mid = MenuNode::leaf(MenuRecord::new(2, 1, "b", 1, "/b", MenuType::Directory));
        mid.children.push(MenuNode::leaf(MenuRecord::new(3, 2, "c", 1, "/c", MenuType::Menu)));
        root.children.push(mid);
        root.children.push(MenuNode::leaf(MenuRecord::new(4, 1, "d", 2, "/d", MenuType::Menu)));
        let ids: Vec<_> = root.flatten().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
