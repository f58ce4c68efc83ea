// ============================================================================
// Console Core - Menu Service
// File: crates/console-core/src/services/menu_service.rs
// ============================================================================
//! Fetches the session's menu list and derives tree + routes from it

use std::sync::Arc;

use console_shared::constants::ROOT_MENU_PARENT_ID;
use console_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{MenuNode, MenuRecord, MenuType, RouteEntry, ViewId};
use crate::error::DomainError;
use crate::repositories::MenuSource;
use crate::services::menu_tree::MenuTreeBuilder;

/// Everything derived from one menu fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    pub records: Vec<MenuRecord>,
    /// Full hierarchy, buttons and hidden entries included.
    pub nodes: Vec<MenuNode>,
    /// Visible directories and menus only.
    pub navigable: Vec<MenuNode>,
    pub routes: Vec<RouteEntry>,
    /// Built from [`default_menu_records`] because the fetch failed.
    pub fallback: bool,
}

impl MenuTree {
    pub fn from_records(builder: &MenuTreeBuilder<'_>, records: Vec<MenuRecord>) -> Self {
        let nodes = builder.build_tree(&records, ROOT_MENU_PARENT_ID);
        let navigable = builder.filter_navigable(&nodes);
        let routes = builder.build_routes(&navigable);
        Self { records, nodes, navigable, routes, fallback: false }
    }

    pub fn fallback(builder: &MenuTreeBuilder<'_>) -> Self {
        Self { fallback: true, ..Self::from_records(builder, default_menu_records()) }
    }

    pub fn find_route(&self, path: &str) -> Option<&RouteEntry> {
        RouteEntry::find(&self.routes, path)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Menu loading service
pub struct MenuService<S: MenuSource> {
    source: Arc<S>,
    builder: MenuTreeBuilder<'static>,
}

impl<S: MenuSource> MenuService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source, builder: MenuTreeBuilder::default() }
    }

    /// Fetch and derive; any source error is returned as is.
    pub async fn load(&self) -> Result<MenuTree, DomainError> {
        let records = self.source.fetch_menus().await?;
        info!(count = records.len(), "menu records fetched");
        Ok(MenuTree::from_records(&self.builder, records))
    }

    /// Like [`load`](Self::load) but falls back to the built-in menu set.
    /// An expired session is still reported so the caller can sign out.
    pub async fn load_or_default(&self) -> Result<MenuTree, DomainError> {
        match self.load().await {
            Ok(tree) => Ok(tree),
            Err(DomainError::Unauthorized) => Err(DomainError::Unauthorized),
            Err(e) => {
                warn!("Menu fetch failed, using default menus: {}", e);
                Ok(MenuTree::fallback(&self.builder))
            }
        }
    }
}

type DefaultMenu = (EntityId, EntityId, &'static str, &'static str, &'static str, Option<ViewId>, i32);

const DEFAULT_MENUS: &[DefaultMenu] = &[
    (1, 0, "系统管理", "/system", "system", None, 1),
    (100, 1, "用户管理", "/system/user", "user", Some(ViewId::SystemUser), 1),
    (101, 1, "角色管理", "/system/role", "peoples", Some(ViewId::SystemRole), 2),
    (102, 1, "菜单管理", "/system/menu", "tree-table", Some(ViewId::SystemMenu), 3),
    (103, 1, "部门管理", "/system/dept", "tree", Some(ViewId::SystemDept), 4),
    (104, 1, "岗位管理", "/system/post", "post", Some(ViewId::SystemPost), 5),
    (105, 1, "字典管理", "/system/dict", "dict", None, 6),
    (1051, 105, "字典类型", "/system/dict/type", "dict", Some(ViewId::DictType), 1),
    (1052, 105, "字典数据", "/system/dict/data", "dict", Some(ViewId::DictData), 2),
    (106, 1, "参数设置", "/system/config", "edit", Some(ViewId::SystemConfig), 7),
    (107, 1, "通知公告", "/system/notice", "message", Some(ViewId::SystemNotice), 8),
    (108, 1, "客户端管理", "/system/client", "client", Some(ViewId::SystemClient), 9),
    (109, 1, "对象存储", "/system/oss", "upload", Some(ViewId::SystemOss), 10),
    (110, 1, "租户管理", "/system/tenant", "tenant", Some(ViewId::SystemTenant), 11),
    (2, 0, "系统监控", "/monitor", "monitor", None, 2),
    (200, 2, "登录日志", "/monitor/logininfor", "logininfor", Some(ViewId::LoginInfo), 1),
    (201, 2, "操作日志", "/monitor/operlog", "form", Some(ViewId::OperLog), 2),
];

/// Menu set used when the backend cannot supply one.
pub fn default_menu_records() -> Vec<MenuRecord> {
    DEFAULT_MENUS
        .iter()
        .map(|&(id, parent_id, name, path, icon, view, order)| {
            let menu_type = if view.is_some() { MenuType::Menu } else { MenuType::Directory };
            let record = MenuRecord::new(id, parent_id, name, order, path, menu_type).with_icon(icon);
            match view {
                Some(view) => record.with_component(view.component_path()),
                None => record,
            }
        })
        .collect()
}
