//! View identifiers
//!
//! Every page the console can render is named here together with the
//! component path the backend uses for it. The host maps a `ViewId` to its
//! lazily loaded module.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Login,
    Dashboard,
    SystemUser,
    SystemRole,
    SystemMenu,
    SystemDept,
    SystemPost,
    DictType,
    DictData,
    SystemConfig,
    SystemNotice,
    SystemClient,
    SystemOss,
    SystemTenant,
    LoginInfo,
    OperLog,
    TokenTest,
    UserAuthRole,
    RoleAuthUser,
    ParentView,
    InnerLink,
}

impl ViewId {
    pub const ALL: [ViewId; 21] = [
        ViewId::Login,
        ViewId::Dashboard,
        ViewId::SystemUser,
        ViewId::SystemRole,
        ViewId::SystemMenu,
        ViewId::SystemDept,
        ViewId::SystemPost,
        ViewId::DictType,
        ViewId::DictData,
        ViewId::SystemConfig,
        ViewId::SystemNotice,
        ViewId::SystemClient,
        ViewId::SystemOss,
        ViewId::SystemTenant,
        ViewId::LoginInfo,
        ViewId::OperLog,
        ViewId::TokenTest,
        ViewId::UserAuthRole,
        ViewId::RoleAuthUser,
        ViewId::ParentView,
        ViewId::InnerLink,
    ];

    /// Component path as sent in the backend `component` field.
    pub fn component_path(&self) -> &'static str {
        match self {
            ViewId::Login => "Login",
            ViewId::Dashboard => "Dashboard",
            ViewId::SystemUser => "system/user/index",
            ViewId::SystemRole => "system/role/index",
            ViewId::SystemMenu => "system/menu/index",
            ViewId::SystemDept => "system/dept/index",
            ViewId::SystemPost => "system/post/index",
            ViewId::DictType => "system/dict/type/index",
            ViewId::DictData => "system/dict/data/index",
            ViewId::SystemConfig => "system/config/index",
            ViewId::SystemNotice => "system/notice/index",
            ViewId::SystemClient => "system/client/index",
            ViewId::SystemOss => "system/oss/index",
            ViewId::SystemTenant => "system/tenant/index",
            ViewId::LoginInfo => "monitor/logininfor/index",
            ViewId::OperLog => "monitor/operlog/index",
            ViewId::TokenTest => "test/TokenTest",
            ViewId::UserAuthRole => "system/user/authRole",
            ViewId::RoleAuthUser => "system/role/authUser",
            ViewId::ParentView => "ParentView",
            ViewId::InnerLink => "InnerLink",
        }
    }
}
