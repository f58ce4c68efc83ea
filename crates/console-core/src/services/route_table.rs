// ============================================================================
// Console Core - Static Route Table
// File: crates/console-core/src/services/route_table.rs
// Description: Fixed console routes, legacy redirects and path matching
// ============================================================================

use std::collections::BTreeMap;

use console_shared::constants::MAX_REDIRECT_HOPS;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::domain::{NavigationRequest, ViewId};

/// A fixed route with its access metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Pattern; `:name` captures one segment, `:name?` an optional one.
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewId,
    pub title: &'static str,
    pub requires_auth: bool,
    pub permissions: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub from: &'static str,
    pub to: &'static str,
}

const fn route(
    path: &'static str,
    name: &'static str,
    view: ViewId,
    title: &'static str,
    permissions: &'static [&'static str],
) -> RouteDefinition {
    RouteDefinition { path, name, view, title, requires_auth: true, permissions }
}

const fn redirect(from: &'static str, to: &'static str) -> Redirect {
    Redirect { from, to }
}

const BUILTIN_REDIRECTS: &[Redirect] = &[
    redirect("/", "/login"),
    redirect("/user", "/system/user"),
    redirect("/role", "/system/role"),
    redirect("/menu", "/system/menu"),
    redirect("/dept", "/system/dept"),
    redirect("/post", "/system/post"),
    redirect("/dict", "/system/dict/type"),
    redirect("/dict/type", "/system/dict/type"),
    redirect("/dict/data", "/system/dict/data"),
    redirect("/config", "/system/config"),
    redirect("/notice", "/system/notice"),
    redirect("/client", "/system/client"),
    redirect("/oss", "/system/oss"),
    redirect("/tenant", "/system/tenant"),
    redirect("/logininfor", "/monitor/logininfor"),
    redirect("/operlog", "/monitor/operlog"),
    redirect("/system/dict", "/system/dict/type"),
];

const BUILTIN_ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        path: "/login",
        name: "Login",
        view: ViewId::Login,
        title: "登录",
        requires_auth: false,
        permissions: &[],
    },
    route("/dashboard", "Dashboard", ViewId::Dashboard, "首页", &[]),
    route("/system/user", "User", ViewId::SystemUser, "用户管理", &["system:user:list"]),
    route("/system/role", "Role", ViewId::SystemRole, "角色管理", &["system:role:list"]),
    route("/system/menu", "Menu", ViewId::SystemMenu, "菜单管理", &["system:menu:list"]),
    route("/system/dept", "Dept", ViewId::SystemDept, "部门管理", &["system:dept:list"]),
    route("/system/post", "Post", ViewId::SystemPost, "岗位管理", &["system:post:list"]),
    route("/system/dict/type", "DictType", ViewId::DictType, "字典类型", &["system:dict:list"]),
    route("/system/dict/data/:dictType?", "DictData", ViewId::DictData, "字典数据", &["system:dict:list"]),
    route("/system/dict/data/index/:dictId", "DictDataWithId", ViewId::DictData, "字典数据", &["system:dict:list"]),
    route("/system/config", "Config", ViewId::SystemConfig, "参数设置", &["system:config:list"]),
    route("/system/notice", "Notice", ViewId::SystemNotice, "通知公告", &["system:notice:list"]),
    route("/system/client", "Client", ViewId::SystemClient, "客户端管理", &["system:client:list"]),
    route("/system/oss", "Oss", ViewId::SystemOss, "对象存储", &["system:oss:list"]),
    route("/system/tenant", "Tenant", ViewId::SystemTenant, "租户管理", &["system:tenant:list"]),
    route("/monitor/logininfor", "Logininfor", ViewId::LoginInfo, "登录日志", &["monitor:logininfor:list"]),
    route("/monitor/operlog", "Operlog", ViewId::OperLog, "操作日志", &["monitor:operlog:list"]),
    route("/test/token", "TokenTest", ViewId::TokenTest, "Token测试", &[]),
    route("/system/user-auth/role/:userId", "UserAuthRole", ViewId::UserAuthRole, "用户角色授权", &["system:user:edit"]),
    route("/system/role-auth/user/:roleId", "RoleAuthUser", ViewId::RoleAuthUser, "角色授权用户", &["system:role:edit"]),
];

static BUILTIN: Lazy<RouteTable> =
    Lazy::new(|| RouteTable::new(BUILTIN_REDIRECTS.to_vec(), BUILTIN_ROUTES.to_vec()));

/// Result of resolving a concrete path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub definition: &'a RouteDefinition,
    /// Final path after following redirects.
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl ResolvedRoute<'_> {
    pub fn navigation_request(&self) -> NavigationRequest {
        NavigationRequest {
            target_path: self.path.clone(),
            required_permission_codes: self.definition.permissions.iter().map(|p| p.to_string()).collect(),
            requires_auth: self.definition.requires_auth,
            title: Some(self.definition.title.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    redirects: Vec<Redirect>,
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    pub fn builtin() -> &'static RouteTable {
        &BUILTIN
    }

    pub fn new(redirects: Vec<Redirect>, routes: Vec<RouteDefinition>) -> Self {
        Self { redirects, routes }
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Follows exact-match redirects, then returns the first route whose
    /// pattern matches.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let mut current = normalize_path(path);
        let mut hops = 0;
        while let Some(next) = self.redirects.iter().find(|r| r.from == current) {
            hops += 1;
            if hops > MAX_REDIRECT_HOPS {
                warn!(path, hops, "redirect chain too long; giving up");
                return None;
            }
            current = next.to.to_string();
        }

        let segments = split(&current);
        self.routes.iter().find_map(|definition| {
            let mut params = BTreeMap::new();
            match_segments(&split(definition.path), &segments, &mut params).then(|| ResolvedRoute {
                definition,
                path: current.clone(),
                params,
            })
        })
    }
}

/// Drops query string, fragment and trailing slash; keeps a leading slash.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_segments(pattern: &[&str], path: &[&str], params: &mut BTreeMap<String, String>) -> bool {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if let Some(name) = head.strip_prefix(':') {
        if let Some(name) = name.strip_suffix('?') {
            if let Some((value, path_rest)) = path.split_first() {
                let mut attempt = params.clone();
                attempt.insert(name.to_string(), value.to_string());
                if match_segments(rest, path_rest, &mut attempt) {
                    *params = attempt;
                    return true;
                }
            }
            return match_segments(rest, path, params);
        }
        return match path.split_first() {
            Some((value, path_rest)) => {
                params.insert(name.to_string(), value.to_string());
                match_segments(rest, path_rest, params)
            }
            None => false,
        };
    }

    match path.split_first() {
        Some((segment, path_rest)) if segment == head => match_segments(rest, path_rest, params),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/system/user/"), "/system/user");
        assert_eq!(normalize_path("/system/user?pageNum=2#top"), "/system/user");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("login"), "/login");
    }

    #[test]
    fn test_static_route_with_permission() {
        let resolved = RouteTable::builtin().resolve("/system/user").unwrap();
        assert_eq!(resolved.definition.view, ViewId::SystemUser);
        let request = resolved.navigation_request();
        assert!(request.requires_auth);
        assert!(request.required_permission_codes.contains("system:user:list"));
        assert_eq!(request.title.as_deref(), Some("用户管理"));
    }

    #[test]
    fn test_legacy_redirects_followed() {
        let resolved = RouteTable::builtin().resolve("/dict").unwrap();
        assert_eq!(resolved.path, "/system/dict/type");
        assert_eq!(resolved.definition.name, "DictType");

        let root = RouteTable::builtin().resolve("/").unwrap();
        assert_eq!(root.definition.view, ViewId::Login);
        assert!(!root.navigation_request().requires_auth);
    }

    #[test]
    fn test_required_param() {
        let resolved = RouteTable::builtin().resolve("/system/user-auth/role/42").unwrap();
        assert_eq!(resolved.definition.name, "UserAuthRole");
        assert_eq!(resolved.params.get("userId").map(String::as_str), Some("42"));
        assert!(RouteTable::builtin().resolve("/system/user-auth/role").is_none());
    }

    #[test]
    fn test_optional_param() {
        let table = RouteTable::builtin();
        let bare = table.resolve("/system/dict/data").unwrap();
        assert_eq!(bare.definition.name, "DictData");
        assert!(bare.params.is_empty());

        let typed = table.resolve("/system/dict/data/sys_user_sex").unwrap();
        assert_eq!(typed.definition.name, "DictData");
        assert_eq!(typed.params.get("dictType").map(String::as_str), Some("sys_user_sex"));

        let by_id = table.resolve("/system/dict/data/index/7").unwrap();
        assert_eq!(by_id.definition.name, "DictDataWithId");
    }

    #[test]
    fn test_unknown_path() {
        assert!(RouteTable::builtin().resolve("/nowhere").is_none());
    }

    #[test]
    fn test_redirect_loop_is_cut() {
        let table = RouteTable::new(vec![redirect("/a", "/b"), redirect("/b", "/a")], vec![]);
        assert!(table.resolve("/a").is_none());
    }
}
