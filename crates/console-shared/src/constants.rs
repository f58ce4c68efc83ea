//! Application-wide constants

/// Permission code that satisfies every permission check.
pub const ALL_PERMISSION: &str = "*:*:*";
/// Role code that satisfies every role check.
pub const SUPER_ADMIN_ROLE: &str = "admin";

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
pub const PERMISSION_DENIED_MESSAGE: &str = "您没有访问该页面的权限";
pub const DEFAULT_TITLE_SUFFIX: &str = "RuoYi管理系统";

/// `parentId` carried by top-level menu records.
pub const ROOT_MENU_PARENT_ID: i64 = 0;
/// Upper bound on chained redirects followed while resolving a path.
pub const MAX_REDIRECT_HOPS: usize = 8;

pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const RESPONSE_CODE_SUCCESS: i64 = 200;
pub const RESPONSE_CODE_UNAUTHORIZED: i64 = 401;

// Persisted session keys
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_USER_INFO: &str = "userInfo";
pub const STORAGE_KEY_PERMISSIONS: &str = "permissions";
pub const STORAGE_KEY_ROLES: &str = "roles";
pub const STORAGE_KEY_MENUS: &str = "menus";

pub const ALL_STORAGE_KEYS: [&str; 5] = [
    STORAGE_KEY_TOKEN,
    STORAGE_KEY_USER_INFO,
    STORAGE_KEY_PERMISSIONS,
    STORAGE_KEY_ROLES,
    STORAGE_KEY_MENUS,
];
