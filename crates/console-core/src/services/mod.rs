//! Services

pub mod permission;
pub mod menu_tree;
pub mod access_gate;
pub mod route_table;
pub mod component_registry;
pub mod icons;
pub mod menu_service;

pub use permission::{PermissionEvaluator, CodeKind, check_permissions, check_roles};
pub use menu_tree::MenuTreeBuilder;
pub use access_gate::{AccessGate, GateConfig};
pub use route_table::{RouteTable, RouteDefinition, Redirect, ResolvedRoute};
pub use component_registry::ComponentRegistry;
pub use icons::icon_component;
pub use menu_service::{MenuService, MenuTree, default_menu_records};
