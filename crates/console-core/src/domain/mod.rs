//! # Console Core - Domain Module
//! 
//! Domain entities for the admin console.

pub mod menu;
pub mod route;
pub mod view;
pub mod session;
pub mod navigation;

// Re-export all entities and enums
pub use menu::{MenuRecord, MenuNode, MenuType, Visibility};
pub use route::{RouteEntry, RouteMeta, ComponentRef};
pub use view::ViewId;
pub use session::{SessionState, UserInfo, CodeSet};
pub use navigation::{NavigationRequest, NavigationOutcome};
