//! Route entries derived from the menu tree

use serde::Serialize;

use super::view::ViewId;

/// Resolved view for a `Menu`-type route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRef {
    pub path: String,
    pub view: ViewId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub no_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// Depth-first search by exact path.
    pub fn find<'a>(routes: &'a [RouteEntry], path: &str) -> Option<&'a RouteEntry> {
        routes.iter().find_map(|route| {
            if route.path == path {
                Some(route)
            } else {
                RouteEntry::find(&route.children, path)
            }
        })
    }
}
