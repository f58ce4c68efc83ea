//! Static registry from backend component paths to views

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::domain::{ComponentRef, ViewId};

static BUILTIN: Lazy<ComponentRegistry> = Lazy::new(|| {
    ComponentRegistry::from_entries(ViewId::ALL.iter().map(|view| (view.component_path(), *view)))
});

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    views: HashMap<&'static str, ViewId>,
}

impl ComponentRegistry {
    /// Registry covering every [`ViewId`].
    pub fn builtin() -> &'static ComponentRegistry {
        &BUILTIN
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, ViewId)>,
    {
        Self { views: entries.into_iter().collect() }
    }

    /// Accepts `system/user/index`, `/system/user/index` and
    /// `system/user/index.vue` alike.
    pub fn resolve(&self, component_path: &str) -> Option<ComponentRef> {
        let key = normalize(component_path);
        match self.views.get(key) {
            Some(view) => Some(ComponentRef { path: key.to_string(), view: *view }),
            None => {
                warn!(component = component_path, "no view registered for component path");
                None
            }
        }
    }

    pub fn contains(&self, component_path: &str) -> bool {
        self.views.contains_key(normalize(component_path))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

fn normalize(path: &str) -> &str {
    let path = path.trim().trim_start_matches('/');
    path.strip_suffix(".vue").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_views() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(registry.len(), ViewId::ALL.len());
        for view in ViewId::ALL {
            assert_eq!(registry.resolve(view.component_path()).map(|c| c.view), Some(view));
        }
    }

    #[test]
    fn test_resolve_normalizes_path() {
        let registry = ComponentRegistry::builtin();
        let resolved = registry.resolve("/system/user/index.vue").unwrap();
        assert_eq!(resolved.view, ViewId::SystemUser);
        assert_eq!(resolved.path, "system/user/index");
    }

    #[test]
    fn test_unknown_path_is_none() {
        assert!(ComponentRegistry::builtin().resolve("tool/gen/index").is_none());
        assert!(!ComponentRegistry::default().contains("system/user/index"));
    }
}
