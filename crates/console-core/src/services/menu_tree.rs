// ============================================================================
// Console Core - Menu Tree Builder
// File: crates/console-core/src/services/menu_tree.rs
// Description: Flat menu list -> ordered tree -> navigable route table
// ============================================================================

use std::collections::HashMap;

use console_shared::EntityId;
use tracing::{debug, warn};

use crate::domain::{MenuNode, MenuRecord, MenuType, RouteEntry, RouteMeta, Visibility};
use crate::services::component_registry::ComponentRegistry;

/// Builds menu trees and route tables.
///
/// Records whose parent chain never reaches the requested root are
/// dropped from the tree and reported at `warn` level; they are not an
/// error. Each record is placed at most once, so data that loops back to
/// an ancestor cannot recurse forever.
#[derive(Debug, Clone, Copy)]
pub struct MenuTreeBuilder<'a> {
    registry: &'a ComponentRegistry,
}

impl Default for MenuTreeBuilder<'static> {
    fn default() -> Self {
        Self::new(ComponentRegistry::builtin())
    }
}

impl<'a> MenuTreeBuilder<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Children of `root_parent_id`, recursively, each sibling group sorted
    /// by `order_num` with ties kept in input order.
    pub fn build_tree(&self, records: &[MenuRecord], root_parent_id: EntityId) -> Vec<MenuNode> {
        let mut by_parent: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_parent.entry(record.parent_id).or_default().push(idx);
        }
        for siblings in by_parent.values_mut() {
            // sort_by_key is stable
            siblings.sort_by_key(|&idx| records[idx].order_num);
        }

        let mut placed = vec![false; records.len()];
        let tree = attach(records, &by_parent, root_parent_id, &mut placed);

        let orphans: Vec<EntityId> = records
            .iter()
            .zip(&placed)
            .filter(|(_, is_placed)| !**is_placed)
            .map(|(record, _)| record.id)
            .collect();
        if !orphans.is_empty() {
            warn!(
                root_parent_id,
                orphan_count = orphans.len(),
                orphan_ids = ?orphans,
                "menu records not reachable from root were dropped"
            );
        }

        tree
    }

    /// Keeps visible Directory/Menu nodes, recursively, in order.
    ///
    /// A qualifying directory whose children were all removed is kept.
    pub fn filter_navigable(&self, nodes: &[MenuNode]) -> Vec<MenuNode> {
        nodes
            .iter()
            .filter(|node| {
                report_unrecognized(&node.record);
                node.record.is_navigable()
            })
            .map(|node| MenuNode {
                record: node.record.clone(),
                children: self.filter_navigable(&node.children),
            })
            .collect()
    }

    /// One route per navigable node. Only `Menu` nodes carry a component.
    pub fn build_routes(&self, nodes: &[MenuNode]) -> Vec<RouteEntry> {
        nodes.iter().filter_map(|node| self.route_for(node)).collect()
    }

    fn route_for(&self, node: &MenuNode) -> Option<RouteEntry> {
        let record = &node.record;
        if !record.is_navigable() {
            return None;
        }

        let component = match record.menu_type {
            MenuType::Menu => record
                .component_path()
                .and_then(|path| self.registry.resolve(path)),
            _ => None,
        };

        Some(RouteEntry {
            path: record.path.clone(),
            name: record.name.clone(),
            meta: RouteMeta {
                title: record.name.clone(),
                icon: record.icon.clone(),
                no_cache: record.is_no_cache(),
                link: record.is_external_link().then(|| record.path.clone()),
            },
            component,
            children: self.build_routes(&node.children),
        })
    }
}

fn attach(
    records: &[MenuRecord],
    by_parent: &HashMap<EntityId, Vec<usize>>,
    parent_id: EntityId,
    placed: &mut [bool],
) -> Vec<MenuNode> {
    let Some(siblings) = by_parent.get(&parent_id) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(siblings.len());
    for &idx in siblings {
        if placed[idx] {
            debug!(menu_id = records[idx].id, "menu record already placed; skipping");
            continue;
        }
        placed[idx] = true;
        let record = &records[idx];
        let children = attach(records, by_parent, record.id, placed);
        nodes.push(MenuNode { record: record.clone(), children });
    }
    nodes
}

fn report_unrecognized(record: &MenuRecord) {
    if let MenuType::Unrecognized(code) = &record.menu_type {
        warn!(menu_id = record.id, menu_type = %code, "unrecognized menu type; hiding menu");
    }
    if let Visibility::Unrecognized(code) = &record.visible {
        warn!(menu_id = record.id, visible = %code, "unrecognized visibility flag; hiding menu");
    }
}
