//! Persistent entity graph.
//!
//! A [`Graph`] is two reference-counted layers:
//! - a shared, immutable base holding the loaded entities plus parent indices
//! - a small local overlay holding everything replaced or removed since
//!
//! `replace` / `remove` clone the overlay only when it is shared (`Arc::make_mut`), so chains of
//! edits on one snapshot stay cheap while earlier snapshots keep observing their own state.

use crate::entity::{Entity, Node, Relation, Way};
use crate::error::{Error, Result};
use crate::id::{EntityId, EntityKind};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Identifies the node/way/relation membership of a snapshot.
///
/// Moving or retagging an existing node keeps the stamp. Anything that changes which entities
/// exist or how they reference each other assigns a fresh, process-unique stamp, so two snapshots
/// with equal stamps are guaranteed to share their topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topology(u64);

static NEXT_TOPOLOGY: AtomicU64 = AtomicU64::new(1);

impl Topology {
    fn next() -> Self {
        Self(NEXT_TOPOLOGY.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Default)]
struct Base {
    entities: IndexMap<EntityId, Arc<Entity>>,
    parent_ways: HashMap<EntityId, Vec<EntityId>>,
    parent_rels: HashMap<EntityId, Vec<EntityId>>,
}

#[derive(Debug, Clone, Default)]
struct Local {
    // `None` marks an entity removed from the base.
    entities: IndexMap<EntityId, Option<Arc<Entity>>>,
    // Full replacement lists for every child whose parents changed.
    parent_ways: HashMap<EntityId, Vec<EntityId>>,
    parent_rels: HashMap<EntityId, Vec<EntityId>>,
}

#[derive(Debug, Clone)]
pub struct Graph {
    base: Arc<Base>,
    local: Arc<Local>,
    topology: Topology,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            base: Arc::new(Base::default()),
            local: Arc::new(Local::default()),
            topology: Topology::next(),
        }
    }

    /// Builds a base snapshot. Later entities win over earlier ones with the same id.
    pub fn from_entities<I, E>(entities: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        let mut base = Base::default();
        for entity in entities {
            let entity = entity.into();
            base.entities.insert(entity.id().clone(), Arc::new(entity));
        }

        for entity in base.entities.values() {
            match entity.as_ref() {
                Entity::Way(way) => {
                    for node in &way.nodes {
                        link(&mut base.parent_ways, node, &way.id);
                    }
                }
                Entity::Relation(rel) => {
                    for member in rel.member_ids() {
                        link(&mut base.parent_rels, member, &rel.id);
                    }
                }
                Entity::Node(_) => {}
            }
        }

        Self {
            base: Arc::new(base),
            local: Arc::new(Local::default()),
            topology: Topology::next(),
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// True when both handles point at the very same snapshot storage.
    pub fn is_same_snapshot(&self, other: &Graph) -> bool {
        Arc::ptr_eq(&self.base, &other.base) && Arc::ptr_eq(&self.local, &other.local)
    }

    pub fn has_entity(&self, id: &EntityId) -> Option<&Entity> {
        match self.local.entities.get(id) {
            Some(slot) => slot.as_deref(),
            None => self.base.entities.get(id).map(|e| &**e),
        }
    }

    pub fn entity(&self, id: &EntityId) -> Result<&Entity> {
        self.has_entity(id)
            .ok_or_else(|| Error::NotFound { id: id.clone() })
    }

    pub fn has_node(&self, id: &EntityId) -> Option<&Node> {
        self.has_entity(id).and_then(Entity::as_node)
    }

    pub fn node(&self, id: &EntityId) -> Result<&Node> {
        self.entity(id)?.as_node().ok_or_else(|| Error::WrongKind {
            id: id.clone(),
            expected: EntityKind::Node,
        })
    }

    pub fn way(&self, id: &EntityId) -> Result<&Way> {
        self.entity(id)?.as_way().ok_or_else(|| Error::WrongKind {
            id: id.clone(),
            expected: EntityKind::Way,
        })
    }

    pub fn relation(&self, id: &EntityId) -> Result<&Relation> {
        self.entity(id)?
            .as_relation()
            .ok_or_else(|| Error::WrongKind {
                id: id.clone(),
                expected: EntityKind::Relation,
            })
    }

    /// Every visible entity: untouched base entities first, then local ones in edit order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.base
            .entities
            .iter()
            .filter(|(id, _)| !self.local.entities.contains_key(*id))
            .map(|(_, e)| &**e)
            .chain(self.local.entities.values().filter_map(|e| e.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().next().is_none()
    }

    fn parent_ids<'a>(
        local: &'a HashMap<EntityId, Vec<EntityId>>,
        base: &'a HashMap<EntityId, Vec<EntityId>>,
        id: &EntityId,
    ) -> &'a [EntityId] {
        local
            .get(id)
            .or_else(|| base.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ways referencing `id`, in the order they started referencing it.
    pub fn parent_ways(&self, id: &EntityId) -> Vec<&Way> {
        Self::parent_ids(&self.local.parent_ways, &self.base.parent_ways, id)
            .iter()
            .filter_map(|w| self.has_entity(w).and_then(Entity::as_way))
            .collect()
    }

    pub fn parent_relations(&self, id: &EntityId) -> Vec<&Relation> {
        Self::parent_ids(&self.local.parent_rels, &self.base.parent_rels, id)
            .iter()
            .filter_map(|r| self.has_entity(r).and_then(Entity::as_relation))
            .collect()
    }

    /// Nodes of `way` in sequence order (closed ways list their first node twice).
    pub fn child_nodes(&self, way: &Way) -> Result<Vec<&Node>> {
        way.nodes.iter().map(|id| self.node(id)).collect()
    }

    /// Returns a snapshot in which `entity` is stored under its id.
    pub fn replace(&self, entity: impl Into<Entity>) -> Graph {
        let entity = entity.into();
        let id = entity.id().clone();
        let previous = self.has_entity(&id);
        if previous == Some(&entity) {
            return self.clone();
        }

        let topology_changed = match (previous, &entity) {
            (Some(Entity::Node(_)), Entity::Node(_)) => false,
            (Some(Entity::Way(a)), Entity::Way(b)) => a.nodes != b.nodes,
            (Some(Entity::Relation(a)), Entity::Relation(b)) => !a.member_ids().eq(b.member_ids()),
            _ => true,
        };
        let (old_nodes, old_members) = children(previous);
        let (new_nodes, new_members) = children(Some(&entity));

        let mut next = self.clone();
        let base = &next.base;
        let local = Arc::make_mut(&mut next.local);
        relink(
            &base.parent_ways,
            &mut local.parent_ways,
            &id,
            &old_nodes,
            &new_nodes,
        );
        relink(
            &base.parent_rels,
            &mut local.parent_rels,
            &id,
            &old_members,
            &new_members,
        );
        local.entities.insert(id, Some(Arc::new(entity)));

        if topology_changed {
            next.topology = Topology::next();
        }
        next
    }

    /// Returns a snapshot without `id`. References to it from other entities are left alone.
    pub fn remove(&self, id: &EntityId) -> Graph {
        let Some(previous) = self.has_entity(id) else {
            return self.clone();
        };
        let (old_nodes, old_members) = children(Some(previous));

        let mut next = self.clone();
        let base = &next.base;
        let local = Arc::make_mut(&mut next.local);
        relink(&base.parent_ways, &mut local.parent_ways, id, &old_nodes, &[]);
        relink(&base.parent_rels, &mut local.parent_rels, id, &old_members, &[]);
        local.entities.insert(id.clone(), None);

        next.topology = Topology::next();
        next
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        if self.is_same_snapshot(other) {
            return true;
        }
        self.len() == other.len() && self.entities().all(|e| other.has_entity(e.id()) == Some(e))
    }
}

fn children(entity: Option<&Entity>) -> (Vec<EntityId>, Vec<EntityId>) {
    match entity {
        Some(Entity::Way(w)) => (w.nodes.clone(), Vec::new()),
        Some(Entity::Relation(r)) => (Vec::new(), r.member_ids().cloned().collect()),
        _ => (Vec::new(), Vec::new()),
    }
}

fn link(index: &mut HashMap<EntityId, Vec<EntityId>>, child: &EntityId, parent: &EntityId) {
    let parents = index.entry(child.clone()).or_default();
    if !parents.contains(parent) {
        parents.push(parent.clone());
    }
}

/// Moves `parent` between the parent lists of `removed` and `added` children.
///
/// Children present in both lists keep their parent order untouched.
fn relink(
    base: &HashMap<EntityId, Vec<EntityId>>,
    local: &mut HashMap<EntityId, Vec<EntityId>>,
    parent: &EntityId,
    removed: &[EntityId],
    added: &[EntityId],
) {
    for child in removed {
        if added.contains(child) {
            continue;
        }
        let parents = local
            .entry(child.clone())
            .or_insert_with(|| base.get(child).cloned().unwrap_or_default());
        parents.retain(|p| p != parent);
    }
    for child in added {
        if removed.contains(child) {
            continue;
        }
        let parents = local
            .entry(child.clone())
            .or_insert_with(|| base.get(child).cloned().unwrap_or_default());
        if !parents.contains(parent) {
            parents.push(parent.clone());
        }
    }
}
