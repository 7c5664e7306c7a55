//! Move closure and intersection bookkeeping.
//!
//! Building the cache walks the graph once per selection. Every later offset proposal for the
//! same selection and topology (e.g. each pointer event of a drag) reuses it and only redoes the
//! cheap per-offset stages.

use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use sirenia_graph::{Entity, EntityId, Graph, Loc, Node, Topology, Way};

/// A shared vertex where a moving way meets a stationary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection {
    pub node_id: EntityId,
    pub moved_id: EntityId,
    pub unmoved_id: EntityId,
    pub moved_is_endpoint: bool,
    pub unmoved_is_endpoint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    topology: Topology,
    roots: Vec<EntityId>,
}

#[derive(Debug, Clone, Default)]
pub struct MoveCache {
    moving: FxHashSet<EntityId>,
    nodes: Vec<EntityId>,
    ways: Vec<EntityId>,
    intersections: Vec<Intersection>,
    start_loc: FxHashMap<EntityId, Loc>,
    replaced_vertex: FxHashMap<(EntityId, EntityId), Node>,
    ok: bool,
    key: Option<CacheKey>,
}

impl MoveCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(graph: &Graph, roots: &[EntityId]) -> Result<Self> {
        let mut cache = Self::new();
        cache.ensure(graph, roots)?;
        Ok(cache)
    }

    /// Populates the cache unless it is already built for this topology and root list.
    pub fn ensure(&mut self, graph: &Graph, roots: &[EntityId]) -> Result<()> {
        if self.ok
            && self
                .key
                .as_ref()
                .is_some_and(|k| k.topology == graph.topology() && k.roots == roots)
        {
            return Ok(());
        }

        *self = Self::default();
        self.cache_entities(graph, roots);
        let ways = self.ways.clone();
        self.cache_intersections(graph, &ways)?;
        self.retain_movable_nodes(graph, roots);

        self.ok = true;
        self.key = Some(CacheKey {
            topology: graph.topology(),
            roots: roots.to_vec(),
        });

        tracing::debug!(
            roots = roots.len(),
            moving = self.moving.len(),
            nodes = self.nodes.len(),
            ways = self.ways.len(),
            intersections = self.intersections.len(),
            "built move cache"
        );
        Ok(())
    }

    /// Forgets everything; the next `ensure` rebuilds from scratch.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn is_ready(&self) -> bool {
        self.ok
    }

    pub fn is_moving(&self, id: &EntityId) -> bool {
        self.moving.contains(id)
    }

    pub fn moving(&self) -> impl Iterator<Item = &EntityId> {
        self.moving.iter()
    }

    pub fn nodes(&self) -> &[EntityId] {
        &self.nodes
    }

    pub fn ways(&self) -> &[EntityId] {
        &self.ways
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn start_loc(&self, id: &EntityId) -> Option<Loc> {
        self.start_loc.get(id).copied()
    }

    pub(crate) fn require_start_loc(&self, id: &EntityId) -> Result<Loc> {
        self.start_loc(id)
            .ok_or_else(|| Error::MissingStartLocation { id: id.clone() })
    }

    /// Placeholder created for `node` inside `way`, if any.
    pub fn replaced_vertex(&self, way: &EntityId, node: &EntityId) -> Option<&Node> {
        self.replaced_vertex.get(&(way.clone(), node.clone()))
    }

    /// Returns the placeholder for (`way`, `node`), creating it on first use.
    ///
    /// A new placeholder inherits the start location of the vertex it stands in for.
    pub(crate) fn placeholder(&mut self, way: &EntityId, node: &EntityId) -> Result<Node> {
        let key = (way.clone(), node.clone());
        if let Some(existing) = self.replaced_vertex.get(&key) {
            return Ok(existing.clone());
        }
        let start = self.require_start_loc(node)?;
        let placeholder = Node::fresh(start);
        self.start_loc.insert(placeholder.id.clone(), start);
        self.replaced_vertex.insert(key, placeholder.clone());
        Ok(placeholder)
    }

    /// Depth-first pre-order walk over ways and relation members; `moving` is the visited set.
    fn cache_entities(&mut self, graph: &Graph, roots: &[EntityId]) {
        let mut stack: Vec<EntityId> = roots.iter().rev().cloned().collect();
        while let Some(id) = stack.pop() {
            if !self.moving.insert(id.clone()) {
                continue;
            }
            match graph.has_entity(&id) {
                Some(Entity::Node(node)) => {
                    self.start_loc.insert(id.clone(), node.loc);
                    self.nodes.push(id);
                }
                Some(Entity::Way(way)) => {
                    stack.extend(way.nodes.iter().rev().cloned());
                    self.ways.push(id);
                }
                Some(Entity::Relation(rel)) => {
                    let members: Vec<EntityId> = rel.member_ids().cloned().collect();
                    stack.extend(members.into_iter().rev());
                }
                None => {}
            }
        }
    }

    fn cache_intersections(&mut self, graph: &Graph, ways: &[EntityId]) -> Result<()> {
        for way_id in ways {
            let moved = graph.way(way_id)?;
            for node in graph.child_nodes(moved)? {
                let parents = graph.parent_ways(&node.id);
                if parents.len() != 2 {
                    continue;
                }
                let Some(unmoved) = parents.iter().find(|w| !self.moving.contains(&w.id)) else {
                    continue;
                };

                // Overly connected ways and areas are left alone.
                if shared_node_count(moved, unmoved) > 2 {
                    continue;
                }
                if moved.is_area() || unmoved.is_area() {
                    continue;
                }
                // A closed moved way lists its first node twice.
                if self
                    .intersections
                    .iter()
                    .any(|i| i.node_id == node.id && i.moved_id == moved.id)
                {
                    continue;
                }

                tracing::trace!(
                    node = %node.id,
                    moved = %moved.id,
                    unmoved = %unmoved.id,
                    "recorded intersection"
                );
                self.intersections.push(Intersection {
                    node_id: node.id.clone(),
                    moved_id: moved.id.clone(),
                    unmoved_id: unmoved.id.clone(),
                    moved_is_endpoint: is_endpoint(moved, &node.id),
                    unmoved_is_endpoint: is_endpoint(unmoved, &node.id),
                });
            }
        }
        Ok(())
    }

    /// Drops vertices shared by 3+ ways unless every one of those ways moves too.
    fn retain_movable_nodes(&mut self, graph: &Graph, roots: &[EntityId]) {
        let mut evicted: Vec<EntityId> = Vec::new();
        self.nodes.retain(|id| {
            if roots.contains(id) {
                return true;
            }
            let parents = graph.parent_ways(id);
            if parents.len() < 3 {
                return true;
            }
            let all_moving = parents.iter().all(|w| self.moving.contains(&w.id));
            if !all_moving {
                evicted.push(id.clone());
            }
            all_moving
        });
        for id in &evicted {
            self.moving.remove(id);
        }
    }
}

fn is_endpoint(way: &Way, node: &EntityId) -> bool {
    !way.is_closed() && way.affix(node).is_some()
}

fn shared_node_count(a: &Way, b: &Way) -> usize {
    let b_nodes: FxHashSet<&EntityId> = b.nodes.iter().collect();
    let a_nodes: FxHashSet<&EntityId> = a.nodes.iter().collect();
    a_nodes.intersection(&b_nodes).count()
}
