use crate::cache::MoveCache;
use crate::dedupe::remove_duplicate_vertices;
use crate::error::Result;
use crate::limit::limit_delta;
use crate::options::MoveOptions;
use crate::preserve::preserve_vertex;
use crate::translate::translate_nodes;
use crate::untangle::untangle;
use sirenia_geo::{Projection, Vector};
use sirenia_graph::{EntityId, Graph};

/// Moves a selection of entities by a planar offset.
///
/// One action represents one offset proposal. During a drag, create a new action per pointer
/// event and keep passing the same [`MoveCache`]; the closure and intersection analysis is then
/// only computed once.
#[derive(Debug, Clone)]
pub struct MoveAction<P> {
    ids: Vec<EntityId>,
    delta: Vector,
    projection: P,
    options: MoveOptions,
}

impl<P: Projection> MoveAction<P> {
    pub fn new<I, T>(ids: I, delta: Vector, projection: P) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            delta,
            projection,
            options: MoveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MoveOptions) -> Self {
        self.options = options;
        self
    }

    /// The offset actually applied by the last `apply`, after limiting.
    pub fn delta(&self) -> Vector {
        self.delta
    }

    /// Returns `graph` with the selection moved. `graph` itself is left untouched.
    pub fn apply(&mut self, graph: &Graph, cache: &mut MoveCache) -> Result<Graph> {
        if self.delta.x == 0.0 && self.delta.y == 0.0 {
            return Ok(graph.clone());
        }

        let _span = tracing::debug_span!("move", ids = self.ids.len()).entered();
        cache.ensure(graph, &self.ids)?;

        let has_intersections = !cache.intersections().is_empty();
        if has_intersections {
            self.delta = limit_delta(graph, cache, self.delta, &self.projection, &self.options)?;
        }

        let mut out = translate_nodes(graph, cache, self.delta, &self.projection)?;

        if has_intersections {
            out = self.cleanup_intersections(out, cache)?;
        }
        Ok(out)
    }

    /// Same as [`apply`](Self::apply) with a throwaway cache.
    pub fn apply_uncached(&mut self, graph: &Graph) -> Result<Graph> {
        let mut cache = MoveCache::new();
        self.apply(graph, &mut cache)
    }

    fn cleanup_intersections(&self, graph: Graph, cache: &mut MoveCache) -> Result<Graph> {
        let mut graph = graph;
        let intersections = cache.intersections().to_vec();
        for obj in &intersections {
            graph = preserve_vertex(
                &graph,
                cache,
                &obj.node_id,
                &obj.moved_id,
                Some(self.delta),
                &self.projection,
                &self.options,
            )?;
            graph = preserve_vertex(
                &graph,
                cache,
                &obj.node_id,
                &obj.unmoved_id,
                None,
                &self.projection,
                &self.options,
            )?;
            graph = untangle(&graph, obj, &self.projection, &self.options)?;
            if self.options.remove_duplicate_vertices {
                graph = remove_duplicate_vertices(&graph, &obj.moved_id, &self.options)?;
                graph = remove_duplicate_vertices(&graph, &obj.unmoved_id, &self.options)?;
            }
        }
        Ok(graph)
    }
}
