#![forbid(unsafe_code)]

//! Topology-preserving move for versioned map graphs.
//!
//! Moving a selection runs five stages over immutable [`Graph`] snapshots:
//! 1. [`MoveCache`] computes what moves and where moving ways meet stationary ones
//! 2. [`limit_delta`] keeps moved endpoints from crossing stationary ways
//! 3. [`translate_nodes`] offsets every movable node
//! 4. [`preserve_vertex`] keeps the shape of ways a shared vertex was pulled out of
//! 5. [`untangle`] snaps shared vertices back onto their ways and fixes node order
//!
//! followed by [`remove_duplicate_vertices`] to drop placeholders that ended up redundant.
//! [`MoveAction`] chains them.

pub use sirenia_geo as geo;
pub use sirenia_graph as graph;

pub mod action;
pub mod cache;
pub mod dedupe;
pub mod error;
pub mod limit;
pub mod options;
pub mod preserve;
pub mod translate;
pub mod untangle;

pub use action::MoveAction;
pub use cache::{Intersection, MoveCache};
pub use dedupe::remove_duplicate_vertices;
pub use error::{Error, Result};
pub use limit::limit_delta;
pub use options::MoveOptions;
pub use preserve::preserve_vertex;
pub use translate::translate_nodes;
pub use untangle::untangle;

use sirenia_geo::{Projection, Vector};
use sirenia_graph::{EntityId, Graph};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-shot move with default options and no cache reuse.
pub fn move_entities<P, I, T>(graph: &Graph, ids: I, delta: Vector, projection: P) -> Result<Graph>
where
    P: Projection,
    I: IntoIterator<Item = T>,
    T: Into<EntityId>,
{
    MoveAction::new(ids, delta, projection).apply_uncached(graph)
}
