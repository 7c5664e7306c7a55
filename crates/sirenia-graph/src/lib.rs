#![forbid(unsafe_code)]

//! Immutable map entities and a persistent, copy-on-write graph over them.
//!
//! Every mutating operation on [`Graph`] returns a new snapshot; the receiver is never changed.
//! Snapshots share their unchanged state, so keeping many of them around (history, previews) is
//! cheap.

pub mod entity;
pub mod error;
pub mod graph;
pub mod id;

pub use entity::{Affix, Entity, Member, Node, Relation, Tags, Way};
pub use error::{Error, Result};
pub use graph::{Graph, Topology};
pub use id::{EntityId, EntityKind};
pub use sirenia_geo::{Loc, loc};
