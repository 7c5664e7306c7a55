//! Node, way and relation values.
//!
//! Entities are plain immutable values: every edit (`moved`, `add_node`, `remove_node`) returns a
//! new value and leaves the original untouched. Persisting the result is the job of
//! [`Graph::replace`](crate::Graph::replace).

use crate::error::{Error, Result};
use crate::id::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use sirenia_geo::Loc;
use std::collections::BTreeMap;

pub type Tags = BTreeMap<String, String>;

/// Tag keys that carry no meaning for editing decisions.
const UNINTERESTING_KEYS: &[&str] = &["attribution", "created_by", "source", "odbl"];

/// Keys whose presence on a closed way makes it an area.
const AREA_KEYS: &[&str] = &[
    "aeroway",
    "amenity",
    "area:highway",
    "building",
    "building:part",
    "craft",
    "emergency",
    "golf",
    "historic",
    "landuse",
    "leisure",
    "man_made",
    "military",
    "natural",
    "office",
    "place",
    "power",
    "shop",
    "tourism",
];

/// `key=value` pairs that stay linear even though `key` is an area key.
const LINEAR_TAGS: &[(&str, &str)] = &[
    ("golf", "cartpath"),
    ("golf", "hole"),
    ("leisure", "slipway"),
    ("leisure", "track"),
    ("man_made", "breakwater"),
    ("man_made", "cutline"),
    ("man_made", "embankment"),
    ("man_made", "groyne"),
    ("man_made", "pipeline"),
    ("natural", "cliff"),
    ("natural", "coastline"),
    ("natural", "ridge"),
    ("natural", "tree_row"),
    ("power", "cable"),
    ("power", "line"),
    ("power", "minor_line"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Node {
    pub fn new(id: impl Into<EntityId>, loc: Loc) -> Self {
        Self {
            id: id.into(),
            loc,
            tags: Tags::new(),
        }
    }

    /// A node with a freshly allocated id.
    pub fn fresh(loc: Loc) -> Self {
        Self::new(EntityId::fresh(EntityKind::Node), loc)
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn moved(&self, loc: Loc) -> Self {
        Self {
            loc,
            ..self.clone()
        }
    }

    pub fn has_interesting_tags(&self) -> bool {
        self.tags
            .keys()
            .any(|k| !UNINTERESTING_KEYS.contains(&k.as_str()) && !k.starts_with("tiger:"))
    }
}

/// Which end of a way a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: EntityId,
    pub nodes: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Way {
    pub fn new<I, T>(id: impl Into<EntityId>, nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        Self {
            id: id.into(),
            nodes: nodes.into_iter().map(Into::into).collect(),
            tags: Tags::new(),
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn first(&self) -> Option<&EntityId> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&EntityId> {
        self.nodes.last()
    }

    pub fn contains(&self, node: &EntityId) -> bool {
        self.nodes.contains(node)
    }

    /// Position of the first occurrence of `node`.
    pub fn index_of(&self, node: &EntityId) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.first() == self.last()
    }

    pub fn is_area(&self) -> bool {
        match self.tags.get("area").map(String::as_str) {
            Some("yes") => return true,
            Some("no") => return false,
            _ => {}
        }
        if !self.is_closed() {
            return false;
        }
        self.tags.iter().any(|(k, v)| {
            AREA_KEYS.contains(&k.as_str())
                && v != "no"
                && !LINEAR_TAGS.contains(&(k.as_str(), v.as_str()))
        })
    }

    pub fn affix(&self, node: &EntityId) -> Option<Affix> {
        if self.first() == Some(node) {
            Some(Affix::Prefix)
        } else if self.last() == Some(node) {
            Some(Affix::Suffix)
        } else {
            None
        }
    }

    /// Inserts `node` before position `index`.
    ///
    /// For closed ways the closing connector is not addressable: valid indices are
    /// `0..=len - 1`, and the way stays closed afterwards. Consecutive duplicates are collapsed.
    pub fn add_node(&self, node: impl Into<EntityId>, index: usize) -> Result<Way> {
        let mut nodes = self.nodes.clone();
        let closed = self.is_closed();
        let max = if closed { nodes.len() - 1 } else { nodes.len() };
        if index > max {
            return Err(Error::IndexOutOfRange {
                way: self.id.clone(),
                index,
                max,
            });
        }

        let mut index = index;
        if closed {
            let connector = nodes[0].clone();

            // Leading connector repeats.
            let i = 1;
            while i < nodes.len() && nodes.len() > 2 && nodes[i] == connector {
                nodes.remove(i);
                if index > i {
                    index -= 1;
                }
            }

            // Trailing connectors.
            let mut i = nodes.len() - 1;
            while i > 0 && nodes.len() > 1 && nodes[i] == connector {
                nodes.remove(i);
                if index > i {
                    index -= 1;
                }
                i = nodes.len() - 1;
            }
        }

        nodes.insert(index.min(nodes.len()), node.into());
        nodes.dedup();
        if closed && (nodes.len() == 1 || nodes.first() != nodes.last()) {
            let first = nodes[0].clone();
            nodes.push(first);
        }

        Ok(Way {
            nodes,
            ..self.clone()
        })
    }

    /// Removes every occurrence of `node`, keeping closed ways closed.
    pub fn remove_node(&self, node: &EntityId) -> Way {
        let closed = self.is_closed();
        let mut nodes: Vec<EntityId> = self.nodes.iter().filter(|n| *n != node).cloned().collect();
        nodes.dedup();
        if closed && !nodes.is_empty() && (nodes.len() == 1 || nodes.first() != nodes.last()) {
            let first = nodes[0].clone();
            nodes.push(first);
        }
        Way {
            nodes,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    #[serde(default)]
    pub role: String,
}

impl Member {
    pub fn new(id: impl Into<EntityId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: EntityId,
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Relation {
    pub fn new(id: impl Into<EntityId>, members: Vec<Member>) -> Self {
        Self {
            id: id.into(),
            members,
            tags: Tags::new(),
        }
    }

    pub fn member_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.members.iter().map(|m| &m.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Entity {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Node(n) => &n.id,
            Self::Way(w) => &w.id,
            Self::Relation(r) => &r.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Node(_) => EntityKind::Node,
            Self::Way(_) => EntityKind::Way,
            Self::Relation(_) => EntityKind::Relation,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Self::Node(n) => &n.tags,
            Self::Way(w) => &w.tags,
            Self::Relation(r) => &r.tags,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Self::Way(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Node> for Entity {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Way> for Entity {
    fn from(value: Way) -> Self {
        Self::Way(value)
    }
}

impl From<Relation> for Entity {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}
