//! Entity identifiers.
//!
//! Ids are strings whose first character encodes the entity kind (`n`, `w`, `r`) followed by a
//! number. Negative numbers mark entities created locally that have never been persisted.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Way,
    Relation,
}

impl EntityKind {
    pub fn prefix(self) -> char {
        match self {
            Self::Node => 'n',
            Self::Way => 'w',
            Self::Relation => 'r',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Node),
            'w' => Some(Self::Way),
            'r' => Some(Self::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Arc<str>);

static NEXT_FRESH_ID: AtomicI64 = AtomicI64::new(0);

impl EntityId {
    pub fn new(kind: EntityKind, number: i64) -> Self {
        Self(Arc::from(format!("{}{}", kind.prefix(), number)))
    }

    pub fn node(number: i64) -> Self {
        Self::new(EntityKind::Node, number)
    }

    pub fn way(number: i64) -> Self {
        Self::new(EntityKind::Way, number)
    }

    pub fn relation(number: i64) -> Self {
        Self::new(EntityKind::Relation, number)
    }

    /// Allocates a process-unique id for a new, unsaved entity (`n-1`, `w-2`, ...).
    pub fn fresh(kind: EntityKind) -> Self {
        let n = NEXT_FRESH_ID.fetch_sub(1, Ordering::Relaxed) - 1;
        Self::new(kind, n)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind encoded in the id prefix, if it has a recognised one.
    pub fn kind(&self) -> Option<EntityKind> {
        self.0.chars().next().and_then(EntityKind::from_prefix)
    }

    /// True for locally created ids.
    pub fn is_new(&self) -> bool {
        self.0.get(1..).is_some_and(|rest| rest.starts_with('-'))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&EntityId> for EntityId {
    fn from(value: &EntityId) -> Self {
        value.clone()
    }
}
