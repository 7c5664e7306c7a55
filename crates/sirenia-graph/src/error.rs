use crate::id::{EntityId, EntityKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("entity not found: {id}")]
    NotFound { id: EntityId },

    #[error("entity {id} is not a {expected}")]
    WrongKind { id: EntityId, expected: EntityKind },

    #[error("index {index} out of range 0..={max} for way {way}")]
    IndexOutOfRange {
        way: EntityId,
        index: usize,
        max: usize,
    },
}
