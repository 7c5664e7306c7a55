use sirenia_graph::EntityId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] sirenia_graph::Error),

    #[error("no start location cached for {id}")]
    MissingStartLocation { id: EntityId },

    #[error("invalid move options: {message}")]
    InvalidOptions { message: String },
}
