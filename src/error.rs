use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt inventory file: {0}")]
    Corrupt(String),

    #[error("Inventory is full")]
    AtCapacity,

    #[error("Stock cannot be negative")]
    NegativeStock,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No item at index {0}")]
    IndexOutOfBounds(usize),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
