use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MilkbarError {
    #[error("Corrupt data file {}: {}", path.display(), source)]
    CorruptData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Cannot remove {entity} {id}: referenced by {referenced_by}")]
    ReferencedEntity {
        entity: &'static str,
        id: u32,
        referenced_by: &'static str,
    },

    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: f64,
        requested: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, MilkbarError>;
