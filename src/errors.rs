use thiserror::Error;

/// Library error type.
///
/// Most helpers report failure through sentinels (empty string, `None`,
/// empty list); only the conditions below raise.
#[derive(Error, Debug)]
pub enum Error {
    #[error("record '{id}' already has data under its '{field}' key")]
    ChildrenFieldOccupied { id: String, field: String },

    #[error("value cannot round-trip through the JSON data model: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
