use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Directory is already loaded")]
    AlreadyLoaded,

    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
