#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid catalog: {0}")]
    Catalog(String),
    #[error("failed to serialize catalog: {0}")]
    CatalogSerialization(serde_yaml::Error),
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
}

pub type EngineResult<T> = std::result::Result<T, AssessmentError>;
