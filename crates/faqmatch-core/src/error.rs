use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A query arrived before any index was built.
    #[error("Matching engine is not ready")]
    NotReady,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
