use crate::types::CompanyId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Company '{company_id}' not found")]
    CompanyNotFound { company_id: CompanyId },

    #[error("Assignment chunk {chunk_index} failed: {source}")]
    ChunkWrite {
        chunk_index: usize,
        #[source]
        source: Box<EngineError>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
