use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Schema mismatch: no column matching concept '{concept}' in table '{table}'")]
    SchemaMismatch { concept: String, table: String },

    #[error("Table shape error: {0}")]
    Shape(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn schema_mismatch(concept: impl Into<String>, table: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            concept: concept.into(),
            table: table.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
