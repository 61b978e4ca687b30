pub mod aggregate;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod join;
pub mod key;
pub mod pipeline;
pub mod resolver;
pub mod table;

pub use error::{PipelineError, Result};
pub use pipeline::{StudyOutput, StudyPipeline};
pub use table::{Column, Table, Value};
