// src/error.rs
use radar_print_dom::DomError;
use radar_print_traits::ResourceError;
use thiserror::Error;

/// Fatal errors around a build: reading the inputs and writing the result.
///
/// Page construction itself never fails with this type; its problems are
/// reported as step outcomes in a `BuildReport`.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
