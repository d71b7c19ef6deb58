use crate::raster::RasterError;
use reportly_layout::LayoutError;
use reportly_render_core::RenderError;
use reportly_report::SessionError;
use thiserror::Error;

/// A comprehensive error type for the export pipeline.
///
/// Configuration and external-service failures abort the export before any
/// output file is written.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service failed: {0}")]
    ExternalService(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("An export is already running for this session")]
    ExportInProgress,
}

impl From<LayoutError> for PipelineError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::InvalidGeometry { .. } | LayoutError::NegativeMargin { .. } => {
                PipelineError::Configuration(e.to_string())
            }
        }
    }
}

impl From<RasterError> for PipelineError {
    fn from(e: RasterError) -> Self {
        PipelineError::ExternalService(e.to_string())
    }
}

impl From<SessionError> for PipelineError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::ExportInProgress => PipelineError::ExportInProgress,
            SessionError::NoAnalysis => PipelineError::Configuration(e.to_string()),
        }
    }
}
