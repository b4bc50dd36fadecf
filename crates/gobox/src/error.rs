use gobox_build::{ArchiveError, TemplateError};
use gobox_core::ImageTag;
use gobox_engine::EngineError;

/// Failure of a pipeline run. Each variant names the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("resolve failed")]
    InvalidReference { source: gobox_core::Error },

    #[error("render failed")]
    Template { source: TemplateError },

    #[error("archive failed")]
    Archive { source: ArchiveError },

    #[error("submit failed")]
    EngineUnavailable { source: EngineError },

    #[error("build of {tag} failed: {message}")]
    BuildFailed { tag: ImageTag, message: String },
}
