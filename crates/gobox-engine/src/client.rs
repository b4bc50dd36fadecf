use futures::StreamExt;
use gobox_build::BuildContextArchive;
use gobox_core::ImageTag;
use gobox_core::config::DEFINITION_FILE_NAME;

use crate::engine::{BuildRecord, BuildRequest, DockerEngine, Engine};
use crate::error::EngineError;

/// Terminal result of a build the engine ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The image now exists in the engine's store under `tag`.
    Succeeded {
        tag: ImageTag,
        image_id: Option<String>,
    },
    /// The engine ran the build and reported a failure.
    Failed { message: String },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Image builds against a container engine, parameterized over the engine
/// for testability.
pub struct Builder<E: Engine = DockerEngine> {
    engine: E,
}

impl Builder<DockerEngine> {
    /// Connect to the local engine.
    pub fn connect() -> Result<Self, EngineError> {
        Ok(Self {
            engine: DockerEngine::connect()?,
        })
    }
}

impl<E: Engine> Builder<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Build `archive` into an image tagged `tag`.
    ///
    /// The engine is pinged first; nothing is submitted if that fails.
    /// Intermediate containers are removed whether the build succeeds or
    /// not. The response stream is always drained to its end, and the first
    /// engine-reported error decides the outcome.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unavailable`] if the engine cannot be reached, before
    /// or during the build. Build failures the engine reports are returned
    /// as [`BuildOutcome::Failed`], not as errors.
    pub async fn build(
        &self,
        archive: BuildContextArchive,
        tag: &ImageTag,
    ) -> Result<BuildOutcome, EngineError> {
        self.engine.ping().await?;

        let request = BuildRequest {
            archive: archive.into_bytes(),
            dockerfile: DEFINITION_FILE_NAME.to_owned(),
            tag: tag.to_string(),
            remove_intermediate: true,
            force_remove: true,
        };

        tracing::info!(tag = %tag, context_bytes = request.archive.len(), "submitting image build");
        let mut stream = self.engine.build_image(request);

        let mut failure: Option<String> = None;
        let mut image_id = None;
        let mut records = 0usize;

        while let Some(item) = stream.next().await {
            records += 1;
            match item {
                Ok(BuildRecord::Stream(text)) => {
                    for line in text.lines().filter(|l| !l.trim().is_empty()) {
                        tracing::info!("{line}");
                    }
                }
                Ok(BuildRecord::Status(status)) => tracing::debug!(status = %status, "build status"),
                Ok(BuildRecord::ImageId(id)) => image_id = Some(id),
                // Reported once, through the outcome.
                Ok(BuildRecord::Error(message)) => {
                    tracing::debug!(message = %message, "engine reported build error");
                    failure.get_or_insert(message);
                }
                Err(EngineError::Rejected { status, message }) => {
                    tracing::debug!(status, message = %message, "engine rejected build");
                    failure.get_or_insert(message);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(records, failed = failure.is_some(), "build stream drained");

        Ok(match failure {
            Some(message) => BuildOutcome::Failed { message },
            None => BuildOutcome::Succeeded {
                tag: tag.clone(),
                image_id,
            },
        })
    }
}
