use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::error::EngineError;

/// Response stream of an image build.
pub type BuildStream<'a> = Pin<Box<dyn Stream<Item = Result<BuildRecord, EngineError>> + Send + 'a>>;

/// Everything the engine needs to run one image build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Finalized tar build context.
    pub archive: Vec<u8>,
    /// Build-definition file name inside `archive`.
    pub dockerfile: String,
    /// Tag applied to the resulting image.
    pub tag: String,
    /// Remove intermediate containers after a successful build.
    pub remove_intermediate: bool,
    /// Remove intermediate containers even when the build fails.
    pub force_remove: bool,
}

/// One meaningful record of a build response stream.
///
/// Progress-only records carry nothing the build outcome depends on and are
/// not surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildRecord {
    /// Output of a build step.
    Stream(String),
    /// Status line, e.g. while pulling the base image.
    Status(String),
    /// ID of the image the build produced.
    ImageId(String),
    /// Build failure reported by the engine.
    Error(String),
}

/// Abstraction over the container engine for testability.
///
/// Production code uses [`DockerEngine`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait Engine: Send + Sync {
    /// Check the engine is reachable.
    async fn ping(&self) -> Result<(), EngineError>;

    /// Submit an image build and return its response stream.
    fn build_image(&self, request: BuildRequest) -> BuildStream<'_>;
}

/// Docker (or a Docker API compatible engine) reached through the local
/// defaults: `DOCKER_HOST` if set, the platform socket otherwise.
pub struct DockerEngine {
    docker: bollard::Docker,
}

impl DockerEngine {
    /// Create a client for the local engine.
    ///
    /// No request is made here; an unreachable daemon surfaces on
    /// [`Engine::ping`].
    pub fn connect() -> Result<Self, EngineError> {
        let docker =
            bollard::Docker::connect_with_local_defaults().map_err(|e| EngineError::Unavailable {
                detail: e.to_string(),
            })?;
        Ok(Self { docker })
    }
}

impl Engine for DockerEngine {
    async fn ping(&self) -> Result<(), EngineError> {
        let version = self
            .docker
            .version()
            .await
            .map_err(|e| EngineError::Unavailable {
                detail: e.to_string(),
            })?;

        tracing::debug!(
            version = %version.version.unwrap_or_default(),
            api_version = %version.api_version.unwrap_or_default(),
            "container engine reachable"
        );
        Ok(())
    }

    fn build_image(&self, request: BuildRequest) -> BuildStream<'_> {
        let options = bollard::image::BuildImageOptions {
            dockerfile: request.dockerfile,
            t: request.tag,
            rm: request.remove_intermediate,
            forcerm: request.force_remove,
            ..Default::default()
        };

        let stream = self
            .docker
            .build_image(options, None, Some(request.archive.into()))
            .filter_map(|item| {
                futures::future::ready(match item {
                    Ok(info) => to_record(info).map(Ok),
                    Err(e) => Some(Err(EngineError::from(e))),
                })
            });

        Box::pin(stream)
    }
}

fn to_record(info: bollard::models::BuildInfo) -> Option<BuildRecord> {
    if let Some(message) = info.error_detail.and_then(|d| d.message).or(info.error) {
        return Some(BuildRecord::Error(message));
    }
    if let Some(id) = info.aux.and_then(|aux| aux.id) {
        return Some(BuildRecord::ImageId(id));
    }
    if let Some(text) = info.stream {
        return Some(BuildRecord::Stream(text));
    }
    info.status.map(BuildRecord::Status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{BuildInfo, ErrorDetail, ImageId};

    const NON_ZERO: &str = "The command '/bin/sh -c go install' returned a non-zero code: 1";

    #[test]
    fn error_detail_wins_over_error() {
        let info = BuildInfo {
            error: Some("short".to_owned()),
            error_detail: Some(ErrorDetail {
                code: Some(1),
                message: Some(NON_ZERO.to_owned()),
            }),
            ..Default::default()
        };
        assert_eq!(to_record(info), Some(BuildRecord::Error(NON_ZERO.to_owned())));
    }

    #[test]
    fn bare_error_is_used_without_detail() {
        let info = BuildInfo {
            error: Some("fetch failed".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            to_record(info),
            Some(BuildRecord::Error("fetch failed".to_owned()))
        );
    }

    #[test]
    fn aux_id_becomes_image_id() {
        let info = BuildInfo {
            aux: Some(ImageId {
                id: Some("sha256:abc".to_owned()),
            }),
            ..Default::default()
        };
        assert_eq!(
            to_record(info),
            Some(BuildRecord::ImageId("sha256:abc".to_owned()))
        );
    }

    #[test]
    fn stream_and_status_lines() {
        let stream = BuildInfo {
            stream: Some("Step 1/4 : FROM golang:1.22\n".to_owned()),
            ..Default::default()
        };
        let status = BuildInfo {
            status: Some("Pulling fs layer".to_owned()),
            ..Default::default()
        };
        assert!(matches!(to_record(stream), Some(BuildRecord::Stream(_))));
        assert!(matches!(to_record(status), Some(BuildRecord::Status(_))));
    }

    #[test]
    fn progress_only_record_is_dropped() {
        assert_eq!(to_record(BuildInfo::default()), None);
    }

    #[test]
    fn server_error_maps_to_rejected() {
        let err = EngineError::from(bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "dockerfile parse error".to_owned(),
        });
        assert!(matches!(err, EngineError::Rejected { status: 500, .. }));
    }
}
