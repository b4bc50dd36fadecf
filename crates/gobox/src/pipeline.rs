//! The build pipeline: resolve → render → archive → submit.
//!
//! Each stage runs to completion before the next starts and the first
//! failure ends the run. [`run`] dispatches a [`PipelineMode`] once; the
//! stage functions themselves know nothing about modes.

use gobox_build::context::{self, BuildContextArchive};
use gobox_build::definition::{DefinitionRenderer, RenderedDefinition};
use gobox_build::wrapper;
use gobox_core::config::DEFAULT_TOOLCHAIN_VERSION;
use gobox_core::{BuildSpec, ImageTag};
use gobox_engine::{BuildOutcome, Builder, Engine, EngineError};

use crate::error::PipelineError;

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineMode {
    /// Print the Dockerfile for `reference`.
    RenderDefinition { reference: String },
    /// Print the shell function that runs the image built for `reference`.
    RenderWrapper { reference: String },
    /// Build the image for `reference`.
    Build { reference: String },
    /// Build the image, then print its shell function.
    BuildAndEmitWrapper { reference: String },
    /// Print a shell function running the bare toolchain as `go`.
    RenderToolsWrapper,
}

/// An image the engine finished building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltImage {
    pub tag: ImageTag,
    pub image_id: Option<String>,
}

/// Run one invocation and return the text to print, if any.
///
/// `connect` is only called by the modes that build, so rendering works
/// without a container engine.
pub async fn run<E, F>(
    mode: &PipelineMode,
    toolchain_version: Option<&str>,
    connect: F,
) -> Result<Option<String>, PipelineError>
where
    E: Engine,
    F: FnOnce() -> Result<Builder<E>, EngineError>,
{
    tracing::debug!(?mode, "pipeline started");

    match mode {
        PipelineMode::RenderDefinition { reference } => {
            let spec = resolve(reference, toolchain_version)?;
            render_definition(&spec).map(|d| Some(d.to_string()))
        }
        PipelineMode::RenderWrapper { reference } => {
            let spec = resolve(reference, toolchain_version)?;
            render_wrapper(&spec).map(Some)
        }
        PipelineMode::Build { reference } => {
            let spec = resolve(reference, toolchain_version)?;
            let builder = connect_engine(connect)?;
            build(&builder, &spec).await?;
            Ok(None)
        }
        PipelineMode::BuildAndEmitWrapper { reference } => {
            let spec = resolve(reference, toolchain_version)?;
            let builder = connect_engine(connect)?;
            build(&builder, &spec).await?;
            render_wrapper(&spec).map(Some)
        }
        PipelineMode::RenderToolsWrapper => {
            let version = toolchain_version.unwrap_or(DEFAULT_TOOLCHAIN_VERSION);
            render_tools_wrapper(version).map(Some)
        }
    }
}

/// Resolve stage.
pub fn resolve(reference: &str, toolchain_version: Option<&str>) -> Result<BuildSpec, PipelineError> {
    BuildSpec::new(reference, toolchain_version)
        .map_err(|e| PipelineError::InvalidReference { source: e })
}

/// Render stage.
pub fn render_definition(spec: &BuildSpec) -> Result<RenderedDefinition, PipelineError> {
    DefinitionRenderer::new(spec)
        .render()
        .map_err(|e| PipelineError::Template { source: e })
}

/// Archive stage.
pub fn package(definition: &RenderedDefinition) -> Result<BuildContextArchive, PipelineError> {
    context::pack(definition).map_err(|e| PipelineError::Archive { source: e })
}

/// Render, archive, and submit `spec`, waiting for the engine to finish.
///
/// A build the engine reports as failed becomes
/// [`PipelineError::BuildFailed`] carrying the engine's message.
pub async fn build<E: Engine>(
    builder: &Builder<E>,
    spec: &BuildSpec,
) -> Result<BuiltImage, PipelineError> {
    let definition = render_definition(spec)?;
    let archive = package(&definition)?;
    let tag = spec.image_tag();

    let outcome = builder
        .build(archive, &tag)
        .await
        .map_err(|e| PipelineError::EngineUnavailable { source: e })?;

    match outcome {
        BuildOutcome::Succeeded { tag, image_id } => {
            tracing::info!(
                tag = %tag,
                image_id = image_id.as_deref().unwrap_or("unknown"),
                "image built"
            );
            Ok(BuiltImage { tag, image_id })
        }
        BuildOutcome::Failed { message } => Err(PipelineError::BuildFailed { tag, message }),
    }
}

pub fn render_wrapper(spec: &BuildSpec) -> Result<String, PipelineError> {
    wrapper::invoke_wrapper(spec.binary(), &spec.image_tag())
        .map_err(|e| PipelineError::Template { source: e })
}

pub fn render_tools_wrapper(toolchain_version: &str) -> Result<String, PipelineError> {
    wrapper::tools_wrapper(toolchain_version).map_err(|e| PipelineError::Template { source: e })
}

fn connect_engine<E, F>(connect: F) -> Result<Builder<E>, PipelineError>
where
    E: Engine,
    F: FnOnce() -> Result<Builder<E>, EngineError>,
{
    connect().map_err(|e| PipelineError::EngineUnavailable { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_wrapper_defaults_version() {
        let out = render_tools_wrapper(DEFAULT_TOOLCHAIN_VERSION).unwrap();
        assert!(out.contains(&format!("golang:{DEFAULT_TOOLCHAIN_VERSION}")));
    }

    #[test]
    fn resolve_maps_to_invalid_reference() {
        let err = resolve("a//b", None).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidReference { .. }));
        assert_eq!(err.to_string(), "resolve failed");
    }
}
