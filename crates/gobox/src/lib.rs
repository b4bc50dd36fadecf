//! Build Go commands into container images and call them like local tools.
//!
//! This is the facade crate: it re-exports the gobox sub-crates and owns the
//! [`pipeline`] that strings them together.
//!
//! | Crate | Role |
//! |-------|------|
//! | `gobox-core` | `BuildSpec`, reference resolution, image tags |
//! | `gobox-build` | Dockerfile rendering, build context, shell wrappers |
//! | `gobox-engine` | Image builds against the container engine |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use gobox::pipeline::{self, PipelineMode};
//! use gobox::engine::Builder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mode = PipelineMode::Build {
//!     reference: "github.com/user/tool".to_owned(),
//! };
//! pipeline::run(&mode, None, Builder::connect).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pipeline;

// Core types flattened into root namespace for convenience.
pub use gobox_core::{BuildSpec, ImageTag, config, resolve_binary_name};

/// Dockerfile rendering, build-context packaging, and shell wrappers.
pub mod build {
    pub use gobox_build::*;
}

/// Image builds against the container engine.
pub mod engine {
    pub use gobox_engine::*;
}

pub use error::PipelineError;
pub use pipeline::{BuiltImage, PipelineMode};
