//! Build-definition rendering, build-context packaging, and shell wrappers.
//!
//! # Build pipeline
//!
//! ```text
//! gobox build <repo>
//!   1. Resolve   ── BuildSpec::new()            (gobox-core)
//!   2. Render    ── DefinitionRenderer::render() → Dockerfile text
//!   3. Archive   ── context::pack()             → single-entry tar
//!   4. Submit    ── Builder::build()            (gobox-engine)
//! ```
//!
//! # Wrappers
//!
//! [`wrapper`] renders shell functions that call the built image (or the
//! bare toolchain image) as if it were a local command. They have no build
//! semantics and only need the binary name or toolchain version.

pub mod context;
pub mod definition;
mod template;
pub mod wrapper;

pub use context::{ArchiveEntry, ArchiveError, BuildContextArchive};
pub use definition::{DefinitionRenderer, RenderedDefinition};
pub use template::TemplateError;
