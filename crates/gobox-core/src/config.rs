//! Compile-time defaults.
//!
//! gobox owns no configuration file. Everything a run needs is either one of
//! these constants or comes from the command line (see `gobox-cli`).

/// Toolchain release used when none is given.
pub const DEFAULT_TOOLCHAIN_VERSION: &str = "1.22";

/// Base image providing the Go toolchain.
pub const TOOLCHAIN_IMAGE: &str = "golang";

/// Namespace every built image is tagged under.
pub const IMAGE_NAMESPACE: &str = "gobox";

/// Value of the `builder=` label stamped on built images.
pub const BUILDER_LABEL: &str = "gobox";

/// Conventional build-definition file name inside the build context.
pub const DEFINITION_FILE_NAME: &str = "Dockerfile";
