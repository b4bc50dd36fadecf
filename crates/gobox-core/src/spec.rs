use serde::Serialize;

use crate::config::DEFAULT_TOOLCHAIN_VERSION;
use crate::reference::resolve_binary_name;
use crate::tag::ImageTag;

/// Parameters of a single pipeline run.
///
/// Built once from user input and never mutated. The binary name is derived
/// from the repository reference at construction, so a `BuildSpec` that
/// exists always has a non-empty `binary`.
///
/// # Examples
///
/// ```
/// use gobox_core::BuildSpec;
///
/// let spec = BuildSpec::new("github.com/user/tool", None).unwrap();
/// assert_eq!(spec.binary(), "tool");
/// assert_eq!(spec.toolchain_version(), gobox_core::config::DEFAULT_TOOLCHAIN_VERSION);
/// assert_eq!(spec.image_tag().to_string(), "gobox/tool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    toolchain_version: String,
    repository: String,
    binary: String,
}

impl BuildSpec {
    /// Resolve `reference` and bundle it with the toolchain version.
    ///
    /// `toolchain_version` falls back to [`DEFAULT_TOOLCHAIN_VERSION`] when
    /// `None`. It is taken as given otherwise; a blank version is caught when
    /// the build definition is rendered.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReference`](crate::Error::InvalidReference) if the
    /// reference is malformed.
    pub fn new(reference: &str, toolchain_version: Option<&str>) -> crate::Result<Self> {
        let binary = resolve_binary_name(reference)?;
        let repository = reference.strip_suffix('/').unwrap_or(reference);
        let toolchain_version = toolchain_version
            .unwrap_or(DEFAULT_TOOLCHAIN_VERSION)
            .to_owned();

        tracing::debug!(
            repository,
            binary = %binary,
            toolchain_version = %toolchain_version,
            "build spec constructed"
        );

        Ok(Self {
            toolchain_version,
            repository: repository.to_owned(),
            binary,
        })
    }

    pub fn toolchain_version(&self) -> &str {
        &self.toolchain_version
    }

    /// The repository reference without its trailing slash, if it had one.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Tag the built image is stored under.
    pub fn image_tag(&self) -> ImageTag {
        ImageTag::for_binary(&self.binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_version_applied() {
        let spec = BuildSpec::new("github.com/user/tool", None).unwrap();
        assert_eq!(spec.toolchain_version(), DEFAULT_TOOLCHAIN_VERSION);
    }

    #[test]
    fn explicit_version_kept() {
        let spec = BuildSpec::new("github.com/user/tool", Some("1.21.5")).unwrap();
        assert_eq!(spec.toolchain_version(), "1.21.5");
    }

    #[test]
    fn trailing_slash_dropped_from_repository() {
        let spec = BuildSpec::new("github.com/user/tool/", None).unwrap();
        assert_eq!(spec.repository(), "github.com/user/tool");
        assert_eq!(spec.binary(), "tool");
    }

    #[test]
    fn invalid_reference_propagates() {
        let result = BuildSpec::new("a//b", None);
        assert!(matches!(result, Err(crate::Error::InvalidReference { .. })));
    }
}
