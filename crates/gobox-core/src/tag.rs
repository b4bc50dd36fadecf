use std::fmt;

use crate::config::IMAGE_NAMESPACE;

/// Name under which a built image is stored: `<namespace>/<binary>`.
///
/// The tag is always `latest` implicitly. Two runs with the same binary name
/// produce the same tag and the later build replaces the earlier image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTag(String);

impl ImageTag {
    pub fn for_binary(binary: &str) -> Self {
        Self(format!("{IMAGE_NAMESPACE}/{binary}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified reference with the explicit `latest` tag.
    pub fn latest(&self) -> String {
        format!("{}:latest", self.0)
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
