use gobox_core::BuildSpec;
use gobox_core::config::{BUILDER_LABEL, TOOLCHAIN_IMAGE};
use serde::Serialize;

use crate::template::{Template, TemplateError};

const DEFINITION: Template = Template {
    name: "Dockerfile",
    source: r#"FROM {{ toolchain_image }}:{{ toolchain_version }}
LABEL builder={{ builder_label }}
RUN go install {{ repository }}@latest && \
    mv /go/bin/{{ binary }} /bin/{{ binary }}
ENTRYPOINT ["{{ binary }}"]
"#,
    variables: &[
        "toolchain_image",
        "toolchain_version",
        "builder_label",
        "repository",
        "binary",
    ],
};

#[derive(Serialize)]
struct DefinitionParams<'a> {
    toolchain_image: &'a str,
    builder_label: &'a str,
    #[serde(flatten)]
    spec: &'a BuildSpec,
}

/// A fully substituted Dockerfile. Immutable once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDefinition(String);

impl RenderedDefinition {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for RenderedDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders the single-stage Dockerfile that fetches, builds, and installs a
/// Go command inside the toolchain image.
pub struct DefinitionRenderer<'a> {
    spec: &'a BuildSpec,
}

impl<'a> DefinitionRenderer<'a> {
    pub fn new(spec: &'a BuildSpec) -> Self {
        Self { spec }
    }

    pub fn render(&self) -> Result<RenderedDefinition, TemplateError> {
        Self::render_with(&DefinitionParams {
            toolchain_image: TOOLCHAIN_IMAGE,
            builder_label: BUILDER_LABEL,
            spec: self.spec,
        })
    }

    /// Render the Dockerfile from an arbitrary parameter set.
    ///
    /// The parameters must serialize to a map holding every template
    /// variable as a non-blank string.
    pub fn render_with<P: Serialize>(params: &P) -> Result<RenderedDefinition, TemplateError> {
        DEFINITION.render(params).map(RenderedDefinition)
    }
}
