//! Shell functions that stand in for a local command.
//!
//! Both wrappers run a throwaway container with the current directory
//! mounted at `/pwd` and forward every argument.

use gobox_core::ImageTag;
use gobox_core::config::TOOLCHAIN_IMAGE;
use serde::Serialize;

use crate::template::{Template, TemplateError};

const INVOKE: Template = Template {
    name: "invoke.sh",
    source: r#"{{ binary }}() {
  docker run --rm -it -v "$(pwd)":/pwd -w /pwd {{ image }} "$@"
}
"#,
    variables: &["binary", "image"],
};

const TOOLS: Template = Template {
    name: "tools.sh",
    source: r#"go() {
  docker run --rm -it -v "$(pwd)":/pwd -w /pwd {{ toolchain_image }}:{{ toolchain_version }} go "$@"
}
"#,
    variables: &["toolchain_image", "toolchain_version"],
};

#[derive(Serialize)]
struct InvokeParams<'a> {
    binary: &'a str,
    image: &'a str,
}

#[derive(Serialize)]
struct ToolsParams<'a> {
    toolchain_image: &'a str,
    toolchain_version: &'a str,
}

/// Shell function named `binary` that runs the image built for it.
pub fn invoke_wrapper(binary: &str, tag: &ImageTag) -> Result<String, TemplateError> {
    INVOKE.render(&InvokeParams {
        binary,
        image: &tag.latest(),
    })
}

/// Shell function `go` that runs the bare toolchain image.
pub fn tools_wrapper(toolchain_version: &str) -> Result<String, TemplateError> {
    TOOLS.render(&ToolsParams {
        toolchain_image: TOOLCHAIN_IMAGE,
        toolchain_version,
    })
}
