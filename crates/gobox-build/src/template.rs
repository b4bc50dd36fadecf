use serde::Serialize;

/// A fixed text template with a declared variable set.
///
/// Parameters are checked against `variables` before any substitution
/// happens: every declared variable must be present as a non-blank string.
pub(crate) struct Template {
    pub(crate) name: &'static str,
    pub(crate) source: &'static str,
    pub(crate) variables: &'static [&'static str],
}

impl Template {
    pub(crate) fn render<P: Serialize>(&self, params: &P) -> Result<String, TemplateError> {
        let context =
            tera::Context::from_serialize(params).map_err(|e| TemplateError::Render {
                template: self.name,
                source: e,
            })?;

        for &name in self.variables {
            let value = context
                .get(name)
                .and_then(|value| value.as_str())
                .filter(|value| !value.trim().is_empty())
                .ok_or(TemplateError::MissingParameter {
                    template: self.name,
                    name,
                })?;

            // Every template is line oriented.
            if value.contains(['\n', '\r']) {
                return Err(TemplateError::InvalidParameter {
                    template: self.name,
                    name,
                    reason: "contains a line break",
                });
            }
        }

        let mut tera = tera::Tera::default();
        tera.add_raw_template(self.name, self.source)
            .map_err(|e| TemplateError::Render {
                template: self.name,
                source: e,
            })?;

        let rendered = tera
            .render(self.name, &context)
            .map_err(|e| TemplateError::Render {
                template: self.name,
                source: e,
            })?;

        tracing::debug!(template = self.name, bytes = rendered.len(), "template rendered");
        Ok(rendered)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template}' is missing parameter '{name}'")]
    MissingParameter {
        template: &'static str,
        name: &'static str,
    },

    #[error("template '{template}' parameter '{name}' {reason}")]
    InvalidParameter {
        template: &'static str,
        name: &'static str,
        reason: &'static str,
    },

    #[error("failed to render template '{template}'")]
    Render {
        template: &'static str,
        source: tera::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const GREETING: Template = Template {
        name: "greeting",
        source: "hello {{ who }}\n",
        variables: &["who"],
    };

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn renders_declared_variables() {
        let out = GREETING.render(&params(&[("who", "gopher")])).unwrap();
        assert_eq!(out.trim_end(), "hello gopher");
    }

    #[test]
    fn missing_variable_rejected_before_render() {
        let err = GREETING.render(&params(&[])).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingParameter { name: "who", .. }
        ));
    }

    #[test]
    fn blank_variable_rejected() {
        let err = GREETING.render(&params(&[("who", " ")])).unwrap_err();
        assert!(matches!(err, TemplateError::MissingParameter { .. }));
    }

    #[test]
    fn line_break_rejected() {
        let err = GREETING
            .render(&params(&[("who", "x\nRUN rm -rf /")]))
            .unwrap_err();
        assert!(matches!(err, TemplateError::InvalidParameter { name: "who", .. }));
    }

    #[test]
    fn undeclared_placeholder_is_render_error() {
        let template = Template {
            name: "broken",
            source: "{{ who }} {{ what }}",
            variables: &["who"],
        };
        let err = template.render(&params(&[("who", "x")])).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }
}
