//! Embedded Tera templates for every generated TypeScript file.
//!
//! Templates are compiled into the binary with `include_str!` and
//! registered once per [`Renderer`]. Autoescaping is off: the output is
//! source code, not HTML.

use serde::Serialize;
use std::error::Error as _;
use tera::{Context, Tera};
use tracing::trace;

use seraf_core::{SerafError, SerafResult};

const TEMPLATES: &[(&str, &str)] = &[
    ("schema.ts", include_str!("templates/persistence/schema.ts.tera")),
    (
        "repository_contract.ts",
        include_str!("templates/persistence/repository_contract.ts.tera"),
    ),
    (
        "repository_impl.ts",
        include_str!("templates/persistence/repository_impl.ts.tera"),
    ),
    ("validator.ts", include_str!("templates/validator.ts.tera")),
    ("request_create.ts", include_str!("templates/types/request_create.ts.tera")),
    ("request_update.ts", include_str!("templates/types/request_update.ts.tera")),
    ("request_list.ts", include_str!("templates/types/request_list.ts.tera")),
    ("request_id.ts", include_str!("templates/types/request_id.ts.tera")),
    ("response_entity.ts", include_str!("templates/types/response_entity.ts.tera")),
    ("response_list.ts", include_str!("templates/types/response_list.ts.tera")),
    ("response_empty.ts", include_str!("templates/types/response_empty.ts.tera")),
    ("usecase_create.ts", include_str!("templates/usecases/create.ts.tera")),
    ("usecase_list.ts", include_str!("templates/usecases/list.ts.tera")),
    ("usecase_find_by_id.ts", include_str!("templates/usecases/find_by_id.ts.tera")),
    ("usecase_update.ts", include_str!("templates/usecases/update.ts.tera")),
    ("usecase_delete.ts", include_str!("templates/usecases/delete.ts.tera")),
    ("controller.ts", include_str!("templates/http/controller.ts.tera")),
    ("setup_controller.ts", include_str!("templates/http/setup_controller.ts.tera")),
    ("routes.ts", include_str!("templates/http/routes.ts.tera")),
    ("model.ts", include_str!("templates/scaffold/model.ts.tera")),
    ("common_model.ts", include_str!("templates/scaffold/common_model.ts.tera")),
    ("validate_common.ts", include_str!("templates/scaffold/validate_common.ts.tera")),
    ("not_found_error.ts", include_str!("templates/scaffold/not_found_error.ts.tera")),
    (
        "required_field_missing_error.ts",
        include_str!("templates/scaffold/required_field_missing_error.ts.tera"),
    ),
    ("blank_usecase.ts", include_str!("templates/scaffold/blank_usecase.ts.tera")),
    ("blank_controller.ts", include_str!("templates/scaffold/blank_controller.ts.tera")),
    ("blank_request.ts", include_str!("templates/scaffold/blank_request.ts.tera")),
    ("blank_response.ts", include_str!("templates/scaffold/blank_response.ts.tera")),
];

/// Holds the compiled template set.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> SerafResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| SerafError::template(describe(&e)))?;
        Ok(Self { tera })
    }

    /// Render a registered template against a serializable view.
    pub fn render<T: Serialize>(&self, name: &str, view: &T) -> SerafResult<String> {
        trace!(template = name, "Rendering");
        let context = Context::from_serialize(view)
            .map_err(|e| SerafError::template(format!("{}: {}", name, describe(&e))))?;
        self.tera
            .render(name, &context)
            .map_err(|e| SerafError::template(format!("{}: {}", name, describe(&e))))
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.tera.get_template_names()
    }
}

/// Flatten a Tera error and its causes into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_templates_compile() {
        let renderer = Renderer::new().unwrap();
        assert_eq!(renderer.template_names().count(), TEMPLATES.len());
    }

    #[test]
    fn test_unknown_template_is_template_error() {
        let renderer = Renderer::new().unwrap();
        let err = renderer.render("missing.ts", &json!({})).unwrap_err();
        assert!(matches!(err, SerafError::Template(msg) if msg.starts_with("missing.ts")));
    }

    #[test]
    fn test_missing_variable_is_template_error() {
        let renderer = Renderer::new().unwrap();
        let err = renderer.render("model.ts", &json!({})).unwrap_err();
        assert!(matches!(err, SerafError::Template(_)));
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let renderer = Renderer::new().unwrap();
        let out = renderer
            .render(
                "request_create.ts",
                &json!({ "fields": [{ "name": "role", "ty": "'a' | 'b'", "optional": false }] }),
            )
            .unwrap();
        assert!(out.contains("role: 'a' | 'b';"));
    }
}
