//! Rendering of the cycle header, source and registration entries.

use indexmap::IndexSet;
use serde_json::json;

use crate::config::CodeStyle;
use crate::declaration::Declaration;
use crate::error::Result;
use crate::renderer::TemplateRenderer;
use crate::request::GenerationRequest;
use crate::templates::Templates;

/// Prefix of the member variables holding the output copies of the inputs.
pub const OUTPUT_PREFIX: &str = "out_";

/// Renders the text of the generated files from a [`GenerationRequest`].
pub struct CycleGenerator<'a> {
    renderer: &'a dyn TemplateRenderer,
    templates: &'a Templates,
    style: &'a CodeStyle,
}

impl<'a> CycleGenerator<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        templates: &'a Templates,
        style: &'a CodeStyle,
    ) -> Self {
        Self { renderer, templates, style }
    }

    /// Renders the class declaration.
    pub fn header(&self, request: &GenerationRequest) -> Result<String> {
        let mut input_declarations = String::new();
        let mut output_declarations = String::new();
        for declaration in request.declarations() {
            let context = self.field_context(declaration);
            input_declarations += &self.renderer.render(&self.templates.input_declaration, &context)?;
            if request.generate_output() {
                output_declarations +=
                    &self.renderer.render(&self.templates.output_declaration, &context)?;
            }
        }

        let body = self.renderer.render(
            &self.templates.header_body,
            &json!({
                "class": request.cycle.class_name(),
                "namespace": request.cycle.namespace().unwrap_or_default(),
                "full_class_name": request.cycle.full_name(),
                "input_declarations": input_declarations,
                "output_declarations": output_declarations,
            }),
        )?;

        self.renderer.render(
            &self.templates.header_frame,
            &json!({
                "guard": header_guard(request),
                "full_class_name": request.cycle.full_name(),
                "body": self.wrap_namespace(request, &body)?,
            }),
        )
    }

    /// Renders the class implementation, including the header through
    /// `include`.
    pub fn source(&self, request: &GenerationRequest, include: &str) -> Result<String> {
        let mut input_connections = String::new();
        let mut output_connections = String::new();
        let mut output_resets = String::new();
        let mut output_fills = String::new();
        for declaration in request.declarations() {
            let context = self.field_context(declaration);
            input_connections += &self.renderer.render(&self.templates.input_connection, &context)?;
            if !request.generate_output() {
                continue;
            }
            output_connections += &self.renderer.render(&self.templates.output_connection, &context)?;
            output_fills += &self.renderer.render(&self.templates.output_fill, &context)?;
            if declaration.needs_reset() {
                output_resets += &self.renderer.render(&self.templates.output_reset, &context)?;
            }
        }

        let body = self.renderer.render(
            &self.templates.source_body,
            &json!({
                "class": request.cycle.class_name(),
                "namespace": request.cycle.namespace().unwrap_or_default(),
                "full_class_name": request.cycle.full_name(),
                "input_connections": input_connections,
                "output_connections": output_connections,
                "output_resets": output_resets,
                "output_fills": output_fills,
            }),
        )?;

        self.renderer.render(
            &self.templates.source_frame,
            &json!({
                "header": include,
                "full_class_name": request.cycle.full_name(),
                "body": self.wrap_namespace(request, &body)?,
            }),
        )
    }

    /// Renders the registration lines of the cycle: one for the cycle class
    /// and one for every distinct type accessed through a pointer.
    pub fn registration_lines(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let mut names = IndexSet::new();
        names.insert(request.cycle.full_name());
        names.extend(
            request
                .declarations()
                .iter()
                .filter(|d| d.is_pointer())
                .map(|d| d.type_name().to_string()),
        );

        names
            .iter()
            .map(|name| {
                self.renderer
                    .render(&self.templates.registration_entry, &json!({ "name": name }))
                    .map(|line| line.trim_end().to_string())
            })
            .collect()
    }

    /// Renders a complete registration file holding `lines`.
    pub fn registration_file(&self, lines: &[String]) -> Result<String> {
        let registration_lines: String = lines.iter().map(|line| format!("{line}\n")).collect();
        self.renderer.render(
            &self.templates.registration_file,
            &json!({ "registration_lines": registration_lines }),
        )
    }

    fn field_context(&self, declaration: &Declaration) -> serde_json::Value {
        let comment = if declaration.is_commented() { self.style.disable_marker.as_str() } else { "" };
        let pointer = if declaration.is_pointer() { "*" } else { "" };
        json!({
            "tab": self.style.indent,
            "comment": comment,
            "type_name": declaration.type_name(),
            "pointer": pointer,
            "name": escape_literal(declaration.name()),
            "cname": declaration.sanitized_name(),
            "output_name": format!("{OUTPUT_PREFIX}{}", declaration.sanitized_name()),
        })
    }

    fn wrap_namespace(&self, request: &GenerationRequest, body: &str) -> Result<String> {
        match request.cycle.namespace() {
            Some(namespace) => self.renderer.render(
                &self.templates.namespace,
                &json!({
                    "namespace": namespace,
                    "body": indent(body, &self.style.indent),
                }),
            ),
            None => Ok(body.to_string()),
        }
    }
}

/// Prefixes every non-empty line of `text` with `tab`.
pub fn indent(text: &str, tab: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{tab}{line}")
            }
        })
        .collect()
}

fn header_guard(request: &GenerationRequest) -> String {
    let guard = match request.cycle.namespace() {
        Some(namespace) => format!("{}_{}_H", namespace, request.cycle.class_name()),
        None => format!("{}_H", request.cycle.class_name()),
    };
    guard.to_uppercase()
}

fn escape_literal(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
