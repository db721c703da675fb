//! Report rendering: a Handlebars template plus the acquisition result in,
//! an HTML string out. The renderer never mutates the result.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError};
use serde_json::Value;

use crate::types::{AcquireError, AcquireResult, AcquisitionResult};

/// Built-in report template, used when no override is supplied.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/theme-report.hbs");

/// Render `data` through `template_source` and return the HTML.
pub fn render_report(template_source: &str, data: &AcquisitionResult) -> AcquireResult<String> {
    let mut registry = Handlebars::new();
    register_helpers(&mut registry);
    registry
        .register_template_string("report", template_source)
        .map_err(|e| AcquireError::Render(e.to_string()))?;
    registry
        .render("report", data)
        .map_err(|e| AcquireError::Render(e.to_string()))
}

fn register_helpers(registry: &mut Handlebars) {
    registry.register_helper("formatDate", Box::new(format_date_helper));
    registry.register_helper("json", Box::new(json_helper));
    registry.register_helper("join", Box::new(join_helper));
}

/// `{{formatDate generatedAt}}` — RFC 3339 timestamp to a human-readable
/// form. Non-timestamp input passes through unchanged.
fn format_date_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .unwrap_or_default();
    let formatted = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string());
    out.write(&formatted)?;
    Ok(())
}

/// `{{json value}}` — serialize any template value as JSON text.
fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).map(|p| p.value()).unwrap_or(&Value::Null);
    let text =
        serde_json::to_string(value).map_err(|e| RenderError::new(format!("json: {e}")))?;
    out.write(&text)?;
    Ok(())
}

/// `{{join value}}` / `{{join value ", "}}` — join a list of strings with a
/// separator. A plain string passes through; anything else renders empty.
fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h
        .param(1)
        .and_then(|p| p.value().as_str())
        .unwrap_or(", ")
        .to_string();
    let joined = match h.param(0).map(|p| p.value()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(&separator),
        _ => String::new(),
    };
    out.write(&joined)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;
