//! Rendering a resolved plan
//!
//! The text form is built from the same serialized view as the JSON form,
//! so every field that reaches JSON is also shown in text (secrets stay
//! redacted in both).

use std::fmt::Write;

use serde_json::Value;

use super::terminal::Painter;
use crate::cli::PlanFormat;
use crate::errors::Result;
use crate::operation::{GlobalConfig, UrlConfig};

/// Separator width when the terminal width is unknown
const DEFAULT_WIDTH: usize = 60;
const MAX_WIDTH: usize = 100;

/// How a plan should be rendered
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: PlanFormat,
    pub color: bool,
    pub width: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: PlanFormat::Text,
            color: false,
            width: None,
        }
    }
}

pub fn render(global: &GlobalConfig, options: RenderOptions) -> Result<String> {
    match options.format {
        PlanFormat::Json => render_json(global),
        PlanFormat::Text => render_text(global, options),
    }
}

/// The whole plan as pretty-printed JSON
pub fn render_json(global: &GlobalConfig) -> Result<String> {
    let mut out = serde_json::to_string_pretty(global)?;
    out.push('\n');
    Ok(out)
}

/// One block per operation
pub fn render_text(global: &GlobalConfig, options: RenderOptions) -> Result<String> {
    let paint = Painter::new(options.color);
    let width = options.width.unwrap_or(DEFAULT_WIDTH).clamp(1, MAX_WIDTH);
    let mut out = String::new();

    for (name, on) in [
        ("verbose", global.verbose),
        ("silent", global.silent),
        ("show-error", global.show_error),
    ] {
        if on {
            let _ = writeln!(out, "{}: yes", paint.key(name));
        }
    }

    for (index, op) in global.operations().iter().enumerate() {
        if index > 0 || !out.is_empty() {
            let _ = writeln!(out, "{}", paint.muted(&"-".repeat(width)));
        }
        let _ = writeln!(
            out,
            "{} {}",
            paint.label(&format!("operation {} of {}", index + 1, global.len())),
            paint.method(op.method())
        );

        if op.urls.is_empty() {
            let _ = writeln!(out, "  {}", paint.muted("(no URLs)"));
        }
        for entry in &op.urls {
            let _ = writeln!(out, "  {} {}", paint.key("url:"), describe_entry(entry));
        }

        if let Value::Object(fields) = serde_json::to_value(op)? {
            for (key, value) in &fields {
                if key == "urls" {
                    continue;
                }
                write_field(&mut out, &paint, &key.replace('_', "-"), value);
            }
        }
    }

    Ok(out)
}

/// One line describing a URL entry and where its data goes
fn describe_entry(entry: &UrlConfig) -> String {
    let mut line = entry
        .url
        .clone()
        .unwrap_or_else(|| "(no URL yet)".to_string());

    if let Some(name) = entry.output_name() {
        let _ = write!(line, " -> {name}");
    } else if entry.use_remote_name {
        line.push_str(" -> (remote name)");
    }
    if let Some(infile) = &entry.infile {
        let _ = write!(line, " <- {infile}");
    }
    if entry.no_glob {
        line.push_str(" [globoff]");
    }
    line
}

fn write_field(out: &mut String, paint: &Painter, key: &str, value: &Value) {
    match value {
        Value::Null | Value::Bool(false) => {}
        Value::Bool(true) => {
            let _ = writeln!(out, "  {} yes", paint.key(&format!("{key}:")));
        }
        Value::Array(items) => {
            for item in items {
                let _ = writeln!(out, "  {} {}", paint.key(&format!("{key}:")), scalar(item));
            }
        }
        other => {
            let _ = writeln!(out, "  {} {}", paint.key(&format!("{key}:")), scalar(other));
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
