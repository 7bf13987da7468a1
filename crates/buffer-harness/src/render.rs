//! Human-readable rendering of [`Value`]s.
//!
//! Rendering is deterministic and never fails. Buffer references are rendered through a
//! `describe` hook so the harness can attach the host's display name without the value itself
//! carrying any buffer contents.

use crate::host::BufferRef;
use crate::value::Value;
use std::fmt::Write as _;
use unicode_width::UnicodeWidthChar;

/// Options that control how a rendered message is fitted to the output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageOptions {
    /// If `true`, only the text before the first newline is emitted.
    pub first_line_only: bool,
    /// Maximum display width in terminal cells. Longer messages are cut and end with `...`.
    pub max_width: Option<usize>,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            first_line_only: true,
            max_width: None,
        }
    }
}

const ELLIPSIS: &str = "...";

/// Render `value` without host information (buffers render as `[buffer N]`).
pub fn render(value: &Value) -> String {
    render_with(value, &|_| None)
}

/// Render `value`, asking `describe` for a display name for each buffer reference.
pub fn render_with(value: &Value, describe: &dyn Fn(BufferRef) -> Option<String>) -> String {
    match value {
        // Top-level strings are emitted verbatim.
        Value::String(s) => s.clone(),
        other => {
            let mut out = String::new();
            write_nested(&mut out, other, describe);
            out
        }
    }
}

fn write_nested(out: &mut String, value: &Value, describe: &dyn Fn(BufferRef) -> Option<String>) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => {
            let _ = write!(out, "{s:?}");
        }
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_nested(out, item, describe);
            }
            out.push(']');
        }
        Value::Mapping(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    let _ = write!(out, "{key:?}");
                }
                out.push_str(": ");
                write_nested(out, item, describe);
            }
            out.push('}');
        }
        Value::Callable(f) => match f.name() {
            Some(name) if !name.is_empty() => {
                let _ = write!(out, "[function {name}]");
            }
            _ => out.push_str("[function]"),
        },
        Value::Buffer(buf) => match describe(*buf).filter(|name| !name.is_empty()) {
            Some(name) => {
                let _ = write!(out, "[buffer {}: {name}]", buf.number());
            }
            None => {
                let _ = write!(out, "[buffer {}]", buf.number());
            }
        },
        Value::Opaque(kind) => {
            let _ = write!(out, "[object {kind}]");
        }
    }
}

/// Decimal rendering of a number: integers without a fractional part, `NaN`, `Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n == 0.0 {
        // Covers negative zero.
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Fit a rendered message to one output line according to `options`.
pub fn fit_message(text: &str, options: &MessageOptions) -> String {
    let text = if options.first_line_only {
        text.split(['\n', '\r']).next().unwrap_or_default()
    } else {
        text
    };

    let Some(max_width) = options.max_width else {
        return text.to_string();
    };

    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width >= ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    out
}
