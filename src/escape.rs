//! HTML escaping and `{{key}}` placeholder templating.
//!
//! The escape set is deliberately wider than the usual five characters:
//! backtick, `=`, and `/` are included so escaped text is also safe when a
//! template drops it into attribute position (`href="{{url}}"`).

use serde_json::Value;

/// Escapes the eight reserved characters in a single pass.
///
/// Every other character is passed through untouched, so text that contains
/// no raw reserved characters round-trips unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#96;"),
            '=' => out.push_str("&#61;"),
            '/' => out.push_str("&#47;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes string values; any other JSON value is returned unchanged.
pub fn escape_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        other => other.clone(),
    }
}

/// Replaces every literal `{{key}}` in `template` with the escaped value.
///
/// All occurrences of a placeholder are replaced identically. Placeholders
/// with no matching pair stay verbatim; pairs with no placeholder are
/// ignored. Pure: same inputs, same output.
pub fn render_template(template: &str, data: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in data {
        let placeholder = format!("{{{{{key}}}}}");
        if rendered.contains(&placeholder) {
            rendered = rendered.replace(&placeholder, &escape_html(value));
        }
    }
    rendered
}

/// Minimal escaping for serialized attribute values.
pub(crate) fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
