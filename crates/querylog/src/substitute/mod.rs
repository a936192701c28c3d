//! Placeholder substitution.
//!
//! Replaces `@P1` / `$1` style placeholders with a readable rendering of the
//! matching parameter. Both spellings share one parameter list, so a query
//! written for either driver convention substitutes the same way.

use crate::compact::{compact_value, truncate_chars};
use crate::config::FormatterConfig;
use crate::error::{FormatError, FormatResult};
use crate::params::ParsedParam;
use crate::truncate::{TRUNCATE_THRESHOLD, elide_items};
use nu_ansi_term::Style;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;


fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"@P(\d+)\b|\$(\d+)\b").expect("invalid built-in placeholder regex")
    })
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Render one parameter for display.
///
/// Oversized primitive arrays use the flat elided form shared with `IN`
/// clause truncation; other arrays and objects are compacted JSON; scalars
/// are SQL-literal style. With colors enabled the result is bold.
pub fn render_param(param: &ParsedParam, config: &FormatterConfig) -> String {
    let rendered = render_plain(param, config);
    if config.enable_colors {
        Style::new().bold().paint(rendered.as_str()).to_string()
    } else {
        rendered
    }
}

fn render_plain(param: &ParsedParam, config: &FormatterConfig) -> String {
    match param {
        Value::Array(items)
            if items.len() > TRUNCATE_THRESHOLD && items.iter().all(is_primitive) =>
        {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_scalar(item, config))
                .collect();
            elide_items(&rendered)
        }
        Value::Array(_) | Value::Object(_) => compact_value(param, &config.limits()).to_string(),
        scalar => render_scalar(scalar, config),
    }
}

fn render_scalar(value: &Value, config: &FormatterConfig) -> String {
    match value {
        Value::String(s) => format!("'{}'", truncate_chars(s, config.max_string_length)),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Substitute every placeholder in `query` with its rendered parameter.
///
/// Placeholders are 1-indexed and matched on whole numbers, so `@P1` never
/// touches `@P10`. The query is scanned once; rendered values are not
/// rescanned. Placeholders past the end of `params` stay as written.
///
/// Returns [`FormatError::InvalidPlaceholder`] for `@P0` / `$0`.
pub fn substitute(
    query: &str,
    params: &[ParsedParam],
    config: &FormatterConfig,
) -> FormatResult<String> {
    if params.is_empty() {
        return Ok(query.to_string());
    }

    let rendered: Vec<String> = params
        .iter()
        .map(|param| render_param(param, config))
        .collect();
    let mut invalid: Option<String> = None;

    let out = placeholder_regex().replace_all(query, |caps: &Captures| {
        let digits = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        match digits.parse::<usize>() {
            Ok(0) => {
                invalid.get_or_insert_with(|| caps[0].to_string());
                caps[0].to_string()
            }
            Ok(n) if n <= rendered.len() => rendered[n - 1].clone(),
            _ => caps[0].to_string(),
        }
    });

    match invalid {
        Some(placeholder) => Err(FormatError::InvalidPlaceholder(placeholder)),
        None => Ok(out.into_owned()),
    }
}
