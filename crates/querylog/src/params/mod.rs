//! Parameter-list parsing.
//!
//! ORMs and drivers hand their bound parameters to logging hooks as a string,
//! and not always as clean JSON. Some double-encode it, some leave raw quotes
//! inside string values. [`parse_params`] runs an ordered chain of
//! [`ParseStrategy`] values and returns the first list that decodes.
//!
//! # Example
//!
//! ```rust
//! use querylog::params::parse_params;
//! use serde_json::json;
//!
//! let params = parse_params(r#""[1,2,3]""#).unwrap();
//! assert_eq!(params, vec![json!(1), json!(2), json!(3)]);
//! ```

use crate::error::ParseFailure;
use serde_json::Value;

#[cfg(test)]
mod tests;

/// A single decoded parameter.
///
/// Strings, numbers, booleans, null, arrays and objects map directly onto
/// [`serde_json::Value`]. Object key order follows the input.
pub type ParsedParam = Value;

/// One way of decoding a raw parameter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Plain JSON decode, unwrapping one level of double encoding.
    Direct,
    /// Escape stray double quotes inside string literals, then decode.
    QuoteSanitized,
    /// Split the bracket body on top-level commas and decode each token.
    Tokenized,
}

impl ParseStrategy {
    /// Strategies in the order they are attempted.
    pub const CHAIN: [ParseStrategy; 3] = [
        ParseStrategy::Direct,
        ParseStrategy::QuoteSanitized,
        ParseStrategy::Tokenized,
    ];

    /// Run this strategy against an already trimmed, non-empty input.
    pub fn apply(self, raw: &str) -> Result<Vec<ParsedParam>, ParseFailure> {
        match self {
            ParseStrategy::Direct => decode_direct(raw),
            ParseStrategy::QuoteSanitized => decode_sanitized(raw),
            ParseStrategy::Tokenized => decode_tokenized(raw),
        }
    }
}

/// Parse a raw parameter string into an ordered parameter list.
///
/// Returns [`ParseFailure::Empty`] for empty or whitespace-only input and
/// [`ParseFailure::Exhausted`] when no strategy accepts it.
pub fn parse_params(raw: &str) -> Result<Vec<ParsedParam>, ParseFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::Empty);
    }

    for strategy in ParseStrategy::CHAIN {
        match strategy.apply(trimmed) {
            Ok(params) => return Ok(params),
            Err(err) => {
                tracing::trace!(
                    target: "querylog.params",
                    strategy = ?strategy,
                    error = %err,
                    "parse strategy rejected input"
                );
            }
        }
    }

    Err(ParseFailure::Exhausted)
}

/// Like [`parse_params`], collapsing every failure to `None`.
pub fn parse(raw: &str) -> Option<Vec<ParsedParam>> {
    parse_params(raw).ok()
}

fn into_array(value: Value) -> Result<Vec<ParsedParam>, ParseFailure> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ParseFailure::NotAnArray),
    }
}

fn decode_direct(raw: &str) -> Result<Vec<ParsedParam>, ParseFailure> {
    let value: Value = serde_json::from_str(raw)?;
    let value = match value {
        // Double-encoded: the JSON text is itself a JSON string.
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    into_array(value)
}

fn is_bracketed(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']')
}

fn decode_sanitized(raw: &str) -> Result<Vec<ParsedParam>, ParseFailure> {
    if !is_bracketed(raw) {
        return Err(ParseFailure::NotBracketed);
    }
    let sanitized = escape_stray_quotes(raw);
    into_array(serde_json::from_str(&sanitized)?)
}

/// Escape double quotes that sit inside a string literal without closing it.
///
/// A quote closes the current string only when the next non-whitespace
/// character is a JSON delimiter (`,` `]` `}` `:`) or the end of input.
/// Quotes already preceded by a backslash are left alone.
pub(crate) fn escape_stray_quotes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 8);
    let mut in_string = false;
    let mut escaped = false;

    for (i, &ch) in chars.iter().enumerate() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, None | Some(',' | ']' | '}' | ':')) {
                    in_string = false;
                    out.push('"');
                } else {
                    out.push_str("\\\"");
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

fn decode_tokenized(raw: &str) -> Result<Vec<ParsedParam>, ParseFailure> {
    if !is_bracketed(raw) {
        return Err(ParseFailure::NotBracketed);
    }
    let body = &raw[1..raw.len() - 1];
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(split_top_level(body)
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(decode_token)
        .collect())
}

/// Split on commas outside quotes and outside nested `[]` / `{}`.
fn split_top_level(body: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut depth: usize = 0;

    for ch in body.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
            continue;
        }

        match ch {
            '\\' if in_quotes => {
                escaped = true;
                current.push(ch);
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '[' | '{' if !in_quotes => {
                depth += 1;
                current.push(ch);
            }
            ']' | '}' if !in_quotes => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_quotes && depth == 0 => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    tokens.push(current);

    tokens
}

fn decode_token(token: &str) -> ParsedParam {
    let quoted = token.len() >= 2 && token.starts_with('"') && token.ends_with('"');
    if quoted {
        return match serde_json::from_str::<Value>(token) {
            Ok(value @ Value::String(_)) => value,
            _ => Value::String(token[1..token.len() - 1].to_string()),
        };
    }
    serde_json::from_str(token).unwrap_or_else(|_| Value::String(token.to_string()))
}
