//! ANSI keyword highlighting for formatted SQL.

use nu_ansi_term::{Color, Style};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn keyword_regex() -> &'static Regex {
    static KEYWORD_RE: OnceLock<Regex> = OnceLock::new();
    KEYWORD_RE.get_or_init(|| {
        Regex::new(
            r"'(?:[^']|'')*'|\b(SELECT|FROM|WHERE|AND|OR|NOT|IN|IS|NULL|LIKE|ILIKE|BETWEEN|EXISTS|INSERT|INTO|VALUES|UPDATE|SET|DELETE|RETURNING|JOIN|LEFT|RIGHT|INNER|OUTER|ON|GROUP|ORDER|BY|HAVING|LIMIT|OFFSET|DISTINCT|AS|WITH|UNION|ASC|DESC)\b",
        )
        .expect("invalid built-in keyword regex")
    })
}

fn marker_regex() -> &'static Regex {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    MARKER_RE
        .get_or_init(|| Regex::new(r"\.\.\.\d+ more\.\.\.").expect("invalid built-in marker regex"))
}

/// Color upper-case SQL keywords and dim elision markers.
///
/// Single-quoted literals are skipped, so a rendered `'SELECT'` string
/// parameter is not styled as a keyword. Returns `text` unchanged when
/// `enable_colors` is false. Run this last: the inserted escape codes stop
/// [`truncate`](crate::truncate) from recognising `IN (` afterwards.
pub fn highlight(text: &str, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    let text = keyword_regex().replace_all(text, |caps: &Captures| match caps.get(1) {
        Some(keyword) => Color::Cyan.paint(keyword.as_str()).to_string(),
        None => caps[0].to_string(),
    });
    marker_regex()
        .replace_all(&text, |caps: &Captures| {
            Style::new().dimmed().paint(&caps[0]).to_string()
        })
        .into_owned()
}
