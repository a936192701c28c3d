//! Smart truncation of long `IN (...)` lists.
//!
//! Lists of more than [`TRUNCATE_THRESHOLD`] items keep their first and last
//! [`KEEP_EDGE_ITEMS`] items and replace the rest with an elision marker:
//!
//! ```rust
//! let sql = format!(
//!     "SELECT * FROM users WHERE id IN ({})",
//!     (1..=11).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
//! );
//! assert_eq!(
//!     querylog::truncate(&sql),
//!     "SELECT * FROM users WHERE id IN (1,2,3,...5 more...,9,10,11)"
//! );
//! ```

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Lists with more items than this are truncated.
///
/// Independent of [`FormatterConfig::max_array_length`](crate::FormatterConfig),
/// which bounds generic JSON compaction instead.
pub const TRUNCATE_THRESHOLD: usize = 10;

/// Items kept verbatim at each end of a truncated list.
pub const KEEP_EDGE_ITEMS: usize = 3;

fn in_clause_regex() -> &'static Regex {
    static IN_CLAUSE_RE: OnceLock<Regex> = OnceLock::new();
    IN_CLAUSE_RE.get_or_init(|| {
        // The body excludes parens so nested lists match at the innermost level.
        Regex::new(r"(?i)\b(IN)\s*\(([^()]*)\)").expect("invalid built-in IN clause regex")
    })
}

/// Truncate every oversized `IN (...)` clause in `text`.
///
/// Each clause is handled on its own. Running this on its own output changes
/// nothing.
pub fn truncate(text: &str) -> String {
    in_clause_regex()
        .replace_all(text, |caps: &Captures| {
            let items: Vec<&str> = caps[2].split(',').map(str::trim).collect();
            if items.len() <= TRUNCATE_THRESHOLD {
                return caps[0].to_string();
            }
            format!("{} ({})", &caps[1], elide_items(&items))
        })
        .into_owned()
}

/// Join `items` with commas, eliding the interior when there are more than
/// [`TRUNCATE_THRESHOLD`] of them.
pub fn elide_items<S: AsRef<str>>(items: &[S]) -> String {
    if items.len() <= TRUNCATE_THRESHOLD {
        return join(items);
    }
    let head = join(&items[..KEEP_EDGE_ITEMS]);
    let tail = join(&items[items.len() - KEEP_EDGE_ITEMS..]);
    let hidden = items.len() - 2 * KEEP_EDGE_ITEMS;
    format!("{head},...{hidden} more...,{tail}")
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}
