use std::collections::BTreeMap;
use std::time::Duration;

/// The kind of SQL statement an event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// SELECT query (including `WITH ... SELECT`)
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// Anything else (DDL, transaction control, ...)
    Other,
}

impl QueryKind {
    /// Detect the statement kind from its leading keyword.
    ///
    /// Leading whitespace, `--` / `/* */` comments and opening parentheses
    /// are skipped first. A `WITH` statement takes the kind of the statement
    /// that follows its CTE definitions.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = strip_sql_prefix(sql);
        if starts_with_keyword(trimmed, "WITH") {
            Self::detect_cte_dml(trimmed)
        } else {
            Self::from_keyword(trimmed)
        }
    }

    fn from_keyword(s: &str) -> Self {
        if starts_with_keyword(s, "SELECT") {
            QueryKind::Select
        } else if starts_with_keyword(s, "INSERT") {
            QueryKind::Insert
        } else if starts_with_keyword(s, "UPDATE") {
            QueryKind::Update
        } else if starts_with_keyword(s, "DELETE") {
            QueryKind::Delete
        } else {
            QueryKind::Other
        }
    }

    /// Classify `WITH ... AS (...) [, ...] <statement>`.
    ///
    /// Walks the CTE bodies tracking parenthesis depth (skipping `'...'`
    /// literals). The main statement is the first DML keyword following a
    /// top-level close paren; column lists and further CTEs are skipped.
    fn detect_cte_dml(sql: &str) -> Self {
        let bytes = sql.as_bytes();
        let mut depth: i32 = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        let kind = Self::from_keyword(sql[i + 1..].trim_start());
                        if kind != QueryKind::Other {
                            return kind;
                        }
                    }
                }
                b'\'' => {
                    i += 1;
                    while i < bytes.len() {
                        if bytes[i] == b'\'' {
                            if bytes.get(i + 1) == Some(&b'\'') {
                                i += 1; // escaped quote
                            } else {
                                break;
                            }
                        }
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        QueryKind::Select
    }
}

/// Case-insensitive keyword match at the start of `s`, ending on a word
/// boundary.
fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    let matches = match s.get(0..keyword.len()) {
        Some(prefix) => prefix.eq_ignore_ascii_case(keyword),
        None => false,
    };
    matches
        && !s[keyword.len()..]
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn strip_sql_prefix(sql: &str) -> &str {
    let mut s = sql;
    loop {
        let before = s;
        s = s.trim_start();
        if s.starts_with("--") {
            match s.find('\n') {
                Some(pos) => {
                    s = &s[pos + 1..];
                    continue;
                }
                None => return "",
            }
        }
        if s.starts_with("/*") {
            match s.find("*/") {
                Some(pos) => {
                    s = &s[pos + 2..];
                    continue;
                }
                None => return "",
            }
        }
        if let Some(rest) = s.strip_prefix('(') {
            s = rest;
            continue;
        }
        if s == before {
            break;
        }
    }
    s
}

/// One executed statement, as reported by an ORM's query-logging hook.
#[derive(Debug, Clone)]
pub struct QueryEvent {
    /// SQL text with placeholders.
    pub query: String,
    /// Bound parameters as the ORM serialised them (usually a JSON array).
    pub params: String,
    /// Execution time reported by the ORM. Display only.
    pub duration: Duration,
    /// Detected statement kind.
    pub kind: QueryKind,
    /// Optional query name/tag for identification.
    pub tag: Option<String>,
    /// Optional structured fields (low-cardinality).
    pub fields: BTreeMap<String, String>,
}

impl QueryEvent {
    /// Create an event with zero duration.
    pub fn new(query: impl Into<String>, params: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            kind: QueryKind::from_sql(&query),
            query,
            params: params.into(),
            duration: Duration::ZERO,
            tag: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the reported execution time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the reported execution time from fractional milliseconds.
    ///
    /// Negative or NaN values become zero; values too large saturate.
    pub fn with_duration_ms(self, ms: f64) -> Self {
        let duration = if ms > 0.0 {
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        self.with_duration(duration)
    }

    /// Add a tag to identify this query.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a structured field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Receiver of query events.
///
/// Implement this to route formatted queries into a log sink, a test
/// buffer or a metrics pipeline.
pub trait QuerySink: Send + Sync {
    /// Called once per executed statement.
    fn on_query(&self, event: &QueryEvent);
}
