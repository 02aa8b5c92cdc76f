//! Pure string-formatting helpers.
//!
//! These functions build human-readable text and have no side effects:
//! pluralization, conjunction lists, terminal punctuation, indentation,
//! column layout, and serde-based value rendering.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

/// Indentation used for continuation lines and column leaders.
pub(crate) const LEADER: &str = "    ";

/// Width above which [`render`] switches to multi-line output.
const RENDER_WRAP: usize = 70;

/// Anything that can stand in for a count: an integer or a collection
/// whose length is the count.
pub trait Quantity {
    /// The count this value represents.
    fn quantity(&self) -> usize;
}

impl Quantity for usize {
    fn quantity(&self) -> usize {
        *self
    }
}

impl<T> Quantity for &[T] {
    fn quantity(&self) -> usize {
        self.len()
    }
}

impl<T> Quantity for &Vec<T> {
    fn quantity(&self) -> usize {
        self.len()
    }
}

/// Choose the singular or plural form by count.
///
/// ```
/// use inform::plural;
///
/// assert_eq!(plural(1, "cat", "cats"), "cat");
/// assert_eq!(plural(2, "cat", "cats"), "cats");
/// ```
pub fn plural<'a>(count: impl Quantity, singular: &'a str, plural_form: &'a str) -> &'a str {
    if count.quantity() == 1 {
        singular
    } else {
        plural_form
    }
}

/// Join items with commas and a final ` and `.
///
/// ```
/// use inform::conjoin;
///
/// assert_eq!(conjoin(["a", "b", "c"]), "a, b and c");
/// assert_eq!(conjoin(["a", "b"]), "a and b");
/// assert_eq!(conjoin(["a"]), "a");
/// ```
pub fn conjoin<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    conjoin_with(items, " and ", ", ")
}

/// Join items with `sep` and a final `conj`.
pub fn conjoin_with<I, S>(items: I, conj: &str, sep: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    match items.len() {
        0 => String::new(),
        1 => items.into_iter().next().unwrap_or_default(),
        n => {
            let head = items[..n - 1].join(sep);
            format!("{head}{conj}{}", items[n - 1])
        }
    }
}

/// Append terminating punctuation unless the text already ends with
/// `.`, `?`, or `!`.
///
/// ```
/// use inform::full_stop;
///
/// assert_eq!(full_stop("hello"), "hello.");
/// assert_eq!(full_stop("hello!"), "hello!");
/// ```
pub fn full_stop(text: impl AsRef<str>) -> String {
    let text = text.as_ref();
    if text.ends_with(['.', '?', '!']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Prefix every non-empty line of `text` with `leader`.
pub fn indent(text: &str, leader: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{leader}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lay items out into aligned columns fitting `pagewidth`.
///
/// Items fill column-major: reading down the first column, then the next.
/// The column count is `(pagewidth - leader) / (widest + 2)`, at least one.
pub fn columns<I, S>(items: I, pagewidth: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if items.is_empty() {
        return String::new();
    }
    let widest = items.iter().map(String::len).max().unwrap_or(0);
    let numcols = ((pagewidth.saturating_sub(LEADER.len())) / (widest + 2)).max(1);
    let numrows = items.len().div_ceil(numcols);

    let mut lines = Vec::with_capacity(numrows);
    for row in 0..numrows {
        let mut line = String::from(LEADER);
        for col in 0..numcols {
            if let Some(item) = items.get(row + col * numrows) {
                line.push_str(&format!("{item:<width$}", width = widest + 2));
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Drop absent and empty entries.
pub fn cull<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: Into<String>,
{
    items
        .into_iter()
        .flatten()
        .map(Into::into)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join items with `sep`, dropping empty entries first.
pub fn join<I, S>(items: I, sep: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Render an I/O error the way a shell utility would: `<path>: <message>`.
pub fn os_error(err: &io::Error, path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{}: {err}", path.display()),
        None => err.to_string(),
    }
}

/// Render any serializable value as human-readable text.
///
/// Short values render on one line; longer values wrap with 4-space
/// indentation. Strings are single-quoted.
///
/// ```
/// use inform::render;
///
/// assert_eq!(render(&vec![1, 2, 3]), "[1, 2, 3]");
/// assert_eq!(render(&"hello"), "'hello'");
/// ```
pub fn render<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => render_value(&v, 0),
        Err(_) => "<unrenderable>".to_string(),
    }
}

fn render_value(value: &Value, level: usize) -> String {
    let flat = render_compact(value);
    if flat.len() <= RENDER_WRAP {
        return flat;
    }
    let pad = LEADER.repeat(level + 1);
    let close_pad = LEADER.repeat(level);
    match value {
        Value::Array(items) => {
            let body = items
                .iter()
                .map(|v| format!("{pad}{},", render_value(v, level + 1)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("[\n{body}\n{close_pad}]")
        }
        Value::Object(entries) => {
            let body = entries
                .iter()
                .map(|(k, v)| format!("{pad}'{k}': {},", render_value(v, level + 1)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{{\n{body}\n{close_pad}}}")
        }
        _ => flat,
    }
}

fn render_compact(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => {
            let body = items.iter().map(render_compact).collect::<Vec<_>>().join(", ");
            format!("[{body}]")
        }
        Value::Object(entries) => {
            let body = entries
                .iter()
                .map(|(k, v)| format!("'{k}': {}", render_compact(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{body}}}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "cat", "cats"), "cat");
    }

    #[test]
    fn test_plural_many() {
        assert_eq!(plural(2, "cat", "cats"), "cats");
        assert_eq!(plural(0, "cat", "cats"), "cats");
    }

    #[test]
    fn test_plural_collection() {
        let names = vec!["a", "b"];
        assert_eq!(plural(&names, "name", "names"), "names");
        assert_eq!(plural(&names[..1], "name", "names"), "name");
    }

    #[test]
    fn test_conjoin_empty() {
        assert_eq!(conjoin(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_conjoin_one() {
        assert_eq!(conjoin(["a"]), "a");
    }

    #[test]
    fn test_conjoin_two() {
        assert_eq!(conjoin(["a", "b"]), "a and b");
    }

    #[test]
    fn test_conjoin_many() {
        assert_eq!(conjoin(["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn test_conjoin_with_or() {
        assert_eq!(conjoin_with(["a", "b", "c"], " or ", ", "), "a, b or c");
    }

    #[test]
    fn test_full_stop_appends() {
        assert_eq!(full_stop("done"), "done.");
    }

    #[test]
    fn test_full_stop_keeps_punctuation() {
        assert_eq!(full_stop("done."), "done.");
        assert_eq!(full_stop("done?"), "done?");
        assert_eq!(full_stop("done!"), "done!");
    }

    #[test]
    fn test_indent_multiline() {
        assert_eq!(indent("a\nb", "    "), "    a\n    b");
    }

    #[test]
    fn test_indent_skips_empty_lines() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b");
    }

    #[test]
    fn test_columns_single_column() {
        let items = ["averylongitemthatdominates"];
        assert_eq!(columns(items, 20), "    averylongitemthatdominates");
    }

    #[test]
    fn test_columns_fills_column_major() {
        let items = ["a", "b", "c", "d"];
        // widest 1 => 3 chars per cell, (79 - 4) / 3 = 25 columns: one row
        let out = columns(items, 79);
        assert_eq!(out, "    a  b  c  d");
    }

    #[test]
    fn test_columns_wraps_rows() {
        let items = ["aa", "bb", "cc", "dd", "ee"];
        // (12 - 4) / 4 = 2 columns, 3 rows, column-major
        let out = columns(items, 12);
        assert_eq!(out, "    aa  dd\n    bb  ee\n    cc");
    }

    #[test]
    fn test_cull() {
        let kept = cull([Some("a"), None, Some(""), Some("b")]);
        assert_eq!(kept, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_join_drops_empty() {
        assert_eq!(join(["a", "", "b"], ", "), "a, b");
    }

    #[test]
    fn test_os_error_with_path() {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such file or directory");
        let text = os_error(&err, Some(Path::new("config.toml")));
        assert_eq!(text, "config.toml: no such file or directory");
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(render(&42), "42");
        assert_eq!(render(&"hi"), "'hi'");
        assert_eq!(render(&true), "true");
    }

    #[test]
    fn test_render_compact_collection() {
        assert_eq!(render(&vec![1, 2, 3]), "[1, 2, 3]");
    }

    #[test]
    fn test_render_wraps_long_values() {
        let long: Vec<String> = (0..12).map(|i| format!("element-number-{i}")).collect();
        let out = render(&long);
        assert!(out.starts_with("[\n    'element-number-0',"));
        assert!(out.ends_with("\n]"));
    }
}
