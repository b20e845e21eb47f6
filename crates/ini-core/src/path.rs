//! Dotted section paths.
//!
//! A section name like `server.http` addresses the `http` object nested inside
//! `server`. A key that itself contains a dot is written with the dot escaped
//! (`\.`), so `split`/`join` can move between the flat header text and the
//! nested structure without losing information.
//!
//! ```
//! use ini_core::path;
//!
//! assert_eq!(path::split(r"a.b\.c"), vec!["a", r"b\.c"]);
//! assert_eq!(path::segments(r"a.b\.c"), vec!["a", "b.c"]);
//! assert_eq!(path::escape_key("www.example.com"), r"www\.example\.com");
//! ```

/// Split a path on unescaped dots. Escaped dots stay escaped inside the
/// returned segments.
pub fn split(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('\\');
                current.push('.');
                chars.next();
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// Join segments with an escaped dot.
///
/// This is the inverse of [`split`] for a single key: `join(&split(key))`
/// yields the key with every separator escaped, i.e. a name that reads back
/// as one segment.
pub fn join(segments: &[String]) -> String {
    segments.join("\\.")
}

/// Escape every unescaped dot in a key so it survives as one path segment.
pub fn escape_key(key: &str) -> String {
    join(&split(key))
}

/// Replace `\.` with a literal dot.
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("\\.", ".")
}

/// Split a path into its literal segment names.
pub fn segments(path: &str) -> Vec<String> {
    split(path).iter().map(|s| unescape_segment(s)).collect()
}
