//! Keyword search helpers.
//!
//! Keywords are matched as case-insensitive substrings (`ILIKE`). User input
//! is escaped so `%`, `_` and `\` match literally.

/// Trim a raw keyword; blank input means "no keyword".
pub fn normalize_keyword(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Escape LIKE metacharacters using PostgreSQL's default escape (`\`).
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%keyword%` substring pattern for `ILIKE`.
///
/// ```
/// use catalog_core::search::contains_pattern;
/// assert_eq!(contains_pattern("cof"), "%cof%");
/// assert_eq!(contains_pattern("50%"), "%50\\%%");
/// ```
pub fn contains_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_trimmed() {
        assert_eq!(normalize_keyword(Some("  cof ")), Some("cof".to_string()));
    }

    #[test]
    fn blank_keyword_is_none() {
        assert_eq!(normalize_keyword(Some("   ")), None);
        assert_eq!(normalize_keyword(Some("")), None);
        assert_eq!(normalize_keyword(None), None);
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn pattern_wraps_in_wildcards() {
        assert_eq!(contains_pattern("Coffee"), "%Coffee%");
    }
}
