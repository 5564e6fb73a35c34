//! Free-text search and sort helpers for list endpoints.
//!
//! Search is a case-insensitive substring match. The same normalisation is
//! used by the SQL repositories (via [`like_pattern`]) and by the in-process
//! store (via [`contains_term`]) so both backends agree on what matches.

use serde::Deserialize;

/// Sort direction accepted on list endpoints (`?direction=asc|desc`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Trim a raw search term; blank input means "no filter".
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and `\` in the term are escaped so they match literally; the
/// query must use `ESCAPE '\'`.
///
/// # Examples
///
/// ```
/// use greyimage_core::search::like_pattern;
/// assert_eq!(like_pattern(Some("cat")), Some("%cat%".to_string()));
/// assert_eq!(like_pattern(Some("50%")), Some("%50\\%%".to_string()));
/// assert_eq!(like_pattern(Some("  ")), None);
/// ```
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = normalize_term(term)?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Case-insensitive substring test matching the `ILIKE` semantics above.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_term_is_no_filter() {
        assert_eq!(normalize_term(None), None);
        assert_eq!(normalize_term(Some("")), None);
        assert_eq!(normalize_term(Some(" \t ")), None);
    }

    #[test]
    fn term_is_trimmed() {
        assert_eq!(normalize_term(Some("  cat ")), Some("cat".to_string()));
    }

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern(Some("png")), Some("%png%".to_string()));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(
            like_pattern(Some("a_b%c\\d")),
            Some("%a\\_b\\%c\\\\d%".to_string())
        );
    }

    #[test]
    fn contains_term_ignores_case() {
        assert!(contains_term("Holiday.PNG", "png"));
        assert!(contains_term("image/jpeg", "JPEG"));
        assert!(!contains_term("cat.png", "dog"));
    }

    #[test]
    fn direction_defaults_to_ascending() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
