//! Shallowest-path-first ordering for path strings.

use std::cmp::Ordering;
use std::fmt;

/// Returns `true` for the characters treated as path separators.
#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Counts `/` and `\` occurrences.
pub fn separator_count(path: &str) -> usize {
    path.chars().filter(|&c| is_separator(c)).count()
}

/// Compares two path strings by depth.
///
/// - paths containing a separator sort before paths without one
/// - among separator-containing paths, fewer separators sort first, ties are
///   broken lexicographically
/// - separator-free paths compare by length, then lexicographically
///
/// The result is a strict total order that agrees with string equality, so it
/// can key a [`BTreeMap`](std::collections::BTreeMap).
///
/// ```rust
/// use std::cmp::Ordering;
/// use dirzip::index::compare_by_depth;
///
/// assert_eq!(compare_by_depth("a/b", "a/b/c"), Ordering::Less);
/// assert_eq!(compare_by_depth("a/b/c", "a"), Ordering::Less);
/// assert_eq!(compare_by_depth("ab", "b"), Ordering::Greater);
/// ```
pub fn compare_by_depth(a: &str, b: &str) -> Ordering {
    match (separator_count(a), separator_count(b)) {
        (0, 0) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (na, nb) => na.cmp(&nb).then_with(|| a.cmp(b)),
    }
}

/// A path string ordered by [`compare_by_depth`] instead of byte order.
///
/// Used as the key of the ordered maps in a
/// [`RoleIndex`](crate::index::RoleIndex).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlashOrdered(String);

impl SlashOrdered {
    /// Wraps a path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the wrapped path.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of separators in the wrapped path.
    pub fn depth(&self) -> usize {
        separator_count(&self.0)
    }

    /// Unwraps the path string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Ord for SlashOrdered {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_by_depth(&self.0, &other.0)
    }
}

impl PartialOrd for SlashOrdered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for SlashOrdered {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlashOrdered {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SlashOrdered {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SlashOrdered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
