//! Header multi-map capability.
//!
//! Cache decisions only need a handful of operations on a header collection:
//! reading every value of a name, appending values, replacing a name and
//! merging two collections. [`Headers`] captures exactly that, so any HTTP
//! stack can plug its own header type in. [`HeaderList`] is a small
//! insertion-ordered implementation for callers without one.

use std::fmt;

/// `Cache-Control` header name.
pub const CACHE_CONTROL: &str = "cache-control";
/// `ETag` header name.
pub const ETAG: &str = "etag";
/// `Last-Modified` header name.
pub const LAST_MODIFIED: &str = "last-modified";
/// `If-None-Match` header name.
pub const IF_NONE_MATCH: &str = "if-none-match";
/// `If-Modified-Since` header name.
pub const IF_MODIFIED_SINCE: &str = "if-modified-since";

/// An ordered header multi-map with case-insensitive names.
///
/// # For Implementors
///
/// - Names compare case-insensitively.
/// - Insertion order is preserved and a name may carry several values.
/// - Values that cannot be represented as text (on read) or as a header
///   value (on write) are skipped rather than reported.
pub trait Headers: Clone + Default {
    /// Returns every value of `name`, in insertion order.
    fn get(&self, name: &str) -> Vec<&str>;

    /// Appends a value, keeping existing values of the same name.
    fn add(&mut self, name: &str, value: &str);

    /// Replaces all values of `name` with a single value.
    fn set(&mut self, name: &str, value: &str);

    /// Appends every entry of `other`, in its order.
    fn merge(&mut self, other: Self);

    /// Returns `true` if at least one value exists for `name`.
    fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }
}

/// Insertion-ordered list of header entries.
///
/// Names keep the case they were added with; lookups ignore case.
///
/// ```
/// use revalidate_core::{HeaderList, Headers};
///
/// let mut headers = HeaderList::new();
/// headers.add("ETag", "\"a\"");
/// headers.add("etag", "W/\"b\"");
/// assert_eq!(headers.get("ETAG"), vec!["\"a\"", "W/\"b\""]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(String, String)>,
}

impl HeaderList {
    /// Creates an empty header list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, counting repeated names separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Headers for HeaderList {
    fn get(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn add(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_owned(), value.to_owned()));
    }

    fn set(&mut self, name: &str, value: &str) {
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.add(name, value);
    }

    fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderList
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for HeaderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let headers: HeaderList = [("Cache-Control", "no-cache")].into_iter().collect();
        assert_eq!(headers.get("cache-control"), vec!["no-cache"]);
        assert!(headers.contains("CACHE-CONTROL"));
        assert!(!headers.contains("etag"));
    }

    #[test]
    fn set_replaces_every_value_of_a_name() {
        let mut headers: HeaderList = [
            ("Cache-Control", "no-cache"),
            ("Accept", "*/*"),
            ("cache-control", "must-revalidate"),
        ]
        .into_iter()
        .collect();
        headers.set(CACHE_CONTROL, "max-age=0");
        assert_eq!(headers.get(CACHE_CONTROL), vec!["max-age=0"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn merge_appends_in_order() {
        let mut headers: HeaderList = [("If-None-Match", "\"a\"")].into_iter().collect();
        let other: HeaderList = [("if-none-match", "\"b\""), ("Accept", "*/*")]
            .into_iter()
            .collect();
        headers.merge(other);
        assert_eq!(headers.get(IF_NONE_MATCH), vec!["\"a\"", "\"b\""]);
        assert_eq!(
            headers.to_string(),
            "If-None-Match: \"a\"\nif-none-match: \"b\"\nAccept: */*\n"
        );
    }
}
