//! [`Headers`] over [`http::HeaderMap`].

use std::ops::{Deref, DerefMut};

use http::{HeaderMap, HeaderName, HeaderValue};
use revalidate_core::Headers;
use tracing::debug;

/// An [`http::HeaderMap`] usable as a [`Headers`] capability.
///
/// Dereferences to the map, so the whole `http` API stays available.
/// Values that are not visible ASCII are left out of [`Headers::get`];
/// names or values that `http` rejects are skipped by [`Headers::add`]
/// and [`Headers::set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders(HeaderMap);

impl HttpHeaders {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> HeaderMap {
        self.0
    }
}

fn header_pair(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .inspect_err(|error| debug!(name, %error, "skipping header with invalid name"))
        .ok()?;
    let value = HeaderValue::from_str(value)
        .inspect_err(|error| debug!(%name, %error, "skipping header with invalid value"))
        .ok()?;
    Some((name, value))
}

impl Headers for HttpHeaders {
    fn get(&self, name: &str) -> Vec<&str> {
        self.0
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    fn add(&mut self, name: &str, value: &str) {
        if let Some((name, value)) = header_pair(name, value) {
            self.0.append(name, value);
        }
    }

    fn set(&mut self, name: &str, value: &str) {
        if let Some((name, value)) = header_pair(name, value) {
            self.0.insert(name, value);
        }
    }

    // `Extend` on HeaderMap replaces existing names, so append one by one.
    fn merge(&mut self, other: Self) {
        let mut current = None;
        for (name, value) in other.0 {
            if let Some(name) = name {
                current = Some(name);
            }
            if let Some(name) = &current {
                self.0.append(name.clone(), value);
            }
        }
    }
}

impl Deref for HttpHeaders {
    type Target = HeaderMap;

    fn deref(&self) -> &HeaderMap {
        &self.0
    }
}

impl DerefMut for HttpHeaders {
    fn deref_mut(&mut self) -> &mut HeaderMap {
        &mut self.0
    }
}

impl From<HeaderMap> for HttpHeaders {
    fn from(map: HeaderMap) -> Self {
        Self(map)
    }
}

impl From<HttpHeaders> for HeaderMap {
    fn from(headers: HttpHeaders) -> Self {
        headers.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ACCEPT, ETAG, IF_NONE_MATCH};

    #[test]
    fn get_is_case_insensitive_and_ordered() {
        let mut headers = HttpHeaders::new();
        headers.append(ETAG, HeaderValue::from_static("\"a\""));
        headers.append(ETAG, HeaderValue::from_static("W/\"b\""));
        assert_eq!(Headers::get(&headers, "ETag"), vec!["\"a\"", "W/\"b\""]);
    }

    #[test]
    fn get_skips_opaque_values() {
        let mut headers = HttpHeaders::new();
        headers.append(ETAG, HeaderValue::from_bytes(b"\xfa\xfb").unwrap());
        headers.append(ETAG, HeaderValue::from_static("\"ok\""));
        assert_eq!(Headers::get(&headers, "etag"), vec!["\"ok\""]);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let mut headers = HttpHeaders::new();
        headers.add("bad name", "value");
        headers.add("x-ok", "line\nbreak");
        headers.set("bad name", "value");
        assert!(headers.is_empty());
    }

    #[test]
    fn set_replaces_existing_values() {
        let mut headers = HttpHeaders::new();
        headers.add("Cache-Control", "no-cache");
        headers.add("cache-control", "must-revalidate");
        headers.set("Cache-Control", "max-age=0");
        assert_eq!(Headers::get(&headers, "cache-control"), vec!["max-age=0"]);
    }

    #[test]
    fn merge_keeps_existing_values() {
        let mut headers = HttpHeaders::new();
        headers.append(IF_NONE_MATCH, HeaderValue::from_static("\"a\""));
        let mut other = HeaderMap::new();
        other.append(IF_NONE_MATCH, HeaderValue::from_static("\"b\""));
        other.append(IF_NONE_MATCH, HeaderValue::from_static("\"c\""));
        other.append(ACCEPT, HeaderValue::from_static("*/*"));

        headers.merge(other.into());

        assert_eq!(
            Headers::get(&headers, "if-none-match"),
            vec!["\"a\"", "\"b\"", "\"c\""]
        );
        assert_eq!(Headers::get(&headers, "accept"), vec!["*/*"]);
    }
}
