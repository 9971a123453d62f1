//! `Cache-Control` directive parsing.
//!
//! Parsing is permissive: real-world headers are often non-compliant, so
//! anything that cannot be understood is treated as if the directive were
//! not there. None of the accessors can fail.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use smol_str::SmolStr;
use tracing::debug;

use crate::headers::{CACHE_CONTROL, Headers};
use crate::verb::is_token_char;

/// Largest delta-seconds value kept as-is; bigger values are clamped to it
/// (RFC 7234 section 1.2.1).
pub const MAX_DELTA_SECONDS: u32 = 2_147_483_648;

const NO_STORE: &str = "no-store";
const NO_CACHE: &str = "no-cache";
const MUST_REVALIDATE: &str = "must-revalidate";
const MAX_AGE: &str = "max-age";
const MAX_STALE: &str = "max-stale";
const MIN_FRESH: &str = "min-fresh";
const NO_TRANSFORM: &str = "no-transform";
const ONLY_IF_CACHED: &str = "only-if-cached";

const DELTA_SECONDS_DIRECTIVES: [&str; 3] = [MAX_AGE, MAX_STALE, MIN_FRESH];

/// Value of a `max-stale` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxStale {
    /// `max-stale` without a value: any staleness is acceptable.
    Any,
    /// `max-stale=N`: at most `N` seconds of staleness.
    Seconds(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    name: SmolStr,
    value: Option<SmolStr>,
}

/// Parsed `Cache-Control` directives of one message.
///
/// Directive names are matched case-insensitively. Every header line is
/// split on commas outside quoted strings and the directives are kept in
/// order, so the first occurrence of a repeated directive wins.
///
/// ```
/// use revalidate_core::CacheControl;
///
/// let cc = CacheControl::parse("No-Cache, max-age=\"60\"");
/// assert!(cc.no_cache());
/// assert_eq!(cc.max_age(), Some(60));
/// assert!(cc.forces_revalidation());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    directives: Vec<Directive>,
}

impl CacheControl {
    /// Parses every `Cache-Control` value of `headers`.
    pub fn from_headers<H: Headers>(headers: &H) -> Self {
        Self::from_values(headers.get(CACHE_CONTROL))
    }

    /// Parses a sequence of header values as if they were one
    /// comma-separated list.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let directives = values
            .into_iter()
            .flat_map(split_list)
            .filter_map(parse_directive)
            .collect();
        Self { directives }
    }

    /// Parses a single header value.
    pub fn parse(value: &str) -> Self {
        Self::from_values([value])
    }

    /// Returns `true` when no directive was found.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Iterates over `(name, value)` pairs with lower-cased names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.directives
            .iter()
            .map(|directive| (directive.name.as_str(), directive.value.as_deref()))
    }

    /// Looks a directive up by name.
    ///
    /// The outer `Option` tells whether the directive is present, the inner
    /// one whether it carries a value.
    pub fn directive(&self, name: &str) -> Option<Option<&str>> {
        self.directives
            .iter()
            .find(|directive| directive.name.eq_ignore_ascii_case(name))
            .map(|directive| directive.value.as_deref())
    }

    fn has(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }

    fn delta_seconds(&self, name: &str) -> Option<u32> {
        parse_delta_seconds(self.directive(name)??)
    }

    /// `no-store` is present.
    pub fn no_store(&self) -> bool {
        self.has(NO_STORE)
    }

    /// `no-cache` is present, with or without a field-name list.
    pub fn no_cache(&self) -> bool {
        self.has(NO_CACHE)
    }

    /// `must-revalidate` is present.
    pub fn must_revalidate(&self) -> bool {
        self.has(MUST_REVALIDATE)
    }

    /// Seconds of the first `max-age` directive.
    ///
    /// Absent when the directive is missing or its value is not a plain
    /// non-negative integer. An absent value is never the same as zero.
    pub fn max_age(&self) -> Option<u32> {
        self.delta_seconds(MAX_AGE)
    }

    /// The client insists on the origin confirming the cached entry, either
    /// through `must-revalidate` or `no-cache`.
    pub fn forces_revalidation(&self) -> bool {
        self.must_revalidate() || self.no_cache()
    }

    /// `max-stale`, with or without a limit.
    pub fn max_stale(&self) -> Option<MaxStale> {
        match self.directive(MAX_STALE)? {
            None => Some(MaxStale::Any),
            Some(_) => self.delta_seconds(MAX_STALE).map(MaxStale::Seconds),
        }
    }

    /// Seconds of the first `min-fresh` directive.
    pub fn min_fresh(&self) -> Option<u32> {
        self.delta_seconds(MIN_FRESH)
    }

    /// `no-transform` is present.
    pub fn no_transform(&self) -> bool {
        self.has(NO_TRANSFORM)
    }

    /// `only-if-cached` is present.
    pub fn only_if_cached(&self) -> bool {
        self.has(ONLY_IF_CACHED)
    }
}

// Splits a directive list on commas that are not inside a quoted string.
fn split_list(value: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (index, byte) in value.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_quotes => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                items.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&value[start..]);
    items
}

fn parse_directive(raw: &str) -> Option<Directive> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name.trim(), Some(unquote(value.trim()))),
        None => (raw, None),
    };
    if name.is_empty() {
        return None;
    }
    let name = SmolStr::new(name.to_ascii_lowercase());
    if let Some(value) = &value {
        if DELTA_SECONDS_DIRECTIVES.contains(&name.as_str())
            && parse_delta_seconds(value).is_none()
        {
            debug!(directive = %name, value = %value, "ignoring malformed directive value");
        }
    }
    Some(Directive {
        name,
        value: value.map(SmolStr::new),
    })
}

// Strips a quoted-string and resolves its backslash escapes. An unterminated
// quote runs to the end of the value.
fn unquote(value: &str) -> Cow<'_, str> {
    let Some(inner) = value.strip_prefix('"') else {
        return Cow::Borrowed(value);
    };
    let mut unquoted = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    unquoted.push(next);
                }
            }
            '"' => break,
            other => unquoted.push(other),
        }
    }
    Cow::Owned(unquoted)
}

fn parse_delta_seconds(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    // Digits only, so a failed parse can only mean overflow.
    let seconds = value.parse::<u64>().unwrap_or(u64::MAX);
    Some(seconds.min(u64::from(MAX_DELTA_SECONDS)) as u32)
}

impl FromStr for CacheControl {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, directive) in self.directives.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&directive.name)?;
            match &directive.value {
                None => {}
                Some(value) if !value.is_empty() && value.bytes().all(is_token_char) => {
                    write!(f, "={value}")?;
                }
                Some(value) => {
                    f.write_str("=\"")?;
                    for ch in value.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_char('\\')?;
                        }
                        f.write_char(ch)?;
                    }
                    f.write_char('"')?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_names_are_case_insensitive() {
        let cc = CacheControl::parse("No-Store, MUST-REVALIDATE");
        assert!(cc.no_store());
        assert!(cc.must_revalidate());
        assert!(!cc.no_cache());
    }

    #[test]
    fn tolerates_blank_entries_and_whitespace() {
        let cc = CacheControl::parse(" , no-cache ,, max-age = 10 ,");
        assert!(cc.no_cache());
        assert_eq!(cc.max_age(), Some(10));
        assert_eq!(cc.iter().count(), 2);
    }

    #[test]
    fn malformed_max_age_is_absent() {
        for value in [
            "max-age",
            "max-age=",
            "max-age=abc",
            "max-age=-1",
            "max-age=1.5",
            "max-age=+3",
        ] {
            assert_eq!(CacheControl::parse(value).max_age(), None, "{value}");
        }
    }

    #[test]
    fn max_age_overflow_is_clamped() {
        let cc = CacheControl::parse("max-age=99999999999999999999999");
        assert_eq!(cc.max_age(), Some(MAX_DELTA_SECONDS));
    }

    #[test]
    fn first_max_age_wins() {
        let cc = CacheControl::parse("max-age=0, max-age=60");
        assert_eq!(cc.max_age(), Some(0));
    }

    #[test]
    fn no_cache_with_field_names_counts() {
        let cc = CacheControl::parse("no-cache=\"set-cookie\"");
        assert!(cc.no_cache());
        assert_eq!(cc.directive("no-cache"), Some(Some("set-cookie")));
    }

    #[test]
    fn max_stale_with_and_without_value() {
        assert_eq!(CacheControl::parse("max-stale").max_stale(), Some(MaxStale::Any));
        assert_eq!(
            CacheControl::parse("max-stale=30").max_stale(),
            Some(MaxStale::Seconds(30))
        );
        assert_eq!(CacheControl::parse("max-stale=soon").max_stale(), None);
        assert_eq!(CacheControl::parse("no-cache").max_stale(), None);
    }

    #[test]
    fn commas_inside_quoted_values_do_not_split() {
        let cc = CacheControl::parse("no-cache=\"a,no-store,b\", max-age=5");
        assert!(!cc.no_store());
        assert_eq!(cc.directive("no-cache"), Some(Some("a,no-store,b")));
        assert_eq!(cc.max_age(), Some(5));
        assert_eq!(cc.iter().count(), 2);
    }

    #[test]
    fn quoted_values_resolve_escapes() {
        let cc = CacheControl::parse(r#"ext="say \"hi\", ok", no-store"#);
        assert_eq!(cc.directive("ext"), Some(Some(r#"say "hi", ok"#)));
        assert!(cc.no_store());
    }

    #[test]
    fn unterminated_quote_swallows_the_rest() {
        let cc = CacheControl::parse("no-cache=\"set-cookie, no-store");
        assert!(cc.no_cache());
        assert!(!cc.no_store());
    }

    #[test]
    fn display_requotes_values_that_are_not_tokens() {
        let original = CacheControl::parse(r#"no-cache="a, b", ext="x\"y", max-age=7"#);
        let printed = original.to_string();
        assert_eq!(printed, r#"no-cache="a, b", ext="x\"y", max-age=7"#);
        assert_eq!(CacheControl::parse(&printed), original);
    }

    #[test]
    fn display_is_canonical() {
        let cc: CacheControl = "No-Cache,MAX-AGE=\"5\"".parse().unwrap();
        assert_eq!(cc.to_string(), "no-cache, max-age=5");
    }
}
