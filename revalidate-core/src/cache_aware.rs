//! Cache-aware request wrapper.
//!
//! [`CacheAwareRequest`] decorates any [`Request`] with the questions a
//! client-side cache asks before touching its store:
//!
//! - may a stored response be used at all ([`cacheable`])
//! - does this request make stored responses for its target obsolete
//!   ([`invalidates_cache`])
//! - must a stored response be confirmed by the origin before use
//!   ([`skips_cache`])
//!
//! and builds the conditional request used for that confirmation
//! ([`conditional_on_changes_to`]).
//!
//! Wrappers are only created through [`coerce`] (or [`coerce_with_rules`]),
//! which hands an already wrapped request back untouched so that its
//! memoized state survives.
//!
//! [`cacheable`]: CacheAwareRequest::cacheable
//! [`invalidates_cache`]: CacheAwareRequest::invalidates_cache
//! [`skips_cache`]: CacheAwareRequest::skips_cache
//! [`conditional_on_changes_to`]: CacheAwareRequest::conditional_on_changes_to

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::cache_control::CacheControl;
use crate::config::CacheRules;
use crate::headers::{
    CACHE_CONTROL, ETAG, Headers, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use crate::request::{Request, Response};

/// A request decorated with cache participation logic.
///
/// Dereferences to the wrapped request, so every accessor of `R` stays
/// available. The wrapped request is never modified; derived requests are
/// new values.
#[derive(Debug, Clone)]
pub struct CacheAwareRequest<R> {
    request: R,
    rules: Arc<CacheRules>,
    cache_control: OnceLock<CacheControl>,
    sent_at: Option<DateTime<Utc>>,
}

impl<R> CacheAwareRequest<R>
where
    R: Request,
{
    fn new(request: R, rules: Arc<CacheRules>) -> Self {
        Self {
            request,
            rules,
            cache_control: OnceLock::new(),
            sent_at: None,
        }
    }

    /// Parsed `Cache-Control` of the wrapped request, computed on first use.
    pub fn cache_control(&self) -> &CacheControl {
        self.cache_control
            .get_or_init(|| CacheControl::from_headers(self.request.headers()))
    }

    /// Rules used to classify this request.
    pub fn rules(&self) -> &CacheRules {
        &self.rules
    }

    /// The wrapped request.
    pub fn request(&self) -> &R {
        &self.request
    }

    /// Unwraps the request, dropping cache bookkeeping.
    pub fn into_inner(self) -> R {
        self.request
    }

    /// A stored response may answer this request.
    ///
    /// Only safe methods qualify, and `no-store` overrides the method.
    pub fn cacheable(&self) -> bool {
        self.rules.is_cacheable_method(self.request.verb()) && !self.cache_control().no_store()
    }

    /// Stored responses for the target must be dropped.
    ///
    /// Holds for every state-changing method, and for any method carrying
    /// `no-store`.
    pub fn invalidates_cache(&self) -> bool {
        self.rules.is_invalidating_method(self.request.verb()) || self.cache_control().no_store()
    }

    /// A stored response, even a fresh one, must not be served without
    /// contacting the origin.
    ///
    /// True for `max-age=0`, `must-revalidate` and `no-cache`. A request
    /// without `max-age` does not skip the cache on that account.
    pub fn skips_cache(&self) -> bool {
        let cache_control = self.cache_control();
        cache_control.max_age() == Some(0)
            || cache_control.must_revalidate()
            || cache_control.no_cache()
    }

    /// Builds the request that revalidates `cached` against the origin.
    ///
    /// The result keeps this request's verb, URI, body, proxy and version.
    /// Its headers are this request's headers plus one `If-None-Match` per
    /// `ETag` and one `If-Modified-Since` per `Last-Modified` of `cached`.
    /// When this request forces revalidation (`no-cache` or
    /// `must-revalidate`), its `Cache-Control` is replaced by
    /// `max-age=<revalidation_max_age>` so intermediaries forward it.
    ///
    /// A response without validators yields an unconditional copy.
    pub fn conditional_on_changes_to<C>(&self, cached: &C) -> CacheAwareRequest<R>
    where
        C: Response + ?Sized,
    {
        let cached_headers = cached.headers();
        let etags = cached_headers.get(ETAG);
        let last_modified = cached_headers.get(LAST_MODIFIED);

        let mut validators = R::Headers::default();
        for etag in &etags {
            validators.add(IF_NONE_MATCH, etag);
        }
        for date in &last_modified {
            validators.add(IF_MODIFIED_SINCE, date);
        }

        let mut headers = self.request.headers().clone();
        headers.merge(validators);

        let forces_revalidation = self.cache_control().forces_revalidation();
        if forces_revalidation {
            let max_age = format!("max-age={}", self.rules.revalidation_max_age);
            headers.set(CACHE_CONTROL, &max_age);
        }

        debug!(
            verb = %self.request.verb(),
            etags = etags.len(),
            last_modified = last_modified.len(),
            forces_revalidation,
            "built conditional request"
        );

        coerce_with_rules(self.request.with_headers(headers), Arc::clone(&self.rules))
    }
}

impl<R> CacheAwareRequest<R> {
    /// When the request was dispatched, if recorded.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    /// Records the dispatch time.
    ///
    /// Meant to be called once, right after the transport sends the
    /// request. Nothing enforces that; a later call overwrites the value.
    pub fn set_sent_at(&mut self, at: DateTime<Utc>) {
        self.sent_at = Some(at);
    }

    /// Records the current time as the dispatch time and returns it.
    pub fn mark_sent(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.sent_at = Some(now);
        now
    }

    /// Time between dispatch and `now`, if the request was sent.
    pub fn elapsed_since_sent(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.sent_at.map(|sent_at| now - sent_at)
    }
}

impl<R> Deref for CacheAwareRequest<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.request
    }
}

impl<R> AsRef<R> for CacheAwareRequest<R> {
    fn as_ref(&self) -> &R {
        &self.request
    }
}

/// Conversion into a [`CacheAwareRequest`].
///
/// Implemented for every [`Request`], which gets wrapped, and for
/// [`CacheAwareRequest`] itself, which is returned as is. Use [`coerce`]
/// rather than calling this directly.
pub trait IntoCacheAware {
    /// The underlying request type.
    type Request: Request;

    /// Wraps `self` using `rules`, or returns it unchanged if it is already
    /// cache-aware (its own rules are kept in that case).
    fn into_cache_aware(self, rules: Arc<CacheRules>) -> CacheAwareRequest<Self::Request>;
}

impl<R> IntoCacheAware for R
where
    R: Request,
{
    type Request = R;

    fn into_cache_aware(self, rules: Arc<CacheRules>) -> CacheAwareRequest<R> {
        trace!(verb = %self.verb(), "wrapping request");
        CacheAwareRequest::new(self, rules)
    }
}

impl<R> IntoCacheAware for CacheAwareRequest<R>
where
    R: Request,
{
    type Request = R;

    fn into_cache_aware(self, _rules: Arc<CacheRules>) -> CacheAwareRequest<R> {
        trace!(verb = %self.request.verb(), "request already cache-aware");
        self
    }
}

/// Makes `raw` cache-aware using the default [`CacheRules`].
///
/// Idempotent: an already cache-aware request comes back unchanged, with
/// its parsed `Cache-Control` and `sent_at` intact.
pub fn coerce<T>(raw: T) -> CacheAwareRequest<T::Request>
where
    T: IntoCacheAware,
{
    raw.into_cache_aware(CacheRules::shared_default())
}

/// Like [`coerce`], but wraps plain requests with custom rules.
pub fn coerce_with_rules<T>(raw: T, rules: Arc<CacheRules>) -> CacheAwareRequest<T::Request>
where
    T: IntoCacheAware,
{
    raw.into_cache_aware(rules)
}
