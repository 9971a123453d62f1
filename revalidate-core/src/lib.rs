#![warn(missing_docs)]
//! # revalidate-core
//!
//! Request-side HTTP cache participation, independent of any HTTP stack.
//!
//! This crate answers the questions an HTTP client asks before and after
//! consulting its cache, following RFC 7234:
//!
//! - **May** a stored response answer this request? ([`CacheAwareRequest::cacheable`])
//! - **Does** this request invalidate stored responses? ([`CacheAwareRequest::invalidates_cache`])
//! - **Must** a stored response be revalidated first? ([`CacheAwareRequest::skips_cache`])
//! - **How** is the revalidation request built? ([`CacheAwareRequest::conditional_on_changes_to`])
//!
//! Storage, freshness computation and transport are left to the caller.
//!
//! ## Capabilities
//!
//! The crate works against three small traits instead of concrete types:
//!
//! - [`Request`] - verb, URI, headers, body, proxy and version, plus a way to
//!   build a new request from those parts
//! - [`Response`] - headers of a stored response (validator source)
//! - [`Headers`] - ordered, case-insensitive multi-map
//!
//! `revalidate-http` implements them for the `http` crate; [`HeaderList`]
//! is a minimal standalone header type.
//!
//! ## Example
//!
//! ```
//! use revalidate_core::{CacheAwareRequest, HeaderList, Headers, Request, Response, Verb, coerce};
//!
//! #[derive(Debug, Clone)]
//! struct Req {
//!     verb: Verb,
//!     uri: String,
//!     headers: HeaderList,
//! }
//!
//! impl Request for Req {
//!     type Uri = String;
//!     type Headers = HeaderList;
//!     type Body = ();
//!     type Version = ();
//!     type Proxy = String;
//!
//!     fn verb(&self) -> &Verb { &self.verb }
//!     fn uri(&self) -> &String { &self.uri }
//!     fn headers(&self) -> &HeaderList { &self.headers }
//!     fn body(&self) -> &() { &() }
//!     fn proxy(&self) -> Option<&String> { None }
//!     fn version(&self) -> &() { &() }
//!     fn from_parts(
//!         verb: Verb,
//!         uri: String,
//!         headers: HeaderList,
//!         _proxy: Option<String>,
//!         _body: (),
//!         _version: (),
//!     ) -> Self {
//!         Req { verb, uri, headers }
//!     }
//! }
//!
//! struct Cached(HeaderList);
//!
//! impl Response for Cached {
//!     type Headers = HeaderList;
//!     fn headers(&self) -> &HeaderList { &self.0 }
//! }
//!
//! let request = coerce(Req {
//!     verb: Verb::Get,
//!     uri: "/articles/1".into(),
//!     headers: [("Cache-Control", "no-cache")].into_iter().collect(),
//! });
//! assert!(request.cacheable());
//! assert!(request.skips_cache());
//!
//! let cached = Cached([("ETag", "\"v1\"")].into_iter().collect());
//! let conditional: CacheAwareRequest<Req> = request.conditional_on_changes_to(&cached);
//! assert_eq!(conditional.headers().get("if-none-match"), vec!["\"v1\""]);
//! assert_eq!(conditional.headers().get("cache-control"), vec!["max-age=0"]);
//! ```

pub mod cache_aware;
pub mod cache_control;
pub mod config;
pub mod error;
pub mod headers;
pub mod request;
pub mod verb;

pub use cache_aware::{CacheAwareRequest, IntoCacheAware, coerce, coerce_with_rules};
pub use cache_control::{CacheControl, MaxStale};
pub use config::CacheRules;
pub use error::Error;
pub use headers::{HeaderList, Headers};
pub use request::{Request, Response};
pub use verb::Verb;
