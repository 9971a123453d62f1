#![warn(missing_docs)]
//! # revalidate-http
//!
//! [`http`] crate integration for `revalidate-core`.
//!
//! - [`HttpRequest`] - an [`http::Request`] implementing the `Request`
//!   capability, convertible back for dispatch
//! - [`HttpResponse`] - a stored [`http::Response`] used as validator source
//! - [`HttpHeaders`] - [`http::HeaderMap`] as a `Headers` capability
//!
//! ```
//! use revalidate_http::{HttpResponse, cache_aware};
//!
//! let request = http::Request::get("https://example.com/feed")
//!     .header("cache-control", "must-revalidate")
//!     .body(())
//!     .unwrap();
//! let request = cache_aware(request);
//! assert!(request.cacheable());
//! assert!(request.skips_cache());
//!
//! let cached = HttpResponse::from(
//!     http::Response::builder()
//!         .header("etag", "\"v7\"")
//!         .body(())
//!         .unwrap(),
//! );
//! let revalidation = request
//!     .conditional_on_changes_to(&cached)
//!     .into_inner()
//!     .into_request()
//!     .unwrap();
//! assert_eq!(revalidation.headers()["if-none-match"], "\"v7\"");
//! assert_eq!(revalidation.headers()["cache-control"], "max-age=0");
//! ```

pub mod error;
mod headers;
pub mod method;
mod request;
mod response;

pub use error::Error;
pub use headers::HttpHeaders;
pub use request::{HttpRequest, ProxyTarget};
pub use response::HttpResponse;

use revalidate_core::{CacheAwareRequest, coerce};

/// A cache-aware [`HttpRequest`].
pub type CacheAwareHttpRequest<B> = CacheAwareRequest<HttpRequest<B>>;

/// Makes an [`http::Request`] cache-aware with the default rules.
pub fn cache_aware<B>(request: http::Request<B>) -> CacheAwareHttpRequest<B>
where
    B: Clone,
{
    coerce(HttpRequest::from_request(request))
}
