//! Request and response capabilities consumed by the cache logic.
//!
//! The crate never owns an HTTP representation of its own. Instead it works
//! with anything that exposes the parts listed here, and derives new requests
//! through [`Request::with_headers`].

use crate::headers::Headers;
use crate::verb::Verb;

/// An immutable HTTP request.
///
/// # For Implementors
///
/// [`from_parts`](Request::from_parts) must produce a request whose accessors
/// return exactly the parts it was given. Derived requests (for example
/// conditional requests) rely on this to carry the URI, body, proxy and
/// version over unchanged.
///
/// Types carrying state beyond these parts (such as `http` extensions)
/// should override [`with_headers`](Request::with_headers) so derived
/// requests keep it.
pub trait Request: Sized {
    /// Target URI type.
    type Uri: Clone;
    /// Header collection type.
    type Headers: Headers;
    /// Body type.
    type Body: Clone;
    /// Protocol version type.
    type Version: Clone;
    /// Proxy target type.
    type Proxy: Clone;

    /// Request method.
    fn verb(&self) -> &Verb;

    /// Target URI.
    fn uri(&self) -> &Self::Uri;

    /// Request headers.
    fn headers(&self) -> &Self::Headers;

    /// Request body.
    fn body(&self) -> &Self::Body;

    /// Proxy the request is routed through, if any.
    fn proxy(&self) -> Option<&Self::Proxy>;

    /// Protocol version.
    fn version(&self) -> &Self::Version;

    /// Builds a new request from its parts.
    fn from_parts(
        verb: Verb,
        uri: Self::Uri,
        headers: Self::Headers,
        proxy: Option<Self::Proxy>,
        body: Self::Body,
        version: Self::Version,
    ) -> Self;

    /// A copy of this request with `headers` in place of its headers.
    fn with_headers(&self, headers: Self::Headers) -> Self {
        Self::from_parts(
            self.verb().clone(),
            self.uri().clone(),
            headers,
            self.proxy().cloned(),
            self.body().clone(),
            self.version().clone(),
        )
    }
}

/// A previously received response, used as the source of validators.
pub trait Response {
    /// Header collection type.
    type Headers: Headers;

    /// Response headers.
    fn headers(&self) -> &Self::Headers;
}

impl<T: Response> Response for &T {
    type Headers = T::Headers;

    fn headers(&self) -> &Self::Headers {
        T::headers(self)
    }
}
