use http::{Extensions, Uri, Version};
use revalidate_core::{Request, Verb};

use crate::method::{to_method, to_verb};
use crate::{Error, HttpHeaders};

/// Proxy target of a request, carried in [`http::Extensions`] when the
/// request is converted to and from [`http::Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget(pub Uri);

/// An HTTP request implementing the [`Request`] capability.
///
/// Built from an [`http::Request`]; the verb is classified once on entry
/// and only converted back into an [`http::Method`] by
/// [`into_request`](Self::into_request).
#[derive(Debug, Clone)]
pub struct HttpRequest<B> {
    verb: Verb,
    uri: Uri,
    version: Version,
    headers: HttpHeaders,
    proxy: Option<Uri>,
    extensions: Extensions,
    body: B,
}

impl<B> HttpRequest<B> {
    /// Wraps an [`http::Request`], taking the proxy from a [`ProxyTarget`]
    /// extension if present.
    pub fn from_request(request: http::Request<B>) -> Self {
        let (mut parts, body) = request.into_parts();
        let proxy = parts
            .extensions
            .remove::<ProxyTarget>()
            .map(|ProxyTarget(uri)| uri);
        Self {
            verb: to_verb(&parts.method),
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers.into(),
            proxy,
            extensions: parts.extensions,
            body,
        }
    }

    /// Routes the request through `proxy`.
    pub fn with_proxy(mut self, proxy: Uri) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Request extensions other than the proxy target.
    ///
    /// Conditional requests inherit a clone of these. Requests built
    /// through [`Request::from_parts`] start without extensions.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Converts back into an [`http::Request`], storing the proxy as a
    /// [`ProxyTarget`] extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] if the verb is an extension method
    /// that `http` does not accept.
    pub fn into_request(self) -> Result<http::Request<B>, Error> {
        let method = to_method(&self.verb)?;
        let mut request = http::Request::new(self.body);
        *request.method_mut() = method;
        *request.uri_mut() = self.uri;
        *request.version_mut() = self.version;
        *request.headers_mut() = self.headers.into_inner();
        *request.extensions_mut() = self.extensions;
        if let Some(proxy) = self.proxy {
            request.extensions_mut().insert(ProxyTarget(proxy));
        }
        Ok(request)
    }
}

impl<B> From<http::Request<B>> for HttpRequest<B> {
    fn from(request: http::Request<B>) -> Self {
        Self::from_request(request)
    }
}

impl<B> Request for HttpRequest<B>
where
    B: Clone,
{
    type Uri = Uri;
    type Headers = HttpHeaders;
    type Body = B;
    type Version = Version;
    type Proxy = Uri;

    fn verb(&self) -> &Verb {
        &self.verb
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    fn body(&self) -> &B {
        &self.body
    }

    fn proxy(&self) -> Option<&Uri> {
        self.proxy.as_ref()
    }

    fn version(&self) -> &Version {
        &self.version
    }

    fn from_parts(
        verb: Verb,
        uri: Uri,
        headers: HttpHeaders,
        proxy: Option<Uri>,
        body: B,
        version: Version,
    ) -> Self {
        Self {
            verb,
            uri,
            version,
            headers,
            proxy,
            extensions: Extensions::new(),
            body,
        }
    }

    fn with_headers(&self, headers: HttpHeaders) -> Self {
        Self {
            verb: self.verb.clone(),
            uri: self.uri.clone(),
            version: self.version,
            headers,
            proxy: self.proxy.clone(),
            extensions: self.extensions.clone(),
            body: self.body.clone(),
        }
    }
}
