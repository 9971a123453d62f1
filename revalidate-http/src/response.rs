use http::{StatusCode, Version};
use revalidate_core::Response;

use crate::HttpHeaders;

/// A stored HTTP response, used as the validator source for conditional
/// requests.
#[derive(Debug, Clone)]
pub struct HttpResponse<B> {
    status: StatusCode,
    version: Version,
    headers: HttpHeaders,
    body: B,
}

impl<B> HttpResponse<B> {
    /// Wraps an [`http::Response`].
    pub fn from_response(response: http::Response<B>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers.into(),
            body,
        }
    }

    /// Converts back into an [`http::Response`].
    pub fn into_response(self) -> http::Response<B> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.version_mut() = self.version;
        *response.headers_mut() = self.headers.into_inner();
        response
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Protocol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Response body.
    pub fn body(&self) -> &B {
        &self.body
    }
}

impl<B> From<http::Response<B>> for HttpResponse<B> {
    fn from(response: http::Response<B>) -> Self {
        Self::from_response(response)
    }
}

impl<B> Response for HttpResponse<B> {
    type Headers = HttpHeaders;

    fn headers(&self) -> &HttpHeaders {
        &self.headers
    }
}
