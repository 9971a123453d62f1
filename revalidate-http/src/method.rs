//! Conversions between [`Verb`] and [`http::Method`].

use http::Method;
use revalidate_core::Verb;
use smol_str::SmolStr;

use crate::Error;

/// Classifies an [`http::Method`].
pub fn to_verb(method: &Method) -> Verb {
    match *method {
        Method::GET => Verb::Get,
        Method::HEAD => Verb::Head,
        Method::POST => Verb::Post,
        Method::PUT => Verb::Put,
        Method::DELETE => Verb::Delete,
        Method::PATCH => Verb::Patch,
        Method::OPTIONS => Verb::Options,
        Method::TRACE => Verb::Trace,
        Method::CONNECT => Verb::Connect,
        _ => Verb::Extension(SmolStr::new(method.as_str())),
    }
}

/// Converts a [`Verb`] back into an [`http::Method`].
///
/// # Errors
///
/// Returns [`Error::InvalidMethod`] for an extension verb that is not a
/// valid method token.
pub fn to_method(verb: &Verb) -> Result<Method, Error> {
    let method = match verb {
        Verb::Get => Method::GET,
        Verb::Head => Method::HEAD,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
        Verb::Patch => Method::PATCH,
        Verb::Options => Method::OPTIONS,
        Verb::Trace => Method::TRACE,
        Verb::Connect => Method::CONNECT,
        Verb::Extension(name) => {
            Method::from_bytes(name.as_bytes()).map_err(|source| Error::InvalidMethod {
                verb: verb.clone(),
                source,
            })?
        }
    };
    Ok(method)
}
