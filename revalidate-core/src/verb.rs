//! HTTP request methods as seen by cache decision logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

use crate::error::Error;

/// An HTTP request method.
///
/// The standard methods of RFC 7231 (plus `PATCH`) get their own variants;
/// anything else that is a valid method token is kept as
/// [`Extension`](Verb::Extension). Methods are case-sensitive, so `get`
/// is an extension method and not [`Get`](Verb::Get).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `CONNECT`
    Connect,
    /// Any other method token.
    Extension(SmolStr),
}

impl Verb {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Connect => "CONNECT",
            Verb::Extension(name) => name.as_str(),
        }
    }
}

// tchar from RFC 7230 section 3.2.6
pub(crate) fn is_token_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte)
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = match s {
            "GET" => Verb::Get,
            "HEAD" => Verb::Head,
            "POST" => Verb::Post,
            "PUT" => Verb::Put,
            "DELETE" => Verb::Delete,
            "PATCH" => Verb::Patch,
            "OPTIONS" => Verb::Options,
            "TRACE" => Verb::Trace,
            "CONNECT" => Verb::Connect,
            other if !other.is_empty() && other.bytes().all(is_token_char) => {
                Verb::Extension(SmolStr::new(other))
            }
            other => return Err(Error::InvalidVerb(other.to_owned())),
        };
        Ok(verb)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = SmolStr::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_methods() {
        assert_eq!("GET".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("PATCH".parse::<Verb>().unwrap(), Verb::Patch);
        assert_eq!("CONNECT".parse::<Verb>().unwrap(), Verb::Connect);
    }

    #[test]
    fn methods_are_case_sensitive() {
        assert_eq!(
            "get".parse::<Verb>().unwrap(),
            Verb::Extension(SmolStr::new("get"))
        );
    }

    #[test]
    fn keeps_extension_methods() {
        let verb: Verb = "PURGE".parse().unwrap();
        assert_eq!(verb, Verb::Extension(SmolStr::new("PURGE")));
        assert_eq!(verb.to_string(), "PURGE");
    }

    #[test]
    fn rejects_invalid_tokens() {
        assert!(matches!("".parse::<Verb>(), Err(Error::InvalidVerb(_))));
        assert!(matches!("GE T".parse::<Verb>(), Err(Error::InvalidVerb(_))));
        assert!(matches!("GET(".parse::<Verb>(), Err(Error::InvalidVerb(_))));
    }
}
