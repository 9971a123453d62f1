//! Error types for converting back into `http` types.

use revalidate_core::Verb;
use thiserror::Error;

/// Error returned when a request cannot be turned into an [`http::Request`].
#[derive(Debug, Error)]
pub enum Error {
    /// The verb is not accepted by [`http::Method`].
    #[error("method {verb} cannot be sent: {source}")]
    InvalidMethod {
        /// The rejected verb.
        verb: Verb,
        /// Underlying `http` error.
        #[source]
        source: http::method::InvalidMethod,
    },
}
