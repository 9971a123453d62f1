//! Error types.

use thiserror::Error;

/// Errors raised at the edges of the cache decision logic.
///
/// Classifying requests and building conditional requests never fails;
/// only parsing user-supplied input (method names, rule files) does.
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a valid HTTP method token.
    #[error("invalid HTTP method: {0:?}")]
    InvalidVerb(String),
    /// Cache rules could not be deserialized.
    #[error("invalid cache rules")]
    Config(#[from] serde_saphyr::Error),
}
