use thiserror::Error;

/// Errors raised while building, decoding or verifying a proof.
///
/// A proof that simply does not match its root is not an error, verification
/// reports it as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encoded bytes or constructor arguments do not describe a valid proof.
    #[error("malformed proof: {field}: {reason}")]
    MalformedProof {
        /// Field being read or checked.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The named hash algorithm has no available implementation.
    #[error("unsupported hash algorithm: {0:?}")]
    UnsupportedAlgorithm(String),
}

impl Error {
    pub(crate) fn malformed<R: Into<String>>(field: &'static str, reason: R) -> Error {
        Error::MalformedProof {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
