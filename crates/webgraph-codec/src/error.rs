//! Codec error types.

use thiserror::Error;

/// Caller-contract violations raised by the codec.
///
/// Records that merely lack a mandatory field are not errors; encoding them
/// yields [`crate::Encoded::Refused`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// No record was handed to encode
    #[error("Cannot encode a missing record")]
    MissingRecord,

    /// No document was handed to decode
    #[error("Cannot decode a missing document")]
    MissingDocument,

    /// Document has no discriminator field
    #[error("Document has no TYPE field")]
    MissingDiscriminator,

    /// Discriminator names a kind the codec does not know
    #[error("Unknown record kind: {0}")]
    UnknownKind(String),

    /// Creation rule with neither an LRU nor a pattern
    #[error("Invalid web entity creation rule: {0}")]
    InvalidCreationRule(String),
}
