//! Error types for ASTERIX Category 048 decoding and encoding

use thiserror::Error;

/// Result type for Category 048 codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while decoding or encoding a Category 048 data block
///
/// Every variant is terminal for the call that produced it: no partially
/// decoded message and no partially written buffer is ever handed back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before a header, FSPEC octet or field was complete
    #[error("Truncated input: {context} needs {needed} octet(s), {remaining} remaining")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// The buffer ended before an FSPEC octet with a clear FX bit was seen
    #[error("Unterminated FSPEC: input ended after {octets} octet(s) with FX still set")]
    UnterminatedFspec { octets: usize },

    /// The FSPEC marks a field reference number with no catalog entry
    #[error("Unsupported field reference number: {0}")]
    UnsupportedFieldNumber(usize),

    /// A field value cannot be represented on the wire, or a decoded
    /// field carries a structurally impossible value
    #[error("Invalid field value: {0}")]
    InvalidFieldValue(String),

    /// The first octet of the data block is not category 48
    #[error("Unexpected category: {0} (expected 48)")]
    UnexpectedCategory(u8),

    /// The header length disagrees with the octets actually consumed
    #[error("Length mismatch: header declares {declared} octet(s), decoded {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// A mandatory item is absent when encoding
    #[error("Missing mandatory item {item} (FRN {frn})")]
    MissingMandatoryField { frn: usize, item: &'static str },

    /// An extension chain ran past the configured octet limit
    #[error("Extension chain of {item} exceeds {limit} octet(s)")]
    ExtensionOverflow { item: &'static str, limit: usize },

    /// The encoded data block does not fit the 16-bit length field
    #[error("Encoded message of {0} octets exceeds the 65535 octet limit")]
    MessageTooLong(usize),
}

impl CodecError {
    /// Create a new TruncatedInput error
    pub fn truncated(context: &'static str, needed: usize, remaining: usize) -> Self {
        CodecError::TruncatedInput {
            context,
            needed,
            remaining,
        }
    }

    /// Create a new InvalidFieldValue error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        CodecError::InvalidFieldValue(msg.into())
    }

    /// Create a new MissingMandatoryField error
    pub fn missing_mandatory(frn: usize, item: &'static str) -> Self {
        CodecError::MissingMandatoryField { frn, item }
    }

    /// Create a new ExtensionOverflow error
    pub fn extension_overflow(item: &'static str, limit: usize) -> Self {
        CodecError::ExtensionOverflow { item, limit }
    }

    /// Whether the error was caused by running out of input
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            CodecError::TruncatedInput { .. } | CodecError::UnterminatedFspec { .. }
        )
    }
}
