//! Error types for camccu-core

use crate::parameter::{Category, Parameter};
use crate::validate::ValidationError;

/// Result type alias for camccu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classes of failure in the packet layer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value cannot be represented by its data type
    EncodingRange,

    /// A serialized packet is malformed
    StructuralValidation,

    /// No encoding is registered for a (category, parameter) pair
    UnsupportedParameter,
}

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Value outside the range its encoding can carry
    #[error("Value out of range for {what}: {detail}")]
    OutOfRange {
        what: &'static str,
        detail: String,
    },

    /// Slice handed to a decoder has the wrong size
    #[error("Payload length mismatch: expected {expected} bytes, got {actual} bytes")]
    PayloadLength {
        expected: usize,
        actual: usize,
    },

    /// String payload is not valid UTF-8
    #[error("String payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Payload too large for a single packet
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Unknown category byte
    #[error("Unknown category: {0}")]
    UnknownCategory(u8),

    /// Parameter id not defined for the category
    #[error("Unknown parameter {id} for category {category}")]
    UnknownParameter {
        category: Category,
        id: u8,
    },

    /// Unknown data type tag
    #[error("Unknown data type tag: {0}")]
    UnknownDataType(u8),

    /// Unknown command id byte
    #[error("Unknown command id: {0}")]
    UnknownCommand(u8),

    /// Unknown operation type byte
    #[error("Unknown operation type: {0}")]
    UnknownOperation(u8),

    /// Parameter has no registered encoding
    #[error("Unsupported parameter: {0} has no registered encoding")]
    UnsupportedParameter(Parameter),

    /// Value's data type does not match the parameter's registered encoding
    #[error("Encoding mismatch for {parameter}: {detail}")]
    EncodingMismatch {
        parameter: Parameter,
        detail: String,
    },

    /// Serialized packet failed validation
    #[error("Invalid packet: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Build an [`Error::OutOfRange`]
    pub fn out_of_range(what: &'static str, detail: impl Into<String>) -> Self {
        Self::OutOfRange {
            what,
            detail: detail.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } | Self::PayloadTooLarge { .. } => ErrorKind::EncodingRange,
            Self::UnsupportedParameter(_) | Self::EncodingMismatch { .. } => {
                ErrorKind::UnsupportedParameter
            }
            Self::PayloadLength { .. }
            | Self::InvalidUtf8(_)
            | Self::UnknownCategory(_)
            | Self::UnknownParameter { .. }
            | Self::UnknownDataType(_)
            | Self::UnknownCommand(_)
            | Self::UnknownOperation(_)
            | Self::Validation(_) => ErrorKind::StructuralValidation,
        }
    }

    /// Check if the error came from an out-of-range value
    pub fn is_encoding_range(&self) -> bool {
        self.kind() == ErrorKind::EncodingRange
    }
}
