//! Payload data types and per-parameter encodings

use std::fmt;

use crate::error::{Error, Result};

/// Payload data type
///
/// Arrays share the wire tag of their element type; the element count is
/// carried by the packet's command length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// No payload (one-shot triggers)
    Void,
    /// Single byte
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 16-bit fixed-point value
    Fixed16,
    /// UTF-8 text without terminator
    Utf8String,
    /// Packed bytes
    Int8Array,
    /// Packed signed 16-bit integers
    Int16Array,
    /// Packed signed 32-bit integers
    Int32Array,
}

impl DataType {
    /// Wire tag of the void/boolean type
    pub const TAG_VOID: u8 = 0;
    /// Wire tag of 8-bit integers
    pub const TAG_INT8: u8 = 1;
    /// Wire tag of 16-bit integers
    pub const TAG_INT16: u8 = 2;
    /// Wire tag of 32-bit integers
    pub const TAG_INT32: u8 = 3;
    /// Wire tag of 64-bit integers (defined by the protocol, not produced here)
    pub const TAG_INT64: u8 = 4;
    /// Wire tag of strings
    pub const TAG_STRING: u8 = 5;
    /// Wire tag of 5.11 fixed-point values
    pub const TAG_FIXED16: u8 = 128;

    /// Tag byte written into the packet header
    pub const fn wire_tag(self) -> u8 {
        match self {
            Self::Void => Self::TAG_VOID,
            Self::Int8 | Self::Int8Array => Self::TAG_INT8,
            Self::Int16 | Self::Int16Array => Self::TAG_INT16,
            Self::Int32 | Self::Int32Array => Self::TAG_INT32,
            Self::Utf8String => Self::TAG_STRING,
            Self::Fixed16 => Self::TAG_FIXED16,
        }
    }

    /// Width of one element in bytes (0 for void)
    pub const fn element_width(self) -> usize {
        match self {
            Self::Void => 0,
            Self::Int8 | Self::Int8Array | Self::Utf8String => 1,
            Self::Int16 | Self::Int16Array | Self::Fixed16 => 2,
            Self::Int32 | Self::Int32Array => 4,
        }
    }

    /// Check if the type carries a variable number of elements
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Self::Int8Array | Self::Int16Array | Self::Int32Array | Self::Utf8String
        )
    }

    /// Scalar type for a wire tag
    ///
    /// Tags the protocol defines but this crate never emits (64-bit) are
    /// reported as unknown.
    pub fn from_wire_tag(tag: u8) -> Result<Self> {
        match tag {
            Self::TAG_VOID => Ok(Self::Void),
            Self::TAG_INT8 => Ok(Self::Int8),
            Self::TAG_INT16 => Ok(Self::Int16),
            Self::TAG_INT32 => Ok(Self::Int32),
            Self::TAG_STRING => Ok(Self::Utf8String),
            Self::TAG_FIXED16 => Ok(Self::Fixed16),
            _ => Err(Error::UnknownDataType(tag)),
        }
    }

    /// Type name
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Fixed16 => "fixed16",
            Self::Utf8String => "string",
            Self::Int8Array => "int8[]",
            Self::Int16Array => "int16[]",
            Self::Int32Array => "int32[]",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of elements a parameter accepts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` elements
    Exactly(usize),
    /// Between `min` and `max` elements inclusive
    Between(usize, usize),
    /// Up to `max` bytes (strings)
    Bytes(usize),
}

impl Arity {
    /// Check whether `count` elements are allowed
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::Between(min, max) => (min..=max).contains(&count),
            Self::Bytes(max) => count <= max,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::Between(min, max) => write!(f, "{min}..={max}"),
            Self::Bytes(max) => write!(f, "at most {max} bytes"),
        }
    }
}

/// Registered encoding of a parameter
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParameterEncoding {
    /// Payload type
    pub data_type: DataType,
    /// Allowed element count
    pub arity: Arity,
}

impl ParameterEncoding {
    /// Zero-length trigger
    pub const fn void() -> Self {
        Self {
            data_type: DataType::Void,
            arity: Arity::Exactly(0),
        }
    }

    /// Single scalar value
    pub const fn scalar(data_type: DataType) -> Self {
        Self {
            data_type,
            arity: Arity::Exactly(1),
        }
    }

    /// Fixed-size array
    pub const fn array(data_type: DataType, len: usize) -> Self {
        Self {
            data_type,
            arity: Arity::Exactly(len),
        }
    }

    /// Array with a bounded element count
    pub const fn array_between(data_type: DataType, min: usize, max: usize) -> Self {
        Self {
            data_type,
            arity: Arity::Between(min, max),
        }
    }

    /// UTF-8 string of at most `max` bytes
    pub const fn string(max: usize) -> Self {
        Self {
            data_type: DataType::Utf8String,
            arity: Arity::Bytes(max),
        }
    }

    /// Check whether a payload of `len` bytes fits this encoding
    pub fn accepts_payload_len(self, len: usize) -> bool {
        match self.data_type.element_width() {
            0 => len == 0,
            width if len % width != 0 => false,
            width => self.arity.accepts(len / width),
        }
    }
}
