//! Payload value codec
//!
//! Converts typed values to and from their little-endian wire form. Every
//! encoder is pure; decoders reject slices of the wrong size instead of
//! reading past or short of them.

use byteorder::{ByteOrder, LittleEndian};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::constants::MAX_PAYLOAD_SIZE;
use crate::data_type::DataType;
use crate::error::{Error, Result};

fn expect_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::PayloadLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Encode a single byte
pub fn encode_int8(value: u8) -> [u8; 1] {
    [value]
}

/// Encode a signed 16-bit integer
pub fn encode_int16(value: i16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Encode a signed 32-bit integer
pub fn encode_int32(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Decode a single byte
pub fn decode_int8(bytes: &[u8]) -> Result<u8> {
    expect_len(bytes, 1)?;
    Ok(bytes[0])
}

/// Decode a signed 16-bit integer
pub fn decode_int16(bytes: &[u8]) -> Result<i16> {
    expect_len(bytes, 2)?;
    Ok(LittleEndian::read_i16(bytes))
}

/// Decode a signed 32-bit integer
pub fn decode_int32(bytes: &[u8]) -> Result<i32> {
    expect_len(bytes, 4)?;
    Ok(LittleEndian::read_i32(bytes))
}

/// Signed 16-bit fixed-point format
///
/// Values outside the representable range are clamped to the nearest
/// extremum; `NaN` has no sensible clamp target and is rejected.
///
/// ```
/// use camccu_core::codec::FixedPoint;
///
/// assert_eq!(FixedPoint::NORMALISED.encode(0.5).unwrap(), 16384);
/// assert_eq!(FixedPoint::CCU.encode(1.0).unwrap(), 2048);
/// assert_eq!(FixedPoint::NORMALISED.encode(2.0).unwrap(), i16::MAX);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    frac_bits: u32,
}

impl FixedPoint {
    /// Q0.15, covering [-1, 1)
    pub const NORMALISED: Self = Self { frac_bits: 15 };

    /// Q5.11, the camera's own fixed16 format, covering [-16, 16)
    pub const CCU: Self = Self { frac_bits: 11 };

    /// Number of fractional bits
    pub const fn frac_bits(self) -> u32 {
        self.frac_bits
    }

    /// Raw units per 1.0
    pub fn scale(self) -> f64 {
        f64::from(1u32 << self.frac_bits)
    }

    /// Smallest representable value
    pub fn min(self) -> f64 {
        f64::from(i16::MIN) / self.scale()
    }

    /// Largest representable value
    pub fn max(self) -> f64 {
        f64::from(i16::MAX) / self.scale()
    }

    /// Convert to the raw fixed-point integer, rounding to nearest
    pub fn encode(self, value: f64) -> Result<i16> {
        if value.is_nan() {
            return Err(Error::out_of_range("fixed16", "NaN has no fixed-point representation"));
        }

        let scaled = (value * self.scale()).round();
        let clamped = scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX));

        if clamped != scaled {
            trace!(
                value,
                frac_bits = self.frac_bits,
                clamped = clamped as i16,
                "Clamped fixed16 value"
            );
        }

        Ok(clamped as i16)
    }

    /// Convert a raw fixed-point integer back to a real number
    pub fn decode(self, raw: i16) -> f64 {
        f64::from(raw) / self.scale()
    }
}

/// Encode a value in [-1, 1) as normalised fixed16
pub fn encode_fixed16(value: f64) -> Result<[u8; 2]> {
    encode_fixed16_with(FixedPoint::NORMALISED, value)
}

/// Encode a value as fixed16 in the given format
pub fn encode_fixed16_with(format: FixedPoint, value: f64) -> Result<[u8; 2]> {
    Ok(format.encode(value)?.to_le_bytes())
}

/// Decode a normalised fixed16 value
pub fn decode_fixed16(bytes: &[u8]) -> Result<f64> {
    decode_fixed16_with(FixedPoint::NORMALISED, bytes)
}

/// Decode a fixed16 value in the given format
pub fn decode_fixed16_with(format: FixedPoint, bytes: &[u8]) -> Result<f64> {
    Ok(format.decode(decode_int16(bytes)?))
}

/// Encode text as raw UTF-8, without terminator
///
/// Text longer than `max_len` bytes (or than a packet can carry) is an
/// error; it is never truncated.
pub fn encode_string(text: &str, max_len: usize) -> Result<Bytes> {
    let limit = max_len.min(MAX_PAYLOAD_SIZE);
    if text.len() > limit {
        return Err(Error::out_of_range(
            "string",
            format!("{} bytes exceeds the {limit}-byte limit", text.len()),
        ));
    }
    Ok(Bytes::copy_from_slice(text.as_bytes()))
}

/// Decode a UTF-8 string payload
pub fn decode_string(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Fixed-width array element
pub trait Element: Copy {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Append the little-endian encoding
    fn put(self, buf: &mut BytesMut);

    /// Read one element from a slice of exactly `WIDTH` bytes
    fn read(bytes: &[u8]) -> Self;
}

impl Element for u8 {
    const WIDTH: usize = 1;

    fn put(self, buf: &mut BytesMut) {
        buf.put_u8(self);
    }

    fn read(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Element for i8 {
    const WIDTH: usize = 1;

    fn put(self, buf: &mut BytesMut) {
        buf.put_i8(self);
    }

    fn read(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

impl Element for i16 {
    const WIDTH: usize = 2;

    fn put(self, buf: &mut BytesMut) {
        buf.put_i16_le(self);
    }

    fn read(bytes: &[u8]) -> Self {
        LittleEndian::read_i16(bytes)
    }
}

impl Element for i32 {
    const WIDTH: usize = 4;

    fn put(self, buf: &mut BytesMut) {
        buf.put_i32_le(self);
    }

    fn read(bytes: &[u8]) -> Self {
        LittleEndian::read_i32(bytes)
    }
}

/// Encode elements back to back
pub fn encode_array<T: Element>(values: &[T]) -> Bytes {
    let mut buf = BytesMut::with_capacity(values.len() * T::WIDTH);
    for &value in values {
        value.put(&mut buf);
    }
    buf.freeze()
}

/// Decode a packed array
pub fn decode_array<T: Element>(bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.len() % T::WIDTH != 0 {
        return Err(Error::PayloadLength {
            expected: bytes.len() - bytes.len() % T::WIDTH,
            actual: bytes.len(),
        });
    }
    Ok(bytes.chunks_exact(T::WIDTH).map(T::read).collect())
}

/// Typed payload value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Void,
    /// Raw byte; signedness depends on the parameter
    Int8(u8),
    Int16(i16),
    Int32(i32),
    /// Raw fixed-point integer
    Fixed16(i16),
    Utf8String(String),
    Int8Array(Vec<u8>),
    Int16Array(Vec<i16>),
    Int32Array(Vec<i32>),
}

impl Value {
    /// Fixed16 value from a real number
    pub fn fixed16(format: FixedPoint, value: f64) -> Result<Self> {
        Ok(Self::Fixed16(format.encode(value)?))
    }

    /// Data type driving the wire tag
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Void => DataType::Void,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Fixed16(_) => DataType::Fixed16,
            Self::Utf8String(_) => DataType::Utf8String,
            Self::Int8Array(_) => DataType::Int8Array,
            Self::Int16Array(_) => DataType::Int16Array,
            Self::Int32Array(_) => DataType::Int32Array,
        }
    }

    /// Number of elements (bytes for strings)
    pub fn element_count(&self) -> usize {
        match self {
            Self::Void => 0,
            Self::Int8(_) | Self::Int16(_) | Self::Int32(_) | Self::Fixed16(_) => 1,
            Self::Utf8String(s) => s.len(),
            Self::Int8Array(v) => v.len(),
            Self::Int16Array(v) => v.len(),
            Self::Int32Array(v) => v.len(),
        }
    }

    /// Encoded payload size in bytes
    pub fn payload_len(&self) -> usize {
        self.element_count() * self.data_type().element_width()
    }

    /// Encode the payload bytes
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Void => Bytes::new(),
            Self::Int8(v) => Bytes::copy_from_slice(&encode_int8(*v)),
            Self::Int16(v) | Self::Fixed16(v) => Bytes::copy_from_slice(&encode_int16(*v)),
            Self::Int32(v) => Bytes::copy_from_slice(&encode_int32(*v)),
            Self::Utf8String(s) => Bytes::copy_from_slice(s.as_bytes()),
            Self::Int8Array(v) => encode_array(v),
            Self::Int16Array(v) => encode_array(v),
            Self::Int32Array(v) => encode_array(v),
        }
    }

    /// Decode a payload of the given type
    pub fn decode(data_type: DataType, bytes: &[u8]) -> Result<Self> {
        let value = match data_type {
            DataType::Void => {
                expect_len(bytes, 0)?;
                Self::Void
            }
            DataType::Int8 => Self::Int8(decode_int8(bytes)?),
            DataType::Int16 => Self::Int16(decode_int16(bytes)?),
            DataType::Int32 => Self::Int32(decode_int32(bytes)?),
            DataType::Fixed16 => Self::Fixed16(decode_int16(bytes)?),
            DataType::Utf8String => Self::Utf8String(decode_string(bytes)?),
            DataType::Int8Array => Self::Int8Array(decode_array(bytes)?),
            DataType::Int16Array => Self::Int16Array(decode_array(bytes)?),
            DataType::Int32Array => Self::Int32Array(decode_array(bytes)?),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_integers_are_little_endian() {
        assert_eq!(encode_int16(0x0102), [0x02, 0x01]);
        assert_eq!(encode_int32(800), [0x20, 0x03, 0x00, 0x00]);
        assert_eq!(decode_int32(&[0x50, 0x46, 0x00, 0x00]).unwrap(), 18000);
    }

    #[test]
    fn test_decode_wrong_width() {
        assert!(matches!(
            decode_int16(&[1, 2, 3]),
            Err(Error::PayloadLength {
                expected: 2,
                actual: 3
            })
        ));
        assert!(decode_int8(&[]).is_err());
        assert!(decode_array::<i32>(&[0; 6]).is_err());
    }

    #[test]
    fn test_fixed16_clamp() {
        assert_eq!(FixedPoint::NORMALISED.encode(1.0).unwrap(), i16::MAX);
        assert_eq!(FixedPoint::NORMALISED.encode(-1.0).unwrap(), i16::MIN);
        assert_eq!(FixedPoint::NORMALISED.encode(-7.5).unwrap(), i16::MIN);
        assert_eq!(FixedPoint::CCU.encode(f64::INFINITY).unwrap(), i16::MAX);
        assert_eq!(FixedPoint::CCU.encode(f64::NEG_INFINITY).unwrap(), i16::MIN);
    }

    #[test]
    fn test_fixed16_nan_rejected() {
        let err = encode_fixed16(f64::NAN).unwrap_err();
        assert!(err.is_encoding_range());
    }

    #[test]
    fn test_fixed16_ccu_format() {
        assert_eq!(encode_fixed16_with(FixedPoint::CCU, 0.5).unwrap(), [0x00, 0x04]);
        assert_eq!(FixedPoint::CCU.decode(-2048), -1.0);
        assert_eq!(FixedPoint::CCU.max(), 32767.0 / 2048.0);
    }

    #[test]
    fn test_string_limits() {
        assert_eq!(encode_string("A001", 5).unwrap().as_ref(), b"A001");
        let err = encode_string("too long", 5).unwrap_err();
        assert!(err.is_encoding_range());

        let huge = "x".repeat(MAX_PAYLOAD_SIZE + 1);
        assert!(encode_string(&huge, usize::MAX).is_err());
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(matches!(decode_string(&[0xFF, 0xFE]), Err(Error::InvalidUtf8(_))));
    }

    #[test]
    fn test_value_metadata() {
        let wb = Value::Int16Array(vec![5600, 10]);
        assert_eq!(wb.data_type(), DataType::Int16Array);
        assert_eq!(wb.element_count(), 2);
        assert_eq!(wb.payload_len(), 4);
        assert_eq!(wb.encode().as_ref(), &[0xE0, 0x15, 0x0A, 0x00]);

        assert_eq!(Value::Void.encode().len(), 0);
        assert_eq!(Value::fixed16(FixedPoint::CCU, 1.0).unwrap(), Value::Fixed16(2048));
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Void),
            any::<u8>().prop_map(Value::Int8),
            any::<i16>().prop_map(Value::Int16),
            any::<i32>().prop_map(Value::Int32),
            any::<i16>().prop_map(Value::Fixed16),
            "[a-zA-Z0-9 ]{0,20}".prop_map(Value::Utf8String),
            prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Int8Array),
            prop::collection::vec(any::<i16>(), 0..16).prop_map(Value::Int16Array),
            prop::collection::vec(any::<i32>(), 0..8).prop_map(Value::Int32Array),
        ]
    }

    proptest! {
        #[test]
        fn test_value_round_trip(value in value_strategy()) {
            let encoded = value.encode();
            prop_assert_eq!(encoded.len(), value.payload_len());
            let decoded = Value::decode(value.data_type(), &encoded).unwrap();
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn test_fixed16_in_range_round_trip(raw in any::<i16>()) {
            let format = FixedPoint::NORMALISED;
            prop_assert_eq!(format.encode(format.decode(raw)).unwrap(), raw);
        }

        #[test]
        fn test_fixed16_never_wraps(value in -1.0e6f64..1.0e6) {
            let raw = FixedPoint::NORMALISED.encode(value).unwrap();
            if value >= 1.0 {
                prop_assert_eq!(raw, i16::MAX);
            } else if value <= -1.0 {
                prop_assert_eq!(raw, i16::MIN);
            } else {
                prop_assert!((f64::from(raw) / 32768.0 - value).abs() <= 1.0 / 32768.0);
            }
        }
    }
}
