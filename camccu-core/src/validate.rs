//! Structural validation of serialized packets
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. total size within bounds (plus trailer)
//! 2. category known
//! 3. parameter known and registered, data type tag matches the registry,
//!    command id and operation known
//! 4. command length consistent with the actual size, payload length
//!    accepted by the registered arity, padding zeroed
//! 5. integrity trailer, when one is configured

use std::ops::Range;

use tracing::debug;

use crate::{
    checksum::{self, Integrity},
    command::{CommandId, OperationType},
    constants::{
        offsets, padded_len, COMMAND_HEADER_SIZE, HEADER_SIZE, MAX_PACKET_SIZE, MIN_PACKET_SIZE,
    },
    data_type::DataType,
    parameter::{Category, Parameter},
};

/// Reason a serialized packet was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("packet too short: {actual} bytes")]
    TooShort { actual: usize },

    #[error("packet too long: {actual} bytes (max: {max} bytes)")]
    TooLong { actual: usize, max: usize },

    #[error("unknown category {0}")]
    UnknownCategory(u8),

    #[error("unknown parameter {id} in category {category}")]
    UnknownParameter { category: Category, id: u8 },

    #[error("{0} has no registered encoding")]
    UnsupportedParameter(Parameter),

    #[error("data type tag {actual} does not match {expected} registered for {parameter}")]
    DataTypeMismatch {
        parameter: Parameter,
        expected: DataType,
        actual: u8,
    },

    #[error("unknown command id {0}")]
    UnknownCommand(u8),

    #[error("unknown operation {0}")]
    UnknownOperation(u8),

    #[error("command length {0} is shorter than the command header")]
    CommandLengthTooShort(u8),

    #[error("size mismatch: command length implies {expected} bytes, got {actual} bytes")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("{payload_len}-byte payload does not fit the encoding of {parameter}")]
    PayloadArity {
        parameter: Parameter,
        payload_len: usize,
    },

    #[error("non-zero padding byte")]
    NonZeroPadding,

    #[error("checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch { expected: u16, received: u16 },
}

/// Header fields of a packet that passed validation
#[derive(Debug, Clone)]
pub(crate) struct ValidatedHeader {
    pub destination: u8,
    pub command: CommandId,
    pub parameter: Parameter,
    pub operation: OperationType,
    pub data_type: DataType,
    pub payload: Range<usize>,
}

/// Validate a packet serialized without trailer
pub fn validate(bytes: &[u8]) -> bool {
    validate_with(bytes, Integrity::None)
}

/// Validate a packet serialized with the given trailer
pub fn validate_with(bytes: &[u8], integrity: Integrity) -> bool {
    check(bytes, integrity).is_ok()
}

/// Validate, reporting the first failed check
pub fn check(bytes: &[u8], integrity: Integrity) -> Result<(), ValidationError> {
    inspect(bytes, integrity).map(|_| ())
}

pub(crate) fn inspect(
    bytes: &[u8],
    integrity: Integrity,
) -> Result<ValidatedHeader, ValidationError> {
    let result = run_checks(bytes, integrity);

    if let Err(ref reason) = result {
        debug!(
            len = bytes.len(),
            integrity = %integrity,
            bytes = %hex::encode(bytes),
            reason = %reason,
            "Packet failed validation"
        );
    }

    result
}

fn run_checks(bytes: &[u8], integrity: Integrity) -> Result<ValidatedHeader, ValidationError> {
    let trailer_size = integrity.trailer_size();

    if bytes.len() < MIN_PACKET_SIZE + trailer_size {
        return Err(ValidationError::TooShort {
            actual: bytes.len(),
        });
    }
    if bytes.len() > MAX_PACKET_SIZE + trailer_size {
        return Err(ValidationError::TooLong {
            actual: bytes.len(),
            max: MAX_PACKET_SIZE + trailer_size,
        });
    }

    let (body, trailer) = bytes.split_at(bytes.len() - trailer_size);

    let category_raw = body[offsets::CATEGORY];
    let category = Category::try_from(category_raw)
        .map_err(|_| ValidationError::UnknownCategory(category_raw))?;

    let id = body[offsets::PARAMETER];
    let parameter = Parameter::from_raw(category, id)
        .map_err(|_| ValidationError::UnknownParameter { category, id })?;
    let encoding = parameter
        .encoding()
        .ok_or(ValidationError::UnsupportedParameter(parameter))?;

    let tag = body[offsets::DATA_TYPE];
    if tag != encoding.data_type.wire_tag() {
        return Err(ValidationError::DataTypeMismatch {
            parameter,
            expected: encoding.data_type,
            actual: tag,
        });
    }

    let command_raw = body[offsets::COMMAND_ID];
    let command = CommandId::try_from(command_raw)
        .map_err(|_| ValidationError::UnknownCommand(command_raw))?;
    let operation_raw = body[offsets::OPERATION];
    let operation = OperationType::try_from(operation_raw)
        .map_err(|_| ValidationError::UnknownOperation(operation_raw))?;

    let command_length = body[offsets::COMMAND_LENGTH];
    if usize::from(command_length) < COMMAND_HEADER_SIZE {
        return Err(ValidationError::CommandLengthTooShort(command_length));
    }

    let unpadded = HEADER_SIZE - COMMAND_HEADER_SIZE + usize::from(command_length);
    let expected = padded_len(unpadded);
    if body.len() != expected {
        return Err(ValidationError::SizeMismatch {
            expected,
            actual: body.len(),
        });
    }

    let payload_len = unpadded - HEADER_SIZE;
    if !encoding.accepts_payload_len(payload_len) {
        return Err(ValidationError::PayloadArity {
            parameter,
            payload_len,
        });
    }

    if body[unpadded..].iter().any(|&b| b != 0) {
        return Err(ValidationError::NonZeroPadding);
    }

    if let [lo, hi] = *trailer {
        let received = u16::from_le_bytes([lo, hi]);
        let expected = checksum::calculate(body);
        if expected != received {
            return Err(ValidationError::ChecksumMismatch { expected, received });
        }
    }

    Ok(ValidatedHeader {
        destination: body[offsets::DESTINATION],
        command,
        parameter,
        operation,
        data_type: encoding.data_type,
        payload: HEADER_SIZE..unpadded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;
    use crate::packet::Packet;
    use crate::parameter::{ConfigurationParameter, MediaParameter, VideoParameter};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn iso_800() -> Vec<u8> {
        vec![255, 8, 0, 0, 1, 14, 3, 0, 0x20, 0x03, 0x00, 0x00]
    }

    #[test]
    fn test_valid_packet() {
        assert!(validate(&iso_800()));
        assert_eq!(check(&[255, 4, 0, 0, 1, 3, 0, 0], Integrity::None), Ok(()));
    }

    #[test]
    fn test_size_bounds() {
        assert_eq!(
            check(&[255, 4, 0], Integrity::None),
            Err(ValidationError::TooShort { actual: 3 })
        );
        assert!(matches!(
            check(&[0; 68], Integrity::None),
            Err(ValidationError::TooLong { actual: 68, .. })
        ));
    }

    #[test]
    fn test_unknown_category_and_parameter() {
        let mut bytes = iso_800();
        bytes[4] = 99;
        assert_eq!(
            check(&bytes, Integrity::None),
            Err(ValidationError::UnknownCategory(99))
        );

        let mut bytes = iso_800();
        bytes[5] = 16;
        assert!(matches!(
            check(&bytes, Integrity::None),
            Err(ValidationError::UnknownParameter { id: 16, .. })
        ));
    }

    #[test]
    fn test_unsupported_parameter() {
        // Configuration.Location
        let bytes = [255, 4, 0, 0, 7, 3, 0, 0];
        assert_eq!(
            check(&bytes, Integrity::None),
            Err(ValidationError::UnsupportedParameter(
                ConfigurationParameter::Location.into()
            ))
        );
    }

    #[test]
    fn test_data_type_mismatch() {
        let mut bytes = iso_800();
        bytes[6] = DataType::TAG_INT16;
        assert!(matches!(
            check(&bytes, Integrity::None),
            Err(ValidationError::DataTypeMismatch { actual: 2, .. })
        ));
    }

    #[test]
    fn test_corrupted_length() {
        let mut bytes = iso_800();
        bytes[1] = 40;
        assert_eq!(
            check(&bytes, Integrity::None),
            Err(ValidationError::SizeMismatch {
                expected: 44,
                actual: 12
            })
        );

        bytes[1] = 2;
        assert_eq!(
            check(&bytes, Integrity::None),
            Err(ValidationError::CommandLengthTooShort(2))
        );
    }

    #[test]
    fn test_payload_arity() {
        // ISO declared with a 3-byte payload: same padded size, wrong arity
        let mut bytes = iso_800();
        bytes[1] = 7;
        bytes[11] = 0;
        assert!(matches!(
            check(&bytes, Integrity::None),
            Err(ValidationError::PayloadArity { payload_len: 3, .. })
        ));
    }

    #[test]
    fn test_non_zero_padding() {
        let packet = Packet::new(
            MediaParameter::Codec.into(),
            crate::command::OperationType::Assign,
            Value::Int8Array(vec![3, 0]),
        )
        .unwrap();
        let mut bytes = packet.serialize().to_vec();
        assert!(validate(&bytes));

        bytes[11] = 0xAA;
        assert_eq!(
            check(&bytes, Integrity::None),
            Err(ValidationError::NonZeroPadding)
        );
    }

    #[test]
    fn test_checksum_trailer() {
        let packet = Packet::void(VideoParameter::RestoreAutoWB.into()).unwrap();
        let mut bytes = packet.serialize_with(Integrity::Checksum16).to_vec();

        assert!(validate_with(&bytes, Integrity::Checksum16));
        assert!(!validate(&bytes));

        bytes[9] ^= 0xFF;
        assert!(matches!(
            check(&bytes, Integrity::Checksum16),
            Err(ValidationError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let bytes = iso_800();
        let copy = bytes.clone();
        let _ = validate(&bytes);
        assert_eq!(bytes, copy);
    }

    proptest! {
        #[test]
        fn test_truncation_is_rejected(
            values in prop::collection::vec(any::<i32>(), 2),
            cut in 1usize..12,
        ) {
            let packet = Packet::new(
                ConfigurationParameter::SystemClock.into(),
                crate::command::OperationType::Assign,
                Value::Int32Array(values),
            )
            .unwrap();
            let bytes = packet.serialize();
            prop_assert!(validate(&bytes));
            prop_assert!(!validate(&bytes[..bytes.len() - cut]));
        }

        #[test]
        fn test_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..80)) {
            let _ = validate(&bytes);
            let _ = validate_with(&bytes, Integrity::Checksum16);
        }
    }
}
