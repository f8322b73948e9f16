//! Camera control packet structure and serialization

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::debug;

use crate::{
    checksum::Integrity,
    codec::Value,
    command::{CommandId, OperationType},
    constants::{padded_len, BROADCAST_DESTINATION, COMMAND_HEADER_SIZE, HEADER_SIZE, MAX_PAYLOAD_SIZE},
    data_type::DataType,
    error::{Error, Result},
    parameter::{Category, Parameter},
    validate,
};

/// Camera control command packet
///
/// # Packet Structure
///
/// ```text
/// ┌─────────────┬────────────┬────────────┬──────────┬──────────┬───────────┬───────────┬───────────┬─────────┬─────────┐
/// │ Destination │ Cmd length │ Command id │ Reserved │ Category │ Parameter │ Data type │ Operation │ Payload │ Padding │
/// │   1 byte    │   1 byte   │   1 byte   │  1 byte  │  1 byte  │  1 byte   │  1 byte   │  1 byte   │ N bytes │ to 4    │
/// └─────────────┴────────────┴────────────┴──────────┴──────────┴───────────┴───────────┴───────────┴─────────┴─────────┘
/// ```
///
/// The command length counts the four command header bytes plus the
/// payload. Multi-byte payload values are little-endian.
///
/// A `Packet` can only be built through [`Packet::new`] (or
/// [`Packet::parse`]), which checks the value against the parameter's
/// registered encoding, so every packet in hand serializes to valid bytes.
///
/// # Examples
///
/// ```
/// use camccu_core::{Packet, Value, OperationType, VideoParameter};
///
/// let packet = Packet::new(VideoParameter::ISO.into(), OperationType::Assign, Value::Int32(800)).unwrap();
/// let bytes = packet.serialize();
///
/// assert_eq!(bytes.as_ref(), &[255, 8, 0, 0, 1, 14, 3, 0, 0x20, 0x03, 0, 0]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    destination: u8,
    command: CommandId,
    parameter: Parameter,
    operation: OperationType,
    data_type: DataType,
    payload: Bytes,
}

impl Packet {
    /// Build a packet, checking the value against the registry
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedParameter`] if the parameter has no encoding
    /// - [`Error::EncodingMismatch`] if the value's type does not match the
    ///   encoding
    /// - [`Error::PayloadTooLarge`] if the payload exceeds 56 bytes
    /// - [`Error::OutOfRange`] if the element count is outside the arity
    pub fn new(parameter: Parameter, operation: OperationType, value: Value) -> Result<Self> {
        let encoding = parameter.require_encoding()?;

        if value.data_type() != encoding.data_type {
            return Err(Error::EncodingMismatch {
                parameter,
                detail: format!("expected {}, got {}", encoding.data_type, value.data_type()),
            });
        }

        let payload = value.encode();
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        if !encoding.arity.accepts(value.element_count()) {
            return Err(Error::out_of_range(
                "element count",
                format!(
                    "{parameter} takes {}, got {}",
                    encoding.arity,
                    value.element_count()
                ),
            ));
        }

        let packet = Self {
            destination: BROADCAST_DESTINATION,
            command: CommandId::ChangeConfiguration,
            parameter,
            operation,
            data_type: encoding.data_type,
            payload,
        };

        debug!(packet = %packet, "Built packet");

        Ok(packet)
    }

    /// Build a payload-less trigger packet
    pub fn void(parameter: Parameter) -> Result<Self> {
        Self::new(parameter, OperationType::Assign, Value::Void)
    }

    /// Parse serialized bytes back into a packet
    ///
    /// Runs the full validator first, so anything it accepts parses.
    pub fn parse(bytes: &[u8], integrity: Integrity) -> Result<Self> {
        let header = validate::inspect(bytes, integrity)?;

        Ok(Self {
            destination: header.destination,
            command: header.command,
            parameter: header.parameter,
            operation: header.operation,
            data_type: header.data_type,
            payload: Bytes::copy_from_slice(&bytes[header.payload]),
        })
    }

    /// Address the packet to a single camera
    pub fn with_destination(mut self, destination: u8) -> Self {
        self.destination = destination;
        self
    }

    /// Destination camera (255 = broadcast)
    pub fn destination(&self) -> u8 {
        self.destination
    }

    /// Command id
    pub fn command(&self) -> CommandId {
        self.command
    }

    /// Addressed parameter
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Category of the addressed parameter
    pub fn category(&self) -> Category {
        self.parameter.category()
    }

    /// Operation type
    pub fn operation(&self) -> OperationType {
        self.operation
    }

    /// Payload data type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Encoded payload, without padding
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Decode the payload back into a typed value
    pub fn value(&self) -> Result<Value> {
        Value::decode(self.data_type, &self.payload)
    }

    /// Command length header field
    pub fn command_length(&self) -> u8 {
        // payload is bounded by MAX_PAYLOAD_SIZE, so this fits
        (COMMAND_HEADER_SIZE + self.payload.len()) as u8
    }

    /// Serialized size without trailer
    pub fn wire_size(&self) -> usize {
        padded_len(HEADER_SIZE + self.payload.len())
    }

    /// Serialized size with the given trailer
    pub fn wire_size_with(&self, integrity: Integrity) -> usize {
        self.wire_size() + integrity.trailer_size()
    }

    /// Serialize to wire bytes without trailer
    pub fn serialize(&self) -> Bytes {
        self.serialize_with(Integrity::None)
    }

    /// Serialize to wire bytes, appending the given trailer
    pub fn serialize_with(&self, integrity: Integrity) -> Bytes {
        let body_size = self.wire_size();
        let mut buf = BytesMut::with_capacity(body_size + integrity.trailer_size());

        buf.put_u8(self.destination);
        buf.put_u8(self.command_length());
        buf.put_u8(self.command.into());
        buf.put_u8(0);
        buf.put_u8(self.category().into());
        buf.put_u8(self.parameter.id());
        buf.put_u8(self.data_type.wire_tag());
        buf.put_u8(self.operation.into());

        buf.put_slice(&self.payload);
        buf.put_bytes(0, body_size - buf.len());

        let trailer = integrity.trailer(&buf);
        buf.put_slice(&trailer);

        buf.freeze()
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("destination", &format!("0x{:02X}", self.destination))
            .field("command", &self.command)
            .field("parameter", &self.parameter)
            .field("operation", &self.operation)
            .field("data_type", &self.data_type)
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet[{}](dest={}, op={}, type={}, payload={})",
            self.parameter,
            self.destination,
            self.operation,
            self.data_type,
            hex::encode(&self.payload)
        )
    }
}
