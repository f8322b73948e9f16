//! Protocol constants

/// Destination byte addressing every camera on the link
pub const BROADCAST_DESTINATION: u8 = 255;

/// Packet header size: 4-byte transport header plus 4-byte command header
pub const HEADER_SIZE: usize = 8;

/// Command header size, counted by the command length field
pub const COMMAND_HEADER_SIZE: usize = 4;

/// Smallest valid packet (header only)
pub const MIN_PACKET_SIZE: usize = HEADER_SIZE;

/// Largest valid packet, excluding an integrity trailer
pub const MAX_PACKET_SIZE: usize = 64;

/// Largest payload that fits a packet
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - HEADER_SIZE;

/// Packet bodies are padded to a multiple of this
pub const PACKET_ALIGNMENT: usize = 4;

/// Header byte offsets
pub mod offsets {
    pub const DESTINATION: usize = 0;
    pub const COMMAND_LENGTH: usize = 1;
    pub const COMMAND_ID: usize = 2;
    pub const RESERVED: usize = 3;
    pub const CATEGORY: usize = 4;
    pub const PARAMETER: usize = 5;
    pub const DATA_TYPE: usize = 6;
    pub const OPERATION: usize = 7;
}

/// Round `len` up to the packet alignment
pub const fn padded_len(len: usize) -> usize {
    len.div_ceil(PACKET_ALIGNMENT) * PACKET_ALIGNMENT
}
