//! Optional packet integrity trailer
//!
//! The SDI/BLE camera link carries no checksum. Links that want one append a
//! 16-bit trailer computed as:
//! 1. Sum the padded packet body as unsigned 16-bit little-endian words
//! 2. When sum > 0xFFFF, subtract 0xFFFF (end-around carry)
//! 3. Take ones-complement: ~sum
//! 4. Append as two little-endian bytes

use std::fmt;

use tracing::trace;

/// Integrity trailer appended after the padded body
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Integrity {
    /// No trailer
    #[default]
    None,
    /// Two-byte ones-complement word sum
    Checksum16,
}

impl Integrity {
    /// Trailer size in bytes
    pub const fn trailer_size(self) -> usize {
        match self {
            Self::None => 0,
            Self::Checksum16 => 2,
        }
    }

    /// Trailer bytes for `body`
    pub fn trailer(self, body: &[u8]) -> Vec<u8> {
        match self {
            Self::None => Vec::new(),
            Self::Checksum16 => calculate(body).to_le_bytes().to_vec(),
        }
    }
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Checksum16 => f.write_str("checksum16"),
        }
    }
}

/// Calculate the 16-bit checksum of a packet body
///
/// # Examples
///
/// ```
/// use camccu_core::checksum;
///
/// let checksum = checksum::calculate(&[255, 4, 0, 0, 1, 3, 0, 0]);
/// println!("Checksum: 0x{:04X}", checksum);
/// ```
pub fn calculate(body: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    for chunk in body.chunks(2) {
        let word = match *chunk {
            [lo, hi] => u32::from(u16::from_le_bytes([lo, hi])),
            // Odd byte is the low byte of the final word
            [lo] => u32::from(lo),
            _ => 0,
        };

        sum += word;
        if sum > 0xFFFF {
            sum -= 0xFFFF;
        }
    }

    let checksum = !(sum as u16);

    trace!(
        body_len = body.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify a checksum against a packet body
pub fn verify(body: &[u8], expected: u16) -> bool {
    calculate(body) == expected
}
