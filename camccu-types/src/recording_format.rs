//! Recording format record

use std::fmt;

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    /// Recording format flag word
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct RecordingFormatFlags: u16 {
        /// File frame rate is an M-rate (x1000/1001)
        const FILE_M_RATE = 0x01;
        /// Sensor frame rate is an M-rate
        const SENSOR_M_RATE = 0x02;
        /// Off-speed frame rate in use
        const SENSOR_OFF_SPEED = 0x04;
        const INTERLACED = 0x08;
        /// Windowed sensor mode
        const WINDOWED_MODE = 0x10;
    }
}

/// Frame rates and frame size the camera records at
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RecordingFormatData {
    pub frame_rate: i16,
    pub off_speed_frame_rate: i16,
    pub width: i16,
    pub height: i16,
    pub flags: RecordingFormatFlags,
}

impl RecordingFormatData {
    /// Number of int16 elements in the payload
    pub const PAYLOAD_LEN: usize = 5;

    pub fn new(frame_rate: i16, width: i16, height: i16) -> Self {
        Self {
            frame_rate,
            off_speed_frame_rate: frame_rate,
            width,
            height,
            flags: RecordingFormatFlags::empty(),
        }
    }

    pub fn with_off_speed(mut self, off_speed_frame_rate: i16) -> Self {
        self.off_speed_frame_rate = off_speed_frame_rate;
        self.flags |= RecordingFormatFlags::SENSOR_OFF_SPEED;
        self
    }

    pub fn with_flags(mut self, flags: RecordingFormatFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Positional payload: frame rate, off-speed rate, width, height, flags
    pub fn to_payload(&self) -> [i16; Self::PAYLOAD_LEN] {
        [
            self.frame_rate,
            self.off_speed_frame_rate,
            self.width,
            self.height,
            self.flags.bits() as i16,
        ]
    }

    /// Parse a positional payload
    pub fn from_payload(values: &[i16]) -> Result<Self> {
        let [frame_rate, off_speed_frame_rate, width, height, flags] = *values else {
            return Err(Error::Parse(format!(
                "recording format needs {} values, got {}",
                Self::PAYLOAD_LEN,
                values.len()
            )));
        };

        Ok(Self {
            frame_rate,
            off_speed_frame_rate,
            width,
            height,
            flags: RecordingFormatFlags::from_bits_truncate(flags as u16),
        })
    }

    /// Frame rate for display, accounting for M-rates (23.98, 29.97, ...)
    pub fn effective_frame_rate(&self) -> f64 {
        let rate = f64::from(self.frame_rate);
        if self.flags.contains(RecordingFormatFlags::FILE_M_RATE) {
            rate * 1000.0 / 1001.0
        } else {
            rate
        }
    }
}

impl fmt::Display for RecordingFormatData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ {:.2}fps",
            self.width,
            self.height,
            self.effective_frame_rate()
        )?;
        if self.flags.contains(RecordingFormatFlags::SENSOR_OFF_SPEED) {
            write!(f, " (off-speed {}fps)", self.off_speed_frame_rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_order() {
        let format = RecordingFormatData::new(24, 3840, 2160)
            .with_off_speed(60)
            .with_flags(RecordingFormatFlags::FILE_M_RATE);

        assert_eq!(format.to_payload(), [24, 60, 3840, 2160, 0x05]);
        assert_eq!(RecordingFormatData::from_payload(&format.to_payload()).unwrap(), format);
    }

    #[test]
    fn test_from_payload_wrong_length() {
        assert!(RecordingFormatData::from_payload(&[24, 24, 1920]).is_err());
    }

    #[test]
    fn test_display() {
        let format = RecordingFormatData::new(30, 1920, 1080).with_flags(RecordingFormatFlags::FILE_M_RATE);
        assert_eq!(format.to_string(), "1920x1080 @ 29.97fps");
    }
}
