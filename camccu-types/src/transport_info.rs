//! Media transport state (preview, play, record)

use std::fmt;

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Transport mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MediaTransportMode {
    #[default]
    Preview = 0,
    Play = 1,
    Record = 2,
}

impl TryFrom<u8> for MediaTransportMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Preview),
            1 => Ok(Self::Play),
            2 => Ok(Self::Record),
            _ => Err(Error::Parse(format!("unknown transport mode {value}"))),
        }
    }
}

impl fmt::Display for MediaTransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preview => "Preview",
            Self::Play => "Play",
            Self::Record => "Record",
        };
        f.write_str(name)
    }
}

/// Storage medium in a slot
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ActiveStorageMedium {
    #[default]
    CFastCard = 0,
    SdCard = 1,
    SsdRecorder = 2,
    Usb = 3,
}

impl TryFrom<u8> for ActiveStorageMedium {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::CFastCard),
            1 => Ok(Self::SdCard),
            2 => Ok(Self::SsdRecorder),
            3 => Ok(Self::Usb),
            _ => Err(Error::Parse(format!("unknown storage medium {value}"))),
        }
    }
}

bitflags! {
    /// Transport flag byte
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct TransportFlags: u8 {
        const LOOP = 0x01;
        const PLAY_ALL = 0x02;
        const DISK3_ACTIVE = 0x10;
        const DISK1_ACTIVE = 0x20;
        const DISK2_ACTIVE = 0x40;
        const TIMELAPSE_RECORDING = 0x80;
    }
}

/// Active flag for each slot, in slot order; the fourth slot has none
pub const SLOT_ACTIVE_MASKS: [TransportFlags; TransportInfo::MAX_SLOTS] = [
    TransportFlags::DISK1_ACTIVE,
    TransportFlags::DISK2_ACTIVE,
    TransportFlags::DISK3_ACTIVE,
    TransportFlags::empty(),
];

/// One media slot
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct TransportSlot {
    pub active: bool,
    pub medium: ActiveStorageMedium,
}

impl TransportSlot {
    pub fn new(active: bool, medium: ActiveStorageMedium) -> Self {
        Self { active, medium }
    }
}

/// Transport state sent to the camera
///
/// Timecode is reported by the camera on its own stream and is not part of
/// this record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportInfo {
    pub mode: MediaTransportMode,
    /// Playback speed, signed
    pub speed: i8,
    pub loop_playback: bool,
    pub play_all: bool,
    pub timelapse_recording: bool,
    pub slots: Vec<TransportSlot>,
}

impl TransportInfo {
    /// Number of slots the flag byte can describe
    pub const MAX_SLOTS: usize = 4;

    pub fn new(mode: MediaTransportMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_slot(mut self, slot: TransportSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Flag byte including slot activity
    pub fn flags(&self) -> TransportFlags {
        let mut flags = TransportFlags::empty();
        flags.set(TransportFlags::LOOP, self.loop_playback);
        flags.set(TransportFlags::PLAY_ALL, self.play_all);
        flags.set(TransportFlags::TIMELAPSE_RECORDING, self.timelapse_recording);

        for (slot, mask) in self.slots.iter().zip(SLOT_ACTIVE_MASKS) {
            if slot.active {
                flags |= mask;
            }
        }
        flags
    }

    pub fn active_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Payload bytes: mode, speed, flags, then one medium per slot
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        if self.slots.len() > Self::MAX_SLOTS {
            return Err(Error::Validation(format!(
                "{} slots, at most {} supported",
                self.slots.len(),
                Self::MAX_SLOTS
            )));
        }

        let mut data = Vec::with_capacity(3 + self.slots.len());
        data.push(self.mode as u8);
        data.push(self.speed as u8);
        data.push(self.flags().bits());
        data.extend(self.slots.iter().map(|slot| slot.medium as u8));
        Ok(data)
    }

    /// Parse a payload produced by [`TransportInfo::to_payload`]
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        let [mode, speed, flags, media @ ..] = bytes else {
            return Err(Error::Parse(format!(
                "transport payload needs at least 3 bytes, got {}",
                bytes.len()
            )));
        };
        if media.len() > Self::MAX_SLOTS {
            return Err(Error::Parse(format!("{} slots in transport payload", media.len())));
        }

        let flags = TransportFlags::from_bits_truncate(*flags);
        let slots = media
            .iter()
            .zip(SLOT_ACTIVE_MASKS)
            .map(|(&medium, mask)| {
                Ok(TransportSlot::new(
                    !mask.is_empty() && flags.contains(mask),
                    ActiveStorageMedium::try_from(medium)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mode: MediaTransportMode::try_from(*mode)?,
            speed: *speed as i8,
            loop_playback: flags.contains(TransportFlags::LOOP),
            play_all: flags.contains(TransportFlags::PLAY_ALL),
            timelapse_recording: flags.contains(TransportFlags::TIMELAPSE_RECORDING),
            slots,
        })
    }
}
