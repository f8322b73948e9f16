//! Slate metadata tags
//!
//! Tags with a "none" state use -1 on the wire, so they are carried as
//! signed bytes.

use crate::error::{Error, Result};

/// Shot type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum SceneTag {
    #[default]
    None = -1,
    WideShot = 0,
    CloseUp = 1,
    MediumShot = 2,
    BigCloseUp = 3,
    MediumCloseUp = 4,
    ExtremeCloseUp = 5,
}

impl SceneTag {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::None => "",
            Self::WideShot => "WS",
            Self::CloseUp => "CU",
            Self::MediumShot => "MS",
            Self::BigCloseUp => "BCU",
            Self::MediumCloseUp => "MCU",
            Self::ExtremeCloseUp => "ECU",
        }
    }
}

impl TryFrom<i8> for SceneTag {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Self::None),
            0 => Ok(Self::WideShot),
            1 => Ok(Self::CloseUp),
            2 => Ok(Self::MediumShot),
            3 => Ok(Self::BigCloseUp),
            4 => Ok(Self::MediumCloseUp),
            5 => Ok(Self::ExtremeCloseUp),
            _ => Err(Error::Parse(format!("unknown scene tag {value}"))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LocationType {
    #[default]
    Exterior = 0,
    Interior = 1,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DayNight {
    Night = 0,
    #[default]
    Day = 1,
}

/// Take annotation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum TakeTag {
    #[default]
    None = -1,
    /// Pick-up
    PickUp = 0,
    /// Visual effects
    Vfx = 1,
    /// Series
    Series = 2,
}

impl TakeTag {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PickUp => "PU",
            Self::Vfx => "VFX",
            Self::Series => "SER",
        }
    }
}

/// What the slate describes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SlateForType {
    #[default]
    NextClip = 0,
    PlaybackFile = 1,
}

/// Scene tags payload
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct SceneTags {
    pub scene: SceneTag,
    pub location: LocationType,
    pub time: DayNight,
}

impl SceneTags {
    pub fn new(scene: SceneTag, location: LocationType, time: DayNight) -> Self {
        Self {
            scene,
            location,
            time,
        }
    }

    /// Payload bytes: scene tag (signed), location, day/night
    pub fn to_payload(&self) -> [u8; 3] {
        [self.scene as i8 as u8, self.location as u8, self.time as u8]
    }
}

/// Take number and annotation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Take {
    pub number: u8,
    pub tag: TakeTag,
}

impl Take {
    pub fn new(number: u8, tag: TakeTag) -> Self {
        Self { number, tag }
    }

    /// Payload bytes: take number, tag (signed)
    pub fn to_payload(&self) -> [u8; 2] {
        [self.number, self.tag as i8 as u8]
    }
}
