//! Recording codec selection

use std::fmt;

use crate::error::{Error, Result};

/// Codec family
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BasicCodec {
    Raw = 0,
    DnxHd = 1,
    ProRes = 2,
    #[default]
    Braw = 3,
}

impl BasicCodec {
    /// Get codec family name
    pub fn name(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::DnxHd => "DNxHD",
            Self::ProRes => "ProRes",
            Self::Braw => "BRAW",
        }
    }

    /// Display names of the family's variants, indexed by variant number
    pub fn variant_names(self) -> &'static [&'static str] {
        match self {
            Self::Raw => &["RAW"],
            Self::DnxHd => &["DNxHD, LL Raw", "DNxHD, Raw 3:1", "DNxHD, Raw 4:1"],
            Self::ProRes => &[
                "ProRes HQ",
                "ProRes 422",
                "ProRes LT",
                "ProRes PXY",
                "ProRes 444",
                "ProRes 444XQ",
            ],
            Self::Braw => &[
                "BRAW Q0", "BRAW Q5", "BRAW 3:1", "BRAW 5:1", "BRAW 8:1", "BRAW 12:1",
                "BRAW 18:1", "BRAW Q1", "BRAW Q3",
            ],
        }
    }
}

impl TryFrom<u8> for BasicCodec {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::DnxHd),
            2 => Ok(Self::ProRes),
            3 => Ok(Self::Braw),
            _ => Err(Error::Parse(format!("unknown basic codec {value}"))),
        }
    }
}

/// Codec variant numbers
pub mod variants {
    pub const DEFAULT: u8 = 0;

    pub const DNXHD_LL_RAW: u8 = 0;
    pub const DNXHD_RAW_3_1: u8 = 1;
    pub const DNXHD_RAW_4_1: u8 = 2;

    pub const PRORES_HQ: u8 = 0;
    pub const PRORES_422: u8 = 1;
    pub const PRORES_LT: u8 = 2;
    pub const PRORES_PROXY: u8 = 3;
    pub const PRORES_444: u8 = 4;
    pub const PRORES_444XQ: u8 = 5;

    pub const BRAW_Q0: u8 = 0;
    pub const BRAW_Q5: u8 = 1;
    pub const BRAW_3_1: u8 = 2;
    pub const BRAW_5_1: u8 = 3;
    pub const BRAW_8_1: u8 = 4;
    pub const BRAW_12_1: u8 = 5;
    pub const BRAW_18_1: u8 = 6;
    pub const BRAW_Q1: u8 = 7;
    pub const BRAW_Q3: u8 = 8;
}

/// Codec family and variant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CodecInfo {
    pub basic_codec: BasicCodec,
    pub codec_variant: u8,
}

impl CodecInfo {
    pub fn new(basic_codec: BasicCodec, codec_variant: u8) -> Self {
        Self {
            basic_codec,
            codec_variant,
        }
    }

    /// Display name of the variant, if the family defines it
    pub fn variant_name(&self) -> Option<&'static str> {
        self.basic_codec
            .variant_names()
            .get(usize::from(self.codec_variant))
            .copied()
    }

    /// Payload bytes: family, variant
    pub fn to_payload(&self) -> [u8; 2] {
        [self.basic_codec as u8, self.codec_variant]
    }

    /// Parse a payload produced by [`CodecInfo::to_payload`]
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        match *bytes {
            [codec, variant] => Ok(Self::new(BasicCodec::try_from(codec)?, variant)),
            _ => Err(Error::Parse(format!(
                "codec payload must be 2 bytes, got {}",
                bytes.len()
            ))),
        }
    }
}

impl fmt::Display for CodecInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{} (variant {})", self.basic_codec.name(), self.codec_variant),
        }
    }
}
