//! Command categories and parameters
//!
//! Every camera setting is addressed by a (category, parameter) pair. The
//! [`Parameter`] sum type makes an invalid pair unrepresentable, and
//! [`Parameter::encoding`] is the registry of payload encodings: a pair
//! without an entry cannot be turned into a packet.

use std::fmt;

use crate::data_type::{DataType, ParameterEncoding};
use crate::error::{Error, Result};

/// Command category
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    Lens = 0,
    Video = 1,
    Audio = 2,
    Output = 3,
    Display = 4,
    Tally = 5,
    Reference = 6,
    Configuration = 7,
    ColorCorrection = 8,
    Status = 9,
    Media = 10,
    ExternalDeviceControl = 11,
    Metadata = 12,
}

impl Category {
    /// Every category, in id order
    pub const ALL: [Category; 13] = [
        Self::Lens,
        Self::Video,
        Self::Audio,
        Self::Output,
        Self::Display,
        Self::Tally,
        Self::Reference,
        Self::Configuration,
        Self::ColorCorrection,
        Self::Status,
        Self::Media,
        Self::ExternalDeviceControl,
        Self::Metadata,
    ];

    /// Get category name
    pub fn name(self) -> &'static str {
        match self {
            Self::Lens => "Lens",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Output => "Output",
            Self::Display => "Display",
            Self::Tally => "Tally",
            Self::Reference => "Reference",
            Self::Configuration => "Configuration",
            Self::ColorCorrection => "ColorCorrection",
            Self::Status => "Status",
            Self::Media => "Media",
            Self::ExternalDeviceControl => "ExternalDeviceControl",
            Self::Metadata => "Metadata",
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> u8 {
        category as u8
    }
}

impl TryFrom<u8> for Category {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(Error::UnknownCategory(value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

macro_rules! parameter_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $variant = $value, )+
        }

        impl $name {
            /// Every parameter of the category, in id order
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Get parameter name
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            /// Look up a parameter by id
            pub fn from_id(id: u8) -> Option<Self> {
                match id {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for u8 {
            fn from(parameter: $name) -> u8 {
                parameter as u8
            }
        }
    };
}

parameter_enum! {
    /// Lens parameters
    LensParameter {
        Focus = 0,
        AutoFocus = 1,
        ApertureFstop = 2,
        ApertureNormalised = 3,
        ApertureOrdinal = 4,
        AutoAperture = 5,
        ImageStabilisation = 6,
        Zoom = 7,
        ZoomNormalised = 8,
        ContinuousZoom = 9,
    }
}

parameter_enum! {
    /// Video parameters
    VideoParameter {
        Mode = 0,
        SensorGain = 1,
        ManualWB = 2,
        SetAutoWB = 3,
        RestoreAutoWB = 4,
        Exposure = 5,
        ExposureOrdinal = 6,
        DynamicRange = 7,
        SharpeningLevel = 8,
        RecordingFormat = 9,
        AutoExposureMode = 10,
        ShutterAngle = 11,
        ShutterSpeed = 12,
        Gain = 13,
        ISO = 14,
        DisplayLUT = 15,
    }
}

parameter_enum! {
    /// Audio parameters
    AudioParameter {
        MicLevel = 0,
        HeadphoneLevel = 1,
        HeadphoneProgramMix = 2,
        SpeakerLevel = 3,
        InputType = 4,
        InputLevels = 5,
        PhantomPower = 6,
    }
}

parameter_enum! {
    /// Output parameters
    OutputParameter {
        OverlayEnables = 0,
        FrameGuideStyle = 1,
        FrameGuideOpacity = 2,
        Overlays = 3,
    }
}

parameter_enum! {
    /// Display parameters
    DisplayParameter {
        Brightness = 0,
        Overlays = 1,
        ZebraLevel = 2,
        PeakingLevel = 3,
        ColourBars = 4,
        FocusAssist = 5,
    }
}

parameter_enum! {
    /// Tally parameters
    TallyParameter {
        Brightness = 0,
        FrontBrightness = 1,
        RearBrightness = 2,
    }
}

parameter_enum! {
    /// Reference parameters
    ReferenceParameter {
        Source = 0,
        Offset = 1,
    }
}

parameter_enum! {
    /// Configuration parameters
    ConfigurationParameter {
        SystemClock = 0,
        Language = 1,
        Timezone = 2,
        Location = 3,
    }
}

parameter_enum! {
    /// Color correction parameters
    ColorCorrectionParameter {
        LiftAdjust = 0,
        GammaAdjust = 1,
        GainAdjust = 2,
        OffsetAdjust = 3,
        ContrastAdjust = 4,
        LumaContribution = 5,
        ColourAdjust = 6,
        ResetDefault = 7,
    }
}

parameter_enum! {
    /// Status parameters
    StatusParameter {
        Battery = 0,
        MediaStatus = 1,
        RemainingRecordTime = 2,
        DisplayThresholds = 3,
        DisplayTimecode = 4,
        CameraSpec = 5,
        SwitcherStatus = 6,
        DisplayParameters = 7,
    }
}

parameter_enum! {
    /// Media parameters
    MediaParameter {
        Codec = 0,
        TransportMode = 1,
    }
}

parameter_enum! {
    /// External device control parameters
    ExternalDeviceControlParameter {
        PanTiltVelocity = 0,
    }
}

parameter_enum! {
    /// Metadata (slate) parameters
    MetadataParameter {
        Reel = 0,
        SceneTags = 1,
        Scene = 2,
        Take = 3,
        GoodTake = 4,
        CameraId = 5,
        CameraOperator = 6,
        Director = 7,
        ProjectName = 8,
        LensType = 9,
        LensIris = 10,
        LensFocalLength = 11,
        LensDistance = 12,
        LensFilter = 13,
        SlateForType = 14,
        SlateForName = 15,
    }
}

/// A parameter together with its category
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    Lens(LensParameter),
    Video(VideoParameter),
    Audio(AudioParameter),
    Output(OutputParameter),
    Display(DisplayParameter),
    Tally(TallyParameter),
    Reference(ReferenceParameter),
    Configuration(ConfigurationParameter),
    ColorCorrection(ColorCorrectionParameter),
    Status(StatusParameter),
    Media(MediaParameter),
    ExternalDeviceControl(ExternalDeviceControlParameter),
    Metadata(MetadataParameter),
}

impl Parameter {
    /// Category the parameter belongs to
    pub fn category(self) -> Category {
        match self {
            Self::Lens(_) => Category::Lens,
            Self::Video(_) => Category::Video,
            Self::Audio(_) => Category::Audio,
            Self::Output(_) => Category::Output,
            Self::Display(_) => Category::Display,
            Self::Tally(_) => Category::Tally,
            Self::Reference(_) => Category::Reference,
            Self::Configuration(_) => Category::Configuration,
            Self::ColorCorrection(_) => Category::ColorCorrection,
            Self::Status(_) => Category::Status,
            Self::Media(_) => Category::Media,
            Self::ExternalDeviceControl(_) => Category::ExternalDeviceControl,
            Self::Metadata(_) => Category::Metadata,
        }
    }

    /// Parameter id within its category
    pub fn id(self) -> u8 {
        match self {
            Self::Lens(p) => p.into(),
            Self::Video(p) => p.into(),
            Self::Audio(p) => p.into(),
            Self::Output(p) => p.into(),
            Self::Display(p) => p.into(),
            Self::Tally(p) => p.into(),
            Self::Reference(p) => p.into(),
            Self::Configuration(p) => p.into(),
            Self::ColorCorrection(p) => p.into(),
            Self::Status(p) => p.into(),
            Self::Media(p) => p.into(),
            Self::ExternalDeviceControl(p) => p.into(),
            Self::Metadata(p) => p.into(),
        }
    }

    /// Get parameter name
    pub fn name(self) -> &'static str {
        match self {
            Self::Lens(p) => p.name(),
            Self::Video(p) => p.name(),
            Self::Audio(p) => p.name(),
            Self::Output(p) => p.name(),
            Self::Display(p) => p.name(),
            Self::Tally(p) => p.name(),
            Self::Reference(p) => p.name(),
            Self::Configuration(p) => p.name(),
            Self::ColorCorrection(p) => p.name(),
            Self::Status(p) => p.name(),
            Self::Media(p) => p.name(),
            Self::ExternalDeviceControl(p) => p.name(),
            Self::Metadata(p) => p.name(),
        }
    }

    /// Resolve a raw parameter id within a category
    pub fn from_raw(category: Category, id: u8) -> Result<Self> {
        let parameter = match category {
            Category::Lens => LensParameter::from_id(id).map(Self::Lens),
            Category::Video => VideoParameter::from_id(id).map(Self::Video),
            Category::Audio => AudioParameter::from_id(id).map(Self::Audio),
            Category::Output => OutputParameter::from_id(id).map(Self::Output),
            Category::Display => DisplayParameter::from_id(id).map(Self::Display),
            Category::Tally => TallyParameter::from_id(id).map(Self::Tally),
            Category::Reference => ReferenceParameter::from_id(id).map(Self::Reference),
            Category::Configuration => {
                ConfigurationParameter::from_id(id).map(Self::Configuration)
            }
            Category::ColorCorrection => {
                ColorCorrectionParameter::from_id(id).map(Self::ColorCorrection)
            }
            Category::Status => StatusParameter::from_id(id).map(Self::Status),
            Category::Media => MediaParameter::from_id(id).map(Self::Media),
            Category::ExternalDeviceControl => {
                ExternalDeviceControlParameter::from_id(id).map(Self::ExternalDeviceControl)
            }
            Category::Metadata => MetadataParameter::from_id(id).map(Self::Metadata),
        };

        parameter.ok_or(Error::UnknownParameter { category, id })
    }

    /// Registered payload encoding, `None` if the parameter is unsupported
    pub fn encoding(self) -> Option<ParameterEncoding> {
        use DataType::*;

        let encoding = match self {
            Self::Lens(p) => match p {
                LensParameter::Focus
                | LensParameter::ApertureFstop
                | LensParameter::ApertureNormalised
                | LensParameter::ZoomNormalised
                | LensParameter::ContinuousZoom => ParameterEncoding::scalar(Fixed16),
                LensParameter::AutoFocus | LensParameter::AutoAperture => {
                    ParameterEncoding::void()
                }
                LensParameter::ApertureOrdinal | LensParameter::Zoom => {
                    ParameterEncoding::scalar(Int16)
                }
                LensParameter::ImageStabilisation => ParameterEncoding::scalar(Int8),
            },
            Self::Video(p) => match p {
                VideoParameter::Mode => ParameterEncoding::array(Int8Array, 5),
                VideoParameter::SensorGain
                | VideoParameter::DynamicRange
                | VideoParameter::SharpeningLevel
                | VideoParameter::AutoExposureMode
                | VideoParameter::Gain => ParameterEncoding::scalar(Int8),
                VideoParameter::ManualWB => ParameterEncoding::array(Int16Array, 2),
                VideoParameter::SetAutoWB | VideoParameter::RestoreAutoWB => {
                    ParameterEncoding::void()
                }
                VideoParameter::Exposure
                | VideoParameter::ShutterAngle
                | VideoParameter::ShutterSpeed
                | VideoParameter::ISO => ParameterEncoding::scalar(Int32),
                VideoParameter::ExposureOrdinal => ParameterEncoding::scalar(Int16),
                VideoParameter::RecordingFormat => ParameterEncoding::array(Int16Array, 5),
                VideoParameter::DisplayLUT => ParameterEncoding::array(Int8Array, 2),
            },
            Self::Configuration(p) => match p {
                ConfigurationParameter::SystemClock => ParameterEncoding::array(Int32Array, 2),
                ConfigurationParameter::Language => ParameterEncoding::string(2),
                ConfigurationParameter::Timezone => ParameterEncoding::scalar(Int32),
                // Two int64 coordinates, no 64-bit encoding
                ConfigurationParameter::Location => return None,
            },
            Self::Media(p) => match p {
                MediaParameter::Codec => ParameterEncoding::array(Int8Array, 2),
                // mode, speed, flags, then one storage medium per slot
                MediaParameter::TransportMode => ParameterEncoding::array_between(Int8Array, 3, 7),
            },
            Self::Metadata(p) => match p {
                MetadataParameter::Reel => ParameterEncoding::scalar(Int16),
                MetadataParameter::SceneTags => ParameterEncoding::array(Int8Array, 3),
                MetadataParameter::Take => ParameterEncoding::array(Int8Array, 2),
                MetadataParameter::GoodTake | MetadataParameter::SlateForType => {
                    ParameterEncoding::scalar(Int8)
                }
                MetadataParameter::Scene => ParameterEncoding::string(5),
                MetadataParameter::CameraId => ParameterEncoding::string(1),
                MetadataParameter::CameraOperator
                | MetadataParameter::Director
                | MetadataParameter::ProjectName => ParameterEncoding::string(29),
                MetadataParameter::LensType => ParameterEncoding::string(56),
                MetadataParameter::LensIris => ParameterEncoding::string(20),
                MetadataParameter::LensFocalLength | MetadataParameter::LensFilter => {
                    ParameterEncoding::string(30)
                }
                MetadataParameter::LensDistance => ParameterEncoding::string(50),
                MetadataParameter::SlateForName => {
                    ParameterEncoding::string(crate::constants::MAX_PAYLOAD_SIZE)
                }
            },
            Self::Audio(_)
            | Self::Output(_)
            | Self::Display(_)
            | Self::Tally(_)
            | Self::Reference(_)
            | Self::ColorCorrection(_)
            | Self::Status(_)
            | Self::ExternalDeviceControl(_) => return None,
        };

        Some(encoding)
    }

    /// Registered encoding or [`Error::UnsupportedParameter`]
    pub fn require_encoding(self) -> Result<ParameterEncoding> {
        self.encoding().ok_or(Error::UnsupportedParameter(self))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({}.{})", self.category().name(), self.name(), self.category() as u8, self.id())
    }
}

macro_rules! impl_from_parameter {
    ($( $variant:ident($ty:ty) ),+ $(,)?) => {
        $(
            impl From<$ty> for Parameter {
                fn from(parameter: $ty) -> Self {
                    Self::$variant(parameter)
                }
            }
        )+
    };
}

impl_from_parameter!(
    Lens(LensParameter),
    Video(VideoParameter),
    Audio(AudioParameter),
    Output(OutputParameter),
    Display(DisplayParameter),
    Tally(TallyParameter),
    Reference(ReferenceParameter),
    Configuration(ConfigurationParameter),
    ColorCorrection(ColorCorrectionParameter),
    Status(StatusParameter),
    Media(MediaParameter),
    ExternalDeviceControl(ExternalDeviceControlParameter),
    Metadata(MetadataParameter),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_conversion() {
        assert_eq!(u8::from(Category::Media), 10);
        assert_eq!(Category::try_from(12).unwrap(), Category::Metadata);
        assert!(matches!(Category::try_from(13), Err(Error::UnknownCategory(13))));
        assert!(Category::try_from(255).is_err());
    }

    #[test]
    fn test_category_ids_are_positional() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(usize::from(u8::from(*category)), index);
        }
    }

    #[test]
    fn test_parameter_addressing() {
        let iso = Parameter::Video(VideoParameter::ISO);
        assert_eq!(iso.category(), Category::Video);
        assert_eq!(iso.id(), 14);
        assert_eq!(Parameter::from_raw(Category::Video, 14).unwrap(), iso);
        assert_eq!(iso.to_string(), "Video.ISO(1.14)");
    }

    #[test]
    fn test_unknown_parameter() {
        let result = Parameter::from_raw(Category::Media, 2);
        assert!(matches!(
            result,
            Err(Error::UnknownParameter {
                category: Category::Media,
                id: 2
            })
        ));
    }

    #[test]
    fn test_from_raw_covers_every_parameter() {
        for category in Category::ALL {
            let mut id = 0u8;
            while let Ok(parameter) = Parameter::from_raw(category, id) {
                assert_eq!(parameter.category(), category);
                assert_eq!(parameter.id(), id);
                id += 1;
            }
            assert!(id > 0, "{category} has no parameters");
        }
    }

    #[test]
    fn test_registry_entries() {
        let wb = Parameter::from(VideoParameter::ManualWB).encoding().unwrap();
        assert_eq!(wb.data_type, DataType::Int16Array);
        assert!(wb.accepts_payload_len(4));

        let auto_wb = Parameter::from(VideoParameter::SetAutoWB).encoding().unwrap();
        assert_eq!(auto_wb, ParameterEncoding::void());

        let gain = Parameter::from(VideoParameter::SensorGain).encoding().unwrap();
        assert_eq!(gain.data_type, DataType::Int8);
    }

    #[test]
    fn test_unregistered_parameter() {
        let location = Parameter::from(ConfigurationParameter::Location);
        assert!(location.encoding().is_none());
        assert!(matches!(
            location.require_encoding(),
            Err(Error::UnsupportedParameter(p)) if p == location
        ));
        assert!(Parameter::from(TallyParameter::Brightness).encoding().is_none());
    }
}
