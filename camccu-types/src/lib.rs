//! Parameter records and device enumerations for camccu

pub mod clock;
pub mod codec_info;
pub mod error;
pub mod lens;
pub mod metadata;
pub mod recording_format;
pub mod transport_info;
pub mod video;

pub use clock::SystemClock;
pub use codec_info::{BasicCodec, CodecInfo};
pub use error::{Error, Result};
pub use metadata::{DayNight, LocationType, SceneTag, SceneTags, SlateForType, Take, TakeTag};
pub use recording_format::{RecordingFormatData, RecordingFormatFlags};
pub use transport_info::{
    ActiveStorageMedium, MediaTransportMode, TransportFlags, TransportInfo, TransportSlot,
};
pub use video::WhiteBalancePreset;
