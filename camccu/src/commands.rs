//! Command factory
//!
//! One constructor per camera operation. Each checks the operation's own
//! value rules, then hands a typed [`Value`] to [`Packet::new`], which checks
//! it against the parameter's registered encoding. Nothing here touches a
//! sink or the validator.
//!
//! ```
//! use camccu::commands;
//!
//! let packet = commands::iso(800).unwrap();
//! assert_eq!(packet.payload().as_ref(), &800i32.to_le_bytes());
//! ```

use chrono::NaiveDateTime;
use tracing::trace;

use camccu_core::{
    ConfigurationParameter, Error as CoreError, FixedPoint, LensParameter, MediaParameter,
    MetadataParameter, OperationType, Packet, Parameter, Value, VideoParameter,
};
use camccu_types::{
    lens, video, CodecInfo, RecordingFormatData, SceneTags, SystemClock, Take, TransportInfo,
    WhiteBalancePreset,
};

use crate::error::Result;

/// Sensor gain base used when none is configured
pub const DEFAULT_SENSOR_GAIN_BASE: u16 = video::SENT_SENSOR_GAIN_BASE;

/// Build an assign command for any registered parameter
pub fn command(parameter: impl Into<Parameter>, value: Value) -> Result<Packet> {
    command_with(parameter, OperationType::Assign, value)
}

/// Build a command with an explicit operation
pub fn command_with(
    parameter: impl Into<Parameter>,
    operation: OperationType,
    value: Value,
) -> Result<Packet> {
    Ok(Packet::new(parameter.into(), operation, value)?)
}

fn trigger(parameter: impl Into<Parameter>) -> Result<Packet> {
    Ok(Packet::void(parameter.into())?)
}

/// Clamp a normalised input to 0..=1 and encode it in the camera's format
fn normalised(value: f64) -> Result<Value> {
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value && !value.is_nan() {
        trace!(value, clamped, "Clamped normalised value");
    }
    Ok(Value::fixed16(FixedPoint::CCU, clamped)?)
}

// Video

/// Manual white balance in kelvin plus tint
pub fn white_balance(kelvin: i16, tint: i16) -> Result<Packet> {
    command(VideoParameter::ManualWB, Value::Int16Array(vec![kelvin, tint]))
}

/// Manual white balance from a named preset
///
/// # Errors
///
/// Out of range if the preset lies outside the camera's white balance or
/// tint range.
pub fn white_balance_preset(preset: &WhiteBalancePreset) -> Result<Packet> {
    video::check_white_balance(preset.kelvin, preset.tint)?;
    white_balance(preset.kelvin, preset.tint)
}

/// Trigger a one-shot auto white balance
pub fn auto_white_balance() -> Result<Packet> {
    trigger(VideoParameter::SetAutoWB)
}

/// Restore the white balance from before auto white balance
pub fn restore_auto_white_balance() -> Result<Packet> {
    trigger(VideoParameter::RestoreAutoWB)
}

/// Shutter speed as 1/x seconds
pub fn shutter_speed(speed: i32) -> Result<Packet> {
    command(VideoParameter::ShutterSpeed, Value::Int32(speed))
}

/// Shutter angle in hundredths of a degree (18000 = 180°)
pub fn shutter_angle(angle_x100: i32) -> Result<Packet> {
    command(VideoParameter::ShutterAngle, Value::Int32(angle_x100))
}

/// Shutter angle in degrees, 5 to 360
pub fn shutter_angle_degrees(degrees: f64) -> Result<Packet> {
    shutter_angle(video::shutter_angle_x100(degrees)?)
}

/// Exposure time in microseconds
pub fn exposure(microseconds: i32) -> Result<Packet> {
    command(VideoParameter::Exposure, Value::Int32(microseconds))
}

/// Sensor gain in device units
///
/// The gain is divided by `base` and the step count sent as one byte. The
/// division truncates, so `k * base + r` with `r < base` sends step `k`.
///
/// # Errors
///
/// Out of range if `base` is zero, the gain is negative, or the step count
/// does not fit a byte.
pub fn sensor_gain(gain: i32, base: u16) -> Result<Packet> {
    if base == 0 {
        return Err(CoreError::out_of_range("sensor gain", "gain base is zero").into());
    }
    if gain < 0 {
        return Err(CoreError::out_of_range("sensor gain", format!("negative gain {gain}")).into());
    }

    let steps = gain / i32::from(base);
    let step = u8::try_from(steps).map_err(|_| {
        CoreError::out_of_range(
            "sensor gain",
            format!("{steps} steps of {base} exceeds {}", u8::MAX),
        )
    })?;

    command(VideoParameter::SensorGain, Value::Int8(step))
}

/// Gain in decibels
pub fn gain_db(db: i8) -> Result<Packet> {
    command(VideoParameter::Gain, Value::Int8(db as u8))
}

/// ISO value
pub fn iso(iso: i32) -> Result<Packet> {
    command(VideoParameter::ISO, Value::Int32(iso))
}

/// Recording frame rates and frame size
pub fn recording_format(format: &RecordingFormatData) -> Result<Packet> {
    command(
        VideoParameter::RecordingFormat,
        Value::Int16Array(format.to_payload().to_vec()),
    )
}

// Lens

/// Aperture as a raw normalised fixed16 value
pub fn aperture_normalised(raw: i16) -> Result<Packet> {
    command(LensParameter::ApertureNormalised, Value::Fixed16(raw))
}

/// Aperture from 0.0 (closed) to 1.0 (open); out-of-range input is clamped
pub fn aperture_normalised_value(value: f64) -> Result<Packet> {
    command(LensParameter::ApertureNormalised, normalised(value)?)
}

/// Iris as a raw aperture value (`log2(f²)` in 5.11 fixed point)
pub fn iris(raw: i16) -> Result<Packet> {
    command(LensParameter::ApertureFstop, Value::Fixed16(raw))
}

/// Iris from an f-stop number
pub fn iris_fstop(fstop: f64) -> Result<Packet> {
    iris(lens::aperture_value(fstop)?)
}

/// Trigger a one-shot auto focus
pub fn auto_focus() -> Result<Packet> {
    trigger(LensParameter::AutoFocus)
}

/// Focus as a raw fixed16 value, assigned or applied as an offset
pub fn focus(raw: i16, operation: OperationType) -> Result<Packet> {
    command_with(LensParameter::Focus, operation, Value::Fixed16(raw))
}

/// Focus from 0.0 (near) to 1.0 (far); out-of-range input is clamped
pub fn focus_normalised(value: f64) -> Result<Packet> {
    command(LensParameter::Focus, normalised(value)?)
}

/// Zoom as absolute focal length in millimetres
pub fn zoom_mm(focal_length: i16) -> Result<Packet> {
    command(LensParameter::Zoom, Value::Int16(focal_length))
}

/// Zoom from 0.0 (wide) to 1.0 (tele); out-of-range input is clamped
pub fn zoom_normalised(value: f64) -> Result<Packet> {
    command(LensParameter::ZoomNormalised, normalised(value)?)
}

// Media

/// Recording codec
pub fn codec(codec: &CodecInfo) -> Result<Packet> {
    command(MediaParameter::Codec, Value::Int8Array(codec.to_payload().to_vec()))
}

/// Transport mode, speed and slots
pub fn transport_info(info: &TransportInfo) -> Result<Packet> {
    command(MediaParameter::TransportMode, Value::Int8Array(info.to_payload()?))
}

// Configuration

/// Set the camera's real-time clock
pub fn system_clock(datetime: NaiveDateTime) -> Result<Packet> {
    let words = SystemClock::new(datetime).to_payload()?;
    command(ConfigurationParameter::SystemClock, Value::Int32Array(words.to_vec()))
}

// Metadata

/// Reel number
pub fn reel(reel: i16) -> Result<Packet> {
    command(MetadataParameter::Reel, Value::Int16(reel))
}

/// Scene name
pub fn scene(scene: &str) -> Result<Packet> {
    metadata_string(MetadataParameter::Scene, scene)
}

/// Shot type, location and time of day
pub fn scene_tags(tags: &SceneTags) -> Result<Packet> {
    command(MetadataParameter::SceneTags, Value::Int8Array(tags.to_payload().to_vec()))
}

/// Take number and annotation
pub fn take(take: &Take) -> Result<Packet> {
    command(MetadataParameter::Take, Value::Int8Array(take.to_payload().to_vec()))
}

/// Mark or clear the good take flag
pub fn good_take(good: bool) -> Result<Packet> {
    command(MetadataParameter::GoodTake, Value::Int8(u8::from(good)))
}

/// Any string-valued slate field
///
/// # Errors
///
/// Out of range if the text is longer than the field allows; an encoding
/// mismatch if the field does not hold a string.
pub fn metadata_string(parameter: MetadataParameter, text: &str) -> Result<Packet> {
    command(parameter, Value::Utf8String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camccu_core::{codec, validate, Category, DataType, ErrorKind};
    use camccu_types::{
        ActiveStorageMedium, BasicCodec, DayNight, LocationType, MediaTransportMode,
        RecordingFormatFlags, SceneTag, TakeTag, TransportSlot,
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_iso_800() {
        let packet = iso(800).unwrap();

        assert_eq!(packet.category(), Category::Video);
        assert_eq!(packet.parameter(), Parameter::Video(VideoParameter::ISO));
        assert_eq!(packet.data_type(), DataType::Int32);
        assert_eq!(packet.payload().len(), 4);
        assert_eq!(codec::decode_int32(packet.payload()).unwrap(), 800);
    }

    #[test]
    fn test_shutter_angle_180() {
        let packet = shutter_angle(18000).unwrap();

        assert_eq!(packet.parameter(), Parameter::Video(VideoParameter::ShutterAngle));
        assert_eq!(packet.value().unwrap(), Value::Int32(18000));
    }

    #[test]
    fn test_shutter_angle_degrees() {
        assert_eq!(
            shutter_angle_degrees(172.8).unwrap().value().unwrap(),
            Value::Int32(17280)
        );
        assert_eq!(shutter_angle_degrees(400.0).unwrap_err().kind(), ErrorKind::EncodingRange);
    }

    #[test]
    fn test_white_balance_preset() {
        let packet = white_balance_preset(&WhiteBalancePreset::INCANDESCENT).unwrap();
        assert_eq!(packet.value().unwrap(), Value::Int16Array(vec![3200, 0]));

        let err = white_balance_preset(&WhiteBalancePreset::new("Candle", 1900, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingRange);
    }

    #[test]
    fn test_white_balance() {
        let packet = white_balance(5600, 10).unwrap();

        assert_eq!(packet.data_type(), DataType::Int16Array);
        assert_eq!(packet.payload().as_ref(), &[0xE0, 0x15, 0x0A, 0x00]);
    }

    #[test]
    fn test_auto_white_balance_is_void() {
        let packet = auto_white_balance().unwrap();

        assert_eq!(packet.parameter(), Parameter::Video(VideoParameter::SetAutoWB));
        assert!(packet.payload().is_empty());
        assert!(validate::validate(&packet.serialize()));
    }

    #[test]
    fn test_sensor_gain_truncates() {
        assert_eq!(sensor_gain(800, 100).unwrap().payload().as_ref(), &[8]);
        assert_eq!(sensor_gain(899, 100).unwrap().payload().as_ref(), &[8]);
        assert_eq!(sensor_gain(99, 100).unwrap().payload().as_ref(), &[0]);
    }

    #[test]
    fn test_sensor_gain_out_of_range() {
        for result in [sensor_gain(-100, 100), sensor_gain(25_600, 100), sensor_gain(100, 0)] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::EncodingRange);
        }
    }

    #[test]
    fn test_iris_fstop() {
        let packet = iris_fstop(2.0).unwrap();

        assert_eq!(packet.parameter(), Parameter::Lens(LensParameter::ApertureFstop));
        assert_eq!(packet.value().unwrap(), Value::Fixed16(4096));
        assert!(iris_fstop(-1.0).is_err());
    }

    #[test]
    fn test_normalised_lens_values_clamp() {
        assert_eq!(aperture_normalised_value(0.5).unwrap().value().unwrap(), Value::Fixed16(1024));
        assert_eq!(
            focus_normalised(3.0).unwrap().payload(),
            focus_normalised(1.0).unwrap().payload()
        );
        assert_eq!(
            zoom_normalised(-0.5).unwrap().payload(),
            zoom_normalised(0.0).unwrap().payload()
        );
        assert!(focus_normalised(f64::NAN).is_err());
    }

    #[test]
    fn test_focus_offset() {
        let packet = focus(-256, OperationType::Offset).unwrap();
        assert_eq!(packet.operation(), OperationType::Offset);
        assert_eq!(packet.serialize()[7], 1);
    }

    #[test]
    fn test_recording_format() {
        let format = RecordingFormatData::new(24, 3840, 2160).with_flags(RecordingFormatFlags::FILE_M_RATE);
        let packet = recording_format(&format).unwrap();

        assert_eq!(packet.value().unwrap(), Value::Int16Array(vec![24, 24, 3840, 2160, 1]));
    }

    #[test]
    fn test_transport_info() {
        let info = TransportInfo::new(MediaTransportMode::Record)
            .with_slot(TransportSlot::new(true, ActiveStorageMedium::SdCard));
        let packet = transport_info(&info).unwrap();

        assert_eq!(packet.category(), Category::Media);
        assert_eq!(packet.payload().as_ref(), &[2, 0, 0x20, 1]);
    }

    #[test]
    fn test_codec() {
        let packet = codec(&CodecInfo::new(BasicCodec::ProRes, 1)).unwrap();
        assert_eq!(packet.payload().as_ref(), &[2, 1]);
    }

    #[test]
    fn test_system_clock() {
        let datetime = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let packet = system_clock(datetime).unwrap();

        assert_eq!(packet.value().unwrap(), Value::Int32Array(vec![0x0830_0000, 0x2026_1019]));
    }

    #[test]
    fn test_metadata_strings() {
        assert_eq!(scene("12A").unwrap().payload().as_ref(), b"12A");
        assert_eq!(
            metadata_string(MetadataParameter::Director, "A. Director").unwrap().data_type(),
            DataType::Utf8String
        );

        let err = scene("123456").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingRange);

        let err = metadata_string(MetadataParameter::Reel, "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedParameter);
    }

    #[test]
    fn test_slate_tags() {
        let tags = SceneTags::new(SceneTag::WideShot, LocationType::Exterior, DayNight::Day);
        assert_eq!(scene_tags(&tags).unwrap().payload().as_ref(), &[0, 0, 1]);
        assert_eq!(take(&Take::new(4, TakeTag::PickUp)).unwrap().payload().as_ref(), &[4, 0]);
        assert_eq!(good_take(true).unwrap().payload().as_ref(), &[1]);
        assert_eq!(reel(7).unwrap().value().unwrap(), Value::Int16(7));
    }

    #[test]
    fn test_element_count_over_limit_is_range_error() {
        let err = command(MetadataParameter::Scene, Value::Utf8String("123456".to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingRange);
        assert_eq!(scene("123456").unwrap_err().kind(), err.kind());

        let err = command(VideoParameter::ManualWB, Value::Int16Array(vec![5600, 10, 0]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingRange);
    }

    #[test]
    fn test_generic_command_unsupported() {
        let err = command(ConfigurationParameter::Location, Value::Void).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedParameter);
    }

    fn video_packet() -> impl Strategy<Value = Packet> {
        prop_oneof![
            (any::<i16>(), any::<i16>()).prop_map(|(k, t)| white_balance(k, t).unwrap()),
            Just(auto_white_balance().unwrap()),
            Just(restore_auto_white_balance().unwrap()),
            any::<i32>().prop_map(|s| shutter_speed(s).unwrap()),
            any::<i32>().prop_map(|a| shutter_angle(a).unwrap()),
            (0i32..25_600).prop_map(|g| sensor_gain(g, 100).unwrap()),
            any::<i32>().prop_map(|i| iso(i).unwrap()),
            any::<i8>().prop_map(|db| gain_db(db).unwrap()),
            (any::<i16>(), any::<i16>(), any::<i16>())
                .prop_map(|(r, w, h)| recording_format(&RecordingFormatData::new(r, w, h)).unwrap()),
        ]
    }

    fn lens_packet() -> impl Strategy<Value = Packet> {
        let operation = prop_oneof![
            Just(OperationType::Assign),
            Just(OperationType::Offset),
            Just(OperationType::Toggle),
        ];
        prop_oneof![
            any::<i16>().prop_map(|raw| aperture_normalised(raw).unwrap()),
            (-10.0f64..10.0).prop_map(|v| aperture_normalised_value(v).unwrap()),
            any::<i16>().prop_map(|raw| iris(raw).unwrap()),
            (0.5f64..200.0).prop_map(|f| iris_fstop(f).unwrap()),
            Just(auto_focus().unwrap()),
            (any::<i16>(), operation).prop_map(|(raw, op)| focus(raw, op).unwrap()),
            (-10.0f64..10.0).prop_map(|v| focus_normalised(v).unwrap()),
            any::<i16>().prop_map(|mm| zoom_mm(mm).unwrap()),
            (-10.0f64..10.0).prop_map(|v| zoom_normalised(v).unwrap()),
        ]
    }

    fn media_packet() -> impl Strategy<Value = Packet> {
        let basic_codec = prop_oneof![
            Just(BasicCodec::Raw),
            Just(BasicCodec::DnxHd),
            Just(BasicCodec::ProRes),
            Just(BasicCodec::Braw),
        ];
        prop_oneof![
            (0usize..=4, any::<i8>()).prop_map(|(slots, speed)| {
                let mut info = TransportInfo::new(MediaTransportMode::Play);
                info.speed = speed;
                info.slots = vec![TransportSlot::new(true, ActiveStorageMedium::Usb); slots];
                transport_info(&info).unwrap()
            }),
            (basic_codec, any::<u8>())
                .prop_map(|(basic, variant)| codec(&CodecInfo::new(basic, variant)).unwrap()),
            (0i32..=9999, 1u32..=12, 1u32..=28, 0u32..86_400).prop_map(|(year, month, day, secs)| {
                let datetime = NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap()
                    .and_hms_opt(secs / 3600, secs / 60 % 60, secs % 60)
                    .unwrap();
                system_clock(datetime).unwrap()
            }),
            (5.0f64..=360.0).prop_map(|a| shutter_angle_degrees(a).unwrap()),
            any::<i32>().prop_map(|us| exposure(us).unwrap()),
            (0usize..5).prop_map(|i| white_balance_preset(&WhiteBalancePreset::ALL[i]).unwrap()),
        ]
    }

    fn metadata_packet() -> impl Strategy<Value = Packet> {
        let scene_tag = prop_oneof![
            Just(SceneTag::None),
            Just(SceneTag::WideShot),
            Just(SceneTag::CloseUp),
        ];
        let take_tag = prop_oneof![Just(TakeTag::None), Just(TakeTag::PickUp)];
        prop_oneof![
            any::<i16>().prop_map(|r| reel(r).unwrap()),
            "[a-z0-9]{0,5}".prop_map(|s| scene(&s).unwrap()),
            (scene_tag, any::<bool>(), any::<bool>()).prop_map(|(tag, exterior, day)| {
                let location = if exterior { LocationType::Exterior } else { LocationType::Interior };
                let time = if day { DayNight::Day } else { DayNight::Night };
                scene_tags(&SceneTags::new(tag, location, time)).unwrap()
            }),
            (any::<u8>(), take_tag).prop_map(|(n, tag)| take(&Take::new(n, tag)).unwrap()),
            any::<bool>().prop_map(|good| good_take(good).unwrap()),
            "[a-zA-Z ]{0,29}".prop_map(|s| {
                metadata_string(MetadataParameter::ProjectName, &s).unwrap()
            }),
            // Up to the full payload in multibyte characters
            "[a-zé€]{0,18}".prop_map(|s| {
                metadata_string(MetadataParameter::LensType, &s).unwrap()
            }),
            Just(metadata_string(MetadataParameter::LensType, &("€".repeat(18) + "é")).unwrap()),
            "[A-Z ]{0,56}".prop_map(|s| {
                metadata_string(MetadataParameter::SlateForName, &s).unwrap()
            }),
        ]
    }

    fn factory_packet() -> impl Strategy<Value = Packet> {
        prop_oneof![video_packet(), lens_packet(), media_packet(), metadata_packet()]
    }

    proptest! {
        #[test]
        fn test_factory_packets_validate(packet in factory_packet(), destination in any::<u8>()) {
            let packet = packet.with_destination(destination);
            prop_assert!(validate::validate(&packet.serialize()));
            prop_assert!(validate::validate_with(
                &packet.serialize_with(camccu_core::Integrity::Checksum16),
                camccu_core::Integrity::Checksum16,
            ));
        }

        #[test]
        fn test_sensor_gain_step_determinism(k in 0i32..=255, r in 0i32..100) {
            let exact = sensor_gain(k * 100, 100).unwrap();
            let truncated = sensor_gain(k * 100 + r, 100).unwrap();
            prop_assert_eq!(exact.payload().as_ref(), &[k as u8]);
            prop_assert_eq!(truncated.payload(), exact.payload());
        }
    }
}
