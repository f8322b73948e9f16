//! High-level camera control interface

use chrono::NaiveDateTime;
use tracing::info;

use camccu_core::{MetadataParameter, OperationType, Packet, Parameter, Value};
use camccu_types::{
    CodecInfo, RecordingFormatData, SceneTags, Take, TransportInfo, WhiteBalancePreset,
};

use crate::commands;
use crate::config::ControlConfig;
use crate::dispatcher::{DispatchState, Dispatcher};
use crate::error::Result;
use crate::sink::PacketSink;

/// Camera controller
///
/// Builds commands, addresses them to the configured camera and pushes them
/// through a [`Dispatcher`]. Every `write_*` method reports whether the
/// packet reached the sink; nothing is returned as an error.
///
/// # Examples
///
/// ```
/// use camccu::{CameraControl, MemorySink};
///
/// let sink = MemorySink::new();
/// let camera = CameraControl::new(sink.clone());
///
/// assert!(camera.write_iso(800).is_sent());
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CameraControl {
    dispatcher: Dispatcher,
    config: ControlConfig,
}

impl CameraControl {
    /// Create a controller broadcasting to every camera
    pub fn new(sink: impl PacketSink + 'static) -> Self {
        Self::with_config(sink, ControlConfig::default())
    }

    /// Create a controller with explicit settings
    pub fn with_config(sink: impl PacketSink + 'static, config: ControlConfig) -> Self {
        info!(
            destination = config.destination,
            integrity = %config.integrity,
            "Camera control ready"
        );
        Self {
            dispatcher: Dispatcher::new(sink).with_integrity(config.integrity),
            config,
        }
    }

    /// Use an existing dispatcher; its integrity setting wins
    pub fn from_dispatcher(dispatcher: Dispatcher, config: ControlConfig) -> Self {
        let config = config.with_integrity(dispatcher.integrity());
        Self { dispatcher, config }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn write(&self, command: Result<Packet>) -> DispatchState {
        let destination = self.config.destination;
        self.dispatcher
            .dispatch(command.map(|packet| packet.with_destination(destination)))
    }

    /// Write any registered parameter
    pub fn write_command(
        &self,
        parameter: impl Into<Parameter>,
        operation: OperationType,
        value: Value,
    ) -> DispatchState {
        self.write(commands::command_with(parameter, operation, value))
    }

    // Video

    pub fn write_white_balance(&self, kelvin: i16, tint: i16) -> DispatchState {
        self.write(commands::white_balance(kelvin, tint))
    }

    pub fn write_white_balance_preset(&self, preset: &WhiteBalancePreset) -> DispatchState {
        self.write(commands::white_balance_preset(preset))
    }

    pub fn write_auto_white_balance(&self) -> DispatchState {
        self.write(commands::auto_white_balance())
    }

    pub fn write_restore_auto_white_balance(&self) -> DispatchState {
        self.write(commands::restore_auto_white_balance())
    }

    pub fn write_shutter_speed(&self, speed: i32) -> DispatchState {
        self.write(commands::shutter_speed(speed))
    }

    /// Shutter angle in hundredths of a degree
    pub fn write_shutter_angle(&self, angle_x100: i32) -> DispatchState {
        self.write(commands::shutter_angle(angle_x100))
    }

    /// Shutter angle in degrees, 5 to 360
    pub fn write_shutter_angle_degrees(&self, degrees: f64) -> DispatchState {
        self.write(commands::shutter_angle_degrees(degrees))
    }

    pub fn write_exposure(&self, microseconds: i32) -> DispatchState {
        self.write(commands::exposure(microseconds))
    }

    /// Sensor gain in device units, stepped by the configured base
    pub fn write_sensor_gain(&self, gain: i32) -> DispatchState {
        self.write(commands::sensor_gain(gain, self.config.sensor_gain_base))
    }

    pub fn write_gain_db(&self, db: i8) -> DispatchState {
        self.write(commands::gain_db(db))
    }

    pub fn write_iso(&self, iso: i32) -> DispatchState {
        self.write(commands::iso(iso))
    }

    pub fn write_recording_format(&self, format: &RecordingFormatData) -> DispatchState {
        self.write(commands::recording_format(format))
    }

    // Lens

    pub fn write_aperture_normalised(&self, value: f64) -> DispatchState {
        self.write(commands::aperture_normalised_value(value))
    }

    /// Iris as a raw aperture value
    pub fn write_iris(&self, raw: i16) -> DispatchState {
        self.write(commands::iris(raw))
    }

    pub fn write_iris_fstop(&self, fstop: f64) -> DispatchState {
        self.write(commands::iris_fstop(fstop))
    }

    pub fn write_auto_focus(&self) -> DispatchState {
        self.write(commands::auto_focus())
    }

    pub fn write_focus(&self, raw: i16, operation: OperationType) -> DispatchState {
        self.write(commands::focus(raw, operation))
    }

    pub fn write_focus_normalised(&self, value: f64) -> DispatchState {
        self.write(commands::focus_normalised(value))
    }

    pub fn write_zoom_mm(&self, focal_length: i16) -> DispatchState {
        self.write(commands::zoom_mm(focal_length))
    }

    pub fn write_zoom_normalised(&self, value: f64) -> DispatchState {
        self.write(commands::zoom_normalised(value))
    }

    // Media and configuration

    pub fn write_codec(&self, codec: &CodecInfo) -> DispatchState {
        self.write(commands::codec(codec))
    }

    pub fn write_transport_info(&self, info: &TransportInfo) -> DispatchState {
        self.write(commands::transport_info(info))
    }

    pub fn write_system_clock(&self, datetime: NaiveDateTime) -> DispatchState {
        self.write(commands::system_clock(datetime))
    }

    // Metadata

    pub fn write_reel(&self, reel: i16) -> DispatchState {
        self.write(commands::reel(reel))
    }

    pub fn write_scene(&self, scene: &str) -> DispatchState {
        self.write(commands::scene(scene))
    }

    pub fn write_scene_tags(&self, tags: &SceneTags) -> DispatchState {
        self.write(commands::scene_tags(tags))
    }

    pub fn write_take(&self, take: &Take) -> DispatchState {
        self.write(commands::take(take))
    }

    pub fn write_good_take(&self, good: bool) -> DispatchState {
        self.write(commands::good_take(good))
    }

    pub fn write_metadata_string(&self, parameter: MetadataParameter, text: &str) -> DispatchState {
        self.write(commands::metadata_string(parameter, text))
    }
}
