//! Controller configuration

use camccu_core::constants::BROADCAST_DESTINATION;
use camccu_core::Integrity;

use crate::commands::DEFAULT_SENSOR_GAIN_BASE;

/// Settings applied to every command a [`CameraControl`](crate::CameraControl) writes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    /// Destination device, 255 addresses every camera
    pub destination: u8,
    /// Device units per sensor gain step
    pub sensor_gain_base: u16,
    /// Trailer appended to and checked on every packet
    pub integrity: Integrity,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            destination: BROADCAST_DESTINATION,
            sensor_gain_base: DEFAULT_SENSOR_GAIN_BASE,
            integrity: Integrity::None,
        }
    }
}

impl ControlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a single camera
    pub fn with_destination(mut self, destination: u8) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_sensor_gain_base(mut self, base: u16) -> Self {
        self.sensor_gain_base = base;
        self
    }

    /// Append an integrity trailer on links that need one
    pub fn with_integrity(mut self, integrity: Integrity) -> Self {
        self.integrity = integrity;
        self
    }

    pub fn is_broadcast(&self) -> bool {
        self.destination == BROADCAST_DESTINATION
    }
}
