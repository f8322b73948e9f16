//! # camccu
//!
//! Outbound camera control unit (CCU) commands: build a typed command,
//! serialize it to the camera's wire format, validate the bytes and hand
//! them to the link that carries them.
//!
//! ## Features
//!
//! - One constructor per camera operation, checked against the parameter registry
//! - Strict structural validation of every outgoing packet
//! - Optional 16-bit checksum trailer
//! - Pluggable sinks: closures, in-memory buffer, tokio channel
//!
//! ## Quick Start
//!
//! ```
//! use camccu::{CameraControl, ControlConfig, MemorySink};
//!
//! let sink = MemorySink::new();
//! let camera = CameraControl::with_config(sink.clone(), ControlConfig::new().with_destination(1));
//!
//! camera.write_iso(800);
//! camera.write_shutter_angle(18000);
//! camera.write_auto_white_balance();
//!
//! assert_eq!(sink.len(), 3);
//! ```

pub mod camera;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod sink;

// Re-exports
pub use camera::CameraControl;
pub use config::ControlConfig;
pub use dispatcher::{DispatchState, Dispatcher};
pub use error::{Error, Result};
pub use sink::{ChannelSink, MemorySink, PacketSink};

// Re-export protocol types
pub use camccu_core::{
    validate, Category, ErrorKind, FixedPoint, Integrity, OperationType, Packet, Parameter, Value,
    ValidationError,
};
pub use camccu_types::{
    CodecInfo, RecordingFormatData, SceneTags, SystemClock, Take, TransportInfo,
};
