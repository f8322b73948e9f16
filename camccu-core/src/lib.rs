//! # camccu-core
//!
//! Core packet layer for camera control unit (CCU) commands.
//!
//! This crate provides the low-level protocol primitives:
//! - Category/parameter model and the payload encoding registry
//! - Value codec (integers, fixed-point, strings, arrays)
//! - Packet structure and serialization
//! - Structural validation and the optional checksum trailer
//! - Protocol constants

pub mod checksum;
pub mod codec;
pub mod command;
pub mod constants;
pub mod data_type;
pub mod error;
pub mod packet;
pub mod parameter;
pub mod validate;

pub use checksum::Integrity;
pub use codec::{FixedPoint, Value};
pub use command::{CommandId, OperationType};
pub use data_type::{Arity, DataType, ParameterEncoding};
pub use error::{Error, ErrorKind, Result};
pub use packet::Packet;
pub use parameter::{
    AudioParameter, Category, ColorCorrectionParameter, ConfigurationParameter, DisplayParameter,
    ExternalDeviceControlParameter, LensParameter, MediaParameter, MetadataParameter,
    OutputParameter, Parameter, ReferenceParameter, StatusParameter, TallyParameter,
    VideoParameter,
};
pub use validate::ValidationError;
