//! Command ids and operation types

use std::fmt;

use crate::error::{Error, Result};

/// Command id carried in the third header byte
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CommandId {
    /// Change a configuration parameter
    #[default]
    ChangeConfiguration = 0,
}

impl CommandId {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::ChangeConfiguration => "CHANGE_CONFIGURATION",
        }
    }
}

impl From<CommandId> for u8 {
    fn from(cmd: CommandId) -> u8 {
        cmd as u8
    }
}

impl TryFrom<u8> for CommandId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::ChangeConfiguration),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

/// How the camera applies the payload
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum OperationType {
    /// Replace the current value
    #[default]
    Assign = 0,
    /// Add the payload to the current value
    Offset = 1,
    /// Status update, or toggle for boolean parameters
    Toggle = 2,
}

impl OperationType {
    /// Get operation name
    pub fn name(self) -> &'static str {
        match self {
            Self::Assign => "ASSIGN",
            Self::Offset => "OFFSET",
            Self::Toggle => "TOGGLE",
        }
    }
}

impl From<OperationType> for u8 {
    fn from(op: OperationType) -> u8 {
        op as u8
    }
}

impl TryFrom<u8> for OperationType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Assign),
            1 => Ok(Self::Offset),
            2 => Ok(Self::Toggle),
            _ => Err(Error::UnknownOperation(value)),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}
