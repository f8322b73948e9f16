//! High-level error types

use camccu_core::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] camccu_core::Error),

    #[error("Type error: {0}")]
    Types(#[from] camccu_types::Error),
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Types(camccu_types::Error::Validation(_)) => ErrorKind::EncodingRange,
            Self::Types(camccu_types::Error::Parse(_)) => ErrorKind::StructuralValidation,
        }
    }
}
