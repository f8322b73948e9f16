//! F-stop conversion
//!
//! The camera expresses aperture as an aperture value (AV) in 5.11 fixed
//! point: `AV = log2(f²)`, so one raw unit is 1/2048 AV.

use crate::error::{Error, Result};

/// Convert an f-stop to the camera's raw aperture value (truncating)
pub fn aperture_value(fstop: f64) -> Result<i16> {
    if !fstop.is_finite() || fstop <= 0.0 {
        return Err(Error::Validation(format!("invalid f-stop {fstop}")));
    }

    let raw = (fstop.log2() * 2.0 * 2048.0).trunc();
    if raw < f64::from(i16::MIN) || raw > f64::from(i16::MAX) {
        return Err(Error::Validation(format!(
            "f-stop {fstop} outside the aperture value range"
        )));
    }
    Ok(raw as i16)
}
