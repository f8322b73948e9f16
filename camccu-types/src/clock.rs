//! Real-time clock payload
//!
//! The camera's system clock is set with two BCD words: `HHMMSSFF` (time and
//! frame) and `YYYYMMDD` (date).

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Error, Result};

/// Encode a decimal number as packed BCD
///
/// Every decimal digit becomes one nibble, so `2026` becomes `0x2026`.
pub fn to_bcd(value: u32) -> Result<u32> {
    if value > 99_999_999 {
        return Err(Error::Validation(format!("{value} has more than 8 digits")));
    }

    let mut remaining = value;
    let mut bcd = 0u32;
    let mut shift = 0;
    while remaining > 0 {
        bcd |= (remaining % 10) << shift;
        remaining /= 10;
        shift += 4;
    }
    Ok(bcd)
}

/// Decode packed BCD
pub fn from_bcd(bcd: u32) -> Result<u32> {
    let mut value = 0u32;
    for nibble_index in (0..8).rev() {
        let digit = (bcd >> (nibble_index * 4)) & 0xF;
        if digit > 9 {
            return Err(Error::Parse(format!("0x{bcd:08X} is not valid BCD")));
        }
        value = value * 10 + digit;
    }
    Ok(value)
}

/// Wall-clock time to set on the camera
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SystemClock {
    pub datetime: NaiveDateTime,
    /// Frame within the second
    pub frame: u8,
}

impl SystemClock {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self { datetime, frame: 0 }
    }

    pub fn with_frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }

    /// Payload words: time BCD, date BCD
    pub fn to_payload(&self) -> Result<[i32; 2]> {
        if self.frame > 99 {
            return Err(Error::Validation(format!("frame {} has more than 2 digits", self.frame)));
        }
        let year = u32::try_from(self.datetime.year())
            .ok()
            .filter(|year| *year <= 9999)
            .ok_or_else(|| {
                Error::Validation(format!("year {} outside 0..=9999", self.datetime.year()))
            })?;

        let time = self.datetime.hour() * 1_000_000
            + self.datetime.minute() * 10_000
            + self.datetime.second() * 100
            + u32::from(self.frame);
        let date = year * 10_000 + self.datetime.month() * 100 + self.datetime.day();

        // BCD words are bit patterns; the wire type is signed
        Ok([to_bcd(time)? as i32, to_bcd(date)? as i32])
    }

    /// Parse a payload produced by [`SystemClock::to_payload`]
    pub fn from_payload(words: &[i32]) -> Result<Self> {
        let [time, date] = *words else {
            return Err(Error::Parse(format!(
                "clock payload needs 2 words, got {}",
                words.len()
            )));
        };

        let time = from_bcd(time as u32)?;
        let date = from_bcd(date as u32)?;

        let clock_time = NaiveTime::from_hms_opt(time / 1_000_000, time / 10_000 % 100, time / 100 % 100)
            .ok_or_else(|| Error::Parse(format!("invalid time {time:08}")))?;
        let clock_date = i32::try_from(date / 10_000)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, date / 100 % 100, date % 100))
            .ok_or_else(|| Error::Parse(format!("invalid date {date:08}")))?;

        Ok(Self {
            datetime: NaiveDateTime::new(clock_date, clock_time),
            frame: (time % 100) as u8,
        })
    }
}

impl From<NaiveDateTime> for SystemClock {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime)
    }
}

impl fmt::Display for SystemClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.datetime.format("%Y-%m-%d %H:%M:%S"), self.frame)
    }
}
