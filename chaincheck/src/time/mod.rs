// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate times and validity windows.
//!
//! UTCTime and GeneralizedTime are kept as decoded and compared by the
//! instant they denote. UTCTime years 00-49 mean 2000-2049 and 50-99 mean
//! 1950-1999 (RFC 5280 4.1.2.5.1). Instants before 1970 are not
//! representable and fail to decode.

use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

use der::asn1::{GeneralizedTime, UtcTime};
use der::{Decode, DecodeValue, FixedTag, Header, Reader, Tag};

use crate::error::{Error, Result, TimeError};

/// A `Time` CHOICE value. Equality and ordering follow the instant, so a
/// UTCTime and a GeneralizedTime for the same second are equal.
#[derive(Debug, Clone, Copy)]
pub enum Time {
    UtcTime(UtcTime),
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    pub fn to_date_time(&self) -> der::DateTime {
        match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        }
    }

    /// Seconds since the Unix epoch.
    pub fn unix_secs(&self) -> u64 {
        self.to_date_time().unix_duration().as_secs()
    }

    /// Seconds since the Unix epoch, as a GeneralizedTime.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        GeneralizedTime::from_unix_duration(Duration::from_secs(secs))
            .map(Time::GeneralizedTime)
            .map_err(|e| Error::Time(TimeError::Unrepresentable(e.to_string())))
    }

    /// Current wall-clock time.
    pub fn now() -> Result<Self> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Error::Time(TimeError::ClockUnavailable))?;
        Self::from_unix_secs(now.as_secs())
    }

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SSZ` or `YYYY-MM-DD HH:MM:SS`.
    pub fn parse_rfc3339(text: &str) -> Result<Self> {
        let invalid = || Error::Time(TimeError::Unrepresentable(text.to_string()));
        let text = text.trim();
        let text = text.strip_suffix('Z').unwrap_or(text);

        let (date, clock) = match text.find(['T', ' ']) {
            Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
            None => (text, None),
        };

        let mut date_parts = date.split('-');
        let year: u16 = field(date_parts.next()).ok_or_else(invalid)?;
        let month: u8 = field(date_parts.next()).ok_or_else(invalid)?;
        let day: u8 = field(date_parts.next()).ok_or_else(invalid)?;
        if date_parts.next().is_some() {
            return Err(invalid());
        }

        let (hour, minute, second) = match clock {
            Some(clock) => {
                let mut clock_parts = clock.split(':');
                let hour: u8 = field(clock_parts.next()).ok_or_else(invalid)?;
                let minute: u8 = field(clock_parts.next()).ok_or_else(invalid)?;
                let second: u8 = field(clock_parts.next()).ok_or_else(invalid)?;
                if clock_parts.next().is_some() {
                    return Err(invalid());
                }
                (hour, minute, second)
            }
            None => (0, 0, 0),
        };

        let date_time = der::DateTime::new(year, month, day, hour, minute, second)
            .map_err(|_| invalid())?;
        Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(date_time)))
    }
}

fn field<T: core::str::FromStr>(part: Option<&str>) -> Option<T> {
    part.filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|p| p.parse().ok())
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_date_time()
            .unix_duration()
            .cmp(&other.to_date_time().unix_duration())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = self.to_date_time();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minutes(),
            dt.seconds()
        )
    }
}

impl serde::Serialize for Time {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let time = match header.tag {
            Tag::UtcTime => Time::UtcTime(UtcTime::decode_value(reader, header)?),
            Tag::GeneralizedTime => Time::GeneralizedTime(GeneralizedTime::decode_value(reader, header)?),
            actual => {
                return Err(der::ErrorKind::TagUnexpected {
                    expected: Some(Tag::UtcTime),
                    actual,
                }
                .into())
            }
        };
        Ok(time)
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

/// `Validity ::= SEQUENCE { notBefore Time, notAfter Time }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

impl Validity {
    /// Where `instant` falls: `Less` before the window, `Greater` after it
    /// and `Equal` inside it, both bounds included.
    pub fn locate(&self, instant: &Time) -> Ordering {
        if instant < &self.not_before {
            Ordering::Less
        } else if instant > &self.not_after {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    pub fn contains(&self, instant: &Time) -> bool {
        self.locate(instant) == Ordering::Equal
    }
}

impl<'a> DecodeValue<'a> for Validity {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |bounds| {
            Ok(Validity {
                not_before: bounds.decode()?,
                not_after: bounds.decode()?,
            })
        })
    }
}

impl FixedTag for Validity {
    const TAG: Tag = Tag::Sequence;
}

/// When a validation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationTime {
    /// Read the system clock when validation starts.
    #[default]
    Now,
    /// A fixed instant.
    At(Time),
}

impl ValidationTime {
    /// Resolves to a concrete instant.
    pub fn resolve(&self) -> Result<Time> {
        match self {
            ValidationTime::Now => Time::now(),
            ValidationTime::At(time) => Ok(*time),
        }
    }
}
