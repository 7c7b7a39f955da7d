//! Time instants and periods used by validity and query ranges
//!
//! On the wire a time extent is either an instant string or an array of
//! exactly two bounds. Bounds are ISO-8601 timestamps, `now`, or `..` for an
//! open end.

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::{Iso8601, Rfc3339};

use crate::error::{Error, Result};

/// One end of a [`TimeExtent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    /// Unbounded
    Open,
    /// Current time, evaluated by the server
    Now,
    At(OffsetDateTime),
}

impl TimeBound {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim() {
            "" | ".." => Ok(Self::Open),
            "now" => Ok(Self::Now),
            other => OffsetDateTime::parse(other, &Rfc3339)
                .or_else(|_| OffsetDateTime::parse(other, &Iso8601::DEFAULT))
                .map(Self::At)
                .map_err(|_| Error::invalid_value("time", other)),
        }
    }

    pub fn to_iso_string(&self) -> Result<String> {
        match self {
            Self::Open => Ok("..".to_string()),
            Self::Now => Ok("now".to_string()),
            Self::At(t) => t
                .format(&Rfc3339)
                .map_err(|e| Error::invalid_value("time", e.to_string())),
        }
    }
}

impl From<OffsetDateTime> for TimeBound {
    fn from(t: OffsetDateTime) -> Self {
        Self::At(t)
    }
}

/// Instant (both bounds equal) or period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeExtent {
    pub begin: TimeBound,
    pub end: TimeBound,
}

impl TimeExtent {
    pub fn instant<T: Into<TimeBound>>(t: T) -> Self {
        let t = t.into();
        Self { begin: t, end: t }
    }

    pub fn now() -> Self {
        Self::instant(TimeBound::Now)
    }

    pub fn period<B: Into<TimeBound>, E: Into<TimeBound>>(begin: B, end: E) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Period starting at `begin` with no end
    pub fn since<B: Into<TimeBound>>(begin: B) -> Self {
        Self::period(begin, TimeBound::Open)
    }

    pub fn is_instant(&self) -> bool {
        self.begin == self.end
    }

    /// Parse `instant` or `begin/end`
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(instant), None, None) => Ok(Self::instant(TimeBound::parse(instant)?)),
            (Some(begin), Some(end), None) => {
                Ok(Self::period(TimeBound::parse(begin)?, TimeBound::parse(end)?))
            }
            _ => Err(Error::invalid_value("time extent", text)),
        }
    }

    /// ISO-8601 form used in query strings: `instant` or `begin/end`
    pub fn to_iso_string(&self) -> Result<String> {
        if self.is_instant() {
            self.begin.to_iso_string()
        } else {
            Ok(format!(
                "{}/{}",
                self.begin.to_iso_string()?,
                self.end.to_iso_string()?
            ))
        }
    }
}

impl Serialize for TimeExtent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        for bound in [&self.begin, &self.end] {
            let text = bound.to_iso_string().map_err(S::Error::custom)?;
            seq.serialize_element(&text)?;
        }
        seq.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeExtentRepr {
    Instant(String),
    Bounds(Vec<Option<String>>),
}

impl<'de> Deserialize<'de> for TimeExtent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = TimeExtentRepr::deserialize(deserializer).map_err(|_| {
            D::Error::custom("invalid time extent, expected an array or a string")
        })?;
        match repr {
            TimeExtentRepr::Instant(text) => TimeExtent::parse(&text).map_err(D::Error::custom),
            TimeExtentRepr::Bounds(bounds) => {
                let [begin, end] = <[Option<String>; 2]>::try_from(bounds).map_err(|b| {
                    D::Error::custom(format!(
                        "invalid time extent array, expected exactly 2 elements, found {}",
                        b.len()
                    ))
                })?;
                let bound = |b: Option<String>| match b {
                    Some(text) => TimeBound::parse(&text),
                    None => Ok(TimeBound::Open),
                };
                Ok(TimeExtent::period(
                    bound(begin).map_err(D::Error::custom)?,
                    bound(end).map_err(D::Error::custom)?,
                ))
            }
        }
    }
}
