//! Wall-clock timestamps as stored in the history tables.
//!
//! Timestamps are naive local times written as `YYYY-MM-DD HH:MM:SS`. The
//! decoder also accepts the ISO-8601 `T` separator, fractional seconds and
//! bare dates, since hand-edited tables tend to contain all three.
//!
//! The module doubles as a `#[serde(with = "...")]` adapter.

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound as _};
use serde::{Deserialize, Deserializer, Serializer};

use crate::{Error, Result};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED: &[&str] = &[
  FORMAT,
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M:%S%.f",
];

/// The current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime { Local::now().naive_local().trunc_subsecs(0) }

pub fn encode(ts: NaiveDateTime) -> String { ts.format(FORMAT).to_string() }

pub fn decode(s: &str) -> Result<NaiveDateTime> {
  let s = s.trim();
  ACCEPTED
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
    .ok_or_else(|| Error::InvalidTimestamp(s.to_owned()))
}

pub fn serialize<S: Serializer>(
  ts: &NaiveDateTime,
  serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
  serializer.serialize_str(&encode(*ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<NaiveDateTime, D::Error> {
  let s = String::deserialize(deserializer)?;
  decode(&s).map_err(serde::de::Error::custom)
}
