//! Encoding and decoding helpers between Rust domain values and the
//! plain-text representations stored in the JSON documents.
//!
//! Durations are stored as ISO-8601 duration text (`PT2H15M`); times of
//! day as `HH:MM:SS` (a missing seconds component is accepted on read).
//! Both are exposed as serde `with =` modules so entity structs can opt
//! in per field.

use chrono::{Duration, NaiveTime};

use crate::{Error, Result};

// ─── Duration ────────────────────────────────────────────────────────────────

/// Render a duration as ISO-8601 text, e.g. `PT2H15M`, `PT45M`, `PT0S`.
pub fn encode_duration(d: Duration) -> String {
  let total = d.num_seconds().max(0);
  let hours = total / 3600;
  let minutes = (total % 3600) / 60;
  let seconds = total % 60;

  let mut out = String::from("PT");
  if hours > 0 {
    out.push_str(&format!("{hours}H"));
  }
  if minutes > 0 {
    out.push_str(&format!("{minutes}M"));
  }
  if seconds > 0 || total == 0 {
    out.push_str(&format!("{seconds}S"));
  }
  out
}

/// Parse ISO-8601 duration text. Accepts the `PnDTnHnMnS` shape with any
/// subset of components present; negative durations are rejected.
pub fn parse_duration(text: &str) -> Result<Duration> {
  let bad = || Error::Serialization(serde::de::Error::custom(format!("invalid duration: {text:?}")));

  let rest = text.strip_prefix('P').ok_or_else(bad)?;
  let (date_part, time_part) = match rest.split_once('T') {
    Some((d, t)) => (d, t),
    None => (rest, ""),
  };

  let mut seconds: i64 = 0;
  let mut parse_components = |part: &str, in_time: bool| -> Result<()> {
    let mut digits = String::new();
    for ch in part.chars() {
      if ch.is_ascii_digit() {
        digits.push(ch);
        continue;
      }
      let value: i64 = digits.parse().map_err(|_| bad())?;
      digits.clear();
      let scale = match (ch, in_time) {
        ('D', false) => 86_400,
        ('H', true) => 3600,
        ('M', true) => 60,
        ('S', true) => 1,
        _ => return Err(bad()),
      };
      // Overflow during scaling is malformed input.
      seconds = value
        .checked_mul(scale)
        .and_then(|v| seconds.checked_add(v))
        .ok_or_else(bad)?;
    }
    if digits.is_empty() { Ok(()) } else { Err(bad()) }
  };

  parse_components(date_part, false)?;
  parse_components(time_part, true)?;
  Duration::try_seconds(seconds).ok_or_else(bad)
}

/// serde adapter: `#[serde(with = "marquee_core::codec::duration_iso8601")]`.
pub mod duration_iso8601 {
  use chrono::Duration;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&super::encode_duration(*d))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(de)?;
    super::parse_duration(&text).map_err(D::Error::custom)
  }
}

// ─── Time of day ─────────────────────────────────────────────────────────────

pub fn encode_time(t: NaiveTime) -> String { t.format("%H:%M:%S").to_string() }

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(text, "%H:%M:%S")
    .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
    .map_err(|_| Error::Serialization(serde::de::Error::custom(format!("invalid time of day: {text:?}"))))
}

/// serde adapter: `#[serde(with = "marquee_core::codec::time_of_day")]`.
pub mod time_of_day {
  use chrono::NaiveTime;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(t: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&super::encode_time(*t))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
    let text = String::deserialize(de)?;
    super::parse_time(&text).map_err(D::Error::custom)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveTime};

  use super::{encode_duration, encode_time, parse_duration, parse_time};

  #[test]
  fn duration_encoding() {
    assert_eq!(encode_duration(Duration::minutes(135)), "PT2H15M");
    assert_eq!(encode_duration(Duration::minutes(45)), "PT45M");
    assert_eq!(encode_duration(Duration::seconds(90)), "PT1M30S");
    assert_eq!(encode_duration(Duration::zero()), "PT0S");
  }

  #[test]
  fn duration_parsing() {
    assert_eq!(parse_duration("PT2H15M").unwrap(), Duration::minutes(135));
    assert_eq!(parse_duration("PT90M").unwrap(), Duration::minutes(90));
    assert_eq!(parse_duration("PT0S").unwrap(), Duration::zero());
    assert_eq!(parse_duration("P1DT1H").unwrap(), Duration::hours(25));
    assert!(parse_duration("2h15m").is_err());
    assert!(parse_duration("PT2X").is_err());
  }

  #[test]
  fn oversized_duration_components_are_rejected() {
    // Overflows i64 seconds during scaling.
    assert!(parse_duration("PT9000000000000000H").is_err());
    // Sum of components overflows even though each fits.
    assert!(parse_duration("P106751991167300DT9223372036854775807S").is_err());
    // More digits than i64 can hold.
    assert!(parse_duration("PT99999999999999999999S").is_err());
    // Fits in i64 seconds but exceeds what a duration can represent.
    assert!(parse_duration("PT9223372036854775807S").is_err());
  }

  #[test]
  fn duration_round_trip() {
    for minutes in [0, 1, 59, 60, 95, 135, 240] {
      let d = Duration::minutes(minutes);
      assert_eq!(parse_duration(&encode_duration(d)).unwrap(), d);
    }
  }

  #[test]
  fn time_encoding_and_parsing() {
    let t = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
    assert_eq!(encode_time(t), "14:30:00");
    assert_eq!(parse_time("14:30:00").unwrap(), t);
    assert_eq!(parse_time("14:30").unwrap(), t);
    assert!(parse_time("25:00").is_err());
    assert!(parse_time("half past two").is_err());
  }
}
