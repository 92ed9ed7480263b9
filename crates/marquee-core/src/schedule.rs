//! Weekly showtime scheduling.
//!
//! A [`WeeklySchedule`] owns, per weekday, an ordered list of showtimes
//! bounded by the cinema's opening and closing hours. Proposals are
//! validated against the bounds and against every existing same-day
//! interval; rejected proposals leave the schedule unchanged. Intervals
//! are kept in insertion order, never re-sorted.

use std::collections::HashMap;
use std::fmt;

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, codec};

/// Default turnaround between the end of a movie and the next seating.
pub fn default_cleaning_buffer() -> Duration { Duration::minutes(30) }

pub const ALL_WEEKDAYS: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

// ─── Showtime ────────────────────────────────────────────────────────────────

/// A scheduled screening: start time plus a derived end time
/// (start + movie duration + cleaning buffer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
  #[serde(with = "crate::codec::time_of_day")]
  start:    NaiveTime,
  #[serde(with = "crate::codec::time_of_day")]
  end:      NaiveTime,
  #[serde(with = "crate::codec::duration_iso8601")]
  cleaning: Duration,
}

impl Showtime {
  /// Returns `None` if the screening would spill past midnight, which no
  /// operating window can accommodate.
  pub fn new(start: NaiveTime, movie_duration: Duration) -> Option<Self> {
    Self::with_cleaning_buffer(start, movie_duration, default_cleaning_buffer())
  }

  pub fn with_cleaning_buffer(
    start: NaiveTime,
    movie_duration: Duration,
    cleaning: Duration,
  ) -> Option<Self> {
    let (end, wrapped) = start.overflowing_add_signed(movie_duration + cleaning);
    if wrapped != 0 {
      return None;
    }
    Some(Self { start, end, cleaning })
  }

  pub fn start(&self) -> NaiveTime { self.start }

  pub fn end(&self) -> NaiveTime { self.end }

  pub fn cleaning_buffer(&self) -> Duration { self.cleaning }
}

impl fmt::Display for Showtime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", codec::encode_time(self.start), codec::encode_time(self.end))
  }
}

/// Open-interval intersection: two showtimes that merely touch at an
/// endpoint do not overlap.
pub fn overlaps(a: &Showtime, b: &Showtime) -> bool {
  a.start < b.end && b.start < a.end
}

// ─── WeeklySchedule ──────────────────────────────────────────────────────────

pub struct WeeklySchedule {
  days:    HashMap<Weekday, Vec<Showtime>>,
  opening: NaiveTime,
  closing: NaiveTime,
}

impl WeeklySchedule {
  pub fn new(opening: NaiveTime, closing: NaiveTime) -> Result<Self> {
    if opening >= closing {
      return Err(Error::InvalidOperatingHours { opening, closing });
    }
    let days = ALL_WEEKDAYS.iter().map(|d| (*d, Vec::new())).collect();
    Ok(Self { days, opening, closing })
  }

  pub fn opening(&self) -> NaiveTime { self.opening }

  pub fn closing(&self) -> NaiveTime { self.closing }

  /// Validate a proposed screening and, if it fits, append it to the
  /// day's list.
  pub fn propose(
    &mut self,
    day: Weekday,
    start: NaiveTime,
    movie_duration: Duration,
  ) -> Result<&Showtime> {
    if start < self.opening || start > self.closing {
      return Err(Error::OutsideOperatingHours {
        start,
        opening: self.opening,
        closing: self.closing,
      });
    }

    let candidate = Showtime::new(start, movie_duration).ok_or(Error::EndsAfterClosing {
      end:     self.closing, // wrapped past midnight; report the bound itself
      closing: self.closing,
    })?;

    if candidate.end() > self.closing {
      return Err(Error::EndsAfterClosing {
        end:     candidate.end(),
        closing: self.closing,
      });
    }

    let day_showtimes = self.days.get_mut(&day).expect("all weekdays initialised");
    if let Some(existing) = day_showtimes.iter().find(|s| overlaps(s, &candidate)) {
      return Err(Error::OverlappingShowtime {
        start: existing.start(),
        end:   existing.end(),
      });
    }

    day_showtimes.push(candidate);
    Ok(day_showtimes.last().expect("just pushed"))
  }

  pub fn showtimes_for(&self, day: Weekday) -> &[Showtime] {
    self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
