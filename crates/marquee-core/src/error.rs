//! Error types for `marquee-core`.

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no element found with id {0}")]
  NotFound(String),

  #[error("the element already exists in the store")]
  Duplicate,

  #[error("update target is not present in the store")]
  UpdateTargetMissing,

  #[error("start time {start} is outside operating hours ({opening} to {closing})")]
  OutsideOperatingHours {
    start:   NaiveTime,
    opening: NaiveTime,
    closing: NaiveTime,
  },

  #[error("showtime would end at {end}, after closing time {closing}")]
  EndsAfterClosing { end: NaiveTime, closing: NaiveTime },

  #[error("showtime {start} to {end} overlaps an existing one")]
  OverlappingShowtime { start: NaiveTime, end: NaiveTime },

  #[error("invalid operating hours: opening {opening} is not before closing {closing}")]
  InvalidOperatingHours {
    opening: NaiveTime,
    closing: NaiveTime,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
