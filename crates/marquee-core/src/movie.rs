//! Movie — the catalogue entity.
//!
//! Equality is by id only: two records with the same id are the same
//! movie as far as the store's uniqueness policy is concerned, whatever
//! their other fields say.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::entity::Identifiable;

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
  English,
  Spanish,
  French,
  German,
  Italian,
  Portuguese,
  Japanese,
  Korean,
  Mandarin,
  Hindi,
  None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
  Usa,
  Uk,
  Spain,
  France,
  Germany,
  Italy,
  Japan,
  SouthKorea,
  China,
  India,
  Argentina,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRating {
  G,
  Pg,
  Pg13,
  R,
  Nc17,
  NotRated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieGenre {
  Action,
  Animation,
  Comedy,
  Documentary,
  Drama,
  Horror,
  Romance,
  SciFi,
  Thriller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieStatus {
  ComingSoon,
  NowShowing,
  Archived,
}

// ─── Movie ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
  pub id:           u32,
  pub title:        String,
  pub audio:        Language,
  pub subtitles:    Language,
  #[serde(with = "crate::codec::duration_iso8601")]
  pub duration:     Duration,
  pub producer:     String,
  pub director:     String,
  pub release_year: i32,
  pub country:      Country,
  pub age_rating:   AgeRating,
  pub genre:        MovieGenre,
  pub status:       MovieStatus,
}

impl PartialEq for Movie {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Movie {}

impl Identifiable for Movie {
  type Id = u32;

  fn id(&self) -> u32 { self.id }
}

impl fmt::Display for Movie {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let hours = self.duration.num_hours();
    let minutes = self.duration.num_minutes() % 60;
    writeln!(f, "--------------------------")?;
    writeln!(f, "Title: {}.", self.title)?;
    writeln!(f, "Audio: {}. Subtitles: {}.", self.audio, self.subtitles)?;
    writeln!(f, "Duration: {hours}h {minutes:02}min.")?;
    writeln!(f, "Producer: {}. Director: {}.", self.producer, self.director)?;
    writeln!(f, "Year: {}. Country: {}.", self.release_year, self.country)?;
    writeln!(f, "Age rating: {}. Genre: {}.", self.age_rating, self.genre)?;
    writeln!(f, "Status: {}.", self.status)
  }
}
