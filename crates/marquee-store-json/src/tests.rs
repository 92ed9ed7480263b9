//! Round-trip tests for `JsonGateway` against documents on a temp dir.

use std::collections::BTreeMap;

use chrono::Duration;
use marquee_core::movie::{AgeRating, Country, Language, Movie, MovieGenre, MovieStatus};
use marquee_core::user::{Account, PersonalData, Role, User};

use crate::JsonGateway;

fn movie(id: u32, title: &str, minutes: i64) -> Movie {
  Movie {
    id,
    title: title.to_string(),
    audio: Language::English,
    subtitles: Language::Spanish,
    duration: Duration::minutes(minutes),
    producer: "Pine Hill".to_string(),
    director: "R. Calloway".to_string(),
    release_year: 2021,
    country: Country::Usa,
    age_rating: AgeRating::Pg13,
    genre: MovieGenre::Drama,
    status: MovieStatus::NowShowing,
  }
}

fn user(id: u32, nickname: &str, role: Role) -> User {
  User {
    id,
    account: Account {
      nickname: nickname.to_string(),
      password: "secret".to_string(),
      active: true,
      must_change_password: false,
      role,
    },
    personal_data: PersonalData {
      national_id: format!("N-{id:04}"),
      first_name: "Dana".to_string(),
      last_name: "Reyes".to_string(),
      email: format!("{nickname}@example.com"),
      phone_number: format!("555-01{id:02}"),
      must_complete_profile: false,
    },
  }
}

/// Field-for-field comparison. Movie/User equality is by id only, so
/// compare the serialised forms instead.
fn assert_same<T: serde::Serialize>(a: &T, b: &T) {
  assert_eq!(
    serde_json::to_value(a).unwrap(),
    serde_json::to_value(b).unwrap()
  );
}

#[test]
fn movie_document_round_trips() {
  let dir = tempfile::tempdir().unwrap();
  let gateway = JsonGateway::new(dir.path().join("movie.json"));

  let movies = vec![movie(1, "The Long Reel", 135), movie(2, "Short Cut", 85)];
  gateway.save(&movies).unwrap();

  let loaded: Vec<Movie> = gateway.load(Vec::new());
  assert_same(&movies, &loaded);
}

#[test]
fn movie_durations_are_iso8601_text() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("movie.json");
  let gateway = JsonGateway::new(&path);

  gateway.save(&vec![movie(1, "The Long Reel", 135)]).unwrap();

  let raw = std::fs::read_to_string(&path).unwrap();
  assert!(raw.contains("\"PT2H15M\""), "raw document: {raw}");
}

#[test]
fn user_document_keys_are_stringified_ids() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("user.json");
  let gateway = JsonGateway::new(&path);

  let users: BTreeMap<u32, User> = [
    (1, user(1, "founder", Role::Founder)),
    (7, user(7, "dana", Role::Employee)),
  ]
  .into_iter()
  .collect();
  gateway.save(&users).unwrap();

  let raw = std::fs::read_to_string(&path).unwrap();
  assert!(raw.contains("\"1\""), "raw document: {raw}");
  assert!(raw.contains("\"7\""), "raw document: {raw}");

  let loaded: BTreeMap<u32, User> = gateway.load(BTreeMap::new());
  assert_same(&users, &loaded);
}

#[test]
fn missing_document_yields_default() {
  let dir = tempfile::tempdir().unwrap();
  let gateway = JsonGateway::new(dir.path().join("nope.json"));

  let loaded: Vec<Movie> = gateway.load(Vec::new());
  assert!(loaded.is_empty());
}

#[test]
fn corrupt_document_yields_default() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("movie.json");
  std::fs::write(&path, "{ not json").unwrap();

  let gateway = JsonGateway::new(&path);
  let loaded: Vec<Movie> = gateway.load(Vec::new());
  assert!(loaded.is_empty());
}

#[test]
fn save_overwrites_the_whole_document() {
  let dir = tempfile::tempdir().unwrap();
  let gateway = JsonGateway::new(dir.path().join("movie.json"));

  gateway.save(&vec![movie(1, "A", 90), movie(2, "B", 90)]).unwrap();
  gateway.save(&vec![movie(3, "C", 90)]).unwrap();

  let loaded: Vec<Movie> = gateway.load(Vec::new());
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded[0].id, 3);
}
