//! [`MovieManager`] — the catalogue over a list-backed store.
//!
//! Unlike users, the catalogue is loaded once at construction and kept
//! in memory; the document is rewritten after each mutation.

use std::path::PathBuf;

use chrono::Duration;
use marquee_core::movie::{AgeRating, Country, Language, Movie, MovieGenre, MovieStatus};
use marquee_core::store::{AcceptAll, BackingStrategy, Confirm, DeleteOutcome, GenericStore};
use marquee_store_json::JsonGateway;

use crate::Result;

/// Input to [`MovieManager::add`]; the id and initial status are
/// assigned by the manager.
#[derive(Debug, Clone)]
pub struct NewMovie {
  pub title:        String,
  pub audio:        Language,
  pub subtitles:    Language,
  pub duration:     Duration,
  pub producer:     String,
  pub director:     String,
  pub release_year: i32,
  pub country:      Country,
  pub age_rating:   AgeRating,
  pub genre:        MovieGenre,
}

pub struct MovieManager {
  store:   GenericStore<Movie>,
  gateway: JsonGateway,
  next_id: u32,
}

impl MovieManager {
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let gateway = JsonGateway::new(path);
    let mut store = GenericStore::new(BackingStrategy::ListWithDuplicates);

    let loaded: Vec<Movie> = gateway.load(Vec::new());
    let next_id = loaded.iter().map(|m| m.id).max().map_or(1, |max| max + 1);
    for movie in loaded {
      store.add(movie, true, &mut AcceptAll)?;
    }

    Ok(Self { store, gateway, next_id })
  }

  fn persist(&self) -> Result<()> {
    self.gateway.save(&self.store.find_all())?;
    Ok(())
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Register a new movie under the next available id, as coming soon.
  pub fn add(&mut self, new: NewMovie) -> Result<Movie> {
    let movie = Movie {
      id:           self.next_id,
      title:        new.title,
      audio:        new.audio,
      subtitles:    new.subtitles,
      duration:     new.duration,
      producer:     new.producer,
      director:     new.director,
      release_year: new.release_year,
      country:      new.country,
      age_rating:   new.age_rating,
      genre:        new.genre,
      status:       MovieStatus::ComingSoon,
    };

    self.store.add(movie.clone(), false, &mut AcceptAll)?;
    self.next_id += 1;
    self.persist()?;
    Ok(movie)
  }

  /// Replace the record whose id matches `updated`.
  pub fn update(&mut self, updated: Movie) -> Result<()> {
    self.store.update(updated)?;
    self.persist()
  }

  pub fn set_status(&mut self, id: u32, status: MovieStatus) -> Result<()> {
    let mut movie = self.find_by_id(id)?;
    movie.status = status;
    self.update(movie)
  }

  /// Delete after the collaborator confirms; a declined prompt leaves
  /// both the store and the document untouched.
  pub fn delete(&mut self, id: u32, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
    let outcome = self.store.delete(&id, confirm)?;
    if outcome == DeleteOutcome::Deleted {
      self.persist()?;
    }
    Ok(outcome)
  }

  // ── Queries ───────────────────────────────────────────────────────────

  pub fn find_by_id(&self, id: u32) -> Result<Movie> {
    self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()).into())
  }

  pub fn find_all(&self) -> Vec<Movie> { self.store.find_all() }

  pub fn find_by(&self, condition: impl Fn(&Movie) -> bool) -> Vec<Movie> {
    self.store.find_by(condition).into_iter().cloned().collect()
  }

  /// What a visitor sees on the board.
  pub fn listings(&self) -> Vec<Movie> {
    self.find_by(|m| m.status == MovieStatus::NowShowing)
  }

  // Search helpers over the in-memory catalogue. Text matches are
  // case-insensitive substring matches.

  pub fn title_contains(&self, needle: &str) -> Vec<Movie> {
    let needle = needle.to_lowercase();
    self.find_by(|m| m.title.to_lowercase().contains(&needle))
  }

  pub fn producer_contains(&self, needle: &str) -> Vec<Movie> {
    let needle = needle.to_lowercase();
    self.find_by(|m| m.producer.to_lowercase().contains(&needle))
  }

  pub fn director_contains(&self, needle: &str) -> Vec<Movie> {
    let needle = needle.to_lowercase();
    self.find_by(|m| m.director.to_lowercase().contains(&needle))
  }

  pub fn by_audio(&self, language: Language) -> Vec<Movie> {
    self.find_by(|m| m.audio == language)
  }

  pub fn by_subtitles(&self, language: Language) -> Vec<Movie> {
    self.find_by(|m| m.subtitles == language)
  }

  pub fn with_min_duration(&self, minimum: Duration) -> Vec<Movie> {
    self.find_by(|m| m.duration >= minimum)
  }

  pub fn with_max_duration(&self, maximum: Duration) -> Vec<Movie> {
    self.find_by(|m| m.duration <= maximum)
  }

  pub fn released_from(&self, year: i32) -> Vec<Movie> {
    self.find_by(|m| m.release_year >= year)
  }

  pub fn from_country(&self, country: Country) -> Vec<Movie> {
    self.find_by(|m| m.country == country)
  }

  pub fn by_age_rating(&self, rating: AgeRating) -> Vec<Movie> {
    self.find_by(|m| m.age_rating == rating)
  }

  pub fn by_genre(&self, genre: MovieGenre) -> Vec<Movie> {
    self.find_by(|m| m.genre == genre)
  }

  pub fn by_status(&self, status: MovieStatus) -> Vec<Movie> {
    self.find_by(|m| m.status == status)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Duration;
  use marquee_core::movie::{
    AgeRating, Country, Language, MovieGenre, MovieStatus,
  };
  use marquee_core::store::{DeclineAll, DeleteOutcome};

  use super::{MovieManager, NewMovie};
  use crate::Error;

  fn new_movie(title: &str, minutes: i64) -> NewMovie {
    NewMovie {
      title:        title.to_string(),
      audio:        Language::English,
      subtitles:    Language::Spanish,
      duration:     Duration::minutes(minutes),
      producer:     "Mirage Pictures".to_string(),
      director:     "R. Calloway".to_string(),
      release_year: 2024,
      country:      Country::Usa,
      age_rating:   AgeRating::Pg13,
      genre:        MovieGenre::Drama,
    }
  }

  fn manager(dir: &tempfile::TempDir) -> MovieManager {
    MovieManager::open(dir.path().join("movie.json")).unwrap()
  }

  #[test]
  fn catalogue_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = manager(&dir);
    let added = first.add(new_movie("Signal Fade", 135)).unwrap();
    assert_eq!(added.id, 1);
    assert_eq!(added.status, MovieStatus::ComingSoon);

    let second = manager(&dir);
    let reloaded = second.find_by_id(added.id).unwrap();
    assert_eq!(reloaded.title, "Signal Fade");
    assert_eq!(reloaded.duration, Duration::minutes(135));
  }

  #[test]
  fn ids_continue_from_the_persisted_maximum() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = manager(&dir);
    first.add(new_movie("One", 90)).unwrap();
    first.add(new_movie("Two", 90)).unwrap();

    let mut second = manager(&dir);
    let third = second.add(new_movie("Three", 90)).unwrap();
    assert_eq!(third.id, 3);
  }

  #[test]
  fn missing_movie_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    let err = manager.find_by_id(42).unwrap_err();
    assert!(matches!(
      err,
      Error::Core(marquee_core::Error::NotFound(_))
    ));
  }

  #[test]
  fn declined_delete_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let movie = manager.add(new_movie("Keeper", 100)).unwrap();

    let document_before =
      std::fs::read_to_string(dir.path().join("movie.json")).unwrap();

    let outcome = manager.delete(movie.id, &mut DeclineAll).unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(manager.find_all().len(), 1);

    let document_after =
      std::fs::read_to_string(dir.path().join("movie.json")).unwrap();
    assert_eq!(document_before, document_after);
  }

  #[test]
  fn listings_show_only_now_showing() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);

    let showing = manager.add(new_movie("On Screen", 110)).unwrap();
    manager.add(new_movie("Up Next", 95)).unwrap();
    let archived = manager.add(new_movie("Long Gone", 80)).unwrap();

    manager.set_status(showing.id, MovieStatus::NowShowing).unwrap();
    manager.set_status(archived.id, MovieStatus::Archived).unwrap();

    let listings = manager.listings();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "On Screen");
  }

  #[test]
  fn search_helpers_filter_the_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);

    let mut short = new_movie("The Short Cut", 85);
    short.genre = MovieGenre::Comedy;
    short.release_year = 2019;
    manager.add(short).unwrap();

    let mut long = new_movie("Night Harbor", 150);
    long.country = Country::France;
    long.audio = Language::French;
    manager.add(long).unwrap();

    assert_eq!(manager.title_contains("harbor").len(), 1);
    assert_eq!(manager.title_contains("HARBOR").len(), 1);
    assert_eq!(manager.by_genre(MovieGenre::Comedy).len(), 1);
    assert_eq!(manager.with_min_duration(Duration::minutes(120)).len(), 1);
    assert_eq!(manager.with_max_duration(Duration::minutes(90)).len(), 1);
    assert_eq!(manager.released_from(2024).len(), 1);
    assert_eq!(manager.from_country(Country::France).len(), 1);
    assert_eq!(manager.by_audio(Language::French).len(), 1);
    assert_eq!(manager.by_subtitles(Language::Spanish).len(), 2);
  }

  #[test]
  fn update_rewrites_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let mut movie = manager.add(new_movie("Draft Title", 100)).unwrap();

    movie.title = "Final Title".to_string();
    manager.update(movie.clone()).unwrap();
    assert_eq!(manager.find_by_id(movie.id).unwrap().title, "Final Title");

    let reopened = MovieManager::open(dir.path().join("movie.json")).unwrap();
    assert_eq!(reopened.find_by_id(movie.id).unwrap().title, "Final Title");
  }
}
