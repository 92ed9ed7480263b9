//! The interactive menu tree.
//!
//! One [`App`] owns the managers and the in-memory weekly schedule; the
//! menu loop threads the logged-in [`Session`] explicitly into every
//! operation that needs an actor.

use marquee_core::movie::{AgeRating, Country, Language, MovieGenre, MovieStatus};
use marquee_core::schedule::{ALL_WEEKDAYS, WeeklySchedule};
use marquee_core::user::{PersonalData, Role, User};
use marquee_managers::{MovieManager, NewMovie, NewUser, Session, UserManager, login};

use crate::console::{
  ConsoleConfirm, read_choice, read_i32, read_line, read_line_or, read_minutes, read_time,
  read_u32, read_weekday,
};

pub struct App {
  pub movies:   MovieManager,
  pub users:    UserManager,
  pub schedule: WeeklySchedule,
}

/// Print a manager error the way the console reports every refusal.
fn report(error: impl std::fmt::Display) {
  println!("Error: {error}");
}

impl App {
  pub fn run(&mut self) {
    loop {
      println!();
      println!("=== Marquee cinema manager ===");
      println!("1. Log in");
      println!("2. Now showing");
      println!("0. Exit");
      match read_u32("Choice") {
        1 => self.login_flow(),
        2 => self.print_listings(),
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }

  fn print_listings(&self) {
    let listings = self.movies.listings();
    if listings.is_empty() {
      println!("Nothing on the board right now.");
      return;
    }
    for movie in listings {
      print!("{movie}");
    }
  }

  // ── Login ─────────────────────────────────────────────────────────────

  fn login_flow(&mut self) {
    let nickname = read_line("Nickname");
    let password = read_line("Password");

    let mut session = match login(&mut self.users, &nickname, &password) {
      Ok(session) => session,
      Err(error) => return report(error),
    };

    if let Err(error) = self.first_login_chores(&mut session) {
      return report(error);
    }

    self.session_menu(&mut session);
  }

  /// Forced follow-ups on accounts flagged at creation time.
  fn first_login_chores(&mut self, session: &mut Session) -> marquee_managers::Result<()> {
    if session.user().account.must_change_password {
      println!("You must choose a new password before continuing.");
      let new_password = read_line("New password");
      self.users.force_password_change(session.user().id, &new_password)?;
      session.refresh(&mut self.users)?;
    }

    if session.user().personal_data.must_complete_profile {
      println!("Your personal data is incomplete. Please fill it in.");
      let data = PersonalData {
        national_id:           read_line("National id"),
        first_name:            read_line("First name"),
        last_name:             read_line("Last name"),
        email:                 read_line("Email"),
        phone_number:          read_line("Phone number"),
        must_complete_profile: false,
      };
      self.users.force_personal_data_change(session.user().id, data)?;
      session.refresh(&mut self.users)?;
    }

    Ok(())
  }

  fn session_menu(&mut self, session: &mut Session) {
    loop {
      let user = session.user();
      println!();
      println!(
        "--- Logged in as {} ({}) ---",
        user.account.nickname,
        user.role()
      );
      println!("1. Movies");
      println!("2. Weekly schedule");
      if user.role() >= Role::Admin {
        println!("3. Staff");
      }
      println!("4. My account");
      println!("0. Log out");

      match read_u32("Choice") {
        1 => self.movie_menu(),
        2 => self.schedule_menu(),
        3 if session.user().role() >= Role::Admin => self.user_menu(session),
        4 => self.account_menu(session),
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }

  // ── Movies ────────────────────────────────────────────────────────────

  fn movie_menu(&mut self) {
    loop {
      println!();
      println!("--- Movies ---");
      println!("1. List all");
      println!("2. Search");
      println!("3. Add");
      println!("4. Edit");
      println!("5. Change status");
      println!("6. Delete");
      println!("0. Back");

      match read_u32("Choice") {
        1 => {
          for movie in self.movies.find_all() {
            print!("{movie}");
          }
        }
        2 => self.movie_search_menu(),
        3 => self.add_movie(),
        4 => self.edit_movie(),
        5 => self.change_movie_status(),
        6 => self.delete_movie(),
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }

  fn movie_search_menu(&self) {
    println!();
    println!("--- Search movies ---");
    println!("1. By title");
    println!("2. By director");
    println!("3. By producer");
    println!("4. By genre");
    println!("5. By audio language");
    println!("6. By country");
    println!("7. By age rating");
    println!("8. By status");
    println!("9. Released since a year");
    println!("10. At most a duration");

    let results = match read_u32("Choice") {
      1 => self.movies.title_contains(&read_line("Title contains")),
      2 => self.movies.director_contains(&read_line("Director contains")),
      3 => self.movies.producer_contains(&read_line("Producer contains")),
      4 => self.movies.by_genre(read_choice::<MovieGenre>("Genre")),
      5 => self.movies.by_audio(read_choice::<Language>("Audio language")),
      6 => self.movies.from_country(read_choice::<Country>("Country")),
      7 => self.movies.by_age_rating(read_choice::<AgeRating>("Age rating")),
      8 => self.movies.by_status(read_choice::<MovieStatus>("Status")),
      9 => self.movies.released_from(read_i32("Released in or after")),
      10 => self.movies.with_max_duration(read_minutes("Maximum duration")),
      _ => return println!("Unknown option."),
    };

    if results.is_empty() {
      println!("No matches.");
    }
    for movie in results {
      print!("{movie}");
    }
  }

  fn add_movie(&mut self) {
    let new = NewMovie {
      title:        read_line("Title"),
      audio:        read_choice::<Language>("Audio language"),
      subtitles:    read_choice::<Language>("Subtitle language"),
      duration:     read_minutes("Duration"),
      producer:     read_line("Producer"),
      director:     read_line("Director"),
      release_year: read_i32("Release year"),
      country:      read_choice::<Country>("Country"),
      age_rating:   read_choice::<AgeRating>("Age rating"),
      genre:        read_choice::<MovieGenre>("Genre"),
    };
    match self.movies.add(new) {
      Ok(movie) => println!("Added \"{}\" with id {}.", movie.title, movie.id),
      Err(error) => report(error),
    }
  }

  fn edit_movie(&mut self) {
    let id = read_u32("Movie id");
    let mut movie = match self.movies.find_by_id(id) {
      Ok(movie) => movie,
      Err(error) => return report(error),
    };

    movie.title = read_line_or("Title", &movie.title);
    movie.producer = read_line_or("Producer", &movie.producer);
    movie.director = read_line_or("Director", &movie.director);
    movie.release_year = read_i32("Release year");
    movie.duration = read_minutes("Duration");
    movie.audio = read_choice::<Language>("Audio language");
    movie.subtitles = read_choice::<Language>("Subtitle language");
    movie.country = read_choice::<Country>("Country");
    movie.age_rating = read_choice::<AgeRating>("Age rating");
    movie.genre = read_choice::<MovieGenre>("Genre");

    match self.movies.update(movie) {
      Ok(()) => println!("Updated."),
      Err(error) => report(error),
    }
  }

  fn change_movie_status(&mut self) {
    let id = read_u32("Movie id");
    let status = read_choice::<MovieStatus>("New status");
    match self.movies.set_status(id, status) {
      Ok(()) => println!("Status changed to {status}."),
      Err(error) => report(error),
    }
  }

  fn delete_movie(&mut self) {
    let id = read_u32("Movie id");
    match self.movies.delete(id, &mut ConsoleConfirm) {
      Ok(outcome) => println!("{outcome:?}."),
      Err(error) => report(error),
    }
  }

  // ── Schedule ──────────────────────────────────────────────────────────

  fn schedule_menu(&mut self) {
    loop {
      println!();
      println!("--- Weekly schedule ---");
      println!("1. Show the week");
      println!("2. Show one day");
      println!("3. Schedule a screening");
      println!("0. Back");

      match read_u32("Choice") {
        1 => {
          for day in ALL_WEEKDAYS {
            self.print_day(day);
          }
        }
        2 => {
          let day = read_weekday("Day");
          self.print_day(day);
        }
        3 => self.schedule_screening(),
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }

  fn print_day(&self, day: chrono::Weekday) {
    let showtimes = self.schedule.showtimes_for(day);
    if showtimes.is_empty() {
      println!("{day}: no screenings.");
      return;
    }
    println!("{day}:");
    for showtime in showtimes {
      println!("  {showtime}");
    }
  }

  fn schedule_screening(&mut self) {
    let candidates = self.movies.by_status(MovieStatus::NowShowing);
    if candidates.is_empty() {
      println!("No movie is currently showing; change a movie's status first.");
      return;
    }
    println!("Now showing:");
    for movie in &candidates {
      let minutes = movie.duration.num_minutes();
      println!("  {}. {} ({minutes} min)", movie.id, movie.title);
    }

    let id = read_u32("Movie id");
    let Some(movie) = candidates.iter().find(|m| m.id == id) else {
      return println!("That id is not on the now-showing list.");
    };
    let duration = movie.duration;

    let day = read_weekday("Day");
    let start = read_time("Start time");
    match self.schedule.propose(day, start, duration) {
      Ok(showtime) => println!("Scheduled \"{}\" on {day}, {showtime}.", movie.title),
      Err(error) => report(error),
    }
  }

  // ── Staff ─────────────────────────────────────────────────────────────

  fn user_menu(&mut self, session: &Session) {
    loop {
      println!();
      println!("--- Staff ---");
      println!("1. List all");
      println!("2. Register an employee");
      println!("3. Edit a record");
      println!("4. Deactivate an account");
      println!("5. Reactivate an account");
      println!("6. Permanently delete an account");
      if session.user().is_founder() {
        println!("7. Grant admin privileges");
        println!("8. Revoke admin privileges");
      }
      println!("0. Back");

      match read_u32("Choice") {
        1 => {
          for user in self.users.find_all() {
            print!("{user}");
          }
        }
        2 => self.register_employee(),
        3 => self.edit_user(session),
        4 => self.with_target(|app, id| app.users.deactivate(session, id)),
        5 => self.with_target(|app, id| app.users.reactivate(session, id)),
        6 => self.delete_user(session),
        7 if session.user().is_founder() => {
          self.with_target(|app, id| app.users.grant_privileges(session, id))
        }
        8 if session.user().is_founder() => {
          self.with_target(|app, id| app.users.revoke_privileges(session, id))
        }
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }

  /// Prompt for a target user id and run one account operation.
  fn with_target(
    &mut self,
    operation: impl FnOnce(&mut Self, u32) -> marquee_managers::Result<()>,
  ) {
    let id = read_u32("User id");
    match operation(self, id) {
      Ok(()) => println!("Done."),
      Err(error) => report(error),
    }
  }

  fn register_employee(&mut self) {
    let new = NewUser {
      nickname:     read_line("Nickname"),
      password:     read_line("Temporary password"),
      national_id:  read_line("National id"),
      first_name:   read_line("First name"),
      last_name:    read_line("Last name"),
      email:        read_line("Email"),
      phone_number: read_line("Phone number"),
    };
    match self.users.add(new) {
      Ok(user) => println!("Registered {} with id {}.", user.account.nickname, user.id),
      Err(error) => report(error),
    }
  }

  fn edit_user(&mut self, session: &Session) {
    let id = read_u32("User id");
    let current = match self.users.find_by_id(id) {
      Ok(user) => user,
      Err(error) => return report(error),
    };

    let edited = edit_user_record(current);
    match self.users.update(session, edited) {
      Ok(()) => println!("Updated."),
      Err(error) => report(error),
    }
  }

  fn delete_user(&mut self, session: &Session) {
    let id = read_u32("User id");
    match self.users.delete_permanently(session, id, &mut ConsoleConfirm) {
      Ok(outcome) => println!("{outcome:?}."),
      Err(error) => report(error),
    }
  }

  // ── My account ────────────────────────────────────────────────────────

  fn account_menu(&mut self, session: &mut Session) {
    loop {
      println!();
      println!("--- My account ---");
      println!("1. Show my record");
      println!("2. Change my password");
      println!("3. Edit my personal data");
      println!("0. Back");

      match read_u32("Choice") {
        1 => print!("{}", session.user()),
        2 => {
          let new_password = read_line("New password");
          match self.users.force_password_change(session.user().id, &new_password) {
            Ok(()) => {
              let _ = session.refresh(&mut self.users);
              println!("Password changed.");
            }
            Err(error) => report(error),
          }
        }
        3 => {
          let current = session.user().personal_data.clone();
          let data = PersonalData {
            national_id:           read_line_or("National id", &current.national_id),
            first_name:            read_line_or("First name", &current.first_name),
            last_name:             read_line_or("Last name", &current.last_name),
            email:                 read_line_or("Email", &current.email),
            phone_number:          read_line_or("Phone number", &current.phone_number),
            must_complete_profile: false,
          };
          match self.users.force_personal_data_change(session.user().id, data) {
            Ok(()) => {
              let _ = session.refresh(&mut self.users);
              println!("Personal data updated.");
            }
            Err(error) => report(error),
          }
        }
        0 => return,
        _ => println!("Unknown option."),
      }
    }
  }
}

/// Field-by-field edit; an empty answer keeps the current value.
fn edit_user_record(mut user: User) -> User {
  user.account.nickname = read_line_or("Nickname", &user.account.nickname);
  user.personal_data.national_id =
    read_line_or("National id", &user.personal_data.national_id);
  user.personal_data.first_name = read_line_or("First name", &user.personal_data.first_name);
  user.personal_data.last_name = read_line_or("Last name", &user.personal_data.last_name);
  user.personal_data.email = read_line_or("Email", &user.personal_data.email);
  user.personal_data.phone_number =
    read_line_or("Phone number", &user.personal_data.phone_number);
  user
}
