//! Line-oriented console prompts.
//!
//! Every reader loops until the input parses; an empty line where a
//! value is required re-prompts. All IO goes through stdin/stdout.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Weekday};
use marquee_core::codec;
use marquee_core::store::Confirm;
use strum::IntoEnumIterator;

fn read_trimmed(prompt: &str) -> String {
  print!("{prompt}: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  // EOF on stdin behaves like an empty line.
  io::stdin().lock().read_line(&mut line).ok();
  line.trim().to_string()
}

/// A free-form line, re-prompting while empty.
pub fn read_line(prompt: &str) -> String {
  loop {
    let line = read_trimmed(prompt);
    if !line.is_empty() {
      return line;
    }
    println!("A value is required.");
  }
}

/// A free-form line where an empty answer means "keep the current value".
pub fn read_line_or(prompt: &str, current: &str) -> String {
  let line = read_trimmed(&format!("{prompt} [{current}]"));
  if line.is_empty() { current.to_string() } else { line }
}

pub fn read_u32(prompt: &str) -> u32 {
  loop {
    match read_line(prompt).parse() {
      Ok(n) => return n,
      Err(_) => println!("Please enter a whole number."),
    }
  }
}

pub fn read_i32(prompt: &str) -> i32 {
  loop {
    match read_line(prompt).parse() {
      Ok(n) => return n,
      Err(_) => println!("Please enter a whole number."),
    }
  }
}

/// A wall-clock time, `HH:MM` or `HH:MM:SS`.
pub fn read_time(prompt: &str) -> NaiveTime {
  loop {
    match codec::parse_time(&read_line(&format!("{prompt} (HH:MM)"))) {
      Ok(time) => return time,
      Err(_) => println!("Please enter a time like 20:30."),
    }
  }
}

/// A duration given in whole minutes.
pub fn read_minutes(prompt: &str) -> Duration {
  loop {
    let minutes = read_u32(&format!("{prompt} (minutes)"));
    if minutes > 0 {
      return Duration::minutes(i64::from(minutes));
    }
    println!("The duration must be at least one minute.");
  }
}

/// Pick one variant of a strum-iterable enum from a numbered list.
pub fn read_choice<T>(prompt: &str) -> T
where
  T: IntoEnumIterator + fmt::Display + Copy,
{
  let options: Vec<T> = T::iter().collect();
  println!("{prompt}:");
  for (index, option) in options.iter().enumerate() {
    println!("  {}. {option}", index + 1);
  }
  loop {
    let picked = read_u32("Choice") as usize;
    if (1..=options.len()).contains(&picked) {
      return options[picked - 1];
    }
    println!("Please pick a number between 1 and {}.", options.len());
  }
}

pub fn read_weekday(prompt: &str) -> Weekday {
  loop {
    match Weekday::from_str(&read_line(&format!("{prompt} (e.g. monday)"))) {
      Ok(day) => return day,
      Err(_) => println!("Please enter a day of the week."),
    }
  }
}

/// Interactive yes/no for irreversible store operations. Anything other
/// than an explicit yes declines.
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
  fn confirm(&mut self, prompt: &str) -> bool {
    println!("{prompt}");
    let answer = read_trimmed("Proceed? [y/N]").to_lowercase();
    answer == "y" || answer == "yes"
  }
}
