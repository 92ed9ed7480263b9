//! Staff users: a `User` owns exactly one `Account` and one
//! `PersonalData`. Neither has a lifecycle of its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::entity::Identifiable;

/// Role hierarchy; variants are declared in ascending order so the
/// derived `Ord` gives FOUNDER > ADMIN > EMPLOYEE.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
  EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Employee,
  Admin,
  Founder,
}

/// Login credentials and status flags. The nickname is unique across
/// all users; the password is an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub nickname:             String,
  pub password:             String,
  pub active:               bool,
  pub must_change_password: bool,
  pub role:                 Role,
}

/// National id, email and phone number are each unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
  pub national_id:           String,
  pub first_name:            String,
  pub last_name:             String,
  pub email:                 String,
  pub phone_number:          String,
  pub must_complete_profile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:            u32,
  pub account:       Account,
  pub personal_data: PersonalData,
}

impl User {
  pub fn role(&self) -> Role { self.account.role }

  pub fn is_founder(&self) -> bool { self.account.role == Role::Founder }
}

impl PartialEq for User {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for User {}

impl Identifiable for User {
  type Id = u32;

  fn id(&self) -> u32 { self.id }
}

impl fmt::Display for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "ID: {}.", self.id)?;
    writeln!(f, "Nickname: {} ({}).", self.account.nickname, self.account.role)?;
    writeln!(
      f,
      "Account status: {}.",
      if self.account.active { "active" } else { "inactive" }
    )?;
    writeln!(
      f,
      "Name: {} {}. National id: {}.",
      self.personal_data.first_name, self.personal_data.last_name, self.personal_data.national_id
    )?;
    writeln!(
      f,
      "Email: {}. Phone: {}.",
      self.personal_data.email, self.personal_data.phone_number
    )
  }
}

#[cfg(test)]
mod tests {
  use super::Role;

  #[test]
  fn role_hierarchy_is_strictly_ordered() {
    assert!(Role::Founder > Role::Admin);
    assert!(Role::Admin > Role::Employee);
    assert!(Role::Founder > Role::Employee);
  }
}
