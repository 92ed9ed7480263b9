//! The logged-in session, passed explicitly to every operation that
//! needs to know who is acting. There is no ambient current user.

use marquee_core::user::User;

use crate::{Error, Result, users::UserManager};

/// Proof of a successful login; holds a snapshot of the user as they
/// were at login time.
#[derive(Debug, Clone)]
pub struct Session {
  user: User,
}

impl Session {
  pub fn new(user: User) -> Self { Self { user } }

  pub fn user(&self) -> &User { &self.user }

  /// Managers reload from disk on every operation, so a long-lived
  /// session can go stale; refresh pulls the current record.
  pub fn refresh(&mut self, users: &mut UserManager) -> Result<()> {
    self.user = users.find_by_id(self.user.id)?;
    Ok(())
  }
}

/// Check credentials against the user document. A wrong nickname and a
/// wrong password are indistinguishable to the caller.
pub fn login(users: &mut UserManager, nickname: &str, password: &str) -> Result<Session> {
  let Some(user) = users.find_by_nickname(nickname) else {
    return Err(Error::LoginFailed);
  };
  if user.account.password != password {
    return Err(Error::LoginFailed);
  }
  if !user.account.active {
    return Err(Error::AccountInactive);
  }

  tracing::info!(nickname, role = %user.role(), "login accepted");
  Ok(Session::new(user))
}

#[cfg(test)]
mod tests {
  use super::login;
  use crate::{Error, FounderBootstrap, Session, UserManager};

  fn manager(dir: &tempfile::TempDir) -> UserManager {
    UserManager::open(dir.path().join("user.json"), &FounderBootstrap::default()).unwrap()
  }

  #[test]
  fn correct_credentials_open_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut users = manager(&dir);

    let session = login(&mut users, "founder", "change.me").unwrap();
    assert!(session.user().is_founder());
    assert!(session.user().account.must_change_password);
  }

  #[test]
  fn wrong_nickname_and_wrong_password_fail_the_same_way() {
    let dir = tempfile::tempdir().unwrap();
    let mut users = manager(&dir);

    assert!(matches!(
      login(&mut users, "nobody", "change.me"),
      Err(Error::LoginFailed)
    ));
    assert!(matches!(
      login(&mut users, "founder", "wrong"),
      Err(Error::LoginFailed)
    ));
  }

  #[test]
  fn inactive_accounts_cannot_log_in() {
    let dir = tempfile::tempdir().unwrap();
    let mut users = manager(&dir);
    let founder = Session::new(users.find_by_nickname("founder").unwrap());

    let employee = users
      .add(crate::NewUser {
        nickname:     "dana".to_string(),
        password:     "pw".to_string(),
        national_id:  "N-0001".to_string(),
        first_name:   "Dana".to_string(),
        last_name:    "Reyes".to_string(),
        email:        "dana@example.com".to_string(),
        phone_number: "555-0001".to_string(),
      })
      .unwrap();
    users.deactivate(&founder, employee.id).unwrap();

    assert!(matches!(
      login(&mut users, "dana", "pw"),
      Err(Error::AccountInactive)
    ));
  }

  #[test]
  fn refresh_picks_up_record_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut users = manager(&dir);

    let mut session = login(&mut users, "founder", "change.me").unwrap();
    users
      .force_password_change(session.user().id, "s3cure")
      .unwrap();

    session.refresh(&mut users).unwrap();
    assert!(!session.user().account.must_change_password);
  }
}
