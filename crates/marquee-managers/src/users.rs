//! [`UserManager`] — staff accounts over the keyed-map store.
//!
//! The on-disk document is the single source of truth: every public
//! operation reloads the full extent before acting and persists the
//! full extent afterwards. Ids are allocated once, at construction,
//! from the then-current maximum.

use std::collections::BTreeMap;
use std::path::PathBuf;

use marquee_core::store::{AcceptAll, BackingStrategy, Confirm, DeleteOutcome, GenericStore};
use marquee_core::user::{Account, PersonalData, Role, User};
use marquee_store_json::JsonGateway;

use crate::{Error, Result, policy, session::Session};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Credentials used to synthesise the founder account when the user
/// document is empty, so the system is never unusable.
#[derive(Debug, Clone)]
pub struct FounderBootstrap {
  pub nickname: String,
  pub password: String,
}

impl Default for FounderBootstrap {
  fn default() -> Self {
    Self {
      nickname: "founder".to_string(),
      password: "change.me".to_string(),
    }
  }
}

/// Input to [`UserManager::add`]; the id and role are assigned by the
/// manager (new users start as employees).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub nickname:     String,
  pub password:     String,
  pub national_id:  String,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone_number: String,
}

// ─── Manager ─────────────────────────────────────────────────────────────────

pub struct UserManager {
  store:   GenericStore<User>,
  gateway: JsonGateway,
  next_id: u32,
}

impl UserManager {
  /// Open the manager over `path`, bootstrapping a founder account if
  /// the document holds no users.
  pub fn open(path: impl Into<PathBuf>, bootstrap: &FounderBootstrap) -> Result<Self> {
    let mut manager = Self {
      store:   GenericStore::new(BackingStrategy::KeyedMap),
      gateway: JsonGateway::new(path),
      next_id: 1,
    };
    manager.reload();

    if manager.store.is_empty() {
      tracing::info!("user document is empty, bootstrapping the founder account");
      let founder = User {
        id:            1,
        account:       Account {
          nickname:             bootstrap.nickname.clone(),
          password:             bootstrap.password.clone(),
          active:               true,
          must_change_password: true,
          role:                 Role::Founder,
        },
        personal_data: PersonalData {
          national_id:           String::new(),
          first_name:            String::new(),
          last_name:             String::new(),
          email:                 String::new(),
          phone_number:          String::new(),
          must_complete_profile: true,
        },
      };
      manager.store.add(founder, false, &mut AcceptAll)?;
      manager.persist()?;
    }

    // Next-id is computed once, from the maximum present right now.
    // External edits to the document between constructions can skip or
    // reuse ids; preserved as observed behavior.
    manager.next_id = manager
      .store
      .find_all()
      .iter()
      .map(|u| u.id)
      .max()
      .map_or(1, |max| max + 1);

    Ok(manager)
  }

  fn reload(&mut self) {
    let loaded: BTreeMap<u32, User> = self.gateway.load(BTreeMap::new());
    self.store.clear();
    for user in loaded.into_values() {
      self
        .store
        .add(user, true, &mut AcceptAll)
        .expect("document keys are unique");
    }
  }

  fn persist(&self) -> Result<()> {
    let snapshot: BTreeMap<u32, User> =
      self.store.find_all().into_iter().map(|u| (u.id, u)).collect();
    self.gateway.save(&snapshot)?;
    Ok(())
  }

  /// Nickname, national id, email and phone number must each be unique
  /// across all users; `exclude` skips the record being edited.
  fn check_uniqueness(
    &self,
    nickname: &str,
    national_id: &str,
    email: &str,
    phone_number: &str,
    exclude: Option<u32>,
  ) -> Result<()> {
    let others = self
      .store
      .find_by(|u| exclude != Some(u.id));

    for other in others {
      if other.account.nickname == nickname {
        return Err(Error::FieldTaken { field: "nickname" });
      }
      if other.personal_data.national_id == national_id {
        return Err(Error::FieldTaken { field: "national id" });
      }
      if other.personal_data.email == email {
        return Err(Error::FieldTaken { field: "email" });
      }
      if other.personal_data.phone_number == phone_number {
        return Err(Error::FieldTaken { field: "phone number" });
      }
    }
    Ok(())
  }

  // ── Queries ───────────────────────────────────────────────────────────

  pub fn find_by_id(&mut self, id: u32) -> Result<User> {
    self.reload();
    self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()).into())
  }

  pub fn find_all(&mut self) -> Vec<User> {
    self.reload();
    self.store.find_all()
  }

  pub fn find_by(&mut self, condition: impl Fn(&User) -> bool) -> Vec<User> {
    self.reload();
    self.store.find_by(condition).into_iter().cloned().collect()
  }

  pub fn find_by_nickname(&mut self, nickname: &str) -> Option<User> {
    self.reload();
    self
      .store
      .find_first_by(|u| u.account.nickname == nickname)
      .cloned()
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Register a new employee account under the next available id.
  pub fn add(&mut self, new: NewUser) -> Result<User> {
    self.reload();
    self.check_uniqueness(
      &new.nickname,
      &new.national_id,
      &new.email,
      &new.phone_number,
      None,
    )?;

    let user = User {
      id:            self.next_id,
      account:       Account {
        nickname:             new.nickname,
        password:             new.password,
        active:               true,
        must_change_password: false,
        role:                 Role::Employee,
      },
      personal_data: PersonalData {
        national_id:           new.national_id,
        first_name:            new.first_name,
        last_name:             new.last_name,
        email:                 new.email,
        phone_number:          new.phone_number,
        must_complete_profile: false,
      },
    };

    self.store.add(user.clone(), false, &mut AcceptAll)?;
    self.next_id += 1;
    self.persist()?;
    Ok(user)
  }

  /// Replace `updated`'s record, subject to the authorization matrix
  /// and the uniqueness rules. The role and active flag are off limits
  /// here: they move only through `grant_privileges`/`revoke_privileges`
  /// and `deactivate`/`reactivate`, which carry stricter checks.
  pub fn update(&mut self, actor: &Session, updated: User) -> Result<()> {
    self.reload();
    let target = self
      .store
      .find_by_id(&updated.id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(updated.id.to_string()))?;

    if !policy::may_modify(actor.user(), &target) {
      return Err(Error::NotAuthorized("you may not modify this user's record"));
    }
    if updated.account.role != target.account.role
      || updated.account.active != target.account.active
    {
      return Err(Error::NotAuthorized(
        "role and active status can only be changed through the dedicated operations",
      ));
    }

    self.check_uniqueness(
      &updated.account.nickname,
      &updated.personal_data.national_id,
      &updated.personal_data.email,
      &updated.personal_data.phone_number,
      Some(updated.id),
    )?;

    self.store.update(updated)?;
    self.persist()
  }

  /// Soft-delete: the account stays in the document and can be
  /// reactivated later. The founder is immune.
  pub fn deactivate(&mut self, actor: &Session, id: u32) -> Result<()> {
    self.reload();
    let mut target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    if target.is_founder() {
      return Err(Error::FounderImmutable);
    }
    if !policy::may_modify(actor.user(), &target) {
      return Err(Error::NotAuthorized(
        "an admin can only be deactivated by themselves or by the founder",
      ));
    }
    if !target.account.active {
      return Err(Error::AlreadyInactive);
    }

    target.account.active = false;
    self.store.update(target)?;
    self.persist()
  }

  pub fn reactivate(&mut self, actor: &Session, id: u32) -> Result<()> {
    self.reload();
    let mut target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    if !policy::may_reactivate(actor.user(), &target) {
      return Err(Error::NotAuthorized(
        "only the founder is allowed to reactivate admin accounts",
      ));
    }
    if target.account.active {
      return Err(Error::AlreadyActive);
    }

    target.account.active = true;
    self.store.update(target)?;
    self.persist()
  }

  /// Permanent delete: only for accounts that are already inactive, and
  /// never the founder. The collaborator confirms the irreversible step.
  pub fn delete_permanently(
    &mut self,
    actor: &Session,
    id: u32,
    confirm: &mut dyn Confirm,
  ) -> Result<DeleteOutcome> {
    self.reload();
    let target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    if target.is_founder() {
      return Err(Error::FounderImmutable);
    }
    if !policy::may_modify(actor.user(), &target) {
      return Err(Error::NotAuthorized(
        "an admin can only be deleted by themselves or by the founder",
      ));
    }
    if target.account.active {
      return Err(Error::AccountStillActive);
    }

    let outcome = self.store.delete(&id, confirm)?;
    if outcome == DeleteOutcome::Deleted {
      self.persist()?;
    }
    Ok(outcome)
  }

  pub fn grant_privileges(&mut self, actor: &Session, id: u32) -> Result<()> {
    self.change_role(actor, id, Role::Admin)
  }

  pub fn revoke_privileges(&mut self, actor: &Session, id: u32) -> Result<()> {
    self.change_role(actor, id, Role::Employee)
  }

  fn change_role(&mut self, actor: &Session, id: u32, role: Role) -> Result<()> {
    self.reload();
    if !policy::may_change_privileges(actor.user()) {
      return Err(Error::NotAuthorized("only the founder can change privileges"));
    }

    let mut target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    if target.is_founder() {
      return Err(Error::FounderImmutable);
    }
    match (role, target.role()) {
      (Role::Admin, Role::Admin) => return Err(Error::AlreadyAdmin),
      (Role::Employee, Role::Employee) => return Err(Error::NotAnAdmin),
      _ => {}
    }

    target.account.role = role;
    self.store.update(target)?;
    self.persist()
  }

  /// Self-service: replace the password and clear the must-change flag.
  pub fn force_password_change(&mut self, id: u32, new_password: &str) -> Result<()> {
    self.reload();
    let mut target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    target.account.password = new_password.to_string();
    target.account.must_change_password = false;
    self.store.update(target)?;
    self.persist()
  }

  /// Self-service: replace the personal data and clear the
  /// must-complete-profile flag. Uniqueness rules still apply.
  pub fn force_personal_data_change(&mut self, id: u32, data: PersonalData) -> Result<()> {
    self.reload();
    let mut target = self
      .store
      .find_by_id(&id)
      .cloned()
      .ok_or_else(|| marquee_core::Error::NotFound(id.to_string()))?;

    self.check_uniqueness(
      &target.account.nickname,
      &data.national_id,
      &data.email,
      &data.phone_number,
      Some(id),
    )?;

    target.personal_data = PersonalData {
      must_complete_profile: false,
      ..data
    };
    self.store.update(target)?;
    self.persist()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
