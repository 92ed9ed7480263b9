//! The role-based authorization matrix.
//!
//! Pure functions over actor/target roles; managers consult these
//! before any mutation of another user's record and refuse without
//! touching the persisted document.

use marquee_core::user::{Role, User};

/// May `actor` mutate `target`'s record (edit, deactivate, delete)?
///
/// | actor    | target           | allowed |
/// |----------|------------------|---------|
/// | FOUNDER  | any              | yes     |
/// | ADMIN    | FOUNDER          | no      |
/// | ADMIN    | ADMIN (not self) | no      |
/// | ADMIN    | ADMIN (self)     | yes     |
/// | ADMIN    | EMPLOYEE         | yes     |
/// | EMPLOYEE | anyone           | no      |
pub fn may_modify(actor: &User, target: &User) -> bool {
  match actor.role() {
    Role::Founder => true,
    Role::Admin => match target.role() {
      Role::Founder => false,
      Role::Admin => actor.id == target.id,
      Role::Employee => true,
    },
    Role::Employee => false,
  }
}

/// Reactivating a deactivated account: admins may reactivate employees,
/// only the founder may reactivate an admin.
pub fn may_reactivate(actor: &User, target: &User) -> bool {
  match actor.role() {
    Role::Founder => true,
    Role::Admin => target.role() != Role::Admin && target.role() != Role::Founder,
    Role::Employee => false,
  }
}

/// Granting or revoking admin privileges is founder-only.
pub fn may_change_privileges(actor: &User) -> bool {
  actor.role() == Role::Founder
}

#[cfg(test)]
mod tests {
  use marquee_core::user::{Account, PersonalData, Role, User};

  use super::{may_change_privileges, may_modify, may_reactivate};

  fn user(id: u32, role: Role) -> User {
    User {
      id,
      account: Account {
        nickname: format!("u{id}"),
        password: "pw".into(),
        active: true,
        must_change_password: false,
        role,
      },
      personal_data: PersonalData {
        national_id: format!("N{id}"),
        first_name: "A".into(),
        last_name: "B".into(),
        email: format!("u{id}@example.com"),
        phone_number: format!("555-{id:04}"),
        must_complete_profile: false,
      },
    }
  }

  #[test]
  fn founder_may_modify_anyone() {
    let founder = user(1, Role::Founder);
    for role in [Role::Founder, Role::Admin, Role::Employee] {
      assert!(may_modify(&founder, &user(2, role)));
    }
  }

  #[test]
  fn admin_matrix() {
    let admin = user(2, Role::Admin);
    assert!(!may_modify(&admin, &user(1, Role::Founder)));
    assert!(!may_modify(&admin, &user(3, Role::Admin)));
    assert!(may_modify(&admin, &admin)); // self
    assert!(may_modify(&admin, &user(4, Role::Employee)));
  }

  #[test]
  fn employee_may_modify_no_one() {
    let employee = user(5, Role::Employee);
    for role in [Role::Founder, Role::Admin, Role::Employee] {
      assert!(!may_modify(&employee, &user(6, role)));
    }
    assert!(!may_modify(&employee, &employee));
  }

  #[test]
  fn reactivating_an_admin_requires_the_founder() {
    let founder = user(1, Role::Founder);
    let admin = user(2, Role::Admin);
    let employee = user(3, Role::Employee);

    assert!(may_reactivate(&founder, &admin));
    assert!(!may_reactivate(&admin, &user(4, Role::Admin)));
    assert!(may_reactivate(&admin, &employee));
    assert!(!may_reactivate(&employee, &employee));
  }

  #[test]
  fn privilege_changes_are_founder_only() {
    assert!(may_change_privileges(&user(1, Role::Founder)));
    assert!(!may_change_privileges(&user(2, Role::Admin)));
    assert!(!may_change_privileges(&user(3, Role::Employee)));
  }
}
