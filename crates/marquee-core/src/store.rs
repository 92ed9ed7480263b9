//! The generic entity store and its backing strategies.
//!
//! A [`GenericStore`] exposes one CRUD surface over a backing strategy
//! chosen at construction and fixed for the store's lifetime. The three
//! strategies differ only in their uniqueness discipline:
//!
//! - [`DupList`]: ordered list, duplicates allowed unless the caller
//!   forbids them per `add` call.
//! - [`UniqueList`]: ordered list, structural duplicates always rejected.
//! - [`KeyedMap`]: one value per key, insertion under an existing key
//!   asks the collaborator before overwriting.
//!
//! Higher layers depend on [`GenericStore`], never on a concrete
//! strategy.

use std::fmt;

use crate::{Error, Result, entity::Identifiable};

// ─── Collaborator seam ───────────────────────────────────────────────────────

/// Yes/no confirmation for irreversible actions (deletes, map-key
/// overwrites). The console layer supplies the interactive
/// implementation; library code and tests use [`AcceptAll`] /
/// [`DeclineAll`].
pub trait Confirm {
  fn confirm(&mut self, prompt: &str) -> bool;
}

pub struct AcceptAll;

impl Confirm for AcceptAll {
  fn confirm(&mut self, _prompt: &str) -> bool { true }
}

pub struct DeclineAll;

impl Confirm for DeclineAll {
  fn confirm(&mut self, _prompt: &str) -> bool { false }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// What an `add` actually did; `Declined` means the collaborator refused
/// a map-key overwrite and the store is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Inserted,
  Replaced,
  Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
  Deleted,
  Declined,
}

// ─── Strategy trait ──────────────────────────────────────────────────────────

/// The uniqueness/ordering discipline behind a [`GenericStore`].
pub trait Strategy<E: Identifiable> {
  fn add(
    &mut self,
    entity: E,
    duplicates_allowed: bool,
    confirm: &mut dyn Confirm,
  ) -> Result<AddOutcome>;

  fn find_by_id(&self, id: &E::Id) -> Option<&E>;

  /// All current values in stored (insertion) order.
  fn values(&self) -> Vec<&E>;

  fn update(&mut self, entity: E) -> Result<()>;

  fn delete(&mut self, id: &E::Id, confirm: &mut dyn Confirm) -> Result<DeleteOutcome>;

  fn clear(&mut self);
}

fn delete_prompt(entity: &impl fmt::Display) -> String {
  format!("This operation is irreversible. The following element will be deleted:\n{entity}")
}

// ─── List strategies ─────────────────────────────────────────────────────────

/// Ordered list; duplicates allowed unless the caller forbids them.
pub struct DupList<E> {
  items: Vec<E>,
}

impl<E> DupList<E> {
  pub fn new() -> Self { Self { items: Vec::new() } }
}

impl<E> Default for DupList<E> {
  fn default() -> Self { Self::new() }
}

impl<E> Strategy<E> for DupList<E>
where
  E: Identifiable + PartialEq + fmt::Display,
{
  fn add(
    &mut self,
    entity: E,
    duplicates_allowed: bool,
    _confirm: &mut dyn Confirm,
  ) -> Result<AddOutcome> {
    if !duplicates_allowed && self.items.contains(&entity) {
      return Err(Error::Duplicate);
    }
    self.items.push(entity);
    Ok(AddOutcome::Inserted)
  }

  fn find_by_id(&self, id: &E::Id) -> Option<&E> {
    self.items.iter().find(|e| e.id() == *id)
  }

  fn values(&self) -> Vec<&E> { self.items.iter().collect() }

  fn update(&mut self, entity: E) -> Result<()> {
    let Some(pos) = self.items.iter().position(|e| *e == entity) else {
      return Err(Error::UpdateTargetMissing);
    };
    // Remove-and-reinsert: the updated element moves to the end.
    self.items.remove(pos);
    self.items.push(entity);
    Ok(())
  }

  fn delete(&mut self, id: &E::Id, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
    let Some(pos) = self.items.iter().position(|e| e.id() == *id) else {
      return Err(Error::NotFound(id.to_string()));
    };
    if !confirm.confirm(&delete_prompt(&self.items[pos])) {
      return Ok(DeleteOutcome::Declined);
    }
    self.items.remove(pos);
    Ok(DeleteOutcome::Deleted)
  }

  fn clear(&mut self) { self.items.clear(); }
}

/// Ordered list that never holds two structurally equal elements; the
/// per-call duplicate flag is irrelevant here.
pub struct UniqueList<E> {
  items: Vec<E>,
}

impl<E> UniqueList<E> {
  pub fn new() -> Self { Self { items: Vec::new() } }
}

impl<E> Default for UniqueList<E> {
  fn default() -> Self { Self::new() }
}

impl<E> Strategy<E> for UniqueList<E>
where
  E: Identifiable + PartialEq + fmt::Display,
{
  fn add(
    &mut self,
    entity: E,
    _duplicates_allowed: bool,
    _confirm: &mut dyn Confirm,
  ) -> Result<AddOutcome> {
    if self.items.contains(&entity) {
      return Err(Error::Duplicate);
    }
    self.items.push(entity);
    Ok(AddOutcome::Inserted)
  }

  fn find_by_id(&self, id: &E::Id) -> Option<&E> {
    self.items.iter().find(|e| e.id() == *id)
  }

  fn values(&self) -> Vec<&E> { self.items.iter().collect() }

  fn update(&mut self, entity: E) -> Result<()> {
    let Some(pos) = self.items.iter().position(|e| *e == entity) else {
      return Err(Error::UpdateTargetMissing);
    };
    self.items.remove(pos);
    self.items.push(entity);
    Ok(())
  }

  fn delete(&mut self, id: &E::Id, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
    let Some(pos) = self.items.iter().position(|e| e.id() == *id) else {
      return Err(Error::NotFound(id.to_string()));
    };
    if !confirm.confirm(&delete_prompt(&self.items[pos])) {
      return Ok(DeleteOutcome::Declined);
    }
    self.items.remove(pos);
    Ok(DeleteOutcome::Deleted)
  }

  fn clear(&mut self) { self.items.clear(); }
}

// ─── Keyed map strategy ──────────────────────────────────────────────────────

/// One value per id, insertion order preserved. Backed by a vector of
/// pairs: extents here are small and linear key lookup keeps the key
/// bounds down to `Eq`.
pub struct KeyedMap<E: Identifiable> {
  entries: Vec<(E::Id, E)>,
}

impl<E: Identifiable> KeyedMap<E> {
  pub fn new() -> Self { Self { entries: Vec::new() } }

  fn position(&self, id: &E::Id) -> Option<usize> {
    self.entries.iter().position(|(k, _)| k == id)
  }
}

impl<E: Identifiable> Default for KeyedMap<E> {
  fn default() -> Self { Self::new() }
}

impl<E> Strategy<E> for KeyedMap<E>
where
  E: Identifiable + fmt::Display,
{
  /// `duplicates_allowed` is ignored: the map's uniqueness discipline is
  /// the key itself.
  fn add(
    &mut self,
    entity: E,
    _duplicates_allowed: bool,
    confirm: &mut dyn Confirm,
  ) -> Result<AddOutcome> {
    let key = entity.id();
    match self.position(&key) {
      Some(pos) => {
        let accepted = confirm.confirm(
          "Warning: the key already exists in the map. This will overwrite the existing value.",
        );
        if !accepted {
          return Ok(AddOutcome::Declined);
        }
        self.entries[pos] = (key, entity);
        Ok(AddOutcome::Replaced)
      }
      None => {
        self.entries.push((key, entity));
        Ok(AddOutcome::Inserted)
      }
    }
  }

  fn find_by_id(&self, id: &E::Id) -> Option<&E> {
    self.position(id).map(|pos| &self.entries[pos].1)
  }

  fn values(&self) -> Vec<&E> { self.entries.iter().map(|(_, e)| e).collect() }

  fn update(&mut self, entity: E) -> Result<()> {
    let key = entity.id();
    let Some(pos) = self.position(&key) else {
      return Err(Error::UpdateTargetMissing);
    };
    self.entries[pos] = (key, entity);
    Ok(())
  }

  fn delete(&mut self, id: &E::Id, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
    let Some(pos) = self.position(id) else {
      return Err(Error::NotFound(id.to_string()));
    };
    if !confirm.confirm(&delete_prompt(&self.entries[pos].1)) {
      return Ok(DeleteOutcome::Declined);
    }
    self.entries.remove(pos);
    Ok(DeleteOutcome::Deleted)
  }

  fn clear(&mut self) { self.entries.clear(); }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Named constructors for the three shipped strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingStrategy {
  ListWithDuplicates,
  UniqueList,
  KeyedMap,
}

/// Uniform CRUD surface over one backing strategy.
pub struct GenericStore<E: Identifiable> {
  strategy: Box<dyn Strategy<E>>,
}

impl<E> GenericStore<E>
where
  E: Identifiable + Clone + PartialEq + fmt::Display + 'static,
{
  pub fn new(backing: BackingStrategy) -> Self {
    let strategy: Box<dyn Strategy<E>> = match backing {
      BackingStrategy::ListWithDuplicates => Box::new(DupList::new()),
      BackingStrategy::UniqueList => Box::new(UniqueList::new()),
      BackingStrategy::KeyedMap => Box::new(KeyedMap::new()),
    };
    Self { strategy }
  }

  /// Build a store around a caller-supplied strategy.
  pub fn with_strategy(strategy: Box<dyn Strategy<E>>) -> Self { Self { strategy } }

  pub fn add(
    &mut self,
    entity: E,
    duplicates_allowed: bool,
    confirm: &mut dyn Confirm,
  ) -> Result<AddOutcome> {
    self.strategy.add(entity, duplicates_allowed, confirm)
  }

  pub fn find_by_id(&self, id: &E::Id) -> Option<&E> { self.strategy.find_by_id(id) }

  pub fn find_first_by(&self, condition: impl Fn(&E) -> bool) -> Option<&E> {
    self.strategy.values().into_iter().find(|e| condition(e))
  }

  pub fn find_by(&self, condition: impl Fn(&E) -> bool) -> Vec<&E> {
    self
      .strategy
      .values()
      .into_iter()
      .filter(|e| condition(e))
      .collect()
  }

  /// Defensive snapshot copy of all current values, in stored order.
  pub fn find_all(&self) -> Vec<E> {
    self.strategy.values().into_iter().cloned().collect()
  }

  pub fn update(&mut self, entity: E) -> Result<()> { self.strategy.update(entity) }

  pub fn delete(&mut self, id: &E::Id, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
    self.strategy.delete(id, confirm)
  }

  pub fn clear(&mut self) { self.strategy.clear(); }

  pub fn len(&self) -> usize { self.strategy.values().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
