// app/src/services/repository.rs

//! Single-entity CRUD against an opaque data store. Every call commits on its
//! own; nothing spans two calls, which is why the workflows compensate.

use super::fault::FaultTrigger;
use crate::errors::{details, AppError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// A row of one table.
pub trait Record: Clone + Send + Sync + 'static {
  const TABLE: &'static str;

  fn id(&self) -> Uuid;
}

#[async_trait]
pub trait Repository<E: Record>: Send + Sync {
  async fn insert(&self, record: E) -> Result<E>;

  /// Applies `patch` to a copy of the stored row and persists it. The stored
  /// row is left untouched when the patch fails.
  async fn update(&self, id: Uuid, patch: &(dyn for<'a> Fn(&'a mut E) -> Result<()> + Send + Sync)) -> Result<E>;

  /// Returns whether a row was removed; deleting a missing id is not an error.
  async fn delete(&self, id: Uuid) -> Result<bool>;

  async fn find(&self, id: Uuid) -> Result<Option<E>>;

  async fn select_one(&self, filter: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync)) -> Result<Option<E>>;

  async fn select(&self, filter: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync)) -> Result<Vec<E>>;
}

/// Table kept in process memory, with switches to make the next write fail.
pub struct MemoryRepository<E> {
  rows: RwLock<Vec<E>>,
  insert_fault: FaultTrigger,
  update_fault: FaultTrigger,
  delete_fault: FaultTrigger,
}

impl<E: Record> MemoryRepository<E> {
  pub fn new() -> Self {
    Self::with_rows(Vec::new())
  }

  pub fn with_rows(rows: Vec<E>) -> Self {
    Self {
      rows: RwLock::new(rows),
      insert_fault: FaultTrigger::default(),
      update_fault: FaultTrigger::default(),
      delete_fault: FaultTrigger::default(),
    }
  }

  pub fn fail_next_insert(&self) {
    self.insert_fault.arm(1);
  }

  /// Makes the `nth` insert from now fail.
  pub fn fail_insert_on(&self, nth: usize) {
    self.insert_fault.arm(nth);
  }

  pub fn fail_next_update(&self) {
    self.update_fault.arm(1);
  }

  /// Makes the `nth` update from now fail.
  pub fn fail_update_on(&self, nth: usize) {
    self.update_fault.arm(nth);
  }

  pub fn fail_next_delete(&self) {
    self.delete_fault.arm(1);
  }

  pub fn rows(&self) -> Vec<E> {
    self.rows.read().clone()
  }

  pub fn len(&self) -> usize {
    self.rows.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.read().is_empty()
  }

  fn injected_failure(operation: &str) -> AppError {
    warn!(table = E::TABLE, operation, "Injected data store failure.");
    AppError::external(
      "DATA_STORE_FAILURE",
      format!("Data store rejected {} on '{}'", operation, E::TABLE),
    )
  }
}

impl<E: Record> Default for MemoryRepository<E> {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl<E: Record> Repository<E> for MemoryRepository<E> {
  #[instrument(name = "repository::insert", skip_all, fields(table = E::TABLE, id = %record.id()), err(Display))]
  async fn insert(&self, record: E) -> Result<E> {
    if self.insert_fault.trips() {
      return Err(Self::injected_failure("insert"));
    }
    let mut rows = self.rows.write();
    if rows.iter().any(|row| row.id() == record.id()) {
      return Err(AppError::conflict(
        "DUPLICATE_ID",
        format!("A row with id {} already exists in '{}'", record.id(), E::TABLE),
        details([("id", json!(record.id()))]),
      ));
    }
    rows.push(record.clone());
    debug!("Row inserted.");
    Ok(record)
  }

  #[instrument(name = "repository::update", skip_all, fields(table = E::TABLE, %id), err(Display))]
  async fn update(&self, id: Uuid, patch: &(dyn for<'a> Fn(&'a mut E) -> Result<()> + Send + Sync)) -> Result<E> {
    if self.update_fault.trips() {
      return Err(Self::injected_failure("update"));
    }
    let mut rows = self.rows.write();
    let row = rows
      .iter_mut()
      .find(|row| row.id() == id)
      .ok_or_else(|| AppError::not_found("ROW_NOT_FOUND", format!("No row {} in '{}'", id, E::TABLE)))?;
    let mut patched = row.clone();
    patch(&mut patched)?;
    *row = patched.clone();
    debug!("Row updated.");
    Ok(patched)
  }

  #[instrument(name = "repository::delete", skip_all, fields(table = E::TABLE, %id), err(Display))]
  async fn delete(&self, id: Uuid) -> Result<bool> {
    if self.delete_fault.trips() {
      return Err(Self::injected_failure("delete"));
    }
    let mut rows = self.rows.write();
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    let removed = rows.len() != before;
    debug!(removed, "Delete finished.");
    Ok(removed)
  }

  async fn find(&self, id: Uuid) -> Result<Option<E>> {
    Ok(self.rows.read().iter().find(|row| row.id() == id).cloned())
  }

  async fn select_one(&self, filter: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync)) -> Result<Option<E>> {
    Ok(self.rows.read().iter().find(|row| filter(row)).cloned())
  }

  async fn select(&self, filter: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync)) -> Result<Vec<E>> {
    Ok(self.rows.read().iter().filter(|row| filter(row)).cloned().collect())
  }
}
