// app/src/services/storage.rs

//! Object storage with public URLs, organised in buckets.

use super::fault::FaultTrigger;
use crate::errors::{details, AppError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
  pub bucket: String,
  pub path: String,
  pub public_url: String,
}

#[async_trait]
pub trait BlobStorage: Send + Sync {
  /// Fails with a conflict when `path` is already taken.
  async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject>;

  async fn copy(&self, from_bucket: &str, from_path: &str, to_bucket: &str, to_path: &str) -> Result<StoredObject>;

  /// Removes every listed path; missing paths are ignored.
  async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()>;

  async fn exists(&self, bucket: &str, path: &str) -> Result<bool>;
}

#[derive(Debug, Clone)]
struct Blob {
  bytes: Vec<u8>,
  content_type: String,
}

pub struct MemoryBlobStorage {
  public_base_url: String,
  objects: RwLock<HashMap<(String, String), Blob>>,
  upload_fault: FaultTrigger,
  copy_fault: FaultTrigger,
  remove_fault: FaultTrigger,
}

impl MemoryBlobStorage {
  pub fn new(public_base_url: impl Into<String>) -> Self {
    Self {
      public_base_url: public_base_url.into(),
      objects: RwLock::new(HashMap::new()),
      upload_fault: FaultTrigger::default(),
      copy_fault: FaultTrigger::default(),
      remove_fault: FaultTrigger::default(),
    }
  }

  pub fn public_url(&self, bucket: &str, path: &str) -> String {
    format!("{}/{}/{}", self.public_base_url, bucket, path)
  }

  /// Makes the `nth` upload from now fail.
  pub fn fail_upload_on(&self, nth: usize) {
    self.upload_fault.arm(nth);
  }

  pub fn fail_next_copy(&self) {
    self.copy_fault.arm(1);
  }

  pub fn fail_next_remove(&self) {
    self.remove_fault.arm(1);
  }

  /// Sorted paths currently stored in `bucket`.
  pub fn paths(&self, bucket: &str) -> Vec<String> {
    let mut paths: Vec<String> = self
      .objects
      .read()
      .keys()
      .filter(|(b, _)| b == bucket)
      .map(|(_, p)| p.clone())
      .collect();
    paths.sort();
    paths
  }

  pub fn content_type(&self, bucket: &str, path: &str) -> Option<String> {
    self
      .objects
      .read()
      .get(&(bucket.to_string(), path.to_string()))
      .map(|blob| blob.content_type.clone())
  }

  pub fn size(&self, bucket: &str, path: &str) -> Option<usize> {
    self
      .objects
      .read()
      .get(&(bucket.to_string(), path.to_string()))
      .map(|blob| blob.bytes.len())
  }

  fn stored(&self, bucket: &str, path: &str) -> StoredObject {
    StoredObject {
      bucket: bucket.to_string(),
      path: path.to_string(),
      public_url: self.public_url(bucket, path),
    }
  }

  fn injected_failure(operation: &str, bucket: &str) -> AppError {
    warn!(bucket, operation, "Injected storage failure.");
    AppError::external(
      "STORAGE_FAILURE",
      format!("Storage rejected {} in bucket '{}'", operation, bucket),
    )
  }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
  #[instrument(name = "storage::upload", skip(self, bytes), fields(size = bytes.len()), err(Display))]
  async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject> {
    if self.upload_fault.trips() {
      return Err(Self::injected_failure("upload", bucket));
    }
    let key = (bucket.to_string(), path.to_string());
    let mut objects = self.objects.write();
    if objects.contains_key(&key) {
      return Err(AppError::conflict(
        "OBJECT_EXISTS",
        format!("'{}' already exists in bucket '{}'", path, bucket),
        details([("bucket", json!(bucket)), ("path", json!(path))]),
      ));
    }
    objects.insert(
      key,
      Blob {
        bytes,
        content_type: content_type.to_string(),
      },
    );
    debug!("Object uploaded.");
    Ok(self.stored(bucket, path))
  }

  #[instrument(name = "storage::copy", skip(self), err(Display))]
  async fn copy(&self, from_bucket: &str, from_path: &str, to_bucket: &str, to_path: &str) -> Result<StoredObject> {
    if self.copy_fault.trips() {
      return Err(Self::injected_failure("copy", to_bucket));
    }
    let mut objects = self.objects.write();
    let source = objects
      .get(&(from_bucket.to_string(), from_path.to_string()))
      .cloned()
      .ok_or_else(|| {
        AppError::not_found(
          "OBJECT_NOT_FOUND",
          format!("'{}' does not exist in bucket '{}'", from_path, from_bucket),
        )
      })?;
    let target = (to_bucket.to_string(), to_path.to_string());
    if objects.contains_key(&target) {
      return Err(AppError::conflict(
        "OBJECT_EXISTS",
        format!("'{}' already exists in bucket '{}'", to_path, to_bucket),
        details([("bucket", json!(to_bucket)), ("path", json!(to_path))]),
      ));
    }
    objects.insert(target, source);
    debug!("Object copied.");
    Ok(self.stored(to_bucket, to_path))
  }

  #[instrument(name = "storage::remove", skip(self, paths), fields(count = paths.len()), err(Display))]
  async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
    if self.remove_fault.trips() {
      return Err(Self::injected_failure("remove", bucket));
    }
    let mut objects = self.objects.write();
    for path in paths {
      objects.remove(&(bucket.to_string(), path.clone()));
    }
    debug!("Objects removed.");
    Ok(())
  }

  async fn exists(&self, bucket: &str, path: &str) -> Result<bool> {
    Ok(self.objects.read().contains_key(&(bucket.to_string(), path.to_string())))
  }
}
