//! Alias registry on top of a [`Database`].
//!
//! Every call runs in exactly one transaction against the configured bucket.
//! The bucket is created when the store is opened; a missing bucket here is a
//! broken store, reported as [`RegistryError::PartitionNotFound`].

use thiserror::Error;
use tracing::debug;

use crate::store::{Database, ReadBucket, ReadTransaction, StoreError, WriteBucket, WriteTransaction};

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("bucket '{bucket}' not found")]
  PartitionNotFound { bucket: String },

  #[error("path stored for alias '{alias}' is not valid UTF-8")]
  InvalidValue { alias: String },

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Maps aliases to paths.
#[derive(Debug)]
pub struct Registry<D> {
  db: D,
  bucket: String,
}

impl<D: Database> Registry<D> {
  pub fn new(db: D, bucket: impl Into<String>) -> Self {
    Self {
      db,
      bucket: bucket.into(),
    }
  }

  pub fn database(&self) -> &D {
    &self.db
  }

  /// Gives the database back, e.g. to [`Database::close`] it.
  pub fn into_inner(self) -> D {
    self.db
  }

  /// Store `path` under `alias`, replacing any previous path.
  pub fn add(&self, alias: &str, path: &str) -> Result<(), RegistryError> {
    let bucket = self.bucket.as_str();
    self.db.update(|txn| -> Result<(), RegistryError> {
      let mut handle = txn
        .bucket_mut(bucket)?
        .ok_or_else(|| RegistryError::PartitionNotFound {
          bucket: bucket.to_string(),
        })?;
      handle.put(alias.as_bytes(), path.as_bytes())?;
      Ok(())
    })?;

    debug!(alias, path, bucket, "alias stored");
    Ok(())
  }

  /// Look up the path registered for `alias`.
  ///
  /// Returns `Ok(None)` when the alias was never added. An alias added with an
  /// empty path comes back as `Ok(Some(""))`.
  pub fn get(&self, alias: &str) -> Result<Option<String>, RegistryError> {
    let bucket = self.bucket.as_str();
    let raw = self.db.view(|txn| -> Result<Option<Vec<u8>>, RegistryError> {
      let handle = txn.bucket(bucket)?.ok_or_else(|| RegistryError::PartitionNotFound {
        bucket: bucket.to_string(),
      })?;
      Ok(handle.get(alias.as_bytes())?)
    })?;

    debug!(alias, bucket, found = raw.is_some(), "alias looked up");

    raw
      .map(|bytes| {
        String::from_utf8(bytes).map_err(|_| RegistryError::InvalidValue {
          alias: alias.to_string(),
        })
      })
      .transpose()
  }
}
