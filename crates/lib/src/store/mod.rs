//! Transactional key-value storage.
//!
//! A [`Database`] is a single physical store holding named buckets. All access
//! goes through transaction scopes:
//!
//! - [`Database::update`] runs a read-write transaction. At most one is active at
//!   a time; the closure's `Ok` commits and its `Err` aborts.
//! - [`Database::view`] runs a read-only transaction against a consistent
//!   snapshot. Any number may run alongside each other and alongside a writer.
//!
//! Bucket handles borrow the transaction that produced them, so they cannot
//! escape the closure. Only write transactions hand out handles that can `put`.
//!
//! Two engines implement the contract:
//! - [`RedbDatabase`]: the on-disk store, backed by `redb`
//! - [`MemoryDatabase`]: an in-memory double for tests

mod memory;
mod redb_store;

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use memory::MemoryDatabase;
pub use redb_store::RedbDatabase;

/// Underlying engine failure carried by [`StoreError`].
pub type EngineError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to create store directory {}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to open store {}", path.display())]
  Open { path: PathBuf, source: EngineError },

  #[error("failed to create bucket '{bucket}'")]
  Bootstrap { bucket: String, source: Box<StoreError> },

  #[error("failed to begin transaction")]
  Begin(#[source] EngineError),

  #[error("failed to read from store")]
  Read(#[source] EngineError),

  #[error("failed to write to store")]
  Put(#[source] EngineError),

  #[error("failed to commit transaction")]
  Commit(#[source] EngineError),

  #[error("store lock poisoned by a panicked transaction")]
  Poisoned,
}

/// Read access to one bucket.
pub trait ReadBucket {
  /// Returns the stored value, or `None` when the key is absent.
  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Read-write access to one bucket, only available inside [`Database::update`].
pub trait WriteBucket: ReadBucket {
  /// Inserts or overwrites `key`.
  fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}

pub trait ReadTransaction {
  type Bucket<'t>: ReadBucket
  where
    Self: 't;

  /// Looks up a bucket. `None` means the bucket does not exist in this store,
  /// which is not the same thing as a missing key.
  fn bucket(&self, name: &str) -> Result<Option<Self::Bucket<'_>>, StoreError>;
}

pub trait WriteTransaction {
  type Bucket<'t>: WriteBucket
  where
    Self: 't;

  /// Looks up a bucket for writing. Never creates it.
  fn bucket_mut(&mut self, name: &str) -> Result<Option<Self::Bucket<'_>>, StoreError>;

  /// Creates the bucket if absent. Returns `true` when it was created.
  fn create_bucket_if_missing(&mut self, name: &str) -> Result<bool, StoreError>;
}

pub trait Database {
  type ReadTxn<'db>: ReadTransaction
  where
    Self: 'db;

  type WriteTxn<'db>: WriteTransaction
  where
    Self: 'db;

  /// Runs `work` in a read-write transaction, blocking while another one is
  /// active. Commits when `work` returns `Ok`, aborts otherwise.
  fn update<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&mut Self::WriteTxn<'db>) -> Result<T, E>,
    E: From<StoreError>;

  /// Runs `work` in a read-only transaction over a consistent snapshot.
  fn view<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&Self::ReadTxn<'db>) -> Result<T, E>,
    E: From<StoreError>;

  /// Releases the store. Taking `self` means no transaction can still be
  /// running and the store cannot be closed twice.
  fn close(self) -> Result<(), StoreError>;
}
