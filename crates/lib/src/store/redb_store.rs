//! On-disk store backed by `redb`.
//!
//! `redb` is a single-file ACID engine with one writer at a time and MVCC
//! readers, which is exactly the contract [`Database`] promises. Buckets map to
//! `redb` tables keyed and valued by raw bytes.

use std::path::{Path, PathBuf};

use redb::{ReadOnlyTable, ReadableTable, Table, TableDefinition, TableError, TableHandle};
use tracing::{debug, info, warn};

use super::{Database, ReadBucket, ReadTransaction, StoreError, WriteBucket, WriteTransaction};
use crate::platform::paths::ensure_private_dir;

type RawTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

fn raw_table(name: &str) -> RawTable<'_> {
  TableDefinition::new(name)
}

/// A store file on disk.
///
/// The file handle is owned by this value and released on [`Database::close`]
/// or drop.
pub struct RedbDatabase {
  db: redb::Database,
  path: PathBuf,
}

impl std::fmt::Debug for RedbDatabase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RedbDatabase").field("path", &self.path).finish()
  }
}

impl RedbDatabase {
  /// Open or create the store at `path` and make sure `bucket` exists.
  ///
  /// The containing directory is created if missing. Any failure leaves no
  /// store behind for the caller to use.
  pub fn open(path: &Path, bucket: &str) -> Result<Self, StoreError> {
    if let Some(parent) = path.parent() {
      ensure_private_dir(parent).map_err(|source| StoreError::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    let db = redb::Database::create(path).map_err(|e| StoreError::Open {
      path: path.to_path_buf(),
      source: Box::new(e),
    })?;

    let store = Self {
      db,
      path: path.to_path_buf(),
    };

    let created = store
      .update(|txn| txn.create_bucket_if_missing(bucket))
      .map_err(|e| StoreError::Bootstrap {
        bucket: bucket.to_string(),
        source: Box::new(e),
      })?;

    info!(path = %store.path.display(), bucket, created, "store opened");
    Ok(store)
  }
}

impl Database for RedbDatabase {
  type ReadTxn<'db> = RedbReadTxn
  where
    Self: 'db;

  type WriteTxn<'db> = RedbWriteTxn
  where
    Self: 'db;

  fn update<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&mut Self::WriteTxn<'db>) -> Result<T, E>,
    E: From<StoreError>,
  {
    let txn = self.db.begin_write().map_err(|e| StoreError::Begin(Box::new(e)))?;
    let mut scope = RedbWriteTxn { txn };
    debug!("write transaction started");

    match work(&mut scope) {
      Ok(value) => {
        scope.txn.commit().map_err(|e| StoreError::Commit(Box::new(e)))?;
        debug!("write transaction committed");
        Ok(value)
      }
      Err(err) => {
        if let Err(abort_err) = scope.txn.abort() {
          warn!(error = %abort_err, "failed to abort write transaction");
        }
        debug!("write transaction aborted");
        Err(err)
      }
    }
  }

  fn view<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&Self::ReadTxn<'db>) -> Result<T, E>,
    E: From<StoreError>,
  {
    let txn = self.db.begin_read().map_err(|e| StoreError::Begin(Box::new(e)))?;
    work(&RedbReadTxn { txn })
  }

  fn close(self) -> Result<(), StoreError> {
    debug!(path = %self.path.display(), "closing store");
    drop(self.db);
    Ok(())
  }
}

pub struct RedbReadTxn {
  txn: redb::ReadTransaction,
}

impl ReadTransaction for RedbReadTxn {
  type Bucket<'t> = RedbReadBucket
  where
    Self: 't;

  fn bucket(&self, name: &str) -> Result<Option<RedbReadBucket>, StoreError> {
    match self.txn.open_table(raw_table(name)) {
      Ok(table) => Ok(Some(RedbReadBucket { table })),
      Err(TableError::TableDoesNotExist(_)) => {
        debug!(bucket = name, "bucket not found");
        Ok(None)
      }
      Err(e) => Err(StoreError::Read(Box::new(e))),
    }
  }
}

pub struct RedbReadBucket {
  table: ReadOnlyTable<&'static [u8], &'static [u8]>,
}

impl ReadBucket for RedbReadBucket {
  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
    let value = self.table.get(key).map_err(|e| StoreError::Read(Box::new(e)))?;
    Ok(value.map(|guard| guard.value().to_vec()))
  }
}

pub struct RedbWriteTxn {
  txn: redb::WriteTransaction,
}

impl RedbWriteTxn {
  fn has_bucket(&self, name: &str) -> Result<bool, StoreError> {
    let mut tables = self.txn.list_tables().map_err(|e| StoreError::Read(Box::new(e)))?;
    Ok(tables.any(|table| table.name() == name))
  }
}

impl WriteTransaction for RedbWriteTxn {
  type Bucket<'t> = RedbWriteBucket<'t>
  where
    Self: 't;

  fn bucket_mut(&mut self, name: &str) -> Result<Option<RedbWriteBucket<'_>>, StoreError> {
    // `open_table` on a write transaction creates missing tables, so check first.
    if !self.has_bucket(name)? {
      debug!(bucket = name, "bucket not found");
      return Ok(None);
    }

    let table = self
      .txn
      .open_table(raw_table(name))
      .map_err(|e| StoreError::Read(Box::new(e)))?;
    Ok(Some(RedbWriteBucket { table }))
  }

  fn create_bucket_if_missing(&mut self, name: &str) -> Result<bool, StoreError> {
    if self.has_bucket(name)? {
      return Ok(false);
    }

    self
      .txn
      .open_table(raw_table(name))
      .map_err(|e| StoreError::Put(Box::new(e)))?;
    info!(bucket = name, "bucket created");
    Ok(true)
  }
}

pub struct RedbWriteBucket<'t> {
  table: Table<'t, &'static [u8], &'static [u8]>,
}

impl ReadBucket for RedbWriteBucket<'_> {
  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
    let value = self.table.get(key).map_err(|e| StoreError::Read(Box::new(e)))?;
    Ok(value.map(|guard| guard.value().to_vec()))
  }
}

impl WriteBucket for RedbWriteBucket<'_> {
  fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
    self
      .table
      .insert(key, value)
      .map_err(|e| StoreError::Put(Box::new(e)))?;
    Ok(())
  }
}
