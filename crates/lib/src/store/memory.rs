//! In-memory store for tests.
//!
//! Committed state is an immutable snapshot behind an `Arc`. Readers clone the
//! `Arc`; the single writer works on a private copy and swaps it in on commit.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use super::{Database, ReadBucket, ReadTransaction, StoreError, WriteBucket, WriteTransaction};

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;
type Buckets = BTreeMap<String, Entries>;

#[derive(Debug, Default)]
pub struct MemoryDatabase {
  committed: RwLock<Arc<Buckets>>,
  writer: Mutex<()>,
  fail_puts: AtomicBool,
  fail_commits: AtomicBool,
}

impl MemoryDatabase {
  /// A store with no buckets at all.
  pub fn empty() -> Self {
    Self::default()
  }

  /// A store holding one empty bucket.
  pub fn with_bucket(bucket: &str) -> Self {
    let mut buckets = Buckets::new();
    buckets.insert(bucket.to_string(), Entries::new());
    Self {
      committed: RwLock::new(Arc::new(buckets)),
      ..Self::default()
    }
  }

  /// Make every subsequent `put` fail.
  pub fn fail_puts(&self, fail: bool) {
    self.fail_puts.store(fail, Ordering::SeqCst);
  }

  /// Make every subsequent commit fail, discarding the transaction's writes.
  pub fn fail_commits(&self, fail: bool) {
    self.fail_commits.store(fail, Ordering::SeqCst);
  }

  fn snapshot(&self) -> Result<Arc<Buckets>, StoreError> {
    let committed = self.committed.read().map_err(|_| StoreError::Poisoned)?;
    Ok(Arc::clone(&committed))
  }
}

impl Database for MemoryDatabase {
  type ReadTxn<'db> = MemoryReadTxn
  where
    Self: 'db;

  type WriteTxn<'db> = MemoryWriteTxn<'db>
  where
    Self: 'db;

  fn update<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&mut Self::WriteTxn<'db>) -> Result<T, E>,
    E: From<StoreError>,
  {
    let guard = self.writer.lock().map_err(|_| StoreError::Poisoned)?;
    let snapshot = self.snapshot()?;
    let working = Buckets::clone(&snapshot);
    let mut txn = MemoryWriteTxn {
      _writer: guard,
      working,
      fail_puts: self.fail_puts.load(Ordering::SeqCst),
    };

    let value = work(&mut txn)?;

    if self.fail_commits.load(Ordering::SeqCst) {
      return Err(StoreError::Commit(Box::new(io::Error::other("injected commit failure"))).into());
    }

    let mut committed = self.committed.write().map_err(|_| StoreError::Poisoned)?;
    *committed = Arc::new(txn.working);
    Ok(value)
  }

  fn view<'db, T, E, F>(&'db self, work: F) -> Result<T, E>
  where
    F: FnOnce(&Self::ReadTxn<'db>) -> Result<T, E>,
    E: From<StoreError>,
  {
    let txn = MemoryReadTxn {
      snapshot: self.snapshot()?,
    };
    work(&txn)
  }

  fn close(self) -> Result<(), StoreError> {
    Ok(())
  }
}

pub struct MemoryReadTxn {
  snapshot: Arc<Buckets>,
}

impl ReadTransaction for MemoryReadTxn {
  type Bucket<'t> = MemoryReadBucket<'t>
  where
    Self: 't;

  fn bucket(&self, name: &str) -> Result<Option<MemoryReadBucket<'_>>, StoreError> {
    Ok(self.snapshot.get(name).map(|entries| MemoryReadBucket { entries }))
  }
}

pub struct MemoryReadBucket<'t> {
  entries: &'t Entries,
}

impl ReadBucket for MemoryReadBucket<'_> {
  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
    Ok(self.entries.get(key).cloned())
  }
}

pub struct MemoryWriteTxn<'db> {
  _writer: MutexGuard<'db, ()>,
  working: Buckets,
  fail_puts: bool,
}

impl WriteTransaction for MemoryWriteTxn<'_> {
  type Bucket<'t> = MemoryWriteBucket<'t>
  where
    Self: 't;

  fn bucket_mut(&mut self, name: &str) -> Result<Option<MemoryWriteBucket<'_>>, StoreError> {
    let fail_puts = self.fail_puts;
    Ok(
      self
        .working
        .get_mut(name)
        .map(|entries| MemoryWriteBucket { entries, fail_puts }),
    )
  }

  fn create_bucket_if_missing(&mut self, name: &str) -> Result<bool, StoreError> {
    if self.working.contains_key(name) {
      return Ok(false);
    }
    self.working.insert(name.to_string(), Entries::new());
    Ok(true)
  }
}

pub struct MemoryWriteBucket<'t> {
  entries: &'t mut Entries,
  fail_puts: bool,
}

impl ReadBucket for MemoryWriteBucket<'_> {
  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
    Ok(self.entries.get(key).cloned())
  }
}

impl WriteBucket for MemoryWriteBucket<'_> {
  fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
    if self.fail_puts {
      return Err(StoreError::Put(Box::new(io::Error::other("injected put failure"))));
    }
    self.entries.insert(key.to_vec(), value.to_vec());
    Ok(())
  }
}
