//! gitswitch-lib: alias registry for project directories.
//!
//! - `store`: transactional key-value contract with `redb` and in-memory engines
//! - `registry`: `add` / `get` of alias -> path pairs on one bucket
//! - `resolve`: which alias and path an `add` invocation means
//! - `register`: persist a resolved pair, as `gs add` does
//! - `config`: YAML + environment configuration

pub mod config;
pub mod consts;
pub mod platform;
pub mod register;
pub mod registry;
pub mod resolve;
pub mod store;
pub mod util;

pub use config::{Config, ConfigError};
pub use register::{RegisterError, register};
pub use registry::{Registry, RegistryError};
pub use resolve::{FsPathResolver, PathResolver, Resolution, ResolveError, resolve_alias_and_path};
pub use store::{Database, MemoryDatabase, RedbDatabase, StoreError};
