//! The persisting half of `add`.
//!
//! Arguments are resolved first with [`resolve_alias_and_path`], before any
//! store is opened, so a rejected invocation never touches the store.
//!
//! [`resolve_alias_and_path`]: crate::resolve::resolve_alias_and_path

use thiserror::Error;
use tracing::info;

use crate::registry::{Registry, RegistryError};
use crate::resolve::Resolution;
use crate::store::Database;

#[derive(Debug, Error)]
#[error("failed to add {path} with alias {alias}")]
pub struct RegisterError {
  pub alias: String,
  pub path: String,
  #[source]
  pub source: RegistryError,
}

/// Store a resolved pair in `registry`, replacing any previous path.
pub fn register<D: Database>(resolution: &Resolution, registry: &Registry<D>) -> Result<(), RegisterError> {
  registry
    .add(&resolution.alias, &resolution.path)
    .map_err(|source| RegisterError {
      alias: resolution.alias.clone(),
      path: resolution.path.clone(),
      source,
    })?;

  info!(alias = %resolution.alias, path = %resolution.path, "registered alias");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::resolve::resolve_alias_and_path;
  use crate::store::MemoryDatabase;
  use crate::util::testutil::ScriptedResolver;
  use tracing_test::traced_test;

  const CURRENT_PATH: &str = "currentPath";
  const FOLDER_NAME: &str = "parentFolderName";
  const PATH_VALUE: &str = "pathValue";
  const ALIAS_VALUE: &str = "aliasValue";

  fn registry() -> Registry<MemoryDatabase> {
    Registry::new(MemoryDatabase::with_bucket("kv"), "kv")
  }

  fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  fn resolved(values: &[&str]) -> Resolution {
    let resolver = ScriptedResolver {
      exists: Some(true),
      ..ScriptedResolver::at(CURRENT_PATH, FOLDER_NAME)
    };
    resolve_alias_and_path(&args(values), &resolver).unwrap()
  }

  #[test]
  #[traced_test]
  fn no_args_registers_current_folder() {
    let registry = registry();

    register(&resolved(&[]), &registry).unwrap();

    assert_eq!(registry.get(FOLDER_NAME).unwrap().as_deref(), Some(CURRENT_PATH));
    assert!(logs_contain("registered alias"));
  }

  #[test]
  fn alias_arg_registers_current_path() {
    let registry = registry();

    register(&resolved(&[ALIAS_VALUE]), &registry).unwrap();

    assert_eq!(registry.get(ALIAS_VALUE).unwrap().as_deref(), Some(CURRENT_PATH));
  }

  #[test]
  fn alias_and_path_registers_given_path() {
    let registry = registry();

    register(&resolved(&[ALIAS_VALUE, PATH_VALUE]), &registry).unwrap();

    assert_eq!(registry.get(ALIAS_VALUE).unwrap().as_deref(), Some(PATH_VALUE));
  }

  #[test]
  fn store_failure_names_path_and_alias() {
    let registry = registry();
    registry.database().fail_puts(true);

    let cases = [
      (resolved(&[]), FOLDER_NAME, CURRENT_PATH),
      (resolved(&[ALIAS_VALUE]), ALIAS_VALUE, CURRENT_PATH),
      (resolved(&[ALIAS_VALUE, PATH_VALUE]), ALIAS_VALUE, PATH_VALUE),
    ];

    for (resolution, alias, path) in cases {
      let err = register(&resolution, &registry).unwrap_err();

      assert_eq!(err.to_string(), format!("failed to add {} with alias {}", path, alias));
      assert!(matches!(err.source, RegistryError::Store(_)));
    }
  }

  #[test]
  fn partition_missing_is_reported() {
    let registry = Registry::new(MemoryDatabase::empty(), "kv");

    let err = register(&resolved(&[]), &registry).unwrap_err();

    assert!(matches!(err.source, RegistryError::PartitionNotFound { .. }));
  }
}
