//! Decide which alias and path an `add` invocation refers to.
//!
//! | args           | path                  | alias                        |
//! |----------------|-----------------------|------------------------------|
//! | none           | current directory     | its folder name              |
//! | `alias`        | current directory     | `alias`                      |
//! | `alias path`   | `path` (must exist)   | `alias`                      |
//!
//! Anything longer is rejected before the filesystem is consulted.

use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Filesystem queries the policy depends on.
pub trait PathResolver {
  /// The directory the user is working in.
  fn current_path(&self) -> io::Result<String>;

  /// Folder name used as the default alias for `path`.
  fn parent_folder_name(&self, path: &str) -> String;

  fn path_exists(&self, path: &str) -> io::Result<bool>;
}

/// [`PathResolver`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPathResolver;

impl PathResolver for FsPathResolver {
  fn current_path(&self) -> io::Result<String> {
    std::env::current_dir()?
      .into_os_string()
      .into_string()
      .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "current directory is not valid UTF-8"))
  }

  fn parent_folder_name(&self, path: &str) -> String {
    match Path::new(path).file_name() {
      Some(name) => name.to_string_lossy().into_owned(),
      None => path.to_string(),
    }
  }

  fn path_exists(&self, path: &str) -> io::Result<bool> {
    Path::new(path).try_exists()
  }
}

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("failed to get current path")]
  CurrentPathUnavailable(#[source] io::Error),

  #[error("path does not exist: {path}")]
  PathNotFound {
    path: String,
    #[source]
    source: Option<io::Error>,
  },

  #[error("invalid number of arguments: expected at most 2, got {count}")]
  InvalidArgumentCount { count: usize },

  #[error("alias must not be empty")]
  EmptyAlias,
}

/// An alias and the path it should point to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
  pub alias: String,
  pub path: String,
}

/// Apply the resolution table to the positional arguments of `add`.
pub fn resolve_alias_and_path<R>(args: &[String], resolver: &R) -> Result<Resolution, ResolveError>
where
  R: PathResolver + ?Sized,
{
  let resolution = match args {
    [] => {
      let path = current_path(resolver)?;
      let alias = resolver.parent_folder_name(&path);
      Resolution { alias, path }
    }
    [alias] => Resolution {
      alias: alias.clone(),
      path: current_path(resolver)?,
    },
    [alias, path] => {
      match resolver.path_exists(path) {
        Ok(true) => {}
        Ok(false) => {
          return Err(ResolveError::PathNotFound {
            path: path.clone(),
            source: None,
          });
        }
        Err(source) => {
          return Err(ResolveError::PathNotFound {
            path: path.clone(),
            source: Some(source),
          });
        }
      }
      Resolution {
        alias: alias.clone(),
        path: path.clone(),
      }
    }
    _ => return Err(ResolveError::InvalidArgumentCount { count: args.len() }),
  };

  if resolution.alias.is_empty() {
    return Err(ResolveError::EmptyAlias);
  }

  debug!(alias = %resolution.alias, path = %resolution.path, "resolved alias");
  Ok(resolution)
}

fn current_path<R: PathResolver + ?Sized>(resolver: &R) -> Result<String, ResolveError> {
  resolver.current_path().map_err(ResolveError::CurrentPathUnavailable)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::ScriptedResolver;
  use tempfile::TempDir;

  fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn no_args_uses_current_folder() {
    let resolver = ScriptedResolver::at("/home/u/proj", "proj");

    let resolution = resolve_alias_and_path(&[], &resolver).unwrap();

    assert_eq!(
      resolution,
      Resolution {
        alias: "proj".into(),
        path: "/home/u/proj".into()
      }
    );
    assert_eq!(resolver.folder_name_calls.get(), 1);
  }

  #[test]
  fn no_args_fails_without_current_path() {
    let resolver = ScriptedResolver::default();

    let err = resolve_alias_and_path(&[], &resolver).unwrap_err();

    assert!(matches!(err, ResolveError::CurrentPathUnavailable(_)));
    assert_eq!(err.to_string(), "failed to get current path");
    assert_eq!(resolver.folder_name_calls.get(), 0);
  }

  #[test]
  fn alias_arg_uses_current_path() {
    let resolver = ScriptedResolver::at("/x/y", "y");

    let resolution = resolve_alias_and_path(&args(&["myalias"]), &resolver).unwrap();

    assert_eq!(resolution.alias, "myalias");
    assert_eq!(resolution.path, "/x/y");
    assert_eq!(resolver.folder_name_calls.get(), 0);
  }

  #[test]
  fn alias_arg_fails_without_current_path() {
    let resolver = ScriptedResolver::default();
    let err = resolve_alias_and_path(&args(&["myalias"]), &resolver).unwrap_err();
    assert!(matches!(err, ResolveError::CurrentPathUnavailable(_)));
  }

  #[test]
  fn alias_and_existing_path() {
    let resolver = ScriptedResolver::with_existing(Some(true));

    let resolution = resolve_alias_and_path(&args(&["myalias", "/some/path"]), &resolver).unwrap();

    assert_eq!(resolution.alias, "myalias");
    assert_eq!(resolution.path, "/some/path");
    assert_eq!(resolver.current_path_calls.get(), 0);
  }

  #[test]
  fn alias_and_missing_path() {
    let resolver = ScriptedResolver::with_existing(Some(false));

    let err = resolve_alias_and_path(&args(&["myalias", "/some/path"]), &resolver).unwrap_err();

    assert!(matches!(err, ResolveError::PathNotFound { ref path, source: None } if path == "/some/path"));
    assert_eq!(err.to_string(), "path does not exist: /some/path");
  }

  #[test]
  fn path_check_error_counts_as_missing() {
    let resolver = ScriptedResolver::with_existing(None);

    let err = resolve_alias_and_path(&args(&["myalias", "/root/secret"]), &resolver).unwrap_err();

    assert!(matches!(err, ResolveError::PathNotFound { source: Some(_), .. }));
  }

  #[test]
  fn too_many_args_rejected_before_any_query() {
    let resolver = ScriptedResolver::at("/x/y", "y");

    let err = resolve_alias_and_path(&args(&["a", "b", "c"]), &resolver).unwrap_err();

    assert!(matches!(err, ResolveError::InvalidArgumentCount { count: 3 }));
    assert_eq!(resolver.total_calls(), 0);
  }

  #[test]
  fn empty_alias_rejected() {
    let resolver = ScriptedResolver::at("/", "");
    assert!(matches!(
      resolve_alias_and_path(&[], &resolver),
      Err(ResolveError::EmptyAlias)
    ));

    let resolver = ScriptedResolver::with_existing(Some(true));
    assert!(matches!(
      resolve_alias_and_path(&args(&["", "/tmp"]), &resolver),
      Err(ResolveError::EmptyAlias)
    ));
  }

  #[test]
  fn fs_resolver_folder_name() {
    let resolver = FsPathResolver;
    assert_eq!(resolver.parent_folder_name("/home/u/proj"), "proj");
    assert_eq!(resolver.parent_folder_name("/home/u/proj/"), "proj");
    assert_eq!(resolver.parent_folder_name("/"), "/");
  }

  #[test]
  fn fs_resolver_path_exists() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().to_str().unwrap().to_string();
    let missing = temp.path().join("missing").to_str().unwrap().to_string();

    assert!(FsPathResolver.path_exists(&existing).unwrap());
    assert!(!FsPathResolver.path_exists(&missing).unwrap());
  }

  #[test]
  fn fs_resolver_current_path_is_absolute() {
    let current = FsPathResolver.current_path().unwrap();
    assert!(Path::new(&current).is_absolute());
  }
}
