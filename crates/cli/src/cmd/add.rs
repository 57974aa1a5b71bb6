//! Implementation of the `gs add` command.

use std::path::Path;

use anyhow::{Context, Result};

use gitswitch_lib::{Database, FsPathResolver, register, resolve_alias_and_path};

use crate::output::{format_mapping, print_success};

/// Execute the add command.
///
/// Resolves the alias and path from `args` (see `gs add --help`) and stores
/// the pair, overwriting any previous path for the alias. The store is only
/// opened once the arguments are accepted.
pub fn cmd_add(args: &[String], config_path: Option<&Path>) -> Result<()> {
  let resolution = resolve_alias_and_path(args, &FsPathResolver)?;

  let registry = super::open_registry(config_path)?;
  register(&resolution, &registry)?;
  registry.into_inner().close().context("Failed to close store")?;

  print_success(&format!("Added {}", format_mapping(&resolution.alias, &resolution.path)));
  Ok(())
}
