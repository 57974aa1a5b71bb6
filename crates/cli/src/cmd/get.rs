//! Implementation of the `gs get` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use gitswitch_lib::{Database, Resolution};

use crate::output::{OutputFormat, print_json};

/// Execute the get command.
///
/// Prints the bare path so it can be used as `cd "$(gs get <alias>)"`.
pub fn cmd_get(alias: &str, output: OutputFormat, config_path: Option<&Path>) -> Result<()> {
  let registry = super::open_registry(config_path)?;

  let path = registry
    .get(alias)
    .with_context(|| format!("Failed to look up alias '{}'", alias))?;

  registry.into_inner().close().context("Failed to close store")?;

  let Some(path) = path else {
    bail!("alias '{}' not found", alias);
  };

  if output.is_json() {
    print_json(&Resolution {
      alias: alias.to_string(),
      path,
    })?;
  } else {
    println!("{}", path);
  }

  Ok(())
}
