mod add;
mod get;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use gitswitch_lib::{Config, RedbDatabase, Registry};

pub use add::cmd_add;
pub use get::cmd_get;

/// Load configuration and open the registry it points at.
fn open_registry(config_path: Option<&Path>) -> Result<Registry<RedbDatabase>> {
  let config = Config::load(config_path).context("Failed to load configuration")?;
  let store_path = config.store_location().context("Failed to locate store")?;
  debug!(store = %store_path.display(), bucket = %config.bucket, "opening registry");

  let db = RedbDatabase::open(&store_path, &config.bucket).context("Failed to open store")?;
  Ok(Registry::new(db, config.bucket))
}
