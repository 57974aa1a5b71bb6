//! Runtime configuration.
//!
//! Values come from, highest precedence first: `GITSWITCH_*` environment
//! variables, a YAML config file, and built-in defaults. `GITSWITCH_STORE`
//! overrides `store_path`.
//!
//! ```yaml
//! app_name: gitswitch
//! bucket: kv
//! store_path: /home/me/.gitswitch/store.db
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::consts::{APP_NAME, CONFIG_FILENAME, DEFAULT_BUCKET, ENV_APP_NAME, ENV_BUCKET, ENV_STORE};
use crate::platform::paths::{self, PathsError};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse config file {}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },

  #[error("config value '{field}' must not be empty")]
  Empty { field: &'static str },
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
  app_name: Option<String>,
  bucket: Option<String>,
  store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Names the `~/.<app_name>` directory holding the store.
  pub app_name: String,
  /// Bucket the aliases live in.
  pub bucket: String,
  /// Explicit store file, overriding the location derived from `app_name`.
  pub store_path: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      app_name: APP_NAME.to_string(),
      bucket: DEFAULT_BUCKET.to_string(),
      store_path: None,
    }
  }
}

impl Config {
  /// Load configuration.
  ///
  /// With `explicit`, that file must exist. Without it, `config.yaml` in the
  /// working directory is used when present and defaults otherwise.
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    let file = match explicit {
      Some(path) => Some(read_file(path)?),
      None => {
        let path = Path::new(CONFIG_FILENAME);
        match fs::read_to_string(path) {
          Ok(content) => Some(parse(path, &content)?),
          Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no config file found, using defaults and environment");
            None
          }
          Err(source) => {
            return Err(ConfigError::Read {
              path: path.to_path_buf(),
              source,
            });
          }
        }
      }
    };

    let mut config = Self::default();
    if let Some(file) = file {
      config.merge(file);
    }
    config.apply_env();
    config.validate()?;
    Ok(config)
  }

  /// Parse a YAML document on top of the defaults. Environment variables are
  /// not consulted.
  #[cfg(test)]
  fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    config.merge(parse(Path::new("<inline>"), content)?);
    config.validate()?;
    Ok(config)
  }

  /// Location of the store file for this configuration.
  pub fn store_location(&self) -> Result<PathBuf, PathsError> {
    paths::store_path(&self.app_name, self.store_path.as_deref())
  }

  fn merge(&mut self, file: ConfigFile) {
    if let Some(app_name) = file.app_name {
      self.app_name = app_name;
    }
    if let Some(bucket) = file.bucket {
      self.bucket = bucket;
    }
    if file.store_path.is_some() {
      self.store_path = file.store_path;
    }
  }

  fn apply_env(&mut self) {
    if let Ok(app_name) = std::env::var(ENV_APP_NAME) {
      self.app_name = app_name;
    }
    if let Ok(bucket) = std::env::var(ENV_BUCKET) {
      self.bucket = bucket;
    }
    if let Some(store) = std::env::var_os(ENV_STORE).filter(|s| !s.is_empty()) {
      self.store_path = Some(PathBuf::from(store));
    }
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.app_name.trim().is_empty() {
      return Err(ConfigError::Empty { field: "app_name" });
    }
    if self.bucket.is_empty() {
      return Err(ConfigError::Empty { field: "bucket" });
    }
    Ok(())
  }
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  parse(path, &content)
}

fn parse(path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
  if content.trim().is_empty() {
    return Ok(ConfigFile::default());
  }
  serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
