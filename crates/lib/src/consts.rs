//! Names shared across the crate.

/// Application name, used for the `~/.<app_name>` data directory.
pub const APP_NAME: &str = "gitswitch";

/// Bucket holding the alias -> path pairs.
pub const DEFAULT_BUCKET: &str = "kv";

/// File name of the store inside the application directory.
pub const STORE_FILENAME: &str = "store.db";

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILENAME: &str = "config.yaml";

pub const ENV_APP_NAME: &str = "GITSWITCH_APP_NAME";
pub const ENV_BUCKET: &str = "GITSWITCH_BUCKET";
pub const ENV_STORE: &str = "GITSWITCH_STORE";
