//! Test helpers shared across modules.

use std::cell::Cell;
use std::io;

use crate::resolve::PathResolver;

/// Scripted resolver that counts how often each query runs.
#[derive(Default)]
pub struct ScriptedResolver {
  pub current_path: Option<String>,
  pub folder_name: String,
  pub exists: Option<bool>,
  pub current_path_calls: Cell<usize>,
  pub folder_name_calls: Cell<usize>,
  pub exists_calls: Cell<usize>,
}

impl ScriptedResolver {
  pub fn at(path: &str, folder_name: &str) -> Self {
    Self {
      current_path: Some(path.to_string()),
      folder_name: folder_name.to_string(),
      ..Self::default()
    }
  }

  pub fn with_existing(exists: Option<bool>) -> Self {
    Self {
      exists,
      ..Self::default()
    }
  }

  pub fn total_calls(&self) -> usize {
    self.current_path_calls.get() + self.folder_name_calls.get() + self.exists_calls.get()
  }
}

impl PathResolver for ScriptedResolver {
  fn current_path(&self) -> io::Result<String> {
    self.current_path_calls.set(self.current_path_calls.get() + 1);
    self
      .current_path
      .clone()
      .ok_or_else(|| io::Error::other("no current path"))
  }

  fn parent_folder_name(&self, _path: &str) -> String {
    self.folder_name_calls.set(self.folder_name_calls.get() + 1);
    self.folder_name.clone()
  }

  fn path_exists(&self, _path: &str) -> io::Result<bool> {
    self.exists_calls.set(self.exists_calls.get() + 1);
    self
      .exists
      .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
  }
}
