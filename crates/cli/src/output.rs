//! CLI output formatting utilities.
//!
//! Colored status lines go to stdout/stderr; machine output is JSON.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const ARROW: &str = "→";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// `alias → path`, with the alias highlighted when the terminal supports it.
pub fn format_mapping(alias: &str, path: &str) -> String {
  format!(
    "{} {} {}",
    alias.if_supports_color(Stream::Stdout, |s| s.bold()),
    symbols::ARROW,
    path
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn output_format_json() {
    assert!(OutputFormat::Json.is_json());
    assert!(!OutputFormat::Text.is_json());
  }

  #[test]
  fn mapping_contains_both_sides() {
    let line = format_mapping("proj", "/work/proj");
    assert!(line.contains("proj"));
    assert!(line.contains("/work/proj"));
    assert!(line.contains(symbols::ARROW));
  }
}
