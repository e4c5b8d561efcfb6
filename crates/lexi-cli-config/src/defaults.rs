// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Starter configuration file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::ConfigError;

/// Written to ~/.config/lexi/config.toml when no user config exists.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"#
# Lexi Configuration File
# Location: ~/.config/lexi/config.toml
#
# Environment variables override this file:
#   LEXI_BACKEND_URL, LEXI_BACKEND_ANON_KEY (or LEXI_BACKEND_ANON_KEY_FILE),
#   LEXI_SEARCH_FUNCTION, LEXI_BACKEND_TIMEOUT_SECS, LEXI_LOG_LEVEL, LEXI_LOG_FILE
#

[backend]
# Supabase project URL
# url = "https://your-project.supabase.co"

# Public anon key. Prefer LEXI_BACKEND_ANON_KEY_FILE over putting it here.
# anon_key = "eyJhbGciOi..."

# Remote procedure that ranks statute sections
search_function = "search_legal_sections"

# Per-request timeout in seconds
timeout_secs = 10

[retry]
# Attempts per request, including the first
max_attempts = 3
base_delay_ms = 200
max_delay_ms = 5000

[logging]
# error, warn, info, debug, trace
level = "info"

# The TUI logs here; defaults to ~/.local/state/lexi/lexi.log
# file = "/tmp/lexi.log"
"#;

/// Create the config directory and a starter config file if none exists.
///
/// Returns `true` if a new file was written.
pub fn ensure_default_config(config_file_path: &Path) -> Result<bool, ConfigError> {
	if config_file_path.exists() {
		debug!(path = %config_file_path.display(), "config file already exists");
		return Ok(false);
	}

	if let Some(parent) = config_file_path.parent() {
		if !parent.exists() {
			debug!(path = %parent.display(), "creating config directory");
			fs::create_dir_all(parent)?;
		}
	}

	info!(path = %config_file_path.display(), "creating default config file");
	fs::write(config_file_path, DEFAULT_CONFIG_TEMPLATE)?;

	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn template_is_a_valid_layer() {
		let layer: crate::layer::ConfigLayer = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
		let backend = layer.backend.unwrap();
		assert_eq!(backend.url, None);
		assert_eq!(backend.search_function.as_deref(), Some("search_legal_sections"));
	}

	#[test]
	fn creates_file_and_parent_dirs() {
		let dir = tempdir().unwrap();
		let config_path = dir.path().join("nested/lexi/config.toml");

		assert!(ensure_default_config(&config_path).unwrap());
		let contents = fs::read_to_string(&config_path).unwrap();
		assert!(contents.contains("[backend]"));
	}

	#[test]
	fn does_not_overwrite() {
		let dir = tempdir().unwrap();
		let config_path = dir.path().join("config.toml");
		fs::write(&config_path, "# existing config\n").unwrap();

		assert!(!ensure_default_config(&config_path).unwrap());
		assert_eq!(fs::read_to_string(&config_path).unwrap(), "# existing config\n");
	}
}
