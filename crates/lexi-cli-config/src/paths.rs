// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

const APP_DIR: &str = "lexi";

/// Resolved XDG paths for Lexi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// ~/.config/lexi/config.toml
	pub user_config_file: PathBuf,
	/// /etc/lexi/config.toml
	pub system_config_file: PathBuf,
	/// ~/.local/state/lexi/, home of the TUI log file
	pub state_dir: PathBuf,
}

impl PathsConfig {
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}

	/// Where the TUI writes logs unless `logging.file` says otherwise.
	pub fn default_log_file(&self) -> PathBuf {
		self.state_dir.join("lexi.log")
	}
}

/// Resolve paths from `XDG_CONFIG_HOME` and `XDG_STATE_HOME`, falling back
/// to `~/.config` and `~/.local/state`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.filter(|v| !v.is_empty())
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let state_home = std::env::var_os("XDG_STATE_HOME")
		.filter(|v| !v.is_empty())
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/state"));

	tracing::debug!(
		config_home = %config_home.display(),
		state_home = %state_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join(APP_DIR).join("config.toml"),
		system_config_file: PathBuf::from("/etc/lexi/config.toml"),
		state_dir: state_home.join(APP_DIR),
	})
}
