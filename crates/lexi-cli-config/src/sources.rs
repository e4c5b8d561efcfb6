// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::ffi::OsString;
use std::path::PathBuf;

use lexi_common_config::load_secret_env;
use tracing::{debug, trace, warn};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source. Defaults are applied when the merged layer is
/// resolved, so this contributes an empty layer.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// /etc/lexi/config.toml
	pub fn system(paths: &PathsConfig) -> Self {
		Self {
			path: paths.system_config_file.clone(),
			precedence: Precedence::SystemFile,
			name: "system-config",
			required: false,
		}
	}

	/// ~/.config/lexi/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// A file named with `--config`. Takes the user file's place and must
	/// exist.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::UserFile,
			name: "explicit-config",
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// The anon key is read with `load_secret_env`, so `LEXI_BACKEND_ANON_KEY_FILE`
/// works as well.
pub struct EnvSource;

pub const ENV_ANON_KEY: &str = "LEXI_BACKEND_ANON_KEY";

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = layer_from_vars(utf8_vars(std::env::vars_os()));

		let anon_key = load_secret_env(ENV_ANON_KEY)
			.map_err(|e| ConfigError::Env(format!("{ENV_ANON_KEY}: {e}")))?;
		if let Some(secret) = anon_key {
			trace!("loaded anon key from environment");
			layer.backend_mut().anon_key = Some(secret);
		}

		Ok(layer)
	}
}

/// Drops variables whose name or value is not valid UTF-8.
pub fn utf8_vars(
	vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> impl Iterator<Item = (String, String)> {
	vars.into_iter().filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
		(Ok(key), Ok(value)) => Some((key, value)),
		(Ok(key), Err(_)) => {
			warn!(key = %key, "ignoring env var with non UTF-8 value");
			None
		}
		_ => None,
	})
}

/// Builds a layer from `LEXI_*` variables other than the anon key.
pub fn layer_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> ConfigLayer {
	let mut layer = ConfigLayer::default();

	for (key, value) in vars {
		if !key.starts_with("LEXI_") {
			continue;
		}

		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match key.as_str() {
			"LEXI_BACKEND_URL" => layer.backend_mut().url = Some(value),
			"LEXI_SEARCH_FUNCTION" => layer.backend_mut().search_function = Some(value),
			"LEXI_BACKEND_TIMEOUT_SECS" => match value.parse() {
				Ok(secs) => layer.backend_mut().timeout_secs = Some(secs),
				Err(_) => warn!(key = %key, "ignoring non-numeric timeout"),
			},
			"LEXI_RETRY_MAX_ATTEMPTS" => match value.parse() {
				Ok(n) => layer.retry_mut().max_attempts = Some(n),
				Err(_) => warn!(key = %key, "ignoring non-numeric retry count"),
			},
			"LEXI_LOG_LEVEL" => layer.logging_mut().level = Some(value),
			"LEXI_LOG_FILE" => layer.logging_mut().file = Some(PathBuf::from(value)),
			_ => {}
		}
	}

	layer
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub backend_url: Option<String>,
	pub log_level: Option<String>,
	pub log_file: Option<PathBuf>,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref url) = self.overrides.backend_url {
			layer.backend_mut().url = Some(url.clone());
		}
		if let Some(ref level) = self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if let Some(ref file) = self.overrides.log_file {
			layer.logging_mut().file = Some(file.clone());
		}

		Ok(layer)
	}
}
