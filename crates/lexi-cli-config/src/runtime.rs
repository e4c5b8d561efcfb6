// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use lexi_common_config::SecretString;
pub use lexi_common_http::RetryConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_SEARCH_FUNCTION: &str = "search_legal_sections";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The final, validated configuration for Lexi.
#[derive(Debug, Clone)]
pub struct LexiConfig {
	pub backend: BackendConfig,
	pub retry: RetryConfig,
	pub logging: LoggingConfig,
	pub paths: PathsConfig,
}

#[derive(Clone)]
pub struct BackendConfig {
	pub url: Url,
	pub anon_key: SecretString,
	pub search_function: String,
	pub timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BackendConfig")
			.field("url", &self.url.as_str())
			.field("anon_key", &self.anon_key)
			.field("search_function", &self.search_function)
			.field("timeout", &self.timeout)
			.finish()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: LogLevel,
	/// Explicit log file; `None` means the default under the state dir.
	pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	/// Directive understood by `tracing_subscriber::EnvFilter`.
	pub fn as_str(self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

impl LexiConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			backend: build_backend_config(layer.backend)?,
			retry: build_retry_config(layer.retry),
			logging: build_logging_config(layer.logging),
			paths,
		})
	}

	/// The file the TUI logs to.
	pub fn log_file(&self) -> PathBuf {
		self
			.logging
			.file
			.clone()
			.unwrap_or_else(|| self.paths.default_log_file())
	}
}

fn build_backend_config(layer: Option<BackendLayer>) -> Result<BackendConfig, ConfigError> {
	let layer = layer.unwrap_or_default();

	let raw_url = layer
		.url
		.filter(|u| !u.trim().is_empty())
		.ok_or_else(|| ConfigError::missing_field("backend.url"))?;
	let url = Url::parse(raw_url.trim())
		.map_err(|e| ConfigError::invalid_value("backend.url", e.to_string()))?;

	let anon_key = layer
		.anon_key
		.filter(|k| !k.is_blank())
		.ok_or_else(|| ConfigError::missing_field("backend.anon_key"))?;

	Ok(BackendConfig {
		url,
		anon_key,
		search_function: layer
			.search_function
			.unwrap_or_else(|| DEFAULT_SEARCH_FUNCTION.to_string()),
		timeout: Duration::from_secs(layer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
	})
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		file: layer.file,
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s.map(|s| s.to_ascii_lowercase()).as_deref() {
		Some("error") => LogLevel::Error,
		Some("warn") | Some("warning") => LogLevel::Warn,
		Some("info") | None => LogLevel::Info,
		Some("debug") => LogLevel::Debug,
		Some("trace") => LogLevel::Trace,
		Some(other) => {
			warn!(level = %other, "unknown log level, using info");
			LogLevel::Info
		}
	}
}

fn build_retry_config(layer: Option<RetryLayer>) -> RetryConfig {
	let layer = layer.unwrap_or_default();
	let defaults = RetryConfig::default();
	RetryConfig {
		max_attempts: layer.max_attempts.unwrap_or(defaults.max_attempts),
		base_delay: layer
			.base_delay_ms
			.map(Duration::from_millis)
			.unwrap_or(defaults.base_delay),
		max_delay: layer
			.max_delay_ms
			.map(Duration::from_millis)
			.unwrap_or(defaults.max_delay),
		backoff_factor: layer.backoff_factor.unwrap_or(defaults.backoff_factor),
		jitter: layer.jitter.unwrap_or(defaults.jitter),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn paths() -> PathsConfig {
		PathsConfig {
			user_config_file: "/tmp/lexi/config.toml".into(),
			system_config_file: "/etc/lexi/config.toml".into(),
			state_dir: "/tmp/lexi/state".into(),
		}
	}

	fn layer(toml: &str) -> ConfigLayer {
		toml::from_str(toml).unwrap()
	}

	#[test]
	fn minimal_backend_gets_defaults() {
		let config = LexiConfig::from_layer(
			layer("[backend]\nurl = \"https://abc.supabase.co\"\nanon_key = \"k\"\n"),
			paths(),
		)
		.unwrap();

		assert_eq!(config.backend.url.as_str(), "https://abc.supabase.co/");
		assert_eq!(config.backend.search_function, "search_legal_sections");
		assert_eq!(config.backend.timeout, Duration::from_secs(10));
		assert_eq!(config.retry, RetryConfig::default());
		assert_eq!(config.logging.level, LogLevel::Info);
		assert_eq!(config.log_file(), PathBuf::from("/tmp/lexi/state/lexi.log"));
	}

	#[test]
	fn retry_section_resolves_to_http_policy() {
		let config = LexiConfig::from_layer(
			layer(
				"[backend]\nurl = \"https://abc.supabase.co\"\nanon_key = \"k\"\n\
				 [retry]\nmax_attempts = 5\nmax_delay_ms = 1500\njitter = false\n",
			),
			paths(),
		)
		.unwrap();

		let policy: lexi_common_http::RetryConfig = config.retry;
		assert_eq!(policy.max_attempts, 5);
		assert_eq!(policy.base_delay, Duration::from_millis(200));
		assert_eq!(policy.max_delay, Duration::from_millis(1500));
		assert_eq!(policy.backoff_factor, 2.0);
		assert!(!policy.jitter);
	}

	#[test]
	fn missing_url_is_reported() {
		let err = LexiConfig::from_layer(layer("[backend]\nanon_key = \"k\"\n"), paths()).unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "backend.url"));
	}

	#[test]
	fn blank_anon_key_is_missing() {
		let err = LexiConfig::from_layer(
			layer("[backend]\nurl = \"https://abc.supabase.co\"\nanon_key = \"  \"\n"),
			paths(),
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "backend.anon_key"));
	}

	#[test]
	fn unparseable_url_is_invalid() {
		let err = LexiConfig::from_layer(
			layer("[backend]\nurl = \"not a url\"\nanon_key = \"k\"\n"),
			paths(),
		)
		.unwrap_err();
		assert!(err.to_string().contains("backend.url"));
	}

	#[test]
	fn log_levels_parse_leniently() {
		assert_eq!(parse_log_level(Some("DEBUG")), LogLevel::Debug);
		assert_eq!(parse_log_level(Some("warning")), LogLevel::Warn);
		assert_eq!(parse_log_level(Some("loud")), LogLevel::Info);
		assert_eq!(LogLevel::Trace.as_str(), "trace");
	}

	#[test]
	fn debug_redacts_anon_key() {
		let config = LexiConfig::from_layer(
			layer("[backend]\nurl = \"https://abc.supabase.co\"\nanon_key = \"eyJhbGci\"\n"),
			paths(),
		)
		.unwrap();
		assert!(!format!("{config:?}").contains("eyJhbGci"));
	}
}
