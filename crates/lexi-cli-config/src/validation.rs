// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use tracing::warn;

use crate::runtime::LexiConfig;
use crate::ConfigError;

/// Validate the configuration.
pub fn validate_config(config: &LexiConfig) -> Result<(), ConfigError> {
	validate_backend(config)?;
	validate_retry(config)?;

	Ok(())
}

fn validate_backend(config: &LexiConfig) -> Result<(), ConfigError> {
	let backend = &config.backend;

	match backend.url.scheme() {
		"https" => {}
		"http" => {
			let local = matches!(
				backend.url.host_str(),
				Some("localhost") | Some("127.0.0.1") | Some("[::1]")
			);
			if !local {
				warn!(url = %backend.url, "backend url is not https; tokens travel in clear text");
			}
		}
		other => {
			return Err(ConfigError::invalid_value(
				"backend.url",
				format!("unsupported scheme '{other}', expected http or https"),
			));
		}
	}

	if backend.url.host_str().is_none() {
		return Err(ConfigError::invalid_value("backend.url", "must include a host"));
	}

	if backend.search_function.is_empty()
		|| !backend
			.search_function
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err(ConfigError::invalid_value(
			"backend.search_function",
			"must be a non-empty identifier of letters, digits and underscores",
		));
	}

	if backend.timeout.as_secs() == 0 {
		return Err(ConfigError::invalid_value(
			"backend.timeout_secs",
			"must be greater than 0",
		));
	}

	if backend.timeout.as_secs() > 300 {
		return Err(ConfigError::invalid_value(
			"backend.timeout_secs",
			"must be at most 300",
		));
	}

	Ok(())
}

fn validate_retry(config: &LexiConfig) -> Result<(), ConfigError> {
	let retry = &config.retry;

	if retry.max_attempts == 0 {
		return Err(ConfigError::invalid_value(
			"retry.max_attempts",
			"must be at least 1",
		));
	}

	if retry.max_attempts > 20 {
		return Err(ConfigError::invalid_value(
			"retry.max_attempts",
			"must be at most 20",
		));
	}

	if !(1.0..=10.0).contains(&retry.backoff_factor) {
		return Err(ConfigError::invalid_value(
			"retry.backoff_factor",
			"must be between 1.0 and 10.0",
		));
	}

	if retry.base_delay > retry.max_delay {
		return Err(ConfigError::invalid_value(
			"retry.base_delay_ms",
			"cannot be greater than max_delay_ms",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::paths::PathsConfig;
	use crate::runtime::{BackendConfig, LoggingConfig, RetryConfig};
	use lexi_common_config::SecretString;
	use std::time::Duration;
	use url::Url;

	fn minimal_config() -> LexiConfig {
		LexiConfig {
			backend: BackendConfig {
				url: Url::parse("https://abc.supabase.co").unwrap(),
				anon_key: SecretString::new("k".to_string()),
				search_function: "search_legal_sections".to_string(),
				timeout: Duration::from_secs(10),
			},
			retry: RetryConfig::default(),
			logging: LoggingConfig::default(),
			paths: PathsConfig {
				user_config_file: "/tmp/config.toml".into(),
				system_config_file: "/etc/lexi/config.toml".into(),
				state_dir: "/tmp/state".into(),
			},
		}
	}

	#[test]
	fn minimal_config_is_valid() {
		assert!(validate_config(&minimal_config()).is_ok());
	}

	#[test]
	fn local_http_is_allowed() {
		let mut config = minimal_config();
		config.backend.url = Url::parse("http://127.0.0.1:54321").unwrap();
		assert!(validate_config(&config).is_ok());
	}

	#[test]
	fn other_schemes_fail() {
		let mut config = minimal_config();
		config.backend.url = Url::parse("ftp://abc.supabase.co").unwrap();
		let err = validate_config(&config).unwrap_err();
		assert!(err.to_string().contains("backend.url"));
	}

	#[test]
	fn search_function_must_be_an_identifier() {
		let mut config = minimal_config();
		config.backend.search_function = "search; drop".to_string();
		assert!(validate_config(&config).is_err());
		config.backend.search_function = String::new();
		assert!(validate_config(&config).is_err());
	}

	#[test]
	fn zero_timeout_fails() {
		let mut config = minimal_config();
		config.backend.timeout = Duration::ZERO;
		let err = validate_config(&config).unwrap_err();
		assert!(err.to_string().contains("timeout_secs"));
	}

	#[test]
	fn zero_max_attempts_fails() {
		let mut config = minimal_config();
		config.retry.max_attempts = 0;
		let err = validate_config(&config).unwrap_err();
		assert!(err.to_string().contains("max_attempts"));
	}

	#[test]
	fn base_delay_greater_than_max_fails() {
		let mut config = minimal_config();
		config.retry.base_delay = Duration::from_secs(60);
		config.retry.max_delay = Duration::from_secs(30);
		assert!(validate_config(&config).is_err());
	}
}
