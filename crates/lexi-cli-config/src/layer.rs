// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use lexi_common_config::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub backend: Option<BackendLayer>,
	#[serde(default)]
	pub retry: Option<RetryLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub anon_key: Option<SecretString>,
	#[serde(default)]
	pub search_function: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for BackendLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BackendLayer")
			.field("url", &self.url)
			.field("anon_key", &self.anon_key)
			.field("search_function", &self.search_function)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryLayer {
	#[serde(default)]
	pub max_attempts: Option<u32>,
	#[serde(default)]
	pub base_delay_ms: Option<u64>,
	#[serde(default)]
	pub max_delay_ms: Option<u64>,
	#[serde(default)]
	pub backoff_factor: Option<f64>,
	#[serde(default)]
	pub jitter: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub file: Option<PathBuf>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.backend, other.backend, BackendLayer::merge);
		merge_option(&mut self.retry, other.retry, RetryLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}

	pub(crate) fn backend_mut(&mut self) -> &mut BackendLayer {
		self.backend.get_or_insert_with(BackendLayer::default)
	}

	pub(crate) fn retry_mut(&mut self) -> &mut RetryLayer {
		self.retry.get_or_insert_with(RetryLayer::default)
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn take_some<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl BackendLayer {
	fn merge(&mut self, other: BackendLayer) {
		take_some(&mut self.url, other.url);
		take_some(&mut self.anon_key, other.anon_key);
		take_some(&mut self.search_function, other.search_function);
		take_some(&mut self.timeout_secs, other.timeout_secs);
	}
}

impl RetryLayer {
	fn merge(&mut self, other: RetryLayer) {
		take_some(&mut self.max_attempts, other.max_attempts);
		take_some(&mut self.base_delay_ms, other.base_delay_ms);
		take_some(&mut self.max_delay_ms, other.max_delay_ms);
		take_some(&mut self.backoff_factor, other.backoff_factor);
		take_some(&mut self.jitter, other.jitter);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		take_some(&mut self.level, other.level);
		take_some(&mut self.file, other.file);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_full_file() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[backend]
			url = "https://abc.supabase.co"
			anon_key = "eyJhbGci"
			search_function = "search_legal_sections"
			timeout_secs = 15

			[retry]
			max_attempts = 4
			base_delay_ms = 100

			[logging]
			level = "debug"
			file = "/tmp/lexi.log"
			"#,
		)
		.unwrap();

		let backend = layer.backend.unwrap();
		assert_eq!(backend.url.as_deref(), Some("https://abc.supabase.co"));
		assert_eq!(backend.anon_key.unwrap().expose(), "eyJhbGci");
		assert_eq!(backend.timeout_secs, Some(15));
		assert_eq!(layer.retry.unwrap().max_attempts, Some(4));
		assert_eq!(layer.logging.unwrap().file, Some(PathBuf::from("/tmp/lexi.log")));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let result: Result<ConfigLayer, _> = toml::from_str("[backend]\nurll = \"x\"\n");
		assert!(result.is_err());
	}

	#[test]
	fn merge_keeps_unset_fields() {
		let mut base: ConfigLayer =
			toml::from_str("[backend]\nurl = \"https://a.example\"\ntimeout_secs = 5\n").unwrap();
		let over: ConfigLayer = toml::from_str("[backend]\ntimeout_secs = 9\n").unwrap();
		base.merge(over);

		let backend = base.backend.unwrap();
		assert_eq!(backend.url.as_deref(), Some("https://a.example"));
		assert_eq!(backend.timeout_secs, Some(9));
	}

	#[test]
	fn debug_redacts_anon_key() {
		let layer: ConfigLayer = toml::from_str("[backend]\nanon_key = \"eyJhbGci\"\n").unwrap();
		let debug = format!("{layer:?}");
		assert!(!debug.contains("eyJhbGci"));
	}

	proptest! {
		#[test]
		fn later_layer_wins(a in 1u64..600, b in 1u64..600) {
			let mut base = ConfigLayer::default();
			base.backend_mut().timeout_secs = Some(a);
			let mut over = ConfigLayer::default();
			over.backend_mut().timeout_secs = Some(b);
			base.merge(over);
			prop_assert_eq!(base.backend.unwrap().timeout_secs, Some(b));
		}
	}
}
