// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use lexi_common_http::RetryConfig;
use lexi_common_secret::SecretString;

pub const DEFAULT_SEARCH_FUNCTION: &str = "search_legal_sections";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
	/// Project URL, e.g. `https://abc.supabase.co`.
	pub url: String,
	/// Public anon key, sent as `apikey` on every request.
	pub anon_key: SecretString,
	/// Name of the search procedure exposed through `/rest/v1/rpc/`.
	pub search_function: String,
	/// Per-request timeout.
	pub timeout: Duration,
	pub retry: RetryConfig,
}

impl SupabaseConfig {
	pub fn new(url: impl Into<String>, anon_key: SecretString) -> Self {
		Self {
			url: url.into(),
			anon_key,
			search_function: DEFAULT_SEARCH_FUNCTION.to_string(),
			timeout: DEFAULT_TIMEOUT,
			retry: RetryConfig::default(),
		}
	}

	pub fn with_search_function(mut self, function: impl Into<String>) -> Self {
		self.search_function = function.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
		self.retry = retry;
		self
	}

	/// `url` joined with `path`, tolerating a trailing slash on the base.
	pub(crate) fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.url.trim_end_matches('/'), path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = SupabaseConfig::new("https://abc.supabase.co", SecretString::new("anon".into()));
		assert_eq!(config.search_function, "search_legal_sections");
		assert_eq!(config.timeout, Duration::from_secs(10));
		assert_eq!(config.retry, RetryConfig::default());
	}

	#[test]
	fn endpoint_ignores_trailing_slash() {
		let config = SupabaseConfig::new("https://abc.supabase.co/", SecretString::new("anon".into()));
		assert_eq!(
			config.endpoint("/rest/v1/rpc/search_legal_sections"),
			"https://abc.supabase.co/rest/v1/rpc/search_legal_sections"
		);
	}

	#[test]
	fn debug_redacts_anon_key() {
		let config = SupabaseConfig::new("https://abc.supabase.co", SecretString::new("eyJhbGci".into()));
		let debug = format!("{config:?}");
		assert!(!debug.contains("eyJhbGci"));
		assert!(debug.contains("[REDACTED]"));
	}
}
