// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Returns a client builder carrying the Lexi User-Agent.
///
/// Callers add their own timeout before `build()`.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client with the given request timeout.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// The Lexi User-Agent: `lexi/{version} ({os}-{arch})`.
pub fn user_agent() -> String {
	format!(
		"lexi/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
