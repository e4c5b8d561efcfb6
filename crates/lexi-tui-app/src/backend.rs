// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Context;
use lexi_cli_config::LexiConfig;
use lexi_supabase::{SupabaseClient, SupabaseConfig};

pub fn supabase_config(config: &LexiConfig) -> SupabaseConfig {
	SupabaseConfig::new(config.backend.url.as_str(), config.backend.anon_key.clone())
		.with_search_function(config.backend.search_function.as_str())
		.with_timeout(config.backend.timeout)
		.with_retry_config(config.retry.clone())
}

pub fn connect(config: &LexiConfig) -> anyhow::Result<SupabaseClient> {
	SupabaseClient::new(supabase_config(config)).context("failed to build backend client")
}
