// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing setup.
//!
//! The TUI owns the terminal, so it logs to a file. The one-shot `search`
//! command logs to stderr and keeps stdout for results. `RUST_LOG` wins over
//! the configured level in both cases.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use lexi_cli_config::LogLevel;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEXI_TARGETS: &[&str] = &[
	"lexi",
	"lexi_tui_app",
	"lexi_search_core",
	"lexi_supabase",
	"lexi_cli_config",
	"lexi_common_config",
	"lexi_common_http",
];

/// `level` for our own crates, `warn` for dependencies.
pub fn default_directives(level: LogLevel) -> String {
	let mut directives = vec!["warn".to_string()];
	directives.extend(
		LEXI_TARGETS
			.iter()
			.map(|target| format!("{target}={}", level.as_str())),
	);
	directives.join(",")
}

fn env_filter(level: LogLevel) -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))
}

pub fn init_file_logging(level: LogLevel, path: &Path) -> anyhow::Result<()> {
	let file = open_log_file(path)?;
	tracing_subscriber::registry()
		.with(env_filter(level))
		.with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
		.try_init()
		.context("failed to install tracing subscriber")
}

pub fn init_stderr_logging(level: LogLevel) -> anyhow::Result<()> {
	tracing_subscriber::registry()
		.with(env_filter(level))
		.with(fmt::layer().with_writer(std::io::stderr))
		.try_init()
		.context("failed to install tracing subscriber")
}
