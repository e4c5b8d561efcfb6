// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for Lexi.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration: defaults, `/etc/lexi/config.toml`,
//!   `~/.config/lexi/config.toml`, `LEXI_*` environment variables, CLI flags
//! - Validation of the merged result

pub mod defaults;
pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use defaults::{ensure_default_config, DEFAULT_CONFIG_TEMPLATE};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{BackendConfig, LexiConfig, LogLevel, LoggingConfig, RetryConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, with CLI overrides on top.
///
/// Without `--config`, a starter user config is created on first run.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<LexiConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;
	let registry = build_registry(&paths, cli)?;
	registry.load(paths)
}

/// The standard source stack for `paths`.
pub fn build_registry(paths: &PathsConfig, cli: CliOverrides) -> Result<ConfigRegistry, ConfigError> {
	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system(paths)));
	match cli.config_file.clone() {
		Some(path) => registry.register(Box::new(sources::FileSource::explicit(path))),
		None => {
			ensure_default_config(&paths.user_config_file)?;
			registry.register(Box::new(sources::FileSource::user(paths)));
		}
	}
	registry.register(Box::new(sources::EnvSource));
	registry.register(Box::new(sources::CliSource::new(cli)));

	Ok(registry)
}
