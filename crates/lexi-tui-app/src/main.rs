// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `lexi`: search statute sections from the terminal.

mod app;
mod backend;
mod layout;
mod logging;
mod search_cmd;
mod sign_in;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lexi_cli_config::{load_config_with_cli, CliOverrides};
use lexi_tui_theme::Theme;
use tracing::info;

use app::App;
use search_cmd::OutputFormat;

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "lexi", about = "Search legal sections by keyword", version)]
struct Args {
	/// Config file to use instead of ~/.config/lexi/config.toml
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Backend project URL
	#[arg(long, global = true)]
	backend_url: Option<String>,

	#[arg(short, long, global = true)]
	log_level: Option<String>,

	/// Log file for the interactive UI
	#[arg(long, global = true)]
	log_file: Option<PathBuf>,

	/// Color theme: dark or light
	#[arg(long, default_value = "dark", value_parser = parse_theme)]
	theme: Theme,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign in, run one search and print the matching sections
	Search {
		query: String,

		/// Account email; the password is read from LEXI_PASSWORD or LEXI_PASSWORD_FILE
		#[arg(long, env = "LEXI_EMAIL")]
		email: String,

		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

impl Args {
	fn cli_overrides(&self) -> CliOverrides {
		CliOverrides {
			config_file: self.config.clone(),
			backend_url: self.backend_url.clone(),
			log_level: self.log_level.clone(),
			log_file: self.log_file.clone(),
		}
	}
}

fn parse_theme(name: &str) -> Result<Theme, String> {
	Theme::by_name(name).ok_or_else(|| format!("unknown theme '{name}', expected dark or light"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let config = load_config_with_cli(args.cli_overrides()).context(
		"failed to load configuration; set backend.url and backend.anon_key in the config file \
		 or LEXI_BACKEND_URL and LEXI_BACKEND_ANON_KEY",
	)?;

	match args.command {
		Some(Command::Search {
			query,
			email,
			format,
		}) => {
			logging::init_stderr_logging(config.logging.level)?;
			let client = Arc::new(backend::connect(&config)?);
			let credentials = search_cmd::credentials_from_env(&email)?;
			search_cmd::run(
				client.clone(),
				client,
				credentials,
				&query,
				format,
				&mut std::io::stdout(),
			)
			.await
		}
		None => {
			let log_file = config.log_file();
			logging::init_file_logging(config.logging.level, &log_file)?;
			info!(
				version = env!("CARGO_PKG_VERSION"),
				backend = %config.backend.url,
				log_file = %log_file.display(),
				"starting lexi"
			);

			let client = Arc::new(backend::connect(&config)?);
			let app = App::new(client.clone(), client, args.theme);
			terminal::run_tui_app(app, TICK_RATE)
		}
	}
}
