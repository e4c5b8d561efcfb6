// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `lexi search`: sign in, run one search, print it, sign out.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::ValueEnum;
use lexi_common_config::require_secret_env;
use lexi_search_core::{
	no_results_message, Credentials, QueryService, ResultsPane, SearchQuery, SearchScreen,
	SearchView, SessionProvider, SubmitSkipped,
};
use tracing::{info, warn};

pub const PASSWORD_ENV: &str = "LEXI_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

/// Reads the password from `LEXI_PASSWORD` or the file named by
/// `LEXI_PASSWORD_FILE`.
pub fn credentials_from_env(email: &str) -> anyhow::Result<Credentials> {
	let password = require_secret_env(PASSWORD_ENV)?;
	Ok(Credentials::new(email, password)?)
}

pub async fn run(
	session: Arc<dyn SessionProvider>,
	service: Arc<dyn QueryService>,
	credentials: Credentials,
	query: &str,
	format: OutputFormat,
	out: &mut impl Write,
) -> anyhow::Result<()> {
	if SearchQuery::parse(query).is_none() {
		bail!("query is empty");
	}

	let mut view = SearchView::new(session, service);

	let signed_in = view.sign_in(&credentials).await.context("sign in failed")?;
	info!(user_id = %signed_in.user_id, "signed in");

	view.set_query(query);
	let result = match view.submit().await {
		Ok(()) => write_results(out, &view.render(), format),
		Err(SubmitSkipped::EmptyQuery) => Err(anyhow::anyhow!("query is empty")),
		Err(SubmitSkipped::Unauthenticated) => Err(anyhow::anyhow!("not signed in")),
	};

	if let Err(err) = view.sign_out().await {
		warn!(error = %err, "sign out failed");
	}

	result
}

pub fn write_results(
	out: &mut impl Write,
	screen: &SearchScreen<'_>,
	format: OutputFormat,
) -> anyhow::Result<()> {
	if let Some(error) = screen.error {
		bail!("{error}");
	}

	let rows = match screen.results {
		ResultsPane::Sections(rows) => rows,
		_ => &[],
	};

	match format {
		OutputFormat::Json => {
			writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
		}
		OutputFormat::Text => match screen.results {
			ResultsPane::NoResults { query } => writeln!(out, "{}", no_results_message(query))?,
			_ => {
				for (i, row) in rows.iter().enumerate() {
					if i > 0 {
						writeln!(out)?;
					}
					writeln!(out, "Section {}  [IPC]", row.section_number)?;
					writeln!(out, "{}", row.title)?;
					if !row.description.is_empty() {
						writeln!(out, "{}", row.description)?;
					}
					if !row.punishment.is_empty() {
						writeln!(out, "Punishment: {}", row.punishment)?;
					}
				}
			}
		},
	}

	Ok(())
}
