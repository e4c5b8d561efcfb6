// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pure render model of the search view.
//!
//! Front ends (the TUI, the one-shot `search` command) draw a
//! [`SearchScreen`] and nothing else, so the rules for what is visible live
//! in one place.

use crate::types::LegalSection;
use crate::view::ViewState;

pub const SUBMIT_LABEL: &str = "Search";
pub const SUBMIT_LABEL_LOADING: &str = "Searching...";

/// What the results area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsPane<'a> {
	/// One card per row.
	Sections(&'a [LegalSection]),
	/// A query was attempted and no rows are held, whether it came back empty
	/// or failed.
	NoResults { query: &'a str },
	/// Nothing searched yet, or a search is in flight.
	Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScreen<'a> {
	pub query: &'a str,
	pub authenticated: bool,
	pub submit_enabled: bool,
	pub submit_label: &'static str,
	pub error: Option<&'a str>,
	pub results: ResultsPane<'a>,
}

/// `No results found for "<query>"`.
pub fn no_results_message(query: &str) -> String {
	format!("No results found for \"{query}\"")
}

pub fn render(state: &ViewState, authenticated: bool) -> SearchScreen<'_> {
	let results = if !state.results.is_empty() {
		ResultsPane::Sections(&state.results)
	} else {
		match &state.last_query {
			Some(query) if !state.loading => ResultsPane::NoResults {
				query: query.as_str(),
			},
			_ => ResultsPane::Empty,
		}
	};

	SearchScreen {
		query: &state.query,
		authenticated,
		submit_enabled: authenticated && !state.loading,
		submit_label: if state.loading {
			SUBMIT_LABEL_LOADING
		} else {
			SUBMIT_LABEL
		},
		error: state.error.as_deref(),
		results,
	}
}
