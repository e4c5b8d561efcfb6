// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The search view model.
//!
//! A submit is split in two so a UI event loop never waits on the network:
//! [`SearchView::begin_submit`] validates and marks the view as loading,
//! the returned [`SearchTicket`] runs on any task, and
//! [`SearchView::complete`] folds the answer back in. [`SearchView::submit`]
//! does all three for callers that can simply await.
//!
//! Every ticket carries a generation number. Only the newest generation may
//! change the view; answers to superseded searches are dropped, so the last
//! search the user started is the one they see.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::render::{self, SearchScreen};
use crate::service::{QueryError, QueryService};
use crate::session::{Credentials, Session, SessionError, SessionProvider};
use crate::types::{LegalSection, SearchQuery};

/// Error shown when a search is attempted without a session.
pub const UNAUTHENTICATED_MESSAGE: &str = "Please sign in to search";

/// Everything rendering depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
	/// Text in the input field, untrimmed.
	pub query: String,
	/// Rows of the last successful search.
	pub results: Vec<LegalSection>,
	pub loading: bool,
	pub error: Option<String>,
	/// The query most recently sent to the query service.
	pub last_query: Option<SearchQuery>,
}

/// Why a submit did not start a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSkipped {
	/// Blank input; the view is untouched.
	EmptyQuery,
	/// No session; the view now shows [`UNAUTHENTICATED_MESSAGE`].
	Unauthenticated,
}

/// A search that has been accepted by the view but not yet run.
#[derive(Debug, Clone)]
pub struct SearchTicket {
	generation: u64,
	query: SearchQuery,
}

impl SearchTicket {
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn query(&self) -> &SearchQuery {
		&self.query
	}

	/// Calls the query service once with the trimmed query.
	pub async fn run(self, service: &dyn QueryService) -> SearchCompletion {
		let outcome = service.search(&self.query).await;
		SearchCompletion {
			generation: self.generation,
			query: self.query,
			outcome,
		}
	}
}

/// The answer to a [`SearchTicket`], ready to be applied to the view.
#[derive(Debug, Clone)]
pub struct SearchCompletion {
	generation: u64,
	query: SearchQuery,
	outcome: Result<Vec<LegalSection>, QueryError>,
}

impl SearchCompletion {
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn query(&self) -> &SearchQuery {
		&self.query
	}

	pub fn outcome(&self) -> &Result<Vec<LegalSection>, QueryError> {
		&self.outcome
	}
}

pub struct SearchView {
	state: ViewState,
	generation: u64,
	session: Arc<dyn SessionProvider>,
	service: Arc<dyn QueryService>,
}

impl SearchView {
	pub fn new(session: Arc<dyn SessionProvider>, service: Arc<dyn QueryService>) -> Self {
		Self {
			state: ViewState::default(),
			generation: 0,
			session,
			service,
		}
	}

	pub fn state(&self) -> &ViewState {
		&self.state
	}

	pub fn query(&self) -> &str {
		&self.state.query
	}

	pub fn set_query(&mut self, text: impl Into<String>) {
		self.state.query = text.into();
	}

	pub fn is_authenticated(&self) -> bool {
		self.session.current_session().is_some()
	}

	pub fn current_session(&self) -> Option<Session> {
		self.session.current_session()
	}

	/// Whether the submit control is enabled.
	pub fn can_submit(&self) -> bool {
		!self.state.loading && self.is_authenticated()
	}

	/// Validates the current query and, if a search should run, marks the
	/// view as loading and hands back the ticket to run.
	pub fn begin_submit(&mut self) -> Result<SearchTicket, SubmitSkipped> {
		let Some(query) = SearchQuery::parse(&self.state.query) else {
			trace!("ignoring submit of blank query");
			return Err(SubmitSkipped::EmptyQuery);
		};

		if !self.is_authenticated() {
			debug!("submit without a session");
			self.state.error = Some(UNAUTHENTICATED_MESSAGE.to_string());
			return Err(SubmitSkipped::Unauthenticated);
		}

		self.generation += 1;
		self.state.error = None;
		self.state.loading = true;
		self.state.last_query = Some(query.clone());

		debug!(
			generation = self.generation,
			query_chars = query.char_count(),
			"search started"
		);

		Ok(SearchTicket {
			generation: self.generation,
			query,
		})
	}

	/// Applies a finished search. Returns `false` when the completion belongs
	/// to a superseded search and was discarded.
	pub fn complete(&mut self, completion: SearchCompletion) -> bool {
		if completion.generation != self.generation {
			debug!(
				generation = completion.generation,
				latest = self.generation,
				"discarding response of superseded search"
			);
			return false;
		}

		self.state.loading = false;
		match completion.outcome {
			Ok(rows) => {
				info!(
					generation = completion.generation,
					result_count = rows.len(),
					"search completed"
				);
				self.state.results = rows;
				self.state.error = None;
			}
			Err(err) => {
				warn!(
					generation = completion.generation,
					error = %err,
					"search failed"
				);
				self.state.error = Some(err.user_message());
			}
		}
		true
	}

	/// Submit and wait for the answer in place.
	pub async fn submit(&mut self) -> Result<(), SubmitSkipped> {
		let ticket = self.begin_submit()?;
		let service = Arc::clone(&self.service);
		let completion = ticket.run(service.as_ref()).await;
		self.complete(completion);
		Ok(())
	}

	pub fn query_service(&self) -> Arc<dyn QueryService> {
		Arc::clone(&self.service)
	}

	pub fn session_provider(&self) -> Arc<dyn SessionProvider> {
		Arc::clone(&self.session)
	}

	pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, SessionError> {
		self.session.sign_in(credentials).await
	}

	pub async fn sign_out(&self) -> Result<(), SessionError> {
		self.session.sign_out().await
	}

	/// The render model for the current state.
	pub fn render(&self) -> SearchScreen<'_> {
		render::render(&self.state, self.is_authenticated())
	}
}
