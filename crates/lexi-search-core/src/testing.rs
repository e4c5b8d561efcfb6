// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory capabilities for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use lexi_common_secret::SecretString;

use crate::service::{QueryError, QueryService};
use crate::session::{Credentials, Session, SessionError, SessionProvider};
use crate::types::{LegalSection, SearchQuery, SectionId};

pub fn section(id: i64, number: &str, title: &str, description: &str, punishment: &str) -> LegalSection {
	LegalSection {
		id: SectionId::Number(id),
		section_number: number.to_string(),
		title: title.to_string(),
		description: description.to_string(),
		punishment: punishment.to_string(),
	}
}

pub fn session_for(email: &str) -> Session {
	Session {
		user_id: format!("user-{email}"),
		email: Some(email.to_string()),
		access_token: SecretString::new("test-access-token".to_string()),
		refresh_token: None,
		expires_at: None,
	}
}

/// Session provider holding its session in memory.
#[derive(Default)]
pub struct FakeSessionProvider {
	session: RwLock<Option<Session>>,
	accepted: Option<(String, String)>,
}

impl FakeSessionProvider {
	pub fn signed_in(email: &str) -> Self {
		Self {
			session: RwLock::new(Some(session_for(email))),
			accepted: Some((email.to_string(), String::new())),
		}
	}

	pub fn signed_out() -> Self {
		Self::default()
	}

	/// Signed out, but signs in when given exactly this email/password.
	pub fn accepting(email: &str, password: &str) -> Self {
		Self {
			session: RwLock::new(None),
			accepted: Some((email.to_string(), password.to_string())),
		}
	}
}

#[async_trait]
impl SessionProvider for FakeSessionProvider {
	fn current_session(&self) -> Option<Session> {
		self.session.read().unwrap().clone()
	}

	async fn sign_in(&self, credentials: &Credentials) -> Result<Session, SessionError> {
		match &self.accepted {
			Some((email, password))
				if email == credentials.email() && password == credentials.password().expose() =>
			{
				let session = session_for(email);
				*self.session.write().unwrap() = Some(session.clone());
				Ok(session)
			}
			_ => Err(SessionError::Rejected("Invalid login credentials".to_string())),
		}
	}

	async fn sign_out(&self) -> Result<(), SessionError> {
		*self.session.write().unwrap() = None;
		Ok(())
	}
}

/// Query service that records every query and replays scripted answers.
///
/// The first call is answered with the constructor's response. Later calls
/// take [`push_response`](Self::push_response) answers in order and fall
/// back to the constructor's response once the queue is empty.
pub struct RecordingQueryService {
	calls: Mutex<Vec<String>>,
	queued: Mutex<VecDeque<Result<Vec<LegalSection>, QueryError>>>,
	fallback: Result<Vec<LegalSection>, QueryError>,
}

impl RecordingQueryService {
	pub fn returning(rows: Vec<LegalSection>) -> Self {
		Self::with_fallback(Ok(rows))
	}

	pub fn failing(error: QueryError) -> Self {
		Self::with_fallback(Err(error))
	}

	fn with_fallback(fallback: Result<Vec<LegalSection>, QueryError>) -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			queued: Mutex::new(VecDeque::new()),
			fallback,
		}
	}

	/// Queues an answer for the second and later calls.
	pub fn push_response(&self, response: Result<Vec<LegalSection>, QueryError>) {
		self.queued.lock().unwrap().push_back(response);
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl QueryService for RecordingQueryService {
	async fn search(&self, query: &SearchQuery) -> Result<Vec<LegalSection>, QueryError> {
		let call_index = {
			let mut calls = self.calls.lock().unwrap();
			calls.push(query.as_str().to_string());
			calls.len()
		};
		if call_index == 1 {
			return self.fallback.clone();
		}
		self
			.queued
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| self.fallback.clone())
	}
}
