// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and response bodies of the REST and auth endpoints.

use chrono::{DateTime, Duration, Utc};
use lexi_common_secret::SecretString;
use lexi_search_core::Session;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
pub(crate) struct SearchArgs<'a> {
	pub search_query: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PasswordGrant<'a> {
	pub email: &'a str,
	pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshGrant<'a> {
	pub refresh_token: &'a str,
}

/// Error body shapes of both PostgREST (`message`, `code`, `details`,
/// `hint`) and GoTrue (`msg`, `error_description`).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub msg: Option<String>,
	#[serde(default)]
	pub error_description: Option<String>,
	#[serde(default)]
	pub code: Option<serde_json::Value>,
	#[serde(default)]
	pub hint: Option<String>,
}

impl ErrorBody {
	/// First non-blank human-readable message in the body.
	pub fn into_message(self) -> Option<String> {
		[self.message, self.msg, self.error_description]
			.into_iter()
			.flatten()
			.find(|m| !m.trim().is_empty())
	}
}

/// Parses an error body, tolerating anything that is not JSON.
pub(crate) fn error_message(body: &str) -> Option<String> {
	let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
	if parsed.code.is_some() || parsed.hint.is_some() {
		debug!(code = ?parsed.code, hint = ?parsed.hint, "backend error details");
	}
	parsed.into_message()
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub access_token: SecretString,
	#[serde(default)]
	pub refresh_token: Option<SecretString>,
	#[serde(default)]
	pub expires_in: Option<i64>,
	/// Unix seconds.
	#[serde(default)]
	pub expires_at: Option<i64>,
	pub user: UserBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserBody {
	pub id: String,
	#[serde(default)]
	pub email: Option<String>,
}

impl TokenResponse {
	pub fn into_session(self, now: DateTime<Utc>) -> Session {
		let expires_at = self
			.expires_at
			.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
			.or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

		Session {
			user_id: self.user.id,
			email: self.user.email.filter(|e| !e.is_empty()),
			access_token: self.access_token,
			refresh_token: self.refresh_token.filter(|t| !t.is_blank()),
			expires_at,
		}
	}
}
