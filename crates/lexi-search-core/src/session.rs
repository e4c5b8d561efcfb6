// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The session capability consumed by the view.
//!
//! Sessions are owned by the backend's auth service. The view only asks
//! whether one exists and forwards sign-in/sign-out requests; it never
//! validates credentials beyond their shape.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use lexi_common_secret::SecretString;
use thiserror::Error;

/// An authenticated session as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
	pub user_id: String,
	pub email: Option<String>,
	pub access_token: SecretString,
	pub refresh_token: Option<SecretString>,
	pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
	/// Email when known, otherwise the user id.
	pub fn display_name(&self) -> &str {
		self.email.as_deref().unwrap_or(&self.user_id)
	}

	/// True if the access token expires within `window` of `now`.
	/// Sessions without an expiry never expire.
	pub fn expires_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
		match self.expires_at {
			Some(expires_at) => expires_at - now <= window,
			None => false,
		}
	}
}

/// Email and password collected from the user.
#[derive(Debug, Clone)]
pub struct Credentials {
	email: String,
	password: SecretString,
}

impl Credentials {
	/// Checks shape only: a trimmed email containing `@` and a non-blank
	/// password.
	pub fn new(email: impl AsRef<str>, password: SecretString) -> Result<Self, SessionError> {
		let email = email.as_ref().trim();
		if email.is_empty() {
			return Err(SessionError::InvalidCredentials("Email is required".to_string()));
		}
		if !email.contains('@') {
			return Err(SessionError::InvalidCredentials(
				"Email address is not valid".to_string(),
			));
		}
		if password.is_blank() {
			return Err(SessionError::InvalidCredentials(
				"Password is required".to_string(),
			));
		}
		Ok(Self {
			email: email.to_string(),
			password,
		})
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn password(&self) -> &SecretString {
		&self.password
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
	/// Credentials failed local validation; nothing was sent.
	#[error("{0}")]
	InvalidCredentials(String),

	/// The auth service refused the request.
	#[error("{0}")]
	Rejected(String),

	/// The auth service could not be reached or answered nonsense.
	#[error("authentication service unavailable: {0}")]
	Unavailable(String),
}

/// Externally managed authentication state.
#[async_trait]
pub trait SessionProvider: Send + Sync {
	/// The active session, if any. Must not block.
	fn current_session(&self) -> Option<Session>;

	async fn sign_in(&self, credentials: &Credentials) -> Result<Session, SessionError>;

	async fn sign_out(&self) -> Result<(), SessionError>;
}
