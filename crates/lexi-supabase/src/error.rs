// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Supabase client.

use lexi_common_http::RetryableError;
use lexi_search_core::{QueryError, SessionError};
use thiserror::Error;

/// Errors that can occur when talking to Supabase.
#[derive(Debug, Error)]
pub enum SupabaseError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("Request timed out")]
	Timeout,

	#[error("Rate limit exceeded")]
	RateLimited,

	/// 401/403: bad anon key, expired token or rejected credentials.
	#[error("Unauthorized{}", suffix(.message))]
	Unauthorized { message: Option<String> },

	/// Body could not be decoded.
	#[error("Invalid response from Supabase: {0}")]
	InvalidResponse(String),

	/// Any other non-success status.
	#[error("Supabase API error {status}{}", suffix(.message))]
	Api { status: u16, message: Option<String> },
}

fn suffix(message: &Option<String>) -> String {
	message
		.as_deref()
		.map(|m| format!(": {m}"))
		.unwrap_or_default()
}

impl SupabaseError {
	/// The message the backend put in the error body, if any.
	pub fn backend_message(&self) -> Option<&str> {
		match self {
			SupabaseError::Unauthorized { message } | SupabaseError::Api { message, .. } => {
				message.as_deref()
			}
			_ => None,
		}
	}
}

impl RetryableError for SupabaseError {
	fn is_retryable(&self) -> bool {
		match self {
			SupabaseError::Network(e) => e.is_retryable(),
			SupabaseError::Timeout => true,
			SupabaseError::RateLimited => true,
			SupabaseError::Unauthorized { .. } => false,
			SupabaseError::InvalidResponse(_) => false,
			SupabaseError::Api { status, .. } => *status == 408 || *status >= 500,
		}
	}
}

/// Backend errors reach the user verbatim when the backend explained itself.
/// An HTTP error without a body message gets the generic search text;
/// transport failures describe themselves.
impl From<SupabaseError> for QueryError {
	fn from(err: SupabaseError) -> Self {
		match &err {
			SupabaseError::Unauthorized { message } | SupabaseError::Api { message, .. } => {
				QueryError::from(message.clone())
			}
			_ => QueryError::new(err.to_string()),
		}
	}
}

impl From<SupabaseError> for SessionError {
	fn from(err: SupabaseError) -> Self {
		match err {
			SupabaseError::Unauthorized { message } => SessionError::Rejected(
				message.unwrap_or_else(|| "Invalid login credentials".to_string()),
			),
			SupabaseError::Api { status, message } if (400..500).contains(&status) => {
				SessionError::Rejected(message.unwrap_or_else(|| format!("request rejected ({status})")))
			}
			other => SessionError::Unavailable(other.to_string()),
		}
	}
}
