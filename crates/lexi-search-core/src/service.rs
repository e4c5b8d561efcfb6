// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The search capability consumed by the view.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{LegalSection, SearchQuery};

/// Shown when a failed search carries no description of its own.
pub const GENERIC_SEARCH_ERROR: &str = "An error occurred while searching";

/// Runs the remote `search_legal_sections` procedure.
///
/// One request, one response: no streaming and no pagination. Timeouts and
/// retries are the implementation's business.
#[async_trait]
pub trait QueryService: Send + Sync {
	async fn search(&self, query: &SearchQuery) -> Result<Vec<LegalSection>, QueryError>;
}

/// A failed search, optionally carrying a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.user_message())]
pub struct QueryError {
	message: Option<String>,
}

impl QueryError {
	/// A failure with a description. Blank descriptions count as none.
	pub fn new(message: impl Into<String>) -> Self {
		let message = message.into();
		if message.trim().is_empty() {
			Self::without_message()
		} else {
			Self {
				message: Some(message),
			}
		}
	}

	pub fn without_message() -> Self {
		Self { message: None }
	}

	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// The description, or [`GENERIC_SEARCH_ERROR`].
	pub fn user_message(&self) -> String {
		self
			.message
			.clone()
			.unwrap_or_else(|| GENERIC_SEARCH_ERROR.to_string())
	}
}

impl From<Option<String>> for QueryError {
	fn from(message: Option<String>) -> Self {
		match message {
			Some(message) => Self::new(message),
			None => Self::without_message(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn message_is_kept_verbatim() {
		let err = QueryError::new("function search_legal_sections(text) does not exist");
		assert_eq!(
			err.user_message(),
			"function search_legal_sections(text) does not exist"
		);
		assert_eq!(err.to_string(), err.user_message());
	}

	#[test]
	fn missing_or_blank_message_falls_back() {
		assert_eq!(QueryError::without_message().user_message(), GENERIC_SEARCH_ERROR);
		assert_eq!(QueryError::new("   ").message(), None);
		assert_eq!(QueryError::from(None).to_string(), GENERIC_SEARCH_ERROR);
	}
}
