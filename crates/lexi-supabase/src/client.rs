// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Supabase client implementation.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lexi_common_http::retry;
use lexi_search_core::{
	Credentials, LegalSection, QueryError, QueryService, SearchQuery, Session, SessionError,
	SessionProvider,
};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;
use crate::wire::{self, PasswordGrant, RefreshGrant, SearchArgs, TokenResponse};

/// Tokens closer than this to expiry are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Client for one Supabase project. Cheap to clone; clones share the session.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
	http_client: Client,
	config: SupabaseConfig,
	session: Arc<RwLock<Option<Session>>>,
}

impl SupabaseClient {
	pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
		let http_client = lexi_common_http::builder().timeout(config.timeout).build()?;

		Ok(Self {
			http_client,
			config,
			session: Arc::new(RwLock::new(None)),
		})
	}

	pub fn config(&self) -> &SupabaseConfig {
		&self.config
	}

	fn read_session(&self) -> Option<Session> {
		self
			.session
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	fn store_session(&self, session: Option<Session>) -> Option<Session> {
		let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
		std::mem::replace(&mut *guard, session)
	}

	/// Adds `apikey` and `Authorization`. The bearer is the session's access
	/// token, or the anon key when signed out.
	fn authorize(&self, request: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
		let anon_key = self.config.anon_key.expose();
		let bearer = session
			.map(|s| s.access_token.expose().as_str())
			.unwrap_or(anon_key);
		request
			.header("apikey", anon_key)
			.bearer_auth(bearer)
	}

	/// Calls the configured search procedure with `{"search_query": query}`.
	#[instrument(
		skip(self, query),
		fields(function = %self.config.search_function, query_chars = query.chars().count())
	)]
	pub async fn rpc_search(&self, query: &str) -> Result<Vec<LegalSection>, SupabaseError> {
		let session = self.fresh_session().await;
		let rows = retry(&self.config.retry, || {
			self.rpc_search_once(query, session.as_ref())
		})
		.await?;
		debug!(result_count = rows.len(), "search rpc completed");
		Ok(rows)
	}

	async fn rpc_search_once(
		&self,
		query: &str,
		session: Option<&Session>,
	) -> Result<Vec<LegalSection>, SupabaseError> {
		let url = self
			.config
			.endpoint(&format!("/rest/v1/rpc/{}", self.config.search_function));
		trace!(url = %url, "sending search rpc");

		let request = self
			.http_client
			.post(&url)
			.json(&SearchArgs { search_query: query });
		let response = self.send(self.authorize(request, session)).await?;
		let body = response.text().await.map_err(|e| {
			error!(error = %e, "failed to read rpc response body");
			SupabaseError::Network(e)
		})?;

		// A function returning no rows may answer with a bare `null`.
		if body.trim().is_empty() {
			return Ok(Vec::new());
		}
		let rows: Option<Vec<LegalSection>> = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "failed to parse rpc response");
			SupabaseError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;
		Ok(rows.unwrap_or_default())
	}

	/// Password grant. Stores the resulting session.
	#[instrument(skip(self, credentials))]
	pub async fn sign_in_with_password(
		&self,
		credentials: &Credentials,
	) -> Result<Session, SupabaseError> {
		let url = self.config.endpoint("/auth/v1/token?grant_type=password");
		let session = retry(&self.config.retry, || self.password_grant(&url, credentials)).await?;

		info!(user_id = %session.user_id, "signed in");
		self.store_session(Some(session.clone()));
		Ok(session)
	}

	/// Refresh grant. Stores the resulting session.
	#[instrument(skip(self, session), fields(user_id = %session.user_id))]
	pub async fn refresh(&self, session: &Session) -> Result<Session, SupabaseError> {
		let Some(refresh_token) = session.refresh_token.as_ref() else {
			return Err(SupabaseError::Unauthorized {
				message: Some("session has no refresh token".to_string()),
			});
		};

		let url = self.config.endpoint("/auth/v1/token?grant_type=refresh_token");
		let refreshed = retry(&self.config.retry, || {
			self.refresh_grant(&url, refresh_token.expose())
		})
		.await?;

		debug!("session refreshed");
		self.store_session(Some(refreshed.clone()));
		Ok(refreshed)
	}

	/// Forgets the local session, then revokes it remotely. The local
	/// session is gone even when revocation fails.
	#[instrument(skip(self))]
	pub async fn logout(&self) -> Result<(), SupabaseError> {
		let Some(session) = self.store_session(None) else {
			debug!("logout without a session");
			return Ok(());
		};

		let url = self.config.endpoint("/auth/v1/logout");
		let request = self.authorize(self.http_client.post(&url), Some(&session));
		self.send(request).await?;
		info!(user_id = %session.user_id, "signed out");
		Ok(())
	}

	/// The current session, refreshed first when it is about to expire.
	/// A failed refresh keeps the old session; the backend decides whether
	/// it is still good.
	async fn fresh_session(&self) -> Option<Session> {
		let session = self.read_session()?;
		let margin = Duration::seconds(REFRESH_MARGIN_SECS);
		if session.refresh_token.is_none() || !session.expires_within(margin, Utc::now()) {
			return Some(session);
		}

		match self.refresh(&session).await {
			Ok(refreshed) => Some(refreshed),
			Err(e) => {
				warn!(error = %e, "token refresh failed, using current token");
				Some(session)
			}
		}
	}

	async fn password_grant(
		&self,
		url: &str,
		credentials: &Credentials,
	) -> Result<Session, SupabaseError> {
		let request = self.http_client.post(url).json(&PasswordGrant {
			email: credentials.email(),
			password: credentials.password().expose(),
		});
		self.token_request(self.authorize(request, None)).await
	}

	async fn refresh_grant(&self, url: &str, refresh_token: &str) -> Result<Session, SupabaseError> {
		let request = self
			.http_client
			.post(url)
			.json(&RefreshGrant { refresh_token });
		self.token_request(self.authorize(request, None)).await
	}

	async fn token_request(&self, request: RequestBuilder) -> Result<Session, SupabaseError> {
		let response = self.send(request).await?;
		let token: TokenResponse = response.json().await.map_err(|e| {
			error!(error = %e, "failed to parse token response");
			SupabaseError::InvalidResponse(format!("token response: {e}"))
		})?;
		Ok(token.into_session(Utc::now()))
	}

	/// Sends `request` and turns non-success statuses into errors carrying
	/// the body's message.
	async fn send(&self, request: RequestBuilder) -> Result<Response, SupabaseError> {
		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("request timed out");
				return SupabaseError::Timeout;
			}
			error!(error = %e, "network error during supabase request");
			SupabaseError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "received response from supabase");
		if status.is_success() {
			return Ok(response);
		}

		let status_code = status.as_u16();
		let body = response.text().await.unwrap_or_default();
		let message = wire::error_message(&body);

		match status_code {
			401 | 403 => {
				warn!(status = status_code, "unauthorized request");
				Err(SupabaseError::Unauthorized { message })
			}
			429 => {
				warn!(status = status_code, "rate limit exceeded");
				Err(SupabaseError::RateLimited)
			}
			_ => {
				error!(status = status_code, message = ?message, "supabase api error");
				Err(SupabaseError::Api {
					status: status_code,
					message,
				})
			}
		}
	}
}

#[async_trait]
impl QueryService for SupabaseClient {
	async fn search(&self, query: &SearchQuery) -> Result<Vec<LegalSection>, QueryError> {
		self.rpc_search(query.as_str()).await.map_err(QueryError::from)
	}
}

#[async_trait]
impl SessionProvider for SupabaseClient {
	fn current_session(&self) -> Option<Session> {
		self.read_session()
	}

	async fn sign_in(&self, credentials: &Credentials) -> Result<Session, SessionError> {
		self
			.sign_in_with_password(credentials)
			.await
			.map_err(SessionError::from)
	}

	async fn sign_out(&self) -> Result<(), SessionError> {
		if let Err(e) = self.logout().await {
			warn!(error = %e, "remote sign-out failed; local session cleared");
		}
		Ok(())
	}
}
