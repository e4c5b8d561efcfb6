// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use lexi_common_secret::SecretString;
use lexi_search_core::{
	Credentials, QueryService, SearchQuery, SearchView, SessionError, SessionProvider,
	GENERIC_SEARCH_ERROR,
};
use lexi_supabase::{RetryConfig, SupabaseClient, SupabaseConfig};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/rest/v1/rpc/search_legal_sections";

fn fast_retry() -> RetryConfig {
	RetryConfig {
		max_attempts: 3,
		base_delay: Duration::from_millis(1),
		max_delay: Duration::from_millis(5),
		backoff_factor: 2.0,
		jitter: false,
	}
}

fn client(server: &MockServer) -> SupabaseClient {
	let config = SupabaseConfig::new(server.uri(), SecretString::new("anon-key".to_string()))
		.with_timeout(Duration::from_secs(5))
		.with_retry_config(fast_retry());
	SupabaseClient::new(config).unwrap()
}

fn credentials() -> Credentials {
	Credentials::new(
		"clerk@court.example",
		SecretString::new("correct horse".to_string()),
	)
	.unwrap()
}

fn token_body(access_token: &str) -> serde_json::Value {
	json!({
		"access_token": access_token,
		"token_type": "bearer",
		"expires_in": 3600,
		"refresh_token": "refresh-1",
		"user": {"id": "8d1c", "email": "clerk@court.example"}
	})
}

fn query(text: &str) -> SearchQuery {
	SearchQuery::parse(text).unwrap()
}

async fn mount_sign_in(server: &MockServer, access_token: &str) {
	Mock::given(method("POST"))
		.and(path("/auth/v1/token"))
		.and(query_param("grant_type", "password"))
		.respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token)))
		.mount(server)
		.await;
}

#[tokio::test]
async fn rpc_request_has_expected_shape() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.and(header("apikey", "anon-key"))
		.and(header("authorization", "Bearer anon-key"))
		.and(body_json(json!({"search_query": "theft"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([{
			"id": 1,
			"section_number": "379",
			"title": "Punishment for theft",
			"description": "Whoever commits theft...",
			"punishment": "Imprisonment up to 3 years"
		}])))
		.expect(1)
		.mount(&server)
		.await;

	let rows = client(&server).search(&query("theft")).await.unwrap();

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].section_number, "379");
	assert_eq!(rows[0].punishment, "Imprisonment up to 3 years");
}

#[tokio::test]
async fn null_body_is_an_empty_list() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_string("null"))
		.mount(&server)
		.await;

	let rows = client(&server).search(&query("zzzz-no-match")).await.unwrap();
	assert!(rows.is_empty());
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(404).set_body_json(json!({
			"code": "PGRST202",
			"details": null,
			"hint": null,
			"message": "Could not find the function public.search_legal_sections(search_query)"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let err = client(&server).search(&query("theft")).await.unwrap_err();
	assert_eq!(
		err.user_message(),
		"Could not find the function public.search_legal_sections(search_query)"
	);
}

#[tokio::test]
async fn error_without_body_uses_generic_message() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(400))
		.mount(&server)
		.await;

	let err = client(&server).search(&query("theft")).await.unwrap_err();
	assert_eq!(err.user_message(), GENERIC_SEARCH_ERROR);
}

#[tokio::test]
async fn transient_failure_is_retried() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(503))
		.up_to_n_times(1)
		.with_priority(1)
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	let rows = client(&server).search(&query("theft")).await.unwrap();
	assert!(rows.is_empty());
}

#[tokio::test]
async fn client_error_is_not_retried() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad input"})))
		.expect(1)
		.mount(&server)
		.await;

	let err = client(&server).search(&query("theft")).await.unwrap_err();
	assert_eq!(err.message(), Some("bad input"));
}

#[tokio::test]
async fn sign_in_stores_session_and_authorizes_searches() {
	let server = MockServer::start().await;
	mount_sign_in(&server, "user-token").await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.and(header("apikey", "anon-key"))
		.and(header("authorization", "Bearer user-token"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	let client = client(&server);
	let session = client.sign_in(&credentials()).await.unwrap();

	assert_eq!(session.user_id, "8d1c");
	assert_eq!(session.display_name(), "clerk@court.example");
	assert_eq!(client.current_session(), Some(session));
	client.search(&query("theft")).await.unwrap();
}

#[tokio::test]
async fn sign_in_sends_credentials() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/token"))
		.and(query_param("grant_type", "password"))
		.and(header("apikey", "anon-key"))
		.and(body_json(json!({
			"email": "clerk@court.example",
			"password": "correct horse"
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(token_body("t")))
		.expect(1)
		.mount(&server)
		.await;

	client(&server).sign_in(&credentials()).await.unwrap();
}

#[tokio::test]
async fn rejected_sign_in_surfaces_backend_message() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/token"))
		.respond_with(ResponseTemplate::new(400).set_body_json(json!({
			"code": 400,
			"error_code": "invalid_credentials",
			"msg": "Invalid login credentials"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let client = client(&server);
	let err = client.sign_in(&credentials()).await.unwrap_err();

	assert_eq!(err, SessionError::Rejected("Invalid login credentials".to_string()));
	assert_eq!(client.current_session(), None);
}

#[tokio::test]
async fn sign_out_revokes_and_clears() {
	let server = MockServer::start().await;
	mount_sign_in(&server, "user-token").await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/logout"))
		.and(header("authorization", "Bearer user-token"))
		.respond_with(ResponseTemplate::new(204))
		.expect(1)
		.mount(&server)
		.await;

	let client = client(&server);
	client.sign_in(&credentials()).await.unwrap();
	client.sign_out().await.unwrap();

	assert_eq!(client.current_session(), None);
}

#[tokio::test]
async fn sign_out_clears_locally_when_remote_fails() {
	let server = MockServer::start().await;
	mount_sign_in(&server, "user-token").await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/logout"))
		.respond_with(ResponseTemplate::new(500))
		.mount(&server)
		.await;

	let client = client(&server);
	client.sign_in(&credentials()).await.unwrap();

	assert!(client.sign_out().await.is_ok());
	assert_eq!(client.current_session(), None);
}

#[tokio::test]
async fn expiring_session_is_refreshed_before_search() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/token"))
		.and(query_param("grant_type", "password"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": "old-token",
			"refresh_token": "refresh-1",
			"expires_in": 10,
			"user": {"id": "8d1c"}
		})))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/v1/token"))
		.and(query_param("grant_type", "refresh_token"))
		.and(body_json(json!({"refresh_token": "refresh-1"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(token_body("new-token")))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.and(header("authorization", "Bearer new-token"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	let client = client(&server);
	client.sign_in(&credentials()).await.unwrap();
	client.search(&query("theft")).await.unwrap();

	let session = client.current_session().unwrap();
	assert_eq!(session.access_token.expose(), "new-token");
}

#[tokio::test]
async fn view_scenario_end_to_end() {
	let server = MockServer::start().await;
	mount_sign_in(&server, "user-token").await;
	Mock::given(method("POST"))
		.and(path(RPC_PATH))
		.and(body_json(json!({"search_query": "theft"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([{
			"id": 7,
			"section_number": "379",
			"title": "Theft",
			"description": null,
			"punishment": "up to 3 years"
		}])))
		.expect(1)
		.mount(&server)
		.await;

	let backend = Arc::new(client(&server));
	let mut view = SearchView::new(backend.clone(), backend);

	view.set_query("  theft ");
	view.sign_in(&credentials()).await.unwrap();
	view.submit().await.unwrap();

	assert_eq!(view.state().results.len(), 1);
	assert_eq!(view.state().results[0].description, "");
	assert_eq!(view.state().error, None);
}
