// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Supabase backend for Lexi.
//!
//! [`SupabaseClient`] implements both capabilities the search view needs:
//!
//! - [`QueryService`](lexi_search_core::QueryService) over the PostgREST RPC
//!   endpoint (`POST /rest/v1/rpc/<function>`)
//! - [`SessionProvider`](lexi_search_core::SessionProvider) over the GoTrue
//!   password grant, refresh grant and logout endpoints
//!
//! Sessions live in memory only.

pub mod client;
pub mod config;
pub mod error;
mod wire;

pub use client::SupabaseClient;
pub use config::{SupabaseConfig, DEFAULT_SEARCH_FUNCTION, DEFAULT_TIMEOUT};
pub use error::SupabaseError;
pub use lexi_common_http::RetryConfig;
