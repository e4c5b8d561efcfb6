// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Backend-agnostic core of the Lexi statute search client.
//!
//! The crate owns the [`SearchView`] view model and the two capabilities it
//! consumes:
//!
//! - [`QueryService`]: runs the `search_legal_sections` procedure
//! - [`SessionProvider`]: reports and changes the signed-in session
//!
//! Concrete backends live in other crates; the view only sees the traits.
//! Rendering is a pure function of [`ViewState`], see [`render`].

pub mod render;
pub mod service;
pub mod session;
pub mod types;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use render::{no_results_message, render, ResultsPane, SearchScreen, SUBMIT_LABEL, SUBMIT_LABEL_LOADING};
pub use service::{QueryError, QueryService, GENERIC_SEARCH_ERROR};
pub use session::{Credentials, Session, SessionError, SessionProvider};
pub use types::{LegalSection, SearchQuery, SectionId};
pub use view::{
	SearchCompletion, SearchTicket, SearchView, SubmitSkipped, ViewState, UNAUTHENTICATED_MESSAGE,
};
