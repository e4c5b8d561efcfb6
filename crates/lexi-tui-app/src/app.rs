// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The interactive search screen.
//!
//! Network work never runs on the UI loop. Searches and session changes are
//! spawned onto the tokio runtime and report back as [`AppEvent`]s, which
//! [`App::tick`] drains every iteration.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lexi_search_core::{
	no_results_message, Credentials, LegalSection, QueryService, ResultsPane, SearchCompletion,
	SearchView, Session, SessionError, SessionProvider, SubmitSkipped,
};
use lexi_tui_theme::Theme;
use lexi_tui_widget_input_box::{InputBox, InputBoxState};
use lexi_tui_widget_section_list::{wrap_text, SectionCard, SectionList, SectionListState};
use lexi_tui_widget_spinner::{Spinner, SpinnerState};
use lexi_tui_widget_status_bar::StatusBar;
use ratatui::{
	layout::{Alignment, Rect},
	text::{Line, Span},
	widgets::{Block, BorderType, Borders, Paragraph, Wrap},
	Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::layout::split_screen;
use crate::sign_in::{FormAction, SignInForm};
use crate::terminal::TuiApp;

pub const QUERY_PLACEHOLDER: &str = "Search for legal sections (e.g., murder, theft)";

/// Most rows the error banner may take, borders included.
const MAX_BANNER_HEIGHT: u16 = 5;

#[derive(Debug)]
pub enum AppEvent {
	SearchFinished(SearchCompletion),
	SignedIn(Result<Session, SessionError>),
	SignedOut(Result<(), SessionError>),
}

pub struct App {
	view: SearchView,
	query_input: InputBoxState,
	cards: Vec<SectionCard>,
	list_state: SectionListState,
	spinner_state: SpinnerState,
	sign_in: Option<SignInForm>,
	notice: Option<String>,
	theme: Theme,
	events_tx: mpsc::UnboundedSender<AppEvent>,
	events_rx: mpsc::UnboundedReceiver<AppEvent>,
	in_flight: usize,
	should_quit: bool,
}

impl App {
	pub fn new(
		session: Arc<dyn SessionProvider>,
		service: Arc<dyn QueryService>,
		theme: Theme,
	) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		Self {
			view: SearchView::new(session, service),
			query_input: InputBoxState::new(),
			cards: Vec::new(),
			list_state: SectionListState::default(),
			spinner_state: SpinnerState::default(),
			sign_in: None,
			notice: None,
			theme,
			events_tx,
			events_rx,
			in_flight: 0,
			should_quit: false,
		}
	}

	#[cfg(test)]
	pub fn view(&self) -> &SearchView {
		&self.view
	}

	#[cfg(test)]
	pub fn is_signing_in(&self) -> bool {
		self.sign_in.is_some()
	}

	pub fn handle_key_event(&mut self, key: KeyEvent) {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		if ctrl && key.code == KeyCode::Char('c') {
			self.should_quit = true;
			return;
		}

		if let Some(form) = self.sign_in.as_mut() {
			match form.handle_key(key) {
				FormAction::None => {}
				FormAction::Cancel => self.sign_in = None,
				FormAction::Submit(credentials) => self.spawn_sign_in(credentials),
			}
			return;
		}

		if ctrl && key.code == KeyCode::Char('l') {
			self.toggle_session();
			return;
		}

		match key.code {
			KeyCode::Enter => self.submit(),
			KeyCode::Up => self.list_state.scroll_up(),
			KeyCode::Down => self.list_state.scroll_down(self.cards.len()),
			KeyCode::PageUp => self.list_state.page_up(),
			KeyCode::PageDown => self.list_state.page_down(self.cards.len()),
			_ => {
				if self.query_input.handle_key(key) {
					self.view.set_query(self.query_input.content());
				}
			}
		}
	}

	/// Starts a search for the current query. A search started while another
	/// is running supersedes it.
	fn submit(&mut self) {
		match self.view.begin_submit() {
			Ok(ticket) => {
				self.spinner_state.reset();
				let service = self.view.query_service();
				let tx = self.events_tx.clone();
				self.in_flight += 1;
				tokio::spawn(async move {
					let completion = ticket.run(service.as_ref()).await;
					if tx.send(AppEvent::SearchFinished(completion)).is_err() {
						debug!("ui closed before search finished");
					}
				});
			}
			Err(SubmitSkipped::EmptyQuery) => {}
			Err(SubmitSkipped::Unauthenticated) => {
				self.notice = Some("Press Ctrl+L to sign in".to_string());
			}
		}
	}

	fn toggle_session(&mut self) {
		if !self.view.is_authenticated() {
			self.sign_in = Some(SignInForm::new());
			return;
		}

		let provider = self.view.session_provider();
		let tx = self.events_tx.clone();
		self.in_flight += 1;
		self.notice = Some("Signing out...".to_string());
		tokio::spawn(async move {
			let result = provider.sign_out().await;
			if tx.send(AppEvent::SignedOut(result)).is_err() {
				debug!("ui closed before sign out finished");
			}
		});
	}

	fn spawn_sign_in(&mut self, credentials: Credentials) {
		let provider = self.view.session_provider();
		let tx = self.events_tx.clone();
		self.in_flight += 1;
		tokio::spawn(async move {
			let result = provider.sign_in(&credentials).await;
			if tx.send(AppEvent::SignedIn(result)).is_err() {
				debug!("ui closed before sign in finished");
			}
		});
	}

	fn apply(&mut self, event: AppEvent) {
		self.in_flight = self.in_flight.saturating_sub(1);

		match event {
			AppEvent::SearchFinished(completion) => {
				let succeeded = completion.outcome().is_ok();
				if self.view.complete(completion) && succeeded {
					self.cards = section_cards(&self.view.state().results);
					self.list_state.reset();
				}
			}
			AppEvent::SignedIn(Ok(_)) => {
				info!("signed in");
				self.sign_in = None;
				self.notice = Some("Signed in".to_string());
			}
			AppEvent::SignedIn(Err(err)) => {
				warn!(error = %err, "sign in failed");
				match self.sign_in.as_mut() {
					Some(form) => form.reject(err.to_string()),
					None => self.notice = Some(err.to_string()),
				}
			}
			AppEvent::SignedOut(Ok(())) => {
				info!("signed out");
				self.notice = Some("Signed out".to_string());
			}
			AppEvent::SignedOut(Err(err)) => {
				warn!(error = %err, "sign out failed");
				self.notice = Some(format!("Sign out failed: {err}"));
			}
		}
	}

	pub fn tick(&mut self) {
		while let Ok(event) = self.events_rx.try_recv() {
			self.apply(event);
		}
		if self.view.state().loading {
			self.spinner_state.tick();
		}
	}

	/// Waits for every spawned task and applies its result.
	#[cfg(test)]
	pub async fn settle(&mut self) {
		while self.in_flight > 0 {
			match self.events_rx.recv().await {
				Some(event) => self.apply(event),
				None => break,
			}
		}
	}

	pub fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
		let screen = self.view.render();
		let account = self.view.current_session().map(|s| s.display_name().to_string());

		let banner_height = screen.error.map_or(0, |error| {
			let rows = wrap_text(error, area.width.saturating_sub(4) as usize).len().max(1) as u16;
			(rows + 2).min(MAX_BANNER_HEIGHT)
		});
		let areas = split_screen(area, banner_height);

		draw_header(frame, areas.header, account.as_deref(), theme);

		let query_block = Block::default()
			.title(" Query ")
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(theme.border_style_for(self.sign_in.is_none()));
		let query_inner = query_block.inner(areas.query);
		frame.render_widget(query_block, areas.query);
		frame.render_stateful_widget(
			InputBox::new()
				.placeholder(QUERY_PLACEHOLDER)
				.style(theme.input_text())
				.placeholder_style(theme.input_placeholder())
				.focused(self.sign_in.is_none()),
			query_inner,
			&mut self.query_input,
		);

		let submit_block = Block::default()
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(theme.border_normal());
		let submit_inner = submit_block.inner(areas.submit);
		frame.render_widget(submit_block, areas.submit);
		if self.view.state().loading {
			frame.render_stateful_widget(
				Spinner::from_label(screen.submit_label).text_style(theme.input_disabled()),
				submit_inner,
				&mut self.spinner_state,
			);
		} else {
			frame.render_widget(
				Paragraph::new(screen.submit_label)
					.alignment(Alignment::Center)
					.style(theme.button(screen.submit_enabled)),
				submit_inner,
			);
		}

		if let (Some(banner), Some(error)) = (areas.banner, screen.error) {
			frame.render_widget(
				Paragraph::new(error)
					.style(theme.error_text())
					.wrap(Wrap { trim: true })
					.block(
						Block::default()
							.title(" Error ")
							.borders(Borders::ALL)
							.border_style(theme.border_error()),
					),
				banner,
			);
		}

		match screen.results {
			ResultsPane::Sections(_) => {
				frame.render_stateful_widget(
					SectionList::new(&self.cards).theme(theme),
					areas.results,
					&mut self.list_state,
				);
			}
			ResultsPane::NoResults { query } => {
				draw_centered(frame, areas.results, no_results_message(query), theme);
			}
			ResultsPane::Empty if !screen.authenticated => {
				draw_centered(frame, areas.results, "Press Ctrl+L to sign in and start searching", theme);
			}
			ResultsPane::Empty if !self.view.state().loading => {
				draw_centered(frame, areas.results, "Type a query and press Enter", theme);
			}
			ResultsPane::Empty => {}
		}

		let mut status = StatusBar::new()
			.theme(theme)
			.item("Account", account.as_deref().unwrap_or("signed out"));
		if let ResultsPane::Sections(rows) = screen.results {
			status = status.item("Results", rows.len().to_string());
		}
		if let Some(notice) = &self.notice {
			status = status.item("Status", notice.as_str());
		}
		status = status
			.shortcut("Enter", "search")
			.shortcut("^L", if screen.authenticated { "sign out" } else { "sign in" })
			.shortcut("↑↓", "scroll")
			.shortcut("^C", "quit");
		frame.render_widget(status, areas.status);

		if let Some(form) = self.sign_in.as_mut() {
			form.render(frame, area, theme);
		}
	}
}

impl TuiApp for App {
	fn render(&mut self, frame: &mut Frame) {
		let theme = self.theme.clone();
		let area = frame.area();
		self.draw(frame, area, &theme);
	}

	fn on_key(&mut self, key: KeyEvent) {
		self.handle_key_event(key);
	}

	fn on_tick(&mut self) {
		self.tick();
	}

	fn should_quit(&self) -> bool {
		self.should_quit
	}
}

fn section_cards(rows: &[LegalSection]) -> Vec<SectionCard> {
	rows.iter()
		.map(|row| {
			SectionCard::new(row.section_number.as_str(), row.title.as_str())
				.description(row.description.as_str())
				.punishment(row.punishment.as_str())
		})
		.collect()
}

fn draw_header(frame: &mut Frame, area: Rect, account: Option<&str>, theme: &Theme) {
	let account = match account {
		Some(name) => Line::from(Span::styled(name.to_string(), theme.text.normal)),
		None => Line::from(Span::styled("Not signed in", theme.text.dim)),
	};
	let account_width = (account.width() as u16).min(area.width);
	let title_area = Rect::new(area.x, area.y, area.width - account_width, area.height.min(1));
	let account_area = Rect::new(area.right() - account_width, area.y, account_width, area.height.min(1));

	let title = Line::from(vec![
		Span::styled("Lexi", theme.text.bold),
		Span::styled("  legal section search", theme.text.dim),
	]);
	frame.render_widget(Paragraph::new(title), title_area);
	frame.render_widget(Paragraph::new(account), account_area);
}

fn draw_centered(frame: &mut Frame, area: Rect, text: impl Into<String>, theme: &Theme) {
	if area.height < 2 {
		return;
	}
	let row = Rect::new(area.x, area.y + 1, area.width, 1);
	frame.render_widget(
		Paragraph::new(text.into())
			.alignment(Alignment::Center)
			.style(theme.text.dim),
		row,
	);
}

#[cfg(test)]
impl lexi_tui_testing::InteractiveComponent for App {
	fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
		self.draw(frame, area, theme);
	}

	fn handle_key(&mut self, key: KeyEvent) {
		self.handle_key_event(key);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lexi_search_core::testing::{section, FakeSessionProvider, RecordingQueryService};
	use lexi_search_core::{QueryError, UNAUTHENTICATED_MESSAGE};
	use lexi_tui_testing::ComponentHarness;

	fn theft() -> LegalSection {
		section(
			379,
			"379",
			"Punishment for theft",
			"Whoever commits theft shall be punished.",
			"Imprisonment up to 3 years, or fine, or both",
		)
	}

	fn murder() -> LegalSection {
		section(302, "302", "Punishment for murder", "Whoever commits murder...", "Death or imprisonment for life")
	}

	fn harness(
		session: FakeSessionProvider,
		service: Arc<RecordingQueryService>,
	) -> ComponentHarness<App> {
		let app = App::new(Arc::new(session), service, Theme::dark());
		let mut harness = ComponentHarness::new(app, 100, 40);
		harness.render();
		harness
	}

	async fn settle(harness: &mut ComponentHarness<App>) {
		harness.component.settle().await;
		harness.render();
	}

	#[tokio::test]
	async fn search_shows_section_cards() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service.clone());

		harness.user_type("  theft ");
		harness.press(KeyCode::Enter);
		assert!(harness.contains("Searching..."));

		settle(&mut harness).await;

		assert_eq!(service.calls(), vec!["theft".to_string()]);
		assert!(harness.contains("Section 379"));
		assert!(harness.contains("IPC"));
		assert!(harness.contains("Punishment for theft"));
		assert!(harness.contains("Imprisonment up to 3 years, or fine, or both"));
		assert!(harness.contains("Results: 1"));
		assert!(!harness.contains("Searching..."));
	}

	#[tokio::test]
	async fn empty_result_shows_no_results_message() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service.clone());

		harness.user_type("zzzz-no-match");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(harness.contains("No results found for \"zzzz-no-match\""));
	}

	#[tokio::test]
	async fn signed_out_submit_shows_message_without_calling_backend() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		let mut harness = harness(FakeSessionProvider::signed_out(), service.clone());

		harness.user_type("theft");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(harness.contains(UNAUTHENTICATED_MESSAGE));
		assert!(harness.contains("Not signed in"));
		assert!(service.calls().is_empty());
		assert!(!harness.component.view().state().loading);
	}

	#[tokio::test]
	async fn blank_query_is_ignored() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service.clone());

		harness.user_type("   ");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(service.calls().is_empty());
		assert!(harness.contains("Type a query and press Enter"));
	}

	#[tokio::test]
	async fn backend_failure_shows_error_banner_and_keeps_results() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		service.push_response(Err(QueryError::new("permission denied for function search_legal_sections")));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service.clone());

		harness.user_type("theft");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(harness.contains("permission denied for function search_legal_sections"));
		assert!(harness.contains("Section 379"));
	}

	#[tokio::test]
	async fn newer_search_supersedes_older_one() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		service.push_response(Ok(vec![murder()]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service.clone());

		harness.user_type("theft");
		harness.press(KeyCode::Enter);
		harness.press_ctrl('u');
		harness.user_type("murder");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert_eq!(service.calls(), vec!["theft".to_string(), "murder".to_string()]);
		assert!(harness.contains("Section 302"));
		assert!(!harness.contains("Section 379"));
	}

	#[tokio::test]
	async fn sign_in_form_signs_in_with_masked_password() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::accepting("clerk@court.in", "hunter2"), service);

		harness.press_ctrl('l');
		assert!(harness.component.is_signing_in());
		assert!(harness.contains("Password"));

		harness.user_type("clerk@court.in");
		harness.press(KeyCode::Tab);
		harness.user_type("hunter2");
		assert!(!harness.contains("hunter2"));

		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(!harness.component.is_signing_in());
		assert!(harness.contains("Account: clerk@court.in"));
		assert!(harness.contains("Status: Signed in"));
	}

	#[tokio::test]
	async fn rejected_sign_in_keeps_form_open_with_message() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::accepting("clerk@court.in", "hunter2"), service);

		harness.press_ctrl('l');
		harness.user_type("clerk@court.in");
		harness.press(KeyCode::Tab);
		harness.user_type("wrong");
		harness.press(KeyCode::Enter);
		settle(&mut harness).await;

		assert!(harness.component.is_signing_in());
		assert!(harness.contains("Invalid login credentials"));
		assert!(harness.component.view().current_session().is_none());
	}

	#[tokio::test]
	async fn escape_closes_sign_in_form() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::signed_out(), service);

		harness.press_ctrl('l');
		harness.user_type("typed into the form");
		harness.press(KeyCode::Esc);

		assert!(!harness.component.is_signing_in());
		assert_eq!(harness.component.view().query(), "");
	}

	#[tokio::test]
	async fn ctrl_l_signs_out_when_signed_in() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service);

		harness.press_ctrl('l');
		settle(&mut harness).await;

		assert!(harness.component.view().current_session().is_none());
		assert!(harness.contains("Account: signed out"));
		assert!(harness.contains("Status: Signed out"));
	}

	#[tokio::test]
	async fn ctrl_c_quits() {
		let service = Arc::new(RecordingQueryService::returning(vec![]));
		let mut harness = harness(FakeSessionProvider::signed_out(), service);

		harness.press(KeyCode::Char('c'));
		assert!(!harness.component.should_quit());
		harness.press_ctrl('c');
		assert!(harness.component.should_quit());
	}

	#[tokio::test]
	async fn tick_drains_finished_work() {
		let service = Arc::new(RecordingQueryService::returning(vec![theft()]));
		let mut harness = harness(FakeSessionProvider::signed_in("clerk@court.in"), service);

		harness.user_type("theft");
		harness.press(KeyCode::Enter);
		tokio::task::yield_now().await;
		tokio::task::yield_now().await;
		harness.component.tick();

		assert!(!harness.component.view().state().loading);
		assert_eq!(harness.component.view().state().results.len(), 1);
	}
}
